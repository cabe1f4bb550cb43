//! Pointer tracking and exponential smoothing.
//!
//! Input callbacks write the raw position; the frame tick calls
//! [`PointerState::step`] exactly once to move the trailing smooth position.

use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub raw: Vec2,
    pub smooth: Vec2,
    pub prev_smooth: Vec2,
    pub divergence: f32,
    pub alpha: f32,
    pub initialized: bool,
}

impl PointerState {
    pub fn new(alpha: f32) -> Self {
        Self {
            raw: Vec2::ZERO,
            smooth: Vec2::ZERO,
            prev_smooth: Vec2::ZERO,
            divergence: 0.0,
            alpha,
            initialized: false,
        }
    }

    /// Record a pointer move in container-local coordinates.
    ///
    /// The very first event snaps the smooth position so the trail does not
    /// sweep in from the origin.
    pub fn pointer_move(&mut self, pos: Vec2) {
        self.raw = pos;
        if !self.initialized {
            self.snap(pos);
        }
    }

    /// Record a press (touch start, click). `instant` forces the smooth
    /// position onto the press point.
    pub fn pointer_down(&mut self, pos: Vec2, instant: bool) {
        self.raw = pos;
        if instant || !self.initialized {
            self.snap(pos);
        }
    }

    pub fn snap(&mut self, pos: Vec2) {
        self.raw = pos;
        self.smooth = pos;
        self.prev_smooth = pos;
        self.divergence = 0.0;
        self.initialized = true;
    }

    /// Advance smoothing by one frame.
    #[inline]
    pub fn step(&mut self) {
        self.prev_smooth = self.smooth;
        self.smooth += (self.raw - self.smooth) * self.alpha;
        self.divergence = self.raw.distance(self.smooth);
    }

    /// Distance the smooth position travelled during the last step.
    #[inline]
    pub fn travel(&self) -> f32 {
        self.prev_smooth.distance(self.smooth)
    }

    pub fn is_at_rest(&self, threshold: f32) -> bool {
        self.divergence < threshold
    }
}
