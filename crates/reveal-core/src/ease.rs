/// Easing functions used to map normalized animation progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    /// Linear interpolation.
    Linear,
    /// Quadratic ease-in/out (a gentle swell).
    InOutQuad,
    /// Cubic ease-out.
    OutCubic,
    /// Quintic ease-in (slow start, steep finish).
    InQuint,
}

impl Ease {
    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InQuint => t.powi(5),
        }
    }
}

/// A single scalar tween placed on a timeline.
///
/// Before `start` it reports `from`, after `start + duration` it reports `to`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: f32,
    pub duration: f32,
    pub from: f32,
    pub to: f32,
    pub ease: Ease,
}

impl Segment {
    pub fn end(&self) -> f32 {
        self.start + self.duration
    }

    /// Normalized progress at timeline time `t`.
    pub fn progress(&self, t: f32) -> f32 {
        if self.duration <= 0.0 {
            return if t >= self.start { 1.0 } else { 0.0 };
        }
        ((t - self.start) / self.duration).clamp(0.0, 1.0)
    }

    pub fn sample(&self, t: f32) -> f32 {
        let k = self.ease.apply(self.progress(t));
        self.from + (self.to - self.from) * k
    }
}
