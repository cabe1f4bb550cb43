//! The per-frame driver.
//!
//! One [`RevealEngine::tick`] per display refresh: smooth the pointer, age and
//! emit particles, advance the intro clock. [`RevealEngine::render`] then
//! composites the result. The host owns scheduling and input wiring.

use crate::config::{ConfigError, RevealConfig};
use crate::constants::{FALLBACK_ASPECT, LAG_STEP, LAG_THRESHOLD};
use crate::intro::{IntroChoreographer, IntroEvents, IntroState};
use crate::layout::{build_segments, compute_inline_layout, InlineLayout, LayoutParams};
use crate::mask::{CompositeStats, FrameView, MaskCompositor, Surface};
use crate::particles::ParticleField;
use crate::pointer::PointerState;
use fnv::FnvHashMap;
use glam::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub spawned: usize,
    pub expired: usize,
    pub intro: IntroEvents,
}

/// Clamp a stalled frame gap (hidden tab, debugger) to a single short step.
#[inline]
pub fn lag_smooth(dt: f32) -> f32 {
    if !dt.is_finite() || dt < 0.0 {
        0.0
    } else if dt > LAG_THRESHOLD {
        LAG_STEP
    } else {
        dt
    }
}

pub struct RevealEngine {
    config: RevealConfig,
    pointer: PointerState,
    particles: ParticleField,
    intro: IntroChoreographer,
    compositor: MaskCompositor,
    layout: InlineLayout,
    aspects: FnvHashMap<String, f32>,
    width: f32,
    height: f32,
    layout_dirty: bool,
    torn_down: bool,
}

impl RevealEngine {
    pub fn new(config: RevealConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let text_len = config.content.as_ref().map_or(0, |c| c.text_len());
        Ok(Self {
            pointer: PointerState::new(config.smoothing.alpha),
            particles: ParticleField::new(
                &config.particles,
                config.smoothing.divergence_threshold,
            ),
            intro: IntroChoreographer::new(&config.intro, text_len),
            compositor: MaskCompositor::new(config.mask.clone(), config.content.clone()),
            layout: InlineLayout::default(),
            aspects: FnvHashMap::default(),
            width: 0.0,
            height: 0.0,
            layout_dirty: true,
            torn_down: false,
            config,
        })
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn intro(&self) -> &IntroChoreographer {
        &self.intro
    }

    pub fn intro_state(&self) -> &IntroState {
        self.intro.state()
    }

    pub fn layout(&self) -> &InlineLayout {
        &self.layout
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        if !self.torn_down {
            self.pointer.pointer_move(pos);
        }
    }

    pub fn pointer_down(&mut self, pos: Vec2, instant: bool) {
        if !self.torn_down {
            self.pointer.pointer_down(pos, instant);
        }
    }

    /// Container size in CSS pixels. Idempotent.
    pub fn resize(&mut self, width: f32, height: f32) {
        let (w, h) = (width.max(0.0), height.max(0.0));
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.layout_dirty = true;
        }
    }

    /// Report an asset's intrinsic aspect ratio once it has loaded.
    pub fn set_image_aspect(&mut self, key: &str, aspect: f32) {
        if !(aspect.is_finite() && aspect > 0.0) {
            return;
        }
        let changed = self
            .aspects
            .insert(key.to_string(), aspect)
            .map_or(true, |old| (old - aspect).abs() > f32::EPSILON);
        if changed {
            self.layout_dirty = true;
        }
    }

    pub fn tick(&mut self, dt: f32) -> TickReport {
        if self.torn_down {
            return TickReport::default();
        }
        let dt = lag_smooth(dt);
        self.pointer.step();
        // age first so this frame's particles are drawn at their spawn size
        let expired = self.particles.advance(dt);
        let spawned = if self.pointer.initialized {
            self.particles.emit(
                self.pointer.prev_smooth,
                self.pointer.smooth,
                self.pointer.divergence,
            )
        } else {
            0
        };
        let intro = self.intro.advance(dt);
        TickReport {
            spawned,
            expired,
            intro,
        }
    }

    pub fn render<S: Surface + ?Sized>(
        &mut self,
        overlay: &mut S,
        mask: Option<&mut S>,
    ) -> CompositeStats {
        if self.torn_down {
            return CompositeStats::default();
        }
        if self.layout_dirty {
            self.relayout(overlay);
        }
        let view = FrameView {
            width: self.width,
            height: self.height,
            particles: &self.particles,
            intro: self.intro.state(),
            layout: &self.layout,
        };
        self.compositor.render(&view, overlay, mask)
    }

    fn relayout<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.layout_dirty = false;
        let Some(content) = &self.config.content else {
            self.layout = InlineLayout::default();
            return;
        };
        let font_size = content.font_size_for_width(self.width);
        surface.set_font(&content.font(font_size));
        let aspect = |key: &str| self.aspects.get(key).copied().unwrap_or(FALLBACK_ASPECT);
        let segments = build_segments(
            &content.text,
            content.lead_image.as_deref().map(|k| (k, aspect(k))),
            content.trail_image.as_deref().map(|k| (k, aspect(k))),
            |word| surface.measure_text(word),
        );
        let params = LayoutParams {
            container_width: self.width,
            container_height: self.height,
            max_width: self.width - 2.0 * content.padding,
            font_size,
            gap: font_size * content.gap_em,
            line_height: font_size * content.line_height_em,
            image_height: font_size * content.image_height_em,
            fallback_aspect: FALLBACK_ASPECT,
        };
        self.layout = compute_inline_layout(&segments, &params);
        log::debug!(
            "[layout] {}x{} font={:.1} lines={} elements={}",
            self.width,
            self.height,
            font_size,
            self.layout.line_count,
            self.layout.elements.len()
        );
    }

    /// Stop the intro clock and drop every particle. Returns `false` when
    /// already torn down.
    pub fn teardown(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        self.torn_down = true;
        self.intro.cancel();
        self.particles.clear();
        self.layout = InlineLayout::default();
        log::info!("[engine] torn down");
        true
    }
}
