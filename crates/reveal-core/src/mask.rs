//! Overlay and reveal-mask compositing.
//!
//! The compositor draws through the [`Surface`] trait so the same code runs
//! against a browser 2D context or a recording double in tests.

use crate::config::{ContentConfig, MaskConfig, MaskStrategy};
use crate::intro::IntroState;
use crate::layout::{ElementKind, InlineLayout};
use crate::particles::ParticleField;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Composite {
    SourceOver,
    DestinationOut,
}

impl Composite {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::SourceOver => "source-over",
            Self::DestinationOut => "destination-out",
        }
    }
}

/// Blur-then-threshold filter for the gooey mask. `blur` is in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaskFilter {
    pub blur: f32,
    pub contrast: f32,
}

impl MaskFilter {
    /// CSS `filter` value for a bitmap `scale` device pixels per CSS pixel.
    /// Filter lengths ignore the canvas transform, so the blur is scaled here.
    pub fn css(&self, scale: f32) -> String {
        format!("blur({}px) contrast({})", self.blur * scale, self.contrast)
    }
}

/// Minimal 2D drawing surface. Coordinates and lengths are CSS pixels;
/// implementations own the conversion to device pixels, including the
/// shadow and filter blurs that a canvas transform does not scale.
pub trait Surface {
    fn save(&mut self);
    fn restore(&mut self);
    fn clear(&mut self, width: f32, height: f32);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str);
    fn set_global_alpha(&mut self, alpha: f32);
    fn set_composite(&mut self, op: Composite);
    /// `None` resets the filter to `none`.
    fn set_filter(&mut self, filter: Option<MaskFilter>);
    fn set_shadow(&mut self, blur: f32, color: &str);
    /// Fill the union of circles as a single path.
    fn fill_circles(&mut self, circles: &[(Vec2, f32)], color: &str);
    fn set_font(&mut self, font: &str);
    fn measure_text(&mut self, text: &str) -> f32;
    /// Left-aligned text with its vertical middle at `y`.
    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: &str);
    /// Draw a loaded asset. Returns `false` when it is not ready yet.
    fn draw_image(&mut self, key: &str, x: f32, y: f32, w: f32, h: f32) -> bool;
}

/// Everything the compositor reads for one frame.
pub struct FrameView<'a> {
    pub width: f32,
    pub height: f32,
    pub particles: &'a ParticleField,
    pub intro: &'a IntroState,
    pub layout: &'a InlineLayout,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompositeStats {
    pub holes: usize,
    pub images_drawn: usize,
    pub images_pending: usize,
    pub glyphs: usize,
    pub caret: bool,
}

pub struct MaskCompositor {
    mask: MaskConfig,
    content: Option<ContentConfig>,
    circles: Vec<(Vec2, f32)>,
}

impl MaskCompositor {
    pub fn new(mask: MaskConfig, content: Option<ContentConfig>) -> Self {
        Self {
            mask,
            content,
            circles: Vec::with_capacity(256),
        }
    }

    pub fn strategy(&self) -> MaskStrategy {
        self.mask.strategy
    }

    /// Draw one frame. With [`MaskStrategy::FilterMask`] the holes go to
    /// `mask`; without a mask surface the overlay is erased instead.
    pub fn render<S: Surface + ?Sized>(
        &mut self,
        view: &FrameView<'_>,
        overlay: &mut S,
        mask: Option<&mut S>,
    ) -> CompositeStats {
        let mut stats = CompositeStats::default();

        overlay.clear(view.width, view.height);
        overlay.fill_rect(0.0, 0.0, view.width, view.height, &self.mask.background);
        if let Some(content) = &self.content {
            draw_content(content, view, overlay, &mut stats);
        }

        let min = self.mask.min_draw_size;
        self.circles.clear();
        self.circles.extend(
            view.particles
                .iter()
                .filter(|p| p.size > min)
                .map(|p| (p.position, p.size)),
        );
        stats.holes = self.circles.len();

        match (self.mask.strategy, mask) {
            (MaskStrategy::FilterMask, Some(mask)) => self.draw_filter_mask(view, mask),
            _ => self.erase_holes(overlay),
        }
        stats
    }

    fn erase_holes<S: Surface + ?Sized>(&self, overlay: &mut S) {
        if self.circles.is_empty() {
            return;
        }
        overlay.save();
        overlay.set_composite(Composite::DestinationOut);
        overlay.set_shadow(self.mask.feather_radius, "#000");
        overlay.fill_circles(&self.circles, "#000");
        overlay.restore();
    }

    // black = hidden, white = revealed
    fn draw_filter_mask<S: Surface + ?Sized>(&self, view: &FrameView<'_>, mask: &mut S) {
        mask.clear(view.width, view.height);
        mask.set_filter(Some(MaskFilter {
            blur: self.mask.feather_radius,
            contrast: self.mask.contrast,
        }));
        mask.fill_rect(0.0, 0.0, view.width, view.height, "#000");
        if !self.circles.is_empty() {
            mask.fill_circles(&self.circles, "#fff");
        }
        mask.set_filter(None);
    }
}

fn draw_content<S: Surface + ?Sized>(
    content: &ContentConfig,
    view: &FrameView<'_>,
    surface: &mut S,
    stats: &mut CompositeStats,
) {
    let layout = view.layout;
    if layout.is_empty() {
        return;
    }
    let intro = view.intro;
    surface.set_font(&content.font(layout.font_size));

    let mut caret_at: Option<(f32, f32)> = None;
    for el in &layout.elements {
        match &el.kind {
            ElementKind::Image { key } => {
                let lead = content.lead_image.as_deref() == Some(key.as_str());
                let (opacity, offset) = if lead {
                    (intro.logo_opacity, intro.logo_offset)
                } else {
                    (intro.secondary_opacity, intro.secondary_offset)
                };
                if opacity <= 0.0 {
                    continue;
                }
                surface.set_global_alpha(opacity.min(1.0));
                if surface.draw_image(key, el.x + offset, el.y, el.width, el.height) {
                    stats.images_drawn += 1;
                } else {
                    stats.images_pending += 1;
                }
                surface.set_global_alpha(1.0);
            }
            ElementKind::Word { text, chars } => {
                if caret_at.is_none() {
                    caret_at = Some((el.x, el.center_y()));
                }
                let visible = intro
                    .revealed_chars
                    .saturating_sub(chars.start)
                    .min(chars.len());
                if visible == 0 {
                    continue;
                }
                let prefix: String = text.chars().take(visible).collect();
                surface.fill_text(&prefix, el.x, el.center_y(), &content.color);
                stats.glyphs += visible;
                let w = surface.measure_text(&prefix);
                caret_at = Some((el.x + w, el.center_y()));
            }
        }
    }

    if intro.show_caret() {
        if let Some((x, cy)) = caret_at {
            let h = layout.font_size * 0.9;
            let w = (layout.font_size * content.caret_width_em).max(1.0);
            surface.fill_rect(x + w * 0.5, cy - h * 0.5, w, h, &content.color);
            stats.caret = true;
        }
    }
}
