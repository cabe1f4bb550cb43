//! Engine configuration.
//!
//! Every tunable the engine reads lives here. Defaults come from
//! [`crate::constants`]; hosts override individual fields and call
//! [`RevealConfig::validate`] before building an engine.

use crate::constants::*;
use crate::ease::Ease;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("smoothing factor must be in (0, 1], got {0}")]
    Smoothing(f32),
    #[error("{name} must be a finite non-negative number, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("{name} must be greater than zero, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("peak multiplier must be at least 1, got {0}")]
    PeakMultiplier(f32),
    #[error("shrink offset {offset} starts before the grow phase ends at {grow}")]
    ShrinkBeforeGrow { offset: f32, grow: f32 },
    #[error("font size range is inverted: min {min} > max {max}")]
    FontRange { min: f32, max: f32 },
}

/// How particle holes are cut into the overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MaskStrategy {
    /// Erase from the overlay with `destination-out` and a shadow blur.
    #[default]
    Erase,
    /// Render a blur+contrast mask on a separate surface and let the host
    /// apply it over the background layer.
    FilterMask,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SmoothingConfig {
    pub alpha: f32,
    pub divergence_threshold: f32,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            alpha: SMOOTHING_ALPHA,
            divergence_threshold: DIVERGENCE_THRESHOLD,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleConfig {
    pub size_factor: f32,
    pub peak_multiplier: f32,
    pub grow_duration: f32,
    pub grow_ease: Ease,
    /// Age at which the shrink phase starts (timeline position, not a gap).
    pub shrink_offset: f32,
    pub shrink_duration: f32,
    pub shrink_ease: Ease,
    pub move_threshold: f32,
    pub spacing_ratio: f32,
    pub min_spacing: f32,
    pub max_steps: u32,
    pub max_particles: usize,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            size_factor: SIZE_FACTOR,
            peak_multiplier: PEAK_MULTIPLIER,
            grow_duration: GROW_DURATION,
            grow_ease: Ease::InOutQuad,
            shrink_offset: SHRINK_OFFSET,
            shrink_duration: SHRINK_DURATION,
            shrink_ease: Ease::InQuint,
            move_threshold: MOVE_THRESHOLD,
            spacing_ratio: SPACING_RATIO,
            min_spacing: MIN_SPACING,
            max_steps: MAX_STEPS,
            max_particles: MAX_PARTICLES,
        }
    }
}

impl ParticleConfig {
    /// Total lifetime of a particle in seconds.
    pub fn lifetime(&self) -> f32 {
        self.shrink_offset + self.shrink_duration
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IntroConfig {
    pub start_delay: f32,
    pub logo_duration: f32,
    pub logo_ease: Ease,
    pub slide_from: f32,
    pub char_duration: f32,
    pub secondary_duration: f32,
    pub caret_blink_interval: f32,
    pub caret_hide_delay: f32,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            start_delay: 0.0,
            logo_duration: LOGO_FADE_DURATION,
            logo_ease: Ease::OutCubic,
            slide_from: LOGO_SLIDE_FROM,
            char_duration: CHAR_DURATION,
            secondary_duration: LOGO_FADE_DURATION,
            caret_blink_interval: CARET_BLINK_INTERVAL,
            caret_hide_delay: CARET_HIDE_DELAY,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MaskConfig {
    pub strategy: MaskStrategy,
    pub background: String,
    pub feather_radius: f32,
    pub contrast: f32,
    pub min_draw_size: f32,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            strategy: MaskStrategy::default(),
            background: BACKGROUND_COLOR.to_string(),
            feather_radius: FEATHER_RADIUS,
            contrast: FILTER_CONTRAST,
            min_draw_size: MIN_DRAW_SIZE,
        }
    }
}

/// Text and logo content drawn onto the overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentConfig {
    pub text: String,
    pub font_family: String,
    pub font_weight: u16,
    pub color: String,
    pub font_vw_factor: f32,
    pub font_size_min: f32,
    pub font_size_max: f32,
    pub line_height_em: f32,
    pub gap_em: f32,
    pub image_height_em: f32,
    pub padding: f32,
    pub caret_width_em: f32,
    /// Logical asset key of the logo placed before the text, if any.
    pub lead_image: Option<String>,
    /// Logical asset key of the secondary logo/media placed after the text.
    pub trail_image: Option<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_string(),
            font_family: FONT_FAMILY.to_string(),
            font_weight: FONT_WEIGHT,
            color: TEXT_COLOR.to_string(),
            font_vw_factor: FONT_VW_FACTOR,
            font_size_min: FONT_SIZE_MIN,
            font_size_max: FONT_SIZE_MAX,
            line_height_em: LINE_HEIGHT_EM,
            gap_em: GAP_EM,
            image_height_em: IMAGE_HEIGHT_EM,
            padding: HORIZONTAL_PADDING,
            caret_width_em: CARET_WIDTH_EM,
            lead_image: Some("logo".to_string()),
            trail_image: Some("secondary".to_string()),
        }
    }
}

impl ContentConfig {
    /// Font size for a container width, clamped to the configured range.
    pub fn font_size_for_width(&self, width: f32) -> f32 {
        (width * self.font_vw_factor).clamp(self.font_size_min, self.font_size_max)
    }

    /// CSS font shorthand for a given pixel size.
    pub fn font(&self, size: f32) -> String {
        format!("{} {:.2}px {}", self.font_weight, size, self.font_family)
    }

    /// Number of characters revealed by the typewriter.
    pub fn text_len(&self) -> usize {
        self.text.split_whitespace().collect::<Vec<_>>().join(" ").chars().count()
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct RevealConfig {
    pub smoothing: SmoothingConfig,
    pub particles: ParticleConfig,
    pub intro: IntroConfig,
    pub mask: MaskConfig,
    /// `None` draws only the opaque fill.
    pub content: Option<ContentConfig>,
}

impl RevealConfig {
    /// The full hero: fill, logos and typewriter text.
    pub fn hero() -> Self {
        Self {
            content: Some(ContentConfig::default()),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = self.smoothing.alpha;
        if !(a > 0.0 && a <= 1.0) {
            return Err(ConfigError::Smoothing(a));
        }
        non_negative("divergence threshold", self.smoothing.divergence_threshold)?;

        let p = &self.particles;
        non_negative("size factor", p.size_factor)?;
        if !(p.peak_multiplier >= 1.0) {
            return Err(ConfigError::PeakMultiplier(p.peak_multiplier));
        }
        non_negative("grow duration", p.grow_duration)?;
        positive("shrink duration", p.shrink_duration)?;
        non_negative("move threshold", p.move_threshold)?;
        non_negative("spacing ratio", p.spacing_ratio)?;
        positive("min spacing", p.min_spacing)?;
        if p.shrink_offset < p.grow_duration {
            return Err(ConfigError::ShrinkBeforeGrow {
                offset: p.shrink_offset,
                grow: p.grow_duration,
            });
        }

        let i = &self.intro;
        non_negative("start delay", i.start_delay)?;
        non_negative("logo duration", i.logo_duration)?;
        non_negative("char duration", i.char_duration)?;
        non_negative("secondary duration", i.secondary_duration)?;
        positive("caret blink interval", i.caret_blink_interval)?;
        non_negative("caret hide delay", i.caret_hide_delay)?;

        non_negative("feather radius", self.mask.feather_radius)?;
        non_negative("contrast", self.mask.contrast)?;

        if let Some(c) = &self.content {
            positive("font size min", c.font_size_min)?;
            if c.font_size_min > c.font_size_max {
                return Err(ConfigError::FontRange {
                    min: c.font_size_min,
                    max: c.font_size_max,
                });
            }
            positive("line height", c.line_height_em)?;
            non_negative("gap", c.gap_em)?;
            positive("image height", c.image_height_em)?;
            non_negative("padding", c.padding)?;
        }
        Ok(())
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}
