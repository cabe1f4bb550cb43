use reveal_core::{ContentConfig, MaskStrategy, RevealConfig};
use thiserror::Error;

// Page-level configuration overrides read from `data-*` attributes on the
// mount container. Pure string handling so it can be tested on the host.

/// Attribute names (without the `data-` prefix) recognised as overrides.
pub const OVERRIDE_KEYS: &[&str] = &[
    "smoothing",
    "size-factor",
    "peak-multiplier",
    "grow-duration",
    "shrink-offset",
    "shrink-duration",
    "divergence-threshold",
    "max-steps",
    "background",
    "text",
    "font-family",
    "caret-blink",
    "char-duration",
    "logo-duration",
    "feather",
    "strategy",
    "content",
];

#[derive(Debug, Error, PartialEq)]
pub enum OverrideError {
    #[error("unknown option data-{0}")]
    UnknownKey(String),
    #[error("data-{key}: expected a number, got {value:?}")]
    BadNumber { key: String, value: String },
    #[error("data-strategy: expected \"erase\" or \"filter\", got {0:?}")]
    BadStrategy(String),
}

#[inline]
pub fn strategy_from_str(value: &str) -> Option<MaskStrategy> {
    match value.trim().to_ascii_lowercase().as_str() {
        "erase" | "destination-out" => Some(MaskStrategy::Erase),
        "filter" | "mask" => Some(MaskStrategy::FilterMask),
        _ => None,
    }
}

fn number(key: &str, value: &str) -> Result<f32, OverrideError> {
    value
        .trim()
        .trim_end_matches("px")
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| OverrideError::BadNumber {
            key: key.to_string(),
            value: value.to_string(),
        })
}

fn content_mut(cfg: &mut RevealConfig) -> &mut ContentConfig {
    cfg.content.get_or_insert_with(ContentConfig::default)
}

/// Apply one `data-<key>="<value>"` override.
pub fn apply_override(cfg: &mut RevealConfig, key: &str, value: &str) -> Result<(), OverrideError> {
    match key {
        "smoothing" => cfg.smoothing.alpha = number(key, value)?,
        "size-factor" => cfg.particles.size_factor = number(key, value)?,
        "peak-multiplier" => cfg.particles.peak_multiplier = number(key, value)?,
        "grow-duration" => cfg.particles.grow_duration = number(key, value)?,
        "shrink-offset" => cfg.particles.shrink_offset = number(key, value)?,
        "shrink-duration" => cfg.particles.shrink_duration = number(key, value)?,
        "divergence-threshold" => cfg.smoothing.divergence_threshold = number(key, value)?,
        "max-steps" => cfg.particles.max_steps = number(key, value)?.max(1.0) as u32,
        "background" => cfg.mask.background = value.trim().to_string(),
        "text" => content_mut(cfg).text = value.to_string(),
        "font-family" => content_mut(cfg).font_family = value.to_string(),
        "caret-blink" => cfg.intro.caret_blink_interval = number(key, value)?,
        "char-duration" => cfg.intro.char_duration = number(key, value)?,
        "logo-duration" => {
            let d = number(key, value)?;
            cfg.intro.logo_duration = d;
            cfg.intro.secondary_duration = d;
        }
        "feather" => cfg.mask.feather_radius = number(key, value)?,
        "strategy" => {
            cfg.mask.strategy =
                strategy_from_str(value).ok_or_else(|| OverrideError::BadStrategy(value.into()))?
        }
        "content" => {
            if matches!(value.trim(), "none" | "off" | "false") {
                cfg.content = None;
            } else {
                content_mut(cfg);
            }
        }
        other => return Err(OverrideError::UnknownKey(other.to_string())),
    }
    Ok(())
}

/// Apply every override in order. Bad values are skipped and returned so the
/// caller can log them; the rest still apply.
pub fn apply_overrides<'a>(
    cfg: &mut RevealConfig,
    pairs: impl IntoIterator<Item = (&'a str, String)>,
) -> Vec<OverrideError> {
    let mut rejected = Vec::new();
    for (key, value) in pairs {
        if let Err(e) = apply_override(cfg, key, &value) {
            rejected.push(e);
        }
    }
    rejected
}

/// Whether a mount should apply the full-viewport box reset. Only the
/// automatic mount does, unless the container opts out with `"false"`.
pub fn wants_layout_reset(auto_mounted: bool, attr: Option<&str>) -> bool {
    auto_mounted
        && !matches!(
            attr.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
            Some("false" | "off" | "none")
        )
}

/// Whether the container must be made `relative` so the absolutely
/// positioned canvases stack against it. `computed` is the resolved
/// `position`; anything already positioned is left alone.
pub fn needs_relative_position(computed: &str) -> bool {
    matches!(computed.trim(), "" | "static")
}
