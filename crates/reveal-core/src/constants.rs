// Default tuning constants for the reveal engine.
//
// Times are in seconds, distances in CSS pixels.

// Pointer smoothing
pub const SMOOTHING_ALPHA: f32 = 0.1; // smooth += (raw - smooth) * α
pub const DIVERGENCE_THRESHOLD: f32 = 0.01; // below this the pointer is at rest

// Emission
pub const SIZE_FACTOR: f32 = 0.2; // base size = divergence * factor
pub const MOVE_THRESHOLD: f32 = 1.0; // min smooth travel before interpolating
pub const SPACING_RATIO: f32 = 0.4; // spacing step = base size * ratio
pub const MIN_SPACING: f32 = 3.0;
pub const MAX_STEPS: u32 = 64; // cap on interpolated spawns per frame
pub const MAX_PARTICLES: usize = 4096;

// Particle size profile
pub const PEAK_MULTIPLIER: f32 = 2.0; // peak = base * k, k in [2, 2.5]
pub const GROW_DURATION: f32 = 2.0;
pub const SHRINK_OFFSET: f32 = 3.0; // shrink starts at this age
pub const SHRINK_DURATION: f32 = 4.0;
pub const MIN_DRAW_SIZE: f32 = 0.1; // particles below this radius are not drawn

// Mask
pub const BACKGROUND_COLOR: &str = "#224F3C";
pub const FEATHER_RADIUS: f32 = 25.0;
pub const FILTER_CONTRAST: f32 = 30.0;

// Intro choreography
pub const LOGO_FADE_DURATION: f32 = 0.35;
pub const LOGO_SLIDE_FROM: f32 = -20.0;
pub const CHAR_DURATION: f32 = 0.08; // typewriter time per character
pub const CARET_BLINK_INTERVAL: f32 = 0.5;
pub const CARET_HIDE_DELAY: f32 = 3.0;

// Layout
pub const DEFAULT_TEXT: &str = "Your Brand Here";
pub const FONT_FAMILY: &str = "'Inter', system-ui, -apple-system, sans-serif";
pub const FONT_WEIGHT: u16 = 800;
pub const FONT_VW_FACTOR: f32 = 0.08; // clamp(2.5rem, 8vw, 7rem)
pub const FONT_SIZE_MIN: f32 = 40.0;
pub const FONT_SIZE_MAX: f32 = 112.0;
pub const LINE_HEIGHT_EM: f32 = 1.05;
pub const GAP_EM: f32 = 0.28; // inter-segment gap as a fraction of font size
pub const IMAGE_HEIGHT_EM: f32 = 0.9;
pub const HORIZONTAL_PADDING: f32 = 16.0;
pub const FALLBACK_ASPECT: f32 = 1.0; // used until an image reports its size
pub const CARET_WIDTH_EM: f32 = 0.06;
pub const TEXT_COLOR: &str = "#FFFFFF";

// Frame clock
pub const LAG_THRESHOLD: f32 = 0.5; // frame gaps longer than this are treated as a stall
pub const LAG_STEP: f32 = 1.0 / 30.0; // dt substituted after a stall
