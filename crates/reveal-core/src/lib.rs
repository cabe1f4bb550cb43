pub mod boundary;
pub mod config;
pub mod constants;
pub mod ease;
pub mod engine;
pub mod intro;
pub mod layout;
pub mod mask;
pub mod particles;
pub mod pointer;

pub use boundary::{BackgroundLayer, FaultBoundary, LayerFrame};
pub use config::*;
pub use ease::{Ease, Segment};
pub use engine::{lag_smooth, RevealEngine, TickReport};
pub use intro::{IntroChoreographer, IntroEvents, IntroState, IntroTimeline};
pub use layout::{
    build_segments, compute_inline_layout, ElementKind, InlineLayout, InlineSegment,
    LayoutElement, LayoutParams,
};
pub use mask::{Composite, CompositeStats, FrameView, MaskCompositor, MaskFilter, Surface};
pub use particles::{Particle, ParticleField, ParticleId, ParticleSample, SizeProfile};
pub use pointer::PointerState;
