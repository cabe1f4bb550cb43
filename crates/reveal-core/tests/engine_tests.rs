// Frame driver: input -> smoothing -> particles -> compositing.

mod common;

use common::{Op, RecordingSurface};
use glam::Vec2;
use reveal_core::{
    lag_smooth, BackgroundLayer, FaultBoundary, LayerFrame, RevealConfig, RevealEngine,
};

const FRAME: f32 = 1.0 / 60.0;

#[test]
fn idle_engine_emits_nothing() {
    let mut engine = RevealEngine::new(RevealConfig::default()).unwrap();
    engine.resize(800.0, 600.0);
    for _ in 0..30 {
        let report = engine.tick(FRAME);
        assert_eq!(report.spawned, 0);
    }
    assert!(engine.particles().is_empty());
}

#[test]
fn moving_pointer_leaves_a_trail_that_fades() {
    let mut engine = RevealEngine::new(RevealConfig::default()).unwrap();
    engine.resize(800.0, 600.0);
    engine.pointer_move(Vec2::new(100.0, 300.0));
    engine.tick(FRAME);
    assert!(engine.particles().is_empty(), "snapped pointer is at rest");

    engine.pointer_move(Vec2::new(400.0, 300.0));
    let mut spawned = 0;
    for _ in 0..60 {
        spawned += engine.tick(FRAME).spawned;
    }
    assert!(spawned > 0);
    assert_eq!(engine.particles().len(), spawned);
    assert!(engine.pointer().smooth.x > 390.0);

    // everything expires once the pointer rests
    let mut expired = 0;
    for _ in 0..(60 * 10) {
        expired += engine.tick(FRAME).expired;
    }
    assert!(expired >= spawned);
    assert!(engine.particles().is_empty());
}

#[test]
fn render_cuts_holes_for_live_particles() {
    let mut engine = RevealEngine::new(RevealConfig::default()).unwrap();
    engine.resize(640.0, 480.0);
    engine.pointer_move(Vec2::new(10.0, 10.0));
    engine.pointer_move(Vec2::new(300.0, 200.0));
    for _ in 0..5 {
        engine.tick(FRAME);
    }
    let mut overlay = RecordingSurface::new();
    let stats = engine.render(&mut overlay, None);
    assert!(stats.holes > 0);
    assert_eq!(overlay.ops[0], Op::Clear(640.0, 480.0));
}

#[test]
fn hero_content_lays_out_and_types() {
    let mut engine = RevealEngine::new(RevealConfig::hero()).unwrap();
    engine.resize(1200.0, 700.0);
    let mut overlay = RecordingSurface::with_ready(&["logo", "secondary"]);
    engine.render(&mut overlay, None);
    assert!(!engine.layout().is_empty());
    assert!((engine.layout().font_size - 96.0).abs() < 1e-3);

    let mut secondary = 0;
    for _ in 0..(60 * 10) {
        secondary += engine.tick(FRAME).intro.secondary_started as usize;
    }
    assert_eq!(secondary, 1);
    assert_eq!(engine.intro_state().revealed_chars, 15);

    let mut overlay = RecordingSurface::with_ready(&["logo", "secondary"]);
    let stats = engine.render(&mut overlay, None);
    assert_eq!(stats.glyphs, 13);
    assert_eq!(stats.images_drawn, 2);
    assert!(!stats.caret, "caret hidden after the intro");
}

#[test]
fn resize_and_aspect_changes_relayout() {
    let mut engine = RevealEngine::new(RevealConfig::hero()).unwrap();
    let mut surface = RecordingSurface::new();
    engine.resize(1000.0, 600.0);
    engine.render(&mut surface, None);
    let logo_w = engine.layout().elements[0].width;

    engine.set_image_aspect("logo", 3.0);
    engine.render(&mut surface, None);
    assert!((engine.layout().elements[0].width - logo_w * 3.0).abs() < 1e-3);

    engine.resize(0.0, 0.0);
    engine.render(&mut surface, None);
    assert!(engine.layout().is_empty());
}

#[test]
fn teardown_is_idempotent() {
    let mut engine = RevealEngine::new(RevealConfig::hero()).unwrap();
    engine.resize(800.0, 600.0);
    engine.pointer_move(Vec2::ZERO);
    engine.pointer_move(Vec2::new(200.0, 0.0));
    engine.tick(FRAME);
    engine.tick(FRAME);
    assert!(!engine.particles().is_empty());

    assert!(engine.teardown());
    assert!(!engine.teardown());
    assert!(engine.is_torn_down());
    assert!(engine.particles().is_empty());
    assert!(engine.intro().is_canceled());

    engine.pointer_move(Vec2::new(500.0, 500.0));
    assert_eq!(engine.tick(FRAME), Default::default());
    let mut surface = RecordingSurface::new();
    engine.render(&mut surface, None);
    assert!(surface.ops.is_empty());
}

#[test]
fn stalled_frames_are_lag_smoothed() {
    assert_eq!(lag_smooth(0.016), 0.016);
    assert!((lag_smooth(3.0) - 1.0 / 30.0).abs() < 1e-6);
    assert_eq!(lag_smooth(-1.0), 0.0);
    assert_eq!(lag_smooth(f32::NAN), 0.0);

    let mut engine = RevealEngine::new(RevealConfig::default()).unwrap();
    engine.pointer_move(Vec2::ZERO);
    engine.pointer_move(Vec2::new(100.0, 0.0));
    engine.tick(FRAME);
    let live = engine.particles().len();
    // a 10 second stall must not expire the trail in one go
    let report = engine.tick(10.0);
    assert_eq!(report.expired, 0);
    assert!(engine.particles().len() >= live);
}

#[test]
fn invalid_config_is_rejected() {
    let mut cfg = RevealConfig::default();
    cfg.smoothing.alpha = 0.0;
    assert!(RevealEngine::new(cfg).is_err());
}

struct Flaky {
    calls: usize,
    fail_on: usize,
}

impl BackgroundLayer for Flaky {
    type Error = String;

    fn render(&mut self, _frame: &LayerFrame) -> Result<(), String> {
        self.calls += 1;
        if self.calls == self.fail_on {
            Err("shader context lost".into())
        } else {
            Ok(())
        }
    }
}

#[test]
fn fault_boundary_disables_a_failing_layer() {
    let mut boundary = FaultBoundary::new("background", Flaky { calls: 0, fail_on: 3 });
    let frame = LayerFrame::default();
    assert!(boundary.render(&frame));
    assert!(boundary.render(&frame));
    assert!(!boundary.render(&frame));
    assert!(boundary.is_faulted());
    assert!(!boundary.render(&frame));
    assert_eq!(boundary.layer().calls, 3, "layer is not called after a fault");
}
