// Overlay compositing through a recording surface.

mod common;

use common::{Op, RecordingSurface};
use glam::Vec2;
use reveal_core::{
    build_segments, compute_inline_layout, Composite, ContentConfig, FrameView, IntroState,
    LayoutParams, MaskCompositor, MaskConfig, MaskFilter, MaskStrategy, ParticleConfig,
    ParticleField,
};

fn field_with(points: &[(f32, f32, f32)]) -> ParticleField {
    let mut field = ParticleField::new(&ParticleConfig::default(), 0.01);
    for &(x, y, size) in points {
        field.spawn(Vec2::new(x, y), size);
    }
    field
}

fn revealed(n: usize) -> IntroState {
    IntroState {
        logo_opacity: 1.0,
        logo_offset: 0.0,
        revealed_chars: n,
        secondary_opacity: 0.5,
        secondary_offset: -10.0,
        caret_visible: true,
        caret_hidden: false,
    }
}

#[test]
fn erase_strategy_cuts_feathered_holes() {
    let field = field_with(&[(10.0, 10.0, 5.0), (20.0, 10.0, 0.05), (40.0, 40.0, 8.0)]);
    let intro = IntroState::initial(-20.0);
    let layout = Default::default();
    let view = FrameView {
        width: 200.0,
        height: 100.0,
        particles: &field,
        intro: &intro,
        layout: &layout,
    };
    let mut compositor = MaskCompositor::new(MaskConfig::default(), None);
    let mut overlay = RecordingSurface::new();
    let stats = compositor.render(&view, &mut overlay, None);

    assert_eq!(stats.holes, 2, "sub-threshold particle is skipped");
    assert_eq!(overlay.ops[0], Op::Clear(200.0, 100.0));
    assert!(matches!(&overlay.ops[1], Op::FillRect { color, w, .. } if color == "#224F3C" && *w == 200.0));
    let tail = &overlay.ops[overlay.ops.len() - 5..];
    assert_eq!(tail[0], Op::Save);
    assert_eq!(tail[1], Op::Composite(Composite::DestinationOut));
    assert_eq!(tail[2], Op::Shadow(25.0));
    assert!(matches!(&tail[3], Op::Circles { count: 2, .. }));
    assert_eq!(tail[4], Op::Restore);
    assert_eq!(overlay.circles[1], (Vec2::new(40.0, 40.0), 8.0));
}

#[test]
fn no_particles_means_no_erase_pass() {
    let field = field_with(&[]);
    let intro = IntroState::initial(-20.0);
    let layout = Default::default();
    let view = FrameView {
        width: 50.0,
        height: 50.0,
        particles: &field,
        intro: &intro,
        layout: &layout,
    };
    let mut compositor = MaskCompositor::new(MaskConfig::default(), None);
    let mut overlay = RecordingSurface::new();
    compositor.render(&view, &mut overlay, None);
    assert_eq!(overlay.count(|op| matches!(op, Op::Composite(_))), 0);
    assert_eq!(overlay.ops.len(), 2);
}

#[test]
fn filter_strategy_renders_to_mask_surface() {
    let field = field_with(&[(10.0, 10.0, 5.0)]);
    let intro = IntroState::initial(-20.0);
    let layout = Default::default();
    let view = FrameView {
        width: 80.0,
        height: 60.0,
        particles: &field,
        intro: &intro,
        layout: &layout,
    };
    let cfg = MaskConfig {
        strategy: MaskStrategy::FilterMask,
        ..MaskConfig::default()
    };
    let mut compositor = MaskCompositor::new(cfg, None);
    let mut overlay = RecordingSurface::new();
    let mut mask = RecordingSurface::new();
    compositor.render(&view, &mut overlay, Some(&mut mask));

    assert_eq!(overlay.count(|op| matches!(op, Op::Circles { .. })), 0);
    assert_eq!(
        mask.ops,
        vec![
            Op::Clear(80.0, 60.0),
            Op::Filter(Some(MaskFilter {
                blur: 25.0,
                contrast: 30.0
            })),
            Op::FillRect {
                x: 0.0,
                y: 0.0,
                w: 80.0,
                h: 60.0,
                color: "#000".into()
            },
            Op::Circles {
                count: 1,
                color: "#fff".into()
            },
            Op::Filter(None),
        ]
    );
}

#[test]
fn feather_reaches_the_surface_in_css_pixels() {
    let field = field_with(&[(10.0, 10.0, 5.0)]);
    let intro = IntroState::initial(-20.0);
    let layout = reveal_core::InlineLayout::default();
    let view = FrameView {
        width: 80.0,
        height: 60.0,
        particles: &field,
        intro: &intro,
        layout: &layout,
    };
    for strategy in [MaskStrategy::Erase, MaskStrategy::FilterMask] {
        let cfg = MaskConfig {
            strategy,
            feather_radius: 12.0,
            ..MaskConfig::default()
        };
        let mut compositor = MaskCompositor::new(cfg, None);
        let mut overlay = RecordingSurface::new();
        let mut mask = RecordingSurface::new();
        compositor.render(&view, &mut overlay, Some(&mut mask));
        let feathers: Vec<f32> = overlay
            .ops
            .iter()
            .chain(mask.ops.iter())
            .filter_map(|op| match op {
                Op::Shadow(blur) => Some(*blur),
                Op::Filter(Some(f)) => Some(f.blur),
                _ => None,
            })
            .collect();
        assert_eq!(feathers, vec![12.0], "{strategy:?}");
    }
}

#[test]
fn mask_filter_blur_scales_to_device_pixels() {
    let filter = MaskFilter {
        blur: 25.0,
        contrast: 30.0,
    };
    assert_eq!(filter.css(1.0), "blur(25px) contrast(30)");
    assert_eq!(filter.css(2.0), "blur(50px) contrast(30)");
}

#[test]
fn filter_strategy_without_mask_surface_erases() {
    let field = field_with(&[(10.0, 10.0, 5.0)]);
    let intro = IntroState::initial(-20.0);
    let layout = Default::default();
    let view = FrameView {
        width: 80.0,
        height: 60.0,
        particles: &field,
        intro: &intro,
        layout: &layout,
    };
    let cfg = MaskConfig {
        strategy: MaskStrategy::FilterMask,
        ..MaskConfig::default()
    };
    let mut compositor = MaskCompositor::new(cfg, None);
    let mut overlay = RecordingSurface::new();
    compositor.render(&view, &mut overlay, None);
    assert_eq!(overlay.count(|op| matches!(op, Op::Circles { .. })), 1);
}

fn content_layout(content: &ContentConfig) -> reveal_core::InlineLayout {
    let segs = build_segments(
        &content.text,
        Some(("logo", 1.0)),
        Some(("secondary", 1.0)),
        |w| w.chars().count() as f32 * 10.0,
    );
    compute_inline_layout(
        &segs,
        &LayoutParams {
            container_width: 1000.0,
            container_height: 400.0,
            max_width: 968.0,
            font_size: 50.0,
            gap: 10.0,
            line_height: 60.0,
            image_height: 40.0,
            fallback_aspect: 1.0,
        },
    )
}

#[test]
fn typewriter_draws_revealed_prefixes_and_caret() {
    let content = ContentConfig::default();
    let layout = content_layout(&content);
    let field = field_with(&[]);
    let intro = revealed(7); // "Your" + space + "Br"
    let view = FrameView {
        width: 1000.0,
        height: 400.0,
        particles: &field,
        intro: &intro,
        layout: &layout,
    };
    let mut compositor = MaskCompositor::new(MaskConfig::default(), Some(content));
    let mut overlay = RecordingSurface::with_ready(&["logo"]);
    let stats = compositor.render(&view, &mut overlay, None);

    assert_eq!(overlay.texts(), vec!["Your".to_string(), "Br".to_string()]);
    assert_eq!(stats.glyphs, 6);
    assert_eq!(stats.images_drawn, 1);
    assert_eq!(stats.images_pending, 1, "secondary not loaded yet");
    assert!(stats.caret);

    // caret sits right after "Br"
    let brand_x = layout
        .words()
        .nth(1)
        .map(|e| e.x)
        .unwrap();
    let caret = overlay.ops.iter().rev().find_map(|op| match op {
        Op::FillRect { x, color, .. } if color == "#FFFFFF" => Some(*x),
        _ => None,
    });
    let caret_w = 50.0 * 0.06;
    assert!((caret.unwrap() - (brand_x + 20.0 + caret_w * 0.5)).abs() < 1e-3);
}

#[test]
fn images_slide_with_their_phase_offset() {
    let content = ContentConfig::default();
    let layout = content_layout(&content);
    let field = field_with(&[]);
    let intro = revealed(15);
    let view = FrameView {
        width: 1000.0,
        height: 400.0,
        particles: &field,
        intro: &intro,
        layout: &layout,
    };
    let mut compositor = MaskCompositor::new(MaskConfig::default(), Some(content));
    let mut overlay = RecordingSurface::with_ready(&["logo", "secondary"]);
    compositor.render(&view, &mut overlay, None);

    let images = overlay.images();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0].1, layout.elements[0].x);
    let last = layout.elements.last().unwrap();
    assert!((images[1].1 - (last.x - 10.0)).abs() < 1e-4);
    assert!(overlay.ops.contains(&Op::Alpha(0.5)));
}

#[test]
fn hidden_caret_is_not_drawn() {
    let content = ContentConfig::default();
    let layout = content_layout(&content);
    let field = field_with(&[]);
    let mut intro = revealed(15);
    intro.caret_hidden = true;
    let view = FrameView {
        width: 1000.0,
        height: 400.0,
        particles: &field,
        intro: &intro,
        layout: &layout,
    };
    let mut compositor = MaskCompositor::new(MaskConfig::default(), Some(content));
    let mut overlay = RecordingSurface::new();
    let stats = compositor.render(&view, &mut overlay, None);
    assert!(!stats.caret);
    assert_eq!(stats.glyphs, 13);
    assert_eq!(overlay.texts(), vec!["Your", "Brand", "Here"]);
}

#[test]
fn invisible_images_are_skipped() {
    let content = ContentConfig::default();
    let layout = content_layout(&content);
    let field = field_with(&[]);
    let intro = IntroState::initial(-20.0);
    let view = FrameView {
        width: 1000.0,
        height: 400.0,
        particles: &field,
        intro: &intro,
        layout: &layout,
    };
    let mut compositor = MaskCompositor::new(MaskConfig::default(), Some(content));
    let mut overlay = RecordingSurface::with_ready(&["logo", "secondary"]);
    let stats = compositor.render(&view, &mut overlay, None);
    assert_eq!(stats.images_drawn + stats.images_pending, 0);
    assert!(overlay.texts().is_empty());
    // caret waits at the start of the first word
    assert!(stats.caret);
}
