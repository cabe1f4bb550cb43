// Host-side tests for the web front-end's constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn asset_keys_match_content_defaults() {
    let content = reveal_core::ContentConfig::default();
    assert_eq!(content.lead_image.as_deref(), Some(LOGO_KEY));
    assert_eq!(content.trail_image.as_deref(), Some(SECONDARY_KEY));
}

#[test]
fn attributes_are_data_attributes() {
    for attr in [
        MOUNTED_ATTR,
        LOGO_SRC_ATTR,
        SECONDARY_SRC_ATTR,
        VIDEO_SRC_ATTR,
        BACKGROUND_ID_ATTR,
        CURSOR_ID_ATTR,
    ] {
        assert!(attr.starts_with("data-"), "{attr}");
    }
}

#[test]
fn overlay_stacks_above_underlay() {
    let over: i32 = OVERLAY_Z_INDEX.parse().unwrap();
    let under: i32 = UNDERLAY_Z_INDEX.parse().unwrap();
    assert!(over > under);
}

#[test]
fn canvases_ignore_pointer_events() {
    assert!(OVERLAY_CANVAS_STYLE.contains("pointer-events:none"));
    assert!(MASK_CANVAS_STYLE.contains("pointer-events:none"));
    assert!(MASK_CANVAS_STYLE.contains("opacity:0"));
}

#[test]
fn container_reset_fills_the_viewport() {
    let get = |name: &str| {
        CONTAINER_RESET
            .iter()
            .find(|(property, _)| *property == name)
            .map(|(_, value)| *value)
    };
    assert_eq!(get("margin"), Some("0"));
    assert_eq!(get("padding"), Some("0"));
    assert_eq!(get("width"), Some("100%"));
    assert_eq!(get("height"), Some("100vh"));
    assert!(RESET_LAYOUT_ATTR.starts_with("data-"));
}
