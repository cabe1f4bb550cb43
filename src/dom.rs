use anyhow::anyhow;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn html_element_by_id(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

/// Create a canvas inside `container`, stacked with the given inline style.
pub fn create_canvas(
    document: &web::Document,
    container: &web::HtmlElement,
    style: &str,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas = document
        .create_element("canvas")
        .map_err(|e| anyhow!("create canvas: {:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow!("not a canvas: {:?}", e))?;
    canvas
        .set_attribute("style", style)
        .map_err(|e| anyhow!("{:?}", e))?;
    canvas
        .set_attribute("aria-hidden", "true")
        .map_err(|e| anyhow!("{:?}", e))?;
    container
        .append_child(&canvas)
        .map_err(|e| anyhow!("append canvas: {:?}", e))?;
    Ok(canvas)
}

pub fn context_2d(canvas: &web::HtmlCanvasElement) -> Option<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<web::CanvasRenderingContext2d>().ok())
}

/// Container size in CSS pixels.
#[inline]
pub fn css_size(element: &web::HtmlElement) -> (f32, f32) {
    let rect = element.get_bounding_client_rect();
    (rect.width().max(0.0) as f32, rect.height().max(0.0) as f32)
}

/// Match the canvas backing store to `css * devicePixelRatio`. Returns the
/// ratio used.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, css: (f32, f32)) -> f64 {
    let dpr = web::window()
        .map(|w| w.device_pixel_ratio())
        .filter(|d| d.is_finite() && *d > 0.0)
        .unwrap_or(1.0);
    let w_px = ((css.0 as f64) * dpr) as u32;
    let h_px = ((css.1 as f64) * dpr) as u32;
    if canvas.width() != w_px.max(1) {
        canvas.set_width(w_px.max(1));
    }
    if canvas.height() != h_px.max(1) {
        canvas.set_height(h_px.max(1));
    }
    dpr
}

/// Resolved value of a CSS property, stylesheets included.
pub fn computed_style(element: &web::Element, property: &str) -> Option<String> {
    web::window()?
        .get_computed_style(element)
        .ok()
        .flatten()?
        .get_property_value(property)
        .ok()
}

#[inline]
pub fn set_style(element: &web::HtmlElement, property: &str, value: &str) {
    _ = element.style().set_property(property, value);
}
