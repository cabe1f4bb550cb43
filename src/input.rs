use glam::Vec2;
use web_sys as web;

// ---------------- Pointer helpers ----------------
#[inline]
pub fn client_to_local(client: Vec2, origin: Vec2) -> Vec2 {
    client - origin
}

#[inline]
fn element_origin(element: &web::HtmlElement) -> Vec2 {
    let rect = element.get_bounding_client_rect();
    Vec2::new(rect.left() as f32, rect.top() as f32)
}

/// Pointer position in CSS pixels relative to the container's top-left.
#[inline]
pub fn pointer_local(ev: &web::MouseEvent, container: &web::HtmlElement) -> Vec2 {
    let client = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
    client_to_local(client, element_origin(container))
}

/// First touch point relative to the container, if any.
#[inline]
pub fn touch_local(ev: &web::TouchEvent, container: &web::HtmlElement) -> Option<Vec2> {
    let touch = ev.touches().get(0)?;
    let client = Vec2::new(touch.client_x() as f32, touch.client_y() as f32);
    Some(client_to_local(client, element_origin(container)))
}

/// Presses from these pointer types jump the trail straight to the contact
/// point; a mouse press continues the existing trail.
#[inline]
pub fn snaps_on_press(pointer_type: &str) -> bool {
    matches!(pointer_type, "touch" | "pen")
}

/// CSS transform that centres a cursor element on `pos`.
#[inline]
pub fn cursor_transform(pos: Vec2) -> String {
    format!("translate({:.2}px, {:.2}px)", pos.x, pos.y)
}
