use glam::Vec2;
use web_sys as web;

// ---------------- Pointer helpers ----------------
#[inline]
pub fn mouse_client(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

/// First touch of a list; extra fingers are ignored.
#[inline]
pub fn first_touch(list: &web::TouchList) -> Option<Vec2> {
    list.get(0)
        .map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32))
}

/// Canvas bounding rect as `(left, top, width, height)` in CSS pixels.
#[inline]
pub fn canvas_rect(canvas: &web::HtmlCanvasElement) -> (f32, f32, f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    (
        rect.left() as f32,
        rect.top() as f32,
        rect.width() as f32,
        rect.height() as f32,
    )
}

#[inline]
pub fn canvas_aspect(canvas: &web::HtmlCanvasElement) -> f32 {
    canvas.width().max(1) as f32 / canvas.height().max(1) as f32
}
