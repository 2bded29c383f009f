use crate::core::picking::Navigator;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Attach a listener that may call `prevent_default` (touch and wheel
/// listeners are passive by default in some browsers).
pub fn add_active_listener<E>(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) where
    E: wasm_bindgen::convert::FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(false);
    _ = target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &opts,
    );
    closure.forget();
}

/// Opens links in a new browsing context.
pub struct WindowNavigator;

impl Navigator for WindowNavigator {
    fn open(&self, url: &str) {
        if let Some(w) = web::window() {
            if let Err(e) = w.open_with_url_and_target(url, "_blank") {
                log::warn!("[pick] window.open failed: {:?}", e);
            }
        }
    }
}
