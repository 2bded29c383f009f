use crate::constants::LOADING_ID;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(LOADING_ID) {
        let cl = el.class_list();
        _ = cl.add_1("hidden");
        // fallback
        _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    if let Some(el) = document.get_element_by_id(LOADING_ID) {
        if el.class_list().contains("hidden") {
            return true;
        }
        return el
            .get_attribute("style")
            .map(|s| s.contains("display:none"))
            .unwrap_or(false);
    }
    false
}

/// Hide the loading screen once `delay_ms` has passed.
pub fn hide_after(delay_ms: i32) {
    let Some(window) = web::window() else {
        return;
    };
    let cb = Closure::once_into_js(move || {
        if let Some(doc) = crate::dom::window_document() {
            if !is_hidden(&doc) {
                hide(&doc);
            }
        }
    });
    _ = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), delay_ms);
}
