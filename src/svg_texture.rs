//! Browser-side SVG loading and rasterization.
//!
//! Markup is wrapped in a blob URL, decoded by an `<img>`, drawn onto an
//! offscreen canvas at the size the SVG declares and read back as RGBA.

use crate::core::bitmap::{Bitmap, BitmapSlot};
use crate::core::constants::MAX_RASTER_PX;
use crate::core::svg::{
    check_fetch_status, fit_raster_size, svg_dimensions, SvgDocument, SvgElement, TextureError,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Filled asynchronously; starts out `Loading` and blank.
pub type TextureHandle = Rc<RefCell<BitmapSlot>>;

/// Blob URL revoked on drop, whichever way decoding ends.
struct ObjectUrl(String);

impl ObjectUrl {
    fn for_svg(markup: &str) -> Result<Self, TextureError> {
        let parts = js_sys::Array::of1(&JsValue::from_str(markup));
        let opts = web::BlobPropertyBag::new();
        opts.set_type("image/svg+xml");
        let blob = web::Blob::new_with_str_sequence_and_options(&parts, &opts)
            .map_err(|e| TextureError::Decode(format!("{:?}", e)))?;
        let url = web::Url::create_object_url_with_blob(&blob)
            .map_err(|e| TextureError::Decode(format!("{:?}", e)))?;
        Ok(Self(url))
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        _ = web::Url::revoke_object_url(&self.0);
    }
}

async fn fetch_text(path: &str) -> Result<String, TextureError> {
    let fetch_err = |e: JsValue| TextureError::Fetch {
        path: path.to_string(),
        reason: format!("{:?}", e),
    };
    let window = web::window().ok_or_else(|| fetch_err(JsValue::from_str("no window")))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(fetch_err)?
        .dyn_into()
        .map_err(fetch_err)?;
    check_fetch_status(path, resp.status())?;
    let text = JsFuture::from(resp.text().map_err(fetch_err)?)
        .await
        .map_err(fetch_err)?;
    text.as_string()
        .ok_or_else(|| fetch_err(JsValue::from_str("body is not text")))
}

/// Fetch an SVG and rasterize it.
pub async fn load_svg(path: &str) -> Result<Bitmap, TextureError> {
    let markup = fetch_text(path).await?;
    svg_to_bitmap(&markup).await
}

/// Rasterize SVG markup at its declared size (1024 per missing side),
/// shrunk to fit the texture limit if the declared size is larger.
pub async fn svg_to_bitmap(markup: &str) -> Result<Bitmap, TextureError> {
    let declared = svg_dimensions(markup);
    let (width, height) = fit_raster_size(declared.0, declared.1, MAX_RASTER_PX);
    if (width, height) != declared {
        log::warn!(
            "[texture] declared {}x{} scaled to {}x{}",
            declared.0,
            declared.1,
            width,
            height
        );
    }
    let img = web::HtmlImageElement::new().map_err(|e| TextureError::Decode(format!("{:?}", e)))?;
    {
        let url = ObjectUrl::for_svg(markup)?;
        img.set_src(&url.0);
        JsFuture::from(img.decode())
            .await
            .map_err(|e| TextureError::Decode(format!("{:?}", e)))?;
    }
    let (_canvas, ctx) = offscreen_canvas(width, height)?;
    ctx.draw_image_with_html_image_element_and_dw_and_dh(
        &img,
        0.0,
        0.0,
        width as f64,
        height as f64,
    )
    .map_err(|e| TextureError::Canvas(format!("{:?}", e)))?;
    read_pixels(&ctx, width, height)
}

pub(crate) fn offscreen_canvas(
    width: u32,
    height: u32,
) -> Result<(web::HtmlCanvasElement, web::CanvasRenderingContext2d), TextureError> {
    let canvas_err = |e: JsValue| TextureError::Canvas(format!("{:?}", e));
    let document = crate::dom::window_document()
        .ok_or_else(|| canvas_err(JsValue::from_str("no document")))?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(canvas_err)?
        .dyn_into()
        .map_err(|el| canvas_err(el.into()))?;
    canvas.set_width(width);
    canvas.set_height(height);
    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(canvas_err)?
        .ok_or_else(|| canvas_err(JsValue::from_str("no 2d context")))?
        .dyn_into()
        .map_err(|o| canvas_err(o.into()))?;
    Ok((canvas, ctx))
}

pub(crate) fn read_pixels(
    ctx: &web::CanvasRenderingContext2d,
    width: u32,
    height: u32,
) -> Result<Bitmap, TextureError> {
    let data = ctx
        .get_image_data(0.0, 0.0, width as f64, height as f64)
        .map_err(|e| TextureError::Canvas(format!("{:?}", e)))?;
    Bitmap::from_rgba(width, height, data.data().0)
        .ok_or_else(|| TextureError::Canvas("image data size mismatch".into()))
}

/// Run `job` in the background and publish its bitmap into a fresh handle.
///
/// On failure the slot is marked failed, stays blank, and `on_error` runs.
fn spawn_into_handle(
    label: String,
    job: impl std::future::Future<Output = Result<Bitmap, TextureError>> + 'static,
    on_error: impl FnOnce(&TextureError) + 'static,
) -> TextureHandle {
    let handle: TextureHandle = Rc::new(RefCell::new(BitmapSlot::loading()));
    let slot = handle.clone();
    spawn_local(async move {
        match job.await {
            Ok(bitmap) => {
                log::info!("[texture] {} rasterized {}x{}", label, bitmap.width, bitmap.height);
                slot.borrow_mut().replace(bitmap);
            }
            Err(e) => {
                log::error!("[texture] {}: {}", label, e);
                slot.borrow_mut().fail();
                on_error(&e);
            }
        }
    });
    handle
}

/// Start loading `path` and return the handle right away.
pub fn load_svg_texture(
    path: &str,
    on_error: impl FnOnce(&TextureError) + 'static,
) -> TextureHandle {
    let owned = path.to_string();
    spawn_into_handle(path.to_string(), async move { load_svg(&owned).await }, on_error)
}

/// Rasterize markup already in hand; same handle semantics as `load_svg_texture`.
pub fn svg_texture(
    markup: String,
    on_error: impl FnOnce(&TextureError) + 'static,
) -> TextureHandle {
    spawn_into_handle(
        "inline svg".to_string(),
        async move { svg_to_bitmap(&markup).await },
        on_error,
    )
}

/// Build an SVG with `draw` (root element, namespace) and rasterize it.
pub fn create_svg_texture(
    width: u32,
    height: u32,
    draw: impl FnOnce(&mut SvgElement, &str),
    on_error: impl FnOnce(&TextureError) + 'static,
) -> TextureHandle {
    svg_texture(SvgDocument::build(width, height, draw).to_markup(), on_error)
}
