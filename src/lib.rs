#![cfg(target_arch = "wasm32")]
use crate::constants::*;
use crate::core::bitmap::HullMaterial;
use crate::core::camera::Camera;
use crate::core::constants::{CAMERA_START_Z, SPHERE_RADIUS, SPHERE_SEGMENTS};
use crate::core::controls::Controls;
use crate::core::geometry;
use crate::core::hotspot::CATALOG;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod monitor;
mod overlay;
mod render;
mod surface;
mod svg_texture;

pub use crate::core::svg::{SvgDocument, SvgElement, TextureError};
pub use svg_texture::{create_svg_texture, load_svg_texture, svg_texture, TextureHandle};

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("hull-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);
    overlay::hide_after(LOADING_HIDE_MS);

    let Some(mut gpu) = frame::init_gpu(&canvas).await else {
        // nothing to draw into; the page stays inert
        return Ok(());
    };
    let (w, h) = gpu.size();
    log::info!("[gpu] surface ready {}x{}", w, h);

    let hull_texture = gpu.create_texture("hull_tex", 1, 1, render::Wrap::RepeatU);
    let hull = gpu.add_mesh(
        "hull",
        &geometry::uv_sphere(SPHERE_RADIUS, SPHERE_SEGMENTS, SPHERE_SEGMENTS),
        frame::hull_material(HullMaterial::Placeholder, hull_texture),
        render::Pass::Opaque,
        render::Attach::Hull,
        glam::Mat4::IDENTITY,
    );
    let hull_slot = svg_texture::load_svg_texture(HULL_TEXTURE_PATH, |e| {
        log::warn!("[texture] hull keeps placeholder material: {}", e);
    });

    let monitor = monitor::Monitor::new(&mut gpu)?;
    let surface = Rc::new(surface::Surface::new(&mut gpu, &CATALOG));

    let controls = Rc::new(RefCell::new(Controls::new(CAMERA_START_Z)));
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        controls: controls.clone(),
        surface,
        navigator: Rc::new(dom::WindowNavigator),
    });

    let camera = Camera::new(CAMERA_START_Z, input::canvas_aspect(&canvas));
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        gpu,
        canvas,
        controls,
        camera,
        hull,
        hull_texture,
        hull_slot,
        hull_material: HullMaterial::Placeholder,
        monitor,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
