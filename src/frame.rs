use crate::constants::*;
use crate::core::bitmap::{hull_material_for, HullMaterial};
use crate::core::camera::Camera;
use crate::core::constants::ROTATION_BLEND;
use crate::core::controls::Controls;
use crate::monitor::Monitor;
use crate::render::{self, Material, NodeId, TextureId};
use crate::svg_texture::TextureHandle;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub gpu: render::GpuState<'a>,
    pub canvas: web::HtmlCanvasElement,
    pub controls: Rc<RefCell<Controls>>,
    pub camera: Camera,

    pub hull: NodeId,
    pub hull_texture: TextureId,
    pub hull_slot: TextureHandle,
    pub hull_material: HullMaterial,

    pub monitor: Monitor,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let (rotation, distance) = {
            let mut c = self.controls.borrow_mut();
            c.rotation.step(ROTATION_BLEND);
            (c.rotation, c.camera_distance)
        };
        self.gpu.set_hull_rotation(rotation.quat());
        self.monitor
            .update_rotation(&mut self.gpu, rotation.current.x, rotation.current.y);

        self.sync_hull_texture();
        self.monitor.upload_text(&mut self.gpu);

        let (w, h) = (self.canvas.width(), self.canvas.height());
        self.gpu.resize_if_needed(w, h);
        self.camera.set_distance(distance);
        self.camera.set_viewport(w, h);
        self.gpu.set_camera(&self.camera);

        match self.gpu.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[gpu] surface lost, reconfiguring");
                self.gpu.reconfigure();
            }
            Err(e) => log::error!("[gpu] render error: {:?}", e),
        }
    }

    /// Upload a newly arrived hull bitmap and swap off the placeholder.
    fn sync_hull_texture(&mut self) {
        let material = {
            let mut slot = self.hull_slot.borrow_mut();
            let uploaded = slot
                .take_dirty()
                .map(|bitmap| self.gpu.upload_bitmap(self.hull_texture, bitmap));
            if let Some(Err(e)) = uploaded {
                log::error!("[texture] hull upload refused: {}", e);
                slot.fail();
            }
            hull_material_for(&slot)
        };
        if material != self.hull_material {
            self.hull_material = material;
            self.gpu
                .set_material(self.hull, hull_material(material, self.hull_texture));
            log::info!("[texture] hull material -> {:?}", material);
        }
    }
}

pub fn hull_material(kind: HullMaterial, texture: TextureId) -> Material {
    match kind {
        HullMaterial::Placeholder => {
            Material::solid(HULL_PLACEHOLDER_COLOR, HULL_PLACEHOLDER_SHININESS)
        }
        HullMaterial::Textured => Material {
            texture: Some(texture),
            ..Material::solid([1.0, 1.0, 1.0], HULL_TEXTURED_SHININESS)
        },
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let borrowed = tick.borrow();
    if let (Some(w), Some(cb)) = (web::window(), borrowed.as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
