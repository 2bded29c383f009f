//! Hull readout: a translucent screen hemisphere plus a typewriter message
//! drawn into a canvas texture on a plane riding the hull.
//!
//! The hemisphere is a scene-level sibling of the hull, so the frame loop
//! has to mirror the hull rotation onto it through `update_rotation`.

use crate::constants::*;
use crate::core::bitmap::BitmapSlot;
use crate::core::constants::{
    OVERLAY_RADIUS, OVERLAY_SEGMENTS, TEXT_CANVAS_PX, TEXT_PLANE_SIZE, TEXT_PLANE_Z,
    TYPEWRITER_CURSOR, TYPEWRITER_HOLD_MS, TYPEWRITER_MESSAGE, TYPEWRITER_TICK_MS,
};
use crate::core::controls::euler_xy;
use crate::core::geometry;
use crate::core::svg::TextureError;
use crate::core::typewriter::{TickOutcome, Typewriter};
use crate::render::{Attach, GpuState, Material, NodeId, Pass, TextureId, Wrap};
use crate::svg_texture::{offscreen_canvas, read_pixels};
use glam::{Mat4, Vec2, Vec3};
use std::cell::{Cell, RefCell};
use std::f32::consts::PI;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// 2D canvas the typewriter paints into.
struct TextCanvas {
    ctx: web::CanvasRenderingContext2d,
    // keeps the backing canvas alive alongside its context
    _canvas: web::HtmlCanvasElement,
    size: u32,
}

impl TextCanvas {
    fn new(size: u32) -> Result<Self, TextureError> {
        let (canvas, ctx) = offscreen_canvas(size, size)?;
        Ok(Self {
            ctx,
            _canvas: canvas,
            size,
        })
    }

    /// Clear, paint `text` centered with a green glow and publish the pixels.
    fn draw(&self, text: &str, slot: &RefCell<BitmapSlot>) {
        let s = self.size as f64;
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, s, s);
        ctx.set_fill_style_str(TEXT_COLOR);
        ctx.set_font(TEXT_FONT);
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.set_shadow_color(TEXT_COLOR);
        ctx.set_shadow_blur(TEXT_GLOW_BLUR);
        if let Err(e) = ctx.fill_text(text, s / 2.0, s / 2.0) {
            log::warn!("[monitor] fill_text failed: {:?}", e);
            return;
        }
        match read_pixels(ctx, self.size, self.size) {
            Ok(bitmap) => slot.borrow_mut().replace(bitmap),
            Err(e) => log::warn!("[monitor] {}", e),
        }
    }
}

pub struct Monitor {
    screen_overlay: NodeId,
    text_texture: TextureId,
    text: Rc<RefCell<BitmapSlot>>,
}

impl Monitor {
    pub fn new(gpu: &mut GpuState) -> anyhow::Result<Self> {
        let screen_overlay = gpu.add_mesh(
            "screen_overlay",
            &geometry::sphere(OVERLAY_RADIUS, OVERLAY_SEGMENTS, OVERLAY_SEGMENTS, 0.0, PI),
            Material {
                color: OVERLAY_COLOR,
                opacity: OVERLAY_OPACITY,
                shininess: OVERLAY_SHININESS,
                lit: true,
                texture: None,
            },
            Pass::Translucent,
            Attach::Scene,
            Mat4::IDENTITY,
        );

        let text_texture = gpu.create_texture("text_tex", TEXT_CANVAS_PX, TEXT_CANVAS_PX, Wrap::Clamp);
        gpu.add_mesh(
            "text_plane",
            &geometry::plane(TEXT_PLANE_SIZE, TEXT_PLANE_SIZE),
            Material {
                color: [1.0, 1.0, 1.0],
                opacity: TEXT_OPACITY,
                shininess: 0.0,
                lit: false,
                texture: Some(text_texture),
            },
            Pass::Translucent,
            Attach::Hull,
            Mat4::from_translation(Vec3::new(0.0, 0.0, TEXT_PLANE_Z)),
        );

        let canvas = TextCanvas::new(TEXT_CANVAS_PX).map_err(|e| anyhow::anyhow!(e))?;
        let text = Rc::new(RefCell::new(BitmapSlot::loading()));
        start_typewriter(canvas, text.clone())?;

        Ok(Self {
            screen_overlay,
            text_texture,
            text,
        })
    }

    /// Set the screen overlay's rotation to explicit values (radians).
    pub fn update_rotation(&self, gpu: &mut GpuState, rotation_x: f32, rotation_y: f32) {
        gpu.set_node_rotation(
            self.screen_overlay,
            euler_xy(Vec2::new(rotation_x, rotation_y)),
        );
    }

    /// Push a freshly drawn typewriter frame to the GPU.
    pub fn upload_text(&self, gpu: &mut GpuState) {
        let mut slot = self.text.borrow_mut();
        if let Some(bitmap) = slot.take_dirty() {
            if let Err(e) = gpu.upload_bitmap(self.text_texture, bitmap) {
                log::warn!("[monitor] {}", e);
            }
        }
    }
}

/// Run the one-shot animation on browser timers: a fixed interval while
/// typing, then a single timeout for the hold before the cursor drops.
fn start_typewriter(canvas: TextCanvas, slot: Rc<RefCell<BitmapSlot>>) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let state = Rc::new(RefCell::new(Typewriter::new(
        TYPEWRITER_MESSAGE,
        TYPEWRITER_CURSOR,
        Duration::from_millis(TYPEWRITER_TICK_MS as u64),
        Duration::from_millis(TYPEWRITER_HOLD_MS as u64),
    )));
    let canvas = Rc::new(canvas);
    let interval_id = Rc::new(Cell::new(None::<i32>));

    let id_for_tick = interval_id.clone();
    let tick = Closure::wrap(Box::new(move || {
        let outcome = state.borrow_mut().tick();
        match outcome {
            TickOutcome::Revealed => canvas.draw(&state.borrow().display_text(), &slot),
            TickOutcome::Completed => {
                let Some(w) = web::window() else {
                    return;
                };
                if let Some(id) = id_for_tick.take() {
                    w.clear_interval_with_handle(id);
                }
                let state = state.clone();
                let canvas = canvas.clone();
                let slot = slot.clone();
                let hold = Closure::once_into_js(move || {
                    if state.borrow_mut().finish_hold() {
                        canvas.draw(&state.borrow().display_text(), &slot);
                        log::info!("[monitor] typewriter done");
                    }
                });
                _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
                    hold.unchecked_ref(),
                    TYPEWRITER_HOLD_MS as i32,
                );
            }
            TickOutcome::Idle => {}
        }
    }) as Box<dyn FnMut()>);

    let id = window
        .set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            TYPEWRITER_TICK_MS as i32,
        )
        .map_err(|e| anyhow::anyhow!("setInterval failed: {:?}", e))?;
    interval_id.set(Some(id));
    tick.forget();
    Ok(())
}
