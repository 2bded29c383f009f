use crate::core::camera::Camera;
use crate::core::controls::Controls;
use crate::core::picking::{dispatch_pick, pointer_to_ndc, Navigator};
use crate::dom;
use crate::input;
use crate::surface::Surface;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub controls: Rc<RefCell<Controls>>,
    pub surface: Rc<Surface>,
    pub navigator: Rc<dyn Navigator>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_mouse(&w);
    wire_touch(&w);
    wire_wheel(&w);
}

fn wire_mouse(w: &InputWiring) {
    let target: &web::EventTarget = w.canvas.as_ref();

    let down = w.clone();
    dom::add_active_listener(target, "mousedown", move |ev: web::MouseEvent| {
        down.controls.borrow_mut().press(input::mouse_client(&ev));
    });

    let mv = w.clone();
    dom::add_active_listener(target, "mousemove", move |ev: web::MouseEvent| {
        mv.controls.borrow_mut().move_to(input::mouse_client(&ev));
    });

    // every release doubles as a click, drag or not
    let up = w.clone();
    dom::add_active_listener(target, "mouseup", move |ev: web::MouseEvent| {
        up.controls.borrow_mut().release();
        check_pick(&up, input::mouse_client(&ev));
    });
}

fn wire_touch(w: &InputWiring) {
    let target: &web::EventTarget = w.canvas.as_ref();

    let start = w.clone();
    dom::add_active_listener(target, "touchstart", move |ev: web::TouchEvent| {
        ev.prevent_default();
        if let Some(pos) = input::first_touch(&ev.touches()) {
            start.controls.borrow_mut().press(pos);
        }
    });

    let mv = w.clone();
    dom::add_active_listener(target, "touchmove", move |ev: web::TouchEvent| {
        ev.prevent_default();
        if let Some(pos) = input::first_touch(&ev.touches()) {
            mv.controls.borrow_mut().move_to(pos);
        }
    });

    let end = w.clone();
    dom::add_active_listener(target, "touchend", move |ev: web::TouchEvent| {
        ev.prevent_default();
        end.controls.borrow_mut().release();
        // the lifted finger is only reported in changedTouches
        if let Some(pos) = input::first_touch(&ev.changed_touches()) {
            check_pick(&end, pos);
        }
    });
}

fn wire_wheel(w: &InputWiring) {
    let target: &web::EventTarget = w.canvas.as_ref();
    let wheel = w.clone();
    dom::add_active_listener(target, "wheel", move |ev: web::WheelEvent| {
        ev.prevent_default();
        let z = wheel.controls.borrow_mut().wheel(ev.delta_y() as f32);
        log::debug!("[input] camera distance {:.2}", z);
    });
}

/// Cast a ray from the camera through the release point and open whatever
/// hotspot link lies under it.
fn check_pick(w: &InputWiring, client: Vec2) {
    let ndc = pointer_to_ndc(client, input::canvas_rect(&w.canvas));
    let (distance, hull_rotation) = {
        let c = w.controls.borrow();
        (c.camera_distance, c.rotation.quat())
    };
    let camera = Camera::new(distance, input::canvas_aspect(&w.canvas));
    let (origin, dir) = camera.ray_through_ndc(ndc);
    match dispatch_pick(
        origin,
        dir,
        w.surface.hotspots(),
        hull_rotation,
        w.navigator.as_ref(),
    ) {
        Some(url) => log::info!("[pick] open {}", url),
        None => log::debug!("[pick] nothing at ({:.2}, {:.2})", ndc.x, ndc.y),
    }
}
