use super::InputWiring;
use crate::constants::{CLICK_SLOP_PX, WHEEL_NOTCH_PX};
use crate::core::pick::{PointerSample, Viewport};
use crate::core::PickOutcome;
use crate::input;
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
}

fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Option<Vec2> {
    let rect = canvas.get_bounding_client_rect();
    input::client_to_canvas_px(
        Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
        (
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
        ),
        (canvas.width(), canvas.height()),
    )
}

fn pick(w: &InputWiring, at: Vec2) {
    let viewport = Viewport {
        width: w.canvas.width() as f32,
        height: w.canvas.height() as f32,
    };
    let mut diorama = w.diorama.borrow_mut();
    let outcome = diorama.handle_pick(
        PointerSample { x: at.x, y: at.y },
        viewport,
        &mut *w.audio.borrow_mut(),
        &mut *w.scheduler.borrow_mut(),
    );
    match outcome {
        PickOutcome::Ignored => {}
        PickOutcome::Entered => {
            log::info!("[click] celebration started");
            super::refresh_hint(&diorama);
        }
        PickOutcome::PulseToggled { running } => {
            log::info!("[click] bloom pulse running={}", running);
        }
    }
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let Some(pos) = pointer_canvas_px(&ev, &w.canvas) else {
            return;
        };
        w.press.borrow_mut().press(pos);
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        if w.pick_on_press {
            pick(&w, pos);
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let Some(pos) = pointer_canvas_px(&ev, &w.canvas) else {
            return;
        };
        let Some(delta) = w.press.borrow_mut().drag_to(pos) else {
            return;
        };
        let h = w.canvas.height() as f32;
        w.diorama.borrow_mut().orbit.drag(delta.x, delta.y, h);
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = pointer_canvas_px(&ev, &w.canvas).unwrap_or(w.press.borrow().last);
        let is_click = w.press.borrow_mut().release(pos, CLICK_SLOP_PX);
        if is_click && !w.pick_on_press {
            pick(&w, pos);
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_wheel(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let notches = input::wheel_notches(ev.delta_y(), WHEEL_NOTCH_PX);
        if notches != 0.0 {
            w.diorama.borrow_mut().orbit.zoom(notches);
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}
