use crate::core::tunables::panel_action_for_key;
use crate::core::Diorama;
use crate::overlay;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    diorama: &Rc<RefCell<Diorama>>,
    canvas: &web::HtmlCanvasElement,
) {
    let key = ev.key();
    if let Some(action) = panel_action_for_key(&key, ev.shift_key()) {
        let mut d = diorama.borrow_mut();
        d.apply_panel(action);
        log::info!("[keys] {:?}", action);
        super::refresh_hint(&d);
        return;
    }
    match key.as_str() {
        "h" | "H" => {
            if let Some(doc) = crate::dom::window_document() {
                overlay::toggle_hint(&doc);
                if !overlay::is_hint_hidden(&doc) {
                    super::refresh_hint(&diorama.borrow());
                }
            }
            ev.prevent_default();
        }
        "Enter" => {
            if let Some(doc) = crate::dom::window_document() {
                if doc.fullscreen_element().is_some() {
                    doc.exit_fullscreen();
                } else {
                    _ = canvas.request_fullscreen();
                }
            }
            ev.prevent_default();
        }
        "Escape" => {
            if let Some(doc) = crate::dom::window_document() {
                doc.exit_fullscreen();
            }
        }
        _ => {}
    }
}

pub fn wire_global_keydown(diorama: Rc<RefCell<Diorama>>, canvas: web::HtmlCanvasElement) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &diorama, &canvas);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
