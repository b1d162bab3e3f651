pub mod keyboard;
pub mod pointer;

use crate::audio::TrackCue;
use crate::core::Diorama;
use crate::input::PressState;
use crate::schedule::IntervalScheduler;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Shared handles every DOM listener closes over.
#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub diorama: Rc<RefCell<Diorama>>,
    pub scheduler: Rc<RefCell<IntervalScheduler>>,
    pub audio: Rc<RefCell<TrackCue>>,
    pub press: Rc<RefCell<PressState>>,
    /// Pick on press instead of on release.
    pub pick_on_press: bool,
}

pub fn refresh_hint(diorama: &Diorama) {
    if let Some(document) = crate::dom::window_document() {
        let c = &diorama.celebration;
        crate::overlay::update_hint(
            &document,
            &crate::core::tunables::panel_summary(&c.bloom(), c.backdrop()),
        );
    }
}
