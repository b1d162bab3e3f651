use crate::core::schedule::{Scheduler, Task, TaskHandle};
use fnv::FnvHashMap;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `setInterval`-backed scheduler. Firings are routed to `dispatch`.
pub struct IntervalScheduler {
    dispatch: Rc<dyn Fn(Task)>,
    // Closures must outlive their interval; dropped on cancel.
    live: FnvHashMap<i32, Closure<dyn FnMut()>>,
}

impl IntervalScheduler {
    pub fn new(dispatch: Rc<dyn Fn(Task)>) -> Self {
        Self {
            dispatch,
            live: FnvHashMap::default(),
        }
    }
}

impl Scheduler for IntervalScheduler {
    fn schedule_every(&mut self, period_ms: u32, task: Task) -> Option<TaskHandle> {
        let dispatch = self.dispatch.clone();
        let cb = Closure::wrap(Box::new(move || dispatch(task)) as Box<dyn FnMut()>);
        let armed = web::window().and_then(|w| {
            w.set_interval_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                period_ms as i32,
            )
            .ok()
        });
        let Some(id) = armed else {
            log::warn!("[schedule] setInterval unavailable for {:?}", task);
            return None;
        };
        self.live.insert(id, cb);
        Some(TaskHandle(id as u32))
    }

    fn cancel(&mut self, handle: TaskHandle) {
        let id = handle.0 as i32;
        if let Some(w) = web::window() {
            w.clear_interval_with_handle(id);
        }
        self.live.remove(&id);
    }
}
