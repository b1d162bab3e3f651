#![cfg(target_arch = "wasm32")]
use crate::core::schedule::Task;
use crate::core::{Diorama, FrameOrchestrator, FrameStats, SceneConfig};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod audio;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;
mod schedule;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("snowglobe-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    dom::wire_canvas_resize(&canvas);

    let config = SceneConfig::default().with_seed(js_sys::Date::now() as u64);
    let aspect = canvas.width() as f32 / canvas.height().max(1) as f32;
    let diorama = Rc::new(RefCell::new(Diorama::new(
        &config,
        assets::centerpiece(),
        aspect,
    )?));
    diorama.borrow_mut().add_prop(assets::snowman());

    let dispatch = {
        let diorama = diorama.clone();
        Rc::new(move |task: Task| diorama.borrow_mut().on_task(task)) as Rc<dyn Fn(Task)>
    };
    let scheduler = Rc::new(RefCell::new(schedule::IntervalScheduler::new(dispatch)));
    let audio = Rc::new(RefCell::new(audio::TrackCue::new(constants::MUSIC_URL)?));

    events::keyboard::wire_global_keydown(diorama.clone(), canvas.clone());
    events::pointer::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        diorama: diorama.clone(),
        scheduler,
        audio,
        press: Rc::new(RefCell::new(input::PressState::default())),
        pick_on_press: dom::is_touch_device(),
    });
    events::refresh_hint(&diorama.borrow());

    // Attached asynchronously like a streamed model; picks miss until then
    {
        let diorama = diorama.clone();
        spawn_local(async move {
            diorama
                .borrow_mut()
                .attach_target(assets::santa(), Some(assets::CELEBRATION_CLIP.into()));
        });
    }

    let gpu = frame::init_gpu(&canvas).await?;
    overlay::hide_start(&document);
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        diorama,
        orchestrator: FrameOrchestrator::new(config.animation_step),
        gpu,
        canvas,
        stats: FrameStats::default(),
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
