use crate::core::celebration::AudioCue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Streams the celebration track through a plain `<audio>` element.
pub struct TrackCue {
    element: web::HtmlAudioElement,
}

impl TrackCue {
    pub fn new(url: &str) -> anyhow::Result<Self> {
        let element = web::HtmlAudioElement::new_with_src(url)
            .map_err(|e| anyhow::anyhow!("audio element error: {:?}", e))?;
        element.set_loop(false);
        element.set_preload("auto");
        Ok(Self { element })
    }
}

impl AudioCue for TrackCue {
    fn play(&mut self) {
        match self.element.play() {
            Ok(promise) => spawn_local(async move {
                // Rejected when autoplay policy blocks the gesture; the scene carries on
                if let Err(e) = JsFuture::from(promise).await {
                    log::warn!("[audio] playback rejected: {:?}", e);
                }
            }),
            Err(e) => log::warn!("[audio] play error: {:?}", e),
        }
    }
}
