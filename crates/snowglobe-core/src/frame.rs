//! Per-frame driver.
//!
//! A tick runs in fixed order: snow update, animation mixers at the fixed
//! step, camera controls, then one render request. Scheduling the next
//! tick is the host's job (`requestAnimationFrame` on the web).

use crate::constants::FPS_WINDOW;
use crate::diorama::Diorama;
use crate::scene::SceneNode;
use crate::snow::ParticleField;
use crate::state::{Backdrop, BloomParams, Camera};
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::time::Duration;

/// Everything the renderer needs for one composited frame.
pub struct FrameView<'a> {
    pub camera: &'a Camera,
    /// Check `positions_dirty()`/`colors_dirty()` to skip unchanged uploads.
    pub snow: &'a ParticleField,
    pub bloom: BloomParams,
    pub backdrop: Backdrop,
    pub enclosure_radius: f32,
    pub nodes: SmallVec<[&'a SceneNode; 4]>,
}

pub trait RenderSink {
    /// Returns whether the snow buffers were uploaded. Dirty flags survive
    /// a `false` so the next frame uploads them instead.
    fn render(&mut self, frame: &FrameView<'_>) -> bool;
}

pub struct FrameOrchestrator {
    step: f32,
    ticks: u64,
}

impl FrameOrchestrator {
    pub fn new(step: f32) -> Self {
        Self { step, ticks: 0 }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn tick(&mut self, d: &mut Diorama, sink: &mut dyn RenderSink) {
        let recycled = d.snow.update();
        if recycled > d.snow.len() / 10 {
            log::debug!("[snow] recycled {} particles on tick {}", recycled, self.ticks);
        }

        for prop in &mut d.props {
            prop.advance(self.step);
        }
        if let Some(target) = d.target.node_mut() {
            target.advance(self.step);
        }
        d.orbit.update(&mut d.camera);

        if sink.render(&d.frame_view()) {
            d.snow.take_positions_dirty();
            d.snow.take_colors_dirty();
        }
        self.ticks += 1;
    }
}

/// Rolling frames-per-second estimate from wall-clock frame durations.
#[derive(Default)]
pub struct FrameStats {
    window: VecDeque<Duration>,
    total: Duration,
    frames: u64,
}

impl FrameStats {
    pub fn record(&mut self, dt: Duration) {
        self.window.push_back(dt);
        self.total += dt;
        if self.window.len() > FPS_WINDOW {
            if let Some(old) = self.window.pop_front() {
                self.total -= old;
            }
        }
        self.frames += 1;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn fps(&self) -> Option<f32> {
        let secs = self.total.as_secs_f32();
        (secs > 0.0).then(|| self.window.len() as f32 / secs)
    }
}
