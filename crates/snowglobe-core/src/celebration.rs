//! The celebration sequence entered by picking the interactive target.
//!
//! Entry fires the character clip and music once per session, recolors
//! the snow, swaps the backdrop, moves the camera and starts the bloom
//! pulse. Later hits only toggle the pulse. Nothing is reverted.

use crate::constants::{BLOOM_PULSE_INCREMENT, BLOOM_PULSE_MODULUS, BLOOM_PULSE_PERIOD_MS};
use crate::scene::InteractiveTarget;
use crate::schedule::{Scheduler, Task, TaskHandle};
use crate::snow::ParticleField;
use crate::state::{Backdrop, BloomParams, Camera};
use glam::Vec3;
use rand::prelude::*;

/// Fire-and-forget music playback.
pub trait AudioCue {
    fn play(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CelebrationState {
    Idle,
    Active,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickOutcome {
    /// Target missing, unloaded or without a celebration clip.
    Ignored,
    Entered,
    PulseToggled { running: bool },
}

/// Collaborators mutated on a pick hit.
pub struct CelebrationContext<'a> {
    pub target: &'a mut InteractiveTarget,
    pub snow: &'a mut ParticleField,
    pub camera: &'a mut Camera,
    pub audio: &'a mut dyn AudioCue,
    pub scheduler: &'a mut dyn Scheduler,
}

pub struct Celebration {
    state: CelebrationState,
    bloom: BloomParams,
    backdrop: Backdrop,
    pulse: Option<TaskHandle>,
    vantage: Vec3,
    rng: StdRng,
}

impl Celebration {
    pub fn new(bloom: BloomParams, backdrop: Backdrop, vantage: Vec3, seed: u64) -> Self {
        Self {
            state: CelebrationState::Idle,
            bloom,
            backdrop,
            pulse: None,
            vantage,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn state(&self) -> CelebrationState {
        self.state
    }

    pub fn bloom(&self) -> BloomParams {
        self.bloom
    }

    pub fn bloom_mut(&mut self) -> &mut BloomParams {
        &mut self.bloom
    }

    pub fn backdrop(&self) -> Backdrop {
        self.backdrop
    }

    pub fn set_backdrop(&mut self, backdrop: Backdrop) {
        self.backdrop = backdrop;
    }

    pub fn pulse_running(&self) -> bool {
        self.pulse.is_some()
    }

    pub fn on_pick_hit(&mut self, cx: CelebrationContext<'_>) -> PickOutcome {
        match self.state {
            CelebrationState::Idle => {
                if !cx.target.trigger_celebration_clip() {
                    return PickOutcome::Ignored;
                }
                cx.audio.play();
                let rng = &mut self.rng;
                cx.snow
                    .set_overlay_colors(|_| [rng.gen::<f32>(), rng.gen::<f32>(), rng.gen::<f32>()]);
                self.toggle_pulse(cx.scheduler);
                self.backdrop = Backdrop::default().alternate();
                cx.camera.eye = self.vantage;
                self.state = CelebrationState::Active;
                log::info!(
                    "[celebration] entered: backdrop={} eye=({:.1},{:.1},{:.1})",
                    self.backdrop,
                    self.vantage.x,
                    self.vantage.y,
                    self.vantage.z
                );
                PickOutcome::Entered
            }
            CelebrationState::Active => {
                let running = self.toggle_pulse(cx.scheduler);
                PickOutcome::PulseToggled { running }
            }
        }
    }

    /// Start the bloom pulse, or stop it leaving strength where it is.
    /// Returns whether the pulse is running afterwards.
    pub fn toggle_pulse(&mut self, scheduler: &mut dyn Scheduler) -> bool {
        match self.pulse.take() {
            Some(handle) => {
                scheduler.cancel(handle);
                log::info!("[celebration] pulse stopped at strength {:.2}", self.bloom.strength);
                false
            }
            None => {
                self.pulse = scheduler.schedule_every(BLOOM_PULSE_PERIOD_MS, Task::BloomPulse);
                if self.pulse.is_none() {
                    log::warn!("[celebration] pulse could not be scheduled");
                }
                self.pulse.is_some()
            }
        }
    }

    /// Route a scheduler firing. Stale firings after cancel are ignored.
    pub fn on_task(&mut self, task: Task) {
        match task {
            Task::BloomPulse if self.pulse.is_some() => self.pulse_bloom(),
            Task::BloomPulse => {}
        }
    }

    /// One pulse step: a repeating ramp through [0, 4).
    pub fn pulse_bloom(&mut self) {
        self.bloom.strength =
            (self.bloom.strength + BLOOM_PULSE_INCREMENT).rem_euclid(BLOOM_PULSE_MODULUS);
    }
}
