use crate::constants::*;
use crate::error::ConfigError;
use crate::state::{Backdrop, BloomParams};
use glam::Vec3;

/// Runtime scene settings. `Default` reproduces the shipped diorama.
#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub particle_request: usize,
    pub enclosure_scale: f32,
    pub seed: u64,
    /// Clip time added per tick, independent of wall-clock time.
    pub animation_step: f32,
    pub bloom: BloomParams,
    pub backdrop: Backdrop,
    pub home_eye: Vec3,
    pub celebration_eye: Vec3,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_request: SNOW_PARTICLE_REQUEST,
            enclosure_scale: ENCLOSURE_SCALE,
            seed: 42,
            animation_step: ANIMATION_STEP,
            bloom: BloomParams::default(),
            backdrop: Backdrop::Sunset,
            home_eye: CAMERA_HOME_EYE,
            celebration_eye: CELEBRATION_EYE,
        }
    }
}

impl SceneConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("enclosure_scale", self.enclosure_scale),
            ("animation_step", self.animation_step),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        Ok(())
    }
}
