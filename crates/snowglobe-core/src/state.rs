//! Visual-side state types shared with the web frontend.
//!
//! These types avoid referencing platform-specific APIs. The web frontend
//! reads them each frame to build camera matrices, bloom uniforms and the
//! backdrop palette.

use crate::constants::*;
use crate::error::ConfigError;
use glam::{Mat4, Vec3};
use std::fmt;
use std::str::FromStr;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// The diorama's opening view: looking at the globe center from the front.
    pub fn home(aspect: f32) -> Self {
        Self {
            eye: CAMERA_HOME_EYE,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOVY_DEGREES.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}

/// Parameters of the post-process glow.
///
/// `strength` scales the blurred highlights added back onto the scene,
/// `radius` widens the blur footprint and `threshold` is the luminance a
/// pixel must exceed to contribute.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BloomParams {
    pub strength: f32,
    pub radius: f32,
    pub threshold: f32,
}

impl Default for BloomParams {
    fn default() -> Self {
        Self {
            strength: BLOOM_STRENGTH,
            radius: BLOOM_RADIUS,
            threshold: BLOOM_THRESHOLD,
        }
    }
}

/// Background environment behind the globe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Backdrop {
    #[default]
    Sunset,
    Night,
}

impl Backdrop {
    pub const ALL: [Backdrop; 2] = [Backdrop::Sunset, Backdrop::Night];

    pub fn name(self) -> &'static str {
        match self {
            Backdrop::Sunset => "sunset",
            Backdrop::Night => "night",
        }
    }

    /// The backdrop the celebration switches to.
    pub fn alternate(self) -> Self {
        match self {
            Backdrop::Sunset => Backdrop::Night,
            Backdrop::Night => Backdrop::Sunset,
        }
    }

    /// Top and bottom colors of the gradient drawn behind the scene.
    pub fn gradient(self) -> ([f32; 3], [f32; 3]) {
        match self {
            Backdrop::Sunset => ([0.32, 0.22, 0.45], [0.98, 0.55, 0.30]),
            Backdrop::Night => ([0.01, 0.02, 0.06], [0.06, 0.09, 0.22]),
        }
    }
}

impl fmt::Display for Backdrop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backdrop {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Backdrop::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownBackdrop(s.to_string()))
    }
}
