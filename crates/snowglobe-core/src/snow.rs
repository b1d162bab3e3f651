//! Bounded snow simulation inside the globe.
//!
//! Particles live in structure-of-arrays buffers so the renderer can upload
//! `positions()` and `colors()` directly. Each particle falls by its own
//! fixed speed every update; when it leaves the enclosure (or drops below
//! the lower band edge) its position is resampled in place.

use crate::constants::{SNOW_COLOR, SNOW_RESAMPLE_ATTEMPTS, SNOW_VELOCITY_SPAN};
use crate::error::ConfigError;
use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::TAU;

/// Value view of one particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    /// Subtracted from the height every update; positive falls, negative rises.
    pub velocity: f32,
}

pub struct ParticleField {
    positions: Vec<Vec3>,
    velocities: Vec<f32>,
    colors: Vec<[f32; 3]>,
    radius: f32,
    rng: StdRng,
    positions_dirty: bool,
    colors_dirty: bool,
}

/// Draw a point with uniform direction and radial distance `radius * u`.
///
/// The direction uses `phi = acos(2v - 1)` so it is uniform over the sphere
/// surface. The linear radial draw concentrates points near the center in
/// volume terms, which is the intended look.
pub fn sample_in_sphere<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let theta = TAU * rng.gen::<f32>();
    let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
    let r = rng.gen::<f32>() * radius;
    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

/// Strict test for the horizontal band `(-radius/2, radius/2)`.
#[inline]
pub fn in_band(height: f32, radius: f32) -> bool {
    let half = radius * 0.5;
    height > -half && height < half
}

/// Expected share of sampled candidates that land in the band.
///
/// The height is `radius * u * w` with `u` uniform in [0,1) and `w` uniform
/// in [-1,1], so `P(|u w| < 1/2) = 1/2 + ln(2)/2`.
pub fn expected_band_fraction() -> f32 {
    0.5 + 0.5 * std::f32::consts::LN_2
}

impl ParticleField {
    /// Sample `requested` candidates and keep those inside the band.
    ///
    /// The resulting `len()` is below `requested`; callers must not assume
    /// an exact count.
    pub fn new(requested: usize, radius: f32, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(requested, radius, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(requested: usize, radius: f32, mut rng: StdRng) -> Result<Self, ConfigError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ConfigError::InvalidRadius(radius));
        }
        let mut positions = Vec::with_capacity(requested);
        let mut velocities = Vec::with_capacity(requested);
        for _ in 0..requested {
            let p = sample_in_sphere(&mut rng, radius);
            if in_band(p.y, radius) {
                positions.push(p);
                velocities.push((rng.gen::<f32>() - 0.5) * SNOW_VELOCITY_SPAN);
            }
        }
        log::debug!(
            "[snow] kept {} of {} candidates (radius {:.2})",
            positions.len(),
            requested,
            radius
        );
        let colors = vec![SNOW_COLOR; positions.len()];
        Ok(Self {
            positions,
            velocities,
            colors,
            radius,
            rng,
            positions_dirty: true,
            colors_dirty: true,
        })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[f32] {
        &self.velocities
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    pub fn particle(&self, index: usize) -> Option<Particle> {
        Some(Particle {
            position: *self.positions.get(index)?,
            velocity: self.velocities[index],
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Particle> + '_ {
        self.positions
            .iter()
            .zip(&self.velocities)
            .map(|(&position, &velocity)| Particle { position, velocity })
    }

    /// Advance every particle by one step and recycle the ones that left.
    ///
    /// Returns how many particles were recycled. Velocities never change.
    pub fn update(&mut self) -> usize {
        let radius = self.radius;
        let floor = -radius * 0.5;
        let mut recycled = 0;
        for (p, v) in self.positions.iter_mut().zip(&self.velocities) {
            p.y -= *v;
            if p.length() >= radius || p.y < floor {
                *p = resample(&mut self.rng, radius);
                recycled += 1;
            }
        }
        self.positions_dirty = true;
        recycled
    }

    /// Replace the per-particle colors. Positions and velocities are untouched.
    pub fn set_overlay_colors(&mut self, mut color_for: impl FnMut(usize) -> [f32; 3]) {
        for (i, c) in self.colors.iter_mut().enumerate() {
            *c = color_for(i);
        }
        self.colors_dirty = true;
    }

    /// Whether positions changed since the last `take_positions_dirty`.
    pub fn take_positions_dirty(&mut self) -> bool {
        std::mem::take(&mut self.positions_dirty)
    }

    pub fn take_colors_dirty(&mut self) -> bool {
        std::mem::take(&mut self.colors_dirty)
    }

    pub fn positions_dirty(&self) -> bool {
        self.positions_dirty
    }

    pub fn colors_dirty(&self) -> bool {
        self.colors_dirty
    }
}

/// Sample with the band rule used at initialisation.
///
/// Acceptance is about 85%, so the attempt cap is essentially never hit;
/// when it is, the height is folded into the band, which keeps the point
/// inside the sphere.
fn resample<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let mut p = sample_in_sphere(rng, radius);
    for _ in 1..SNOW_RESAMPLE_ATTEMPTS {
        if in_band(p.y, radius) {
            return p;
        }
        p = sample_in_sphere(rng, radius);
    }
    if !in_band(p.y, radius) {
        p.y *= 0.5;
    }
    p
}
