//! Damped orbit camera controls around a fixed target.
//!
//! Input accumulates rotation deltas; each `update` applies a damped share
//! of them to the camera's current spherical position, so anything that
//! moves `camera.eye` directly is respected on the next update.

use crate::constants::*;
use crate::state::Camera;
use glam::Vec3;
use std::f32::consts::{PI, TAU};

const PHI_EPS: f32 = 1e-6;

pub struct OrbitControls {
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub rotate_speed: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            damping: ORBIT_DAMPING,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            rotate_speed: ORBIT_ROTATE_SPEED,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
        }
    }
}

impl OrbitControls {
    /// Rotate by a pointer drag measured in pixels.
    pub fn drag(&mut self, dx_px: f32, dy_px: f32, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        self.delta_theta -= TAU * dx_px / viewport_height * self.rotate_speed;
        self.delta_phi -= TAU * dy_px / viewport_height * self.rotate_speed;
    }

    /// Positive notches move closer.
    pub fn zoom(&mut self, notches: f32) {
        self.scale *= ORBIT_ZOOM_STEP.powf(notches);
    }

    pub fn is_settled(&self) -> bool {
        self.delta_theta.abs() < 1e-5 && self.delta_phi.abs() < 1e-5 && self.scale == 1.0
    }

    pub fn update(&mut self, camera: &mut Camera) {
        let offset = camera.eye - camera.target;
        let radius = offset.length();
        if radius <= 0.0 {
            return;
        }
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        theta += self.delta_theta * self.damping;
        phi = (phi + self.delta_phi * self.damping).clamp(PHI_EPS, PI - PHI_EPS);
        let radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        let next = camera.target
            + Vec3::new(
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
                radius * phi.sin() * theta.cos(),
            );
        // skip the write when idle so the spherical round-trip cannot drift
        if !self.is_settled() || (next - camera.eye).length_squared() > 1e-10 {
            camera.eye = next;
        }

        self.delta_theta *= 1.0 - self.damping;
        self.delta_phi *= 1.0 - self.damping;
        self.scale = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_update_keeps_eye() {
        let mut cam = Camera::home(1.5);
        let before = cam.eye;
        let mut orbit = OrbitControls::default();
        for _ in 0..100 {
            orbit.update(&mut cam);
        }
        assert!((cam.eye - before).length() < 1e-3);
    }

    #[test]
    fn drag_rotates_and_preserves_distance() {
        let mut cam = Camera::home(1.5);
        let dist = cam.eye.length();
        let mut orbit = OrbitControls::default();
        orbit.drag(120.0, 0.0, 600.0);
        for _ in 0..200 {
            orbit.update(&mut cam);
        }
        assert!((cam.eye.length() - dist).abs() < 1e-3);
        assert!(cam.eye.x.abs() > 1.0);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = Camera::home(1.5);
        let mut orbit = OrbitControls::default();
        orbit.zoom(-500.0);
        orbit.update(&mut cam);
        assert!((cam.eye.length() - ORBIT_MAX_DISTANCE).abs() < 1e-2);
        orbit.zoom(500.0);
        orbit.update(&mut cam);
        assert!((cam.eye.length() - ORBIT_MIN_DISTANCE).abs() < 1e-3);
    }
}
