// Shared fixtures for the host-side integration tests.

#![allow(dead_code)]

use glam::Vec3;
use snowglobe_core::anim::{AnimationClip, AnimationMixer, Channel, Track};
use snowglobe_core::celebration::AudioCue;
use snowglobe_core::scene::{AnimatedNode, SceneNode, Transform, TriMesh};
use snowglobe_core::{Diorama, SceneConfig};

pub const WAVE: &str = "wave";

#[derive(Default)]
pub struct CountingAudio {
    pub plays: usize,
}

impl AudioCue for CountingAudio {
    fn play(&mut self) {
        self.plays += 1;
    }
}

/// A 20 × 20 × 20 block standing in for the loaded environment.
pub fn centerpiece() -> AnimatedNode {
    let root = SceneNode::new("centerpiece")
        .with_mesh(TriMesh::cuboid(Vec3::splat(10.0), [0.8, 0.9, 1.0]));
    AnimatedNode::still(root)
}

/// Two-part rig at the origin: a body cube with a head above it.
pub fn rig() -> SceneNode {
    SceneNode::new("santa").with_child(
        SceneNode::new("body")
            .with_mesh(TriMesh::cuboid(Vec3::ONE, [0.8, 0.1, 0.1]))
            .with_child(
                SceneNode::new("head")
                    .with_transform(Transform::from_translation(Vec3::new(0.0, 1.6, 0.0)))
                    .with_mesh(TriMesh::cuboid(Vec3::splat(0.5), [1.0, 0.8, 0.7])),
            ),
    )
}

/// Slides the body from x = 0 to x = 30 over one second.
pub fn slide_clip() -> AnimationClip {
    AnimationClip::new(
        WAVE,
        vec![Channel {
            node: "body".into(),
            track: Track::Translation(vec![(0.0, Vec3::ZERO), (1.0, Vec3::new(30.0, 0.0, 0.0))]),
        }],
    )
}

pub fn animated_rig() -> AnimatedNode {
    let mut mixer = AnimationMixer::default();
    mixer.add_clip(slide_clip());
    AnimatedNode::new(rig(), mixer)
}

pub fn small_config() -> SceneConfig {
    SceneConfig {
        particle_request: 500,
        ..SceneConfig::default()
    }
    .with_seed(7)
}

pub fn diorama() -> Diorama {
    Diorama::new(&small_config(), centerpiece(), 1.0).expect("valid fixture")
}

pub fn loaded_diorama() -> Diorama {
    let mut d = diorama();
    d.attach_target(animated_rig(), Some(WAVE.into()));
    d
}
