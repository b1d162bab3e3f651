// Procedural stand-ins for the diorama's models, placed where the scene
// expects them. Pure so the host tests can build them natively.

use glam::{Quat, Vec3};
use snowglobe_core::anim::{AnimationClip, AnimationMixer, Channel, Track};
use snowglobe_core::constants::*;
use snowglobe_core::scene::{AnimatedNode, SceneNode, Transform, TriMesh};
use std::f32::consts::FRAC_PI_2;

pub const TARGET_NAME: &str = "santa";
pub const CELEBRATION_CLIP: &str = "wave";
pub const CENTERPIECE_CLIP: &str = "spin";

const SNOW_WHITE: [f32; 3] = [0.92, 0.95, 1.0];
const PINE: [f32; 3] = [0.08, 0.32, 0.16];
const BARK: [f32; 3] = [0.35, 0.22, 0.12];
const SANTA_RED: [f32; 3] = [0.75, 0.08, 0.08];
const SKIN: [f32; 3] = [0.96, 0.78, 0.66];
const GOLD: [f32; 3] = [1.0, 0.82, 0.3];
const CARROT: [f32; 3] = [0.95, 0.45, 0.1];

fn tree(name: &str, at: Vec3, height: f32) -> SceneNode {
    SceneNode::new(name)
        .with_transform(Transform::from_translation(at))
        .with_mesh(TriMesh::cuboid(
            Vec3::new(0.4, height * 0.15, 0.4),
            BARK,
        ))
        .with_child(
            SceneNode::new(format!("{name}_crown"))
                .with_transform(Transform::from_translation(Vec3::new(
                    0.0,
                    height * 0.1,
                    0.0,
                )))
                .with_mesh(TriMesh::cone(height * 0.35, height, 10, PINE)),
        )
}

/// Snowy plinth with a ring of pines and a spinning star over the tallest.
pub fn centerpiece() -> AnimatedNode {
    let star = SceneNode::new("star")
        .with_transform(Transform::from_translation(Vec3::new(0.0, 11.5, 0.0)))
        .with_mesh(TriMesh::cone(0.8, 1.6, 5, GOLD));
    let mut grove = SceneNode::new("grove")
        .with_transform(Transform::from_translation(Vec3::new(0.0, 2.0, 0.0)))
        .with_child(tree("pine_center", Vec3::ZERO, 10.0).with_child(star));
    for (i, (x, z, h)) in [(7.0, 3.0, 6.0), (-6.0, 5.0, 7.0), (-4.0, -7.0, 5.0), (5.0, -6.0, 6.5)]
        .into_iter()
        .enumerate()
    {
        grove = grove.with_child(tree(&format!("pine_{i}"), Vec3::new(x, 0.0, z), h));
    }
    let root = SceneNode::new("centerpiece")
        .with_transform(Transform::placed(CENTERPIECE_OFFSET, 0.0, CENTERPIECE_SCALE))
        .with_child(
            SceneNode::new("plinth").with_mesh(TriMesh::cuboid(Vec3::new(12.0, 2.0, 12.0), SNOW_WHITE)),
        )
        .with_child(grove);

    let spin = Track::Rotation(
        (0..=4)
            .map(|k| (k as f32, Quat::from_rotation_y(k as f32 * FRAC_PI_2)))
            .collect(),
    );
    let mut mixer = AnimationMixer::default();
    mixer.add_clip(AnimationClip::new(
        CENTERPIECE_CLIP,
        vec![Channel {
            node: "star".into(),
            track: spin,
        }],
    ));
    AnimatedNode::new(root, mixer)
}

/// The clickable character, modelled at source scale and shrunk on placement.
pub fn santa() -> AnimatedNode {
    let arm = SceneNode::new("arm_right")
        .with_transform(Transform::from_translation(Vec3::new(11.0, 8.0, 0.0)))
        .with_mesh(TriMesh::cuboid(Vec3::new(3.0, 9.0, 3.0), SANTA_RED));
    let head = SceneNode::new("head")
        .with_transform(Transform::from_translation(Vec3::new(0.0, 20.0, 0.0)))
        .with_mesh(TriMesh::uv_sphere(7.0, 16, 10, SKIN))
        .with_child(
            SceneNode::new("beard")
                .with_transform(Transform::from_translation(Vec3::new(0.0, -3.0, 4.0)))
                .with_mesh(TriMesh::uv_sphere(5.0, 12, 8, SNOW_WHITE)),
        )
        .with_child(
            SceneNode::new("hat")
                .with_transform(Transform::from_translation(Vec3::new(0.0, 5.0, 0.0)))
                .with_mesh(TriMesh::cone(7.5, 12.0, 12, SANTA_RED)),
        );
    let root = SceneNode::new(TARGET_NAME)
        .with_transform(Transform::placed(SANTA_OFFSET, SANTA_YAW, SANTA_SCALE))
        .with_child(
            SceneNode::new("body")
                .with_transform(Transform::from_translation(Vec3::new(0.0, 12.0, 0.0)))
                .with_mesh(TriMesh::cuboid(Vec3::new(9.0, 12.0, 7.0), SANTA_RED))
                .with_child(head)
                .with_child(arm),
        );

    let raised = Quat::from_rotation_z(2.4);
    let wave = Track::Rotation(vec![
        (0.0, Quat::IDENTITY),
        (0.5, raised),
        (0.8, raised * Quat::from_rotation_x(0.4)),
        (1.1, raised * Quat::from_rotation_x(-0.4)),
        (1.4, raised),
        (2.0, Quat::IDENTITY),
    ]);
    let mut mixer = AnimationMixer::default();
    mixer.add_clip(AnimationClip::new(
        CELEBRATION_CLIP,
        vec![Channel {
            node: "arm_right".into(),
            track: wave,
        }],
    ));
    AnimatedNode::new(root, mixer)
}

pub fn snowman() -> AnimatedNode {
    let root = SceneNode::new("snowman")
        .with_transform(Transform::placed(SNOWMAN_OFFSET, SNOWMAN_YAW, SNOWMAN_SCALE))
        .with_mesh(TriMesh::uv_sphere(2.0, 16, 10, SNOW_WHITE))
        .with_child(
            SceneNode::new("torso")
                .with_transform(Transform::from_translation(Vec3::new(0.0, 2.8, 0.0)))
                .with_mesh(TriMesh::uv_sphere(1.4, 16, 10, SNOW_WHITE))
                .with_child(
                    SceneNode::new("head")
                        .with_transform(Transform::from_translation(Vec3::new(0.0, 2.0, 0.0)))
                        .with_mesh(TriMesh::uv_sphere(1.0, 14, 8, SNOW_WHITE))
                        .with_child(
                            SceneNode::new("nose")
                                .with_transform(Transform {
                                    translation: Vec3::new(0.0, 0.0, 0.9),
                                    rotation: Quat::from_rotation_x(FRAC_PI_2),
                                    ..Default::default()
                                })
                                .with_mesh(TriMesh::cone(0.2, 0.8, 8, CARROT)),
                        ),
                ),
        );
    AnimatedNode::still(root)
}
