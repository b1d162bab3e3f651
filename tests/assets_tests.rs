// Host-side tests for the procedural scene pieces.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod assets {
    include!("../src/assets.rs");
}

use assets::*;
use glam::{Quat, Vec3};
use snowglobe_core::celebration::AudioCue;
use snowglobe_core::pick::{PointerSample, Viewport};
use snowglobe_core::schedule::ManualScheduler;
use snowglobe_core::{CelebrationState, Diorama, PickOutcome, SceneConfig, CELEBRATION_EYE};

#[derive(Default)]
struct Silent {
    plays: usize,
}

impl AudioCue for Silent {
    fn play(&mut self) {
        self.plays += 1;
    }
}

const W: f32 = 800.0;
const H: f32 = 600.0;

fn config() -> SceneConfig {
    SceneConfig {
        particle_request: 300,
        ..SceneConfig::default()
    }
}

/// Pixel under the center of the rig's world bounds.
fn santa_pixel(d: &Diorama) -> PointerSample {
    let bounds = d.target.root().and_then(|r| r.world_bounds()).expect("rig attached");
    let ndc = d.camera.view_projection().project_point3(bounds.center());
    PointerSample {
        x: (ndc.x + 1.0) * 0.5 * W,
        y: (1.0 - ndc.y) * 0.5 * H,
    }
}

#[test]
fn pieces_sit_at_their_placements() {
    let c = centerpiece();
    assert_eq!(c.root.transform.translation, Vec3::new(0.0, -20.0, 0.0));
    assert!(c.root.find("star").is_some());
    assert!(c.mixer.action(CENTERPIECE_CLIP).is_some());

    let s = santa();
    assert_eq!(s.root.name, TARGET_NAME);
    assert_eq!(s.root.transform.translation, Vec3::new(0.0, -20.0, 5.0));
    assert!(s.mixer.action(CELEBRATION_CLIP).is_some());

    let m = snowman();
    assert_eq!(m.root.transform.translation, Vec3::new(25.0, -18.0, -4.0));
    assert!(!m.mixer.has_active());
}

#[test]
fn enclosure_is_sized_from_the_centerpiece() {
    let d = Diorama::new(&config(), centerpiece(), W / H).expect("valid");
    let (_, r) = centerpiece()
        .root
        .world_bounds()
        .expect("geometry")
        .bounding_sphere();
    assert!((d.enclosure_radius() - r * 0.7).abs() < 1e-4);
    assert!(d.snow.positions().iter().all(|p| p.length() < d.enclosure_radius()));
}

#[test]
fn centerpiece_clip_loops_from_the_start() {
    let mut d = Diorama::new(&config(), centerpiece(), W / H).expect("valid");
    let before = d.props[0].root.find("star").expect("star").transform.rotation;
    d.props[0].advance(0.5);
    let after = d.props[0].root.find("star").expect("star").transform.rotation;
    assert!(before.angle_between(after) > 0.1);
}

#[test]
fn santa_is_pickable_from_the_opening_view() {
    let mut d = Diorama::new(&config(), centerpiece(), W / H).expect("valid");
    d.add_prop(snowman());
    d.attach_target(santa(), Some(CELEBRATION_CLIP.into()));
    let at = santa_pixel(&d);
    assert!(at.x > 0.0 && at.x < W && at.y > 0.0 && at.y < H);

    let mut audio = Silent::default();
    let mut sched = ManualScheduler::default();
    let outcome = d.handle_pick(at, Viewport { width: W, height: H }, &mut audio, &mut sched);
    assert_eq!(outcome, PickOutcome::Entered);
    assert_eq!(d.celebration.state(), CelebrationState::Active);
    assert_eq!(d.camera.eye, CELEBRATION_EYE);
    assert_eq!(audio.plays, 1);
}

#[test]
fn wave_clip_raises_the_arm_once_triggered() {
    let mut d = Diorama::new(&config(), centerpiece(), W / H).expect("valid");
    d.attach_target(santa(), Some(CELEBRATION_CLIP.into()));
    let at = santa_pixel(&d);

    let arm = |d: &Diorama| {
        d.target
            .root()
            .and_then(|r| r.find("arm_right"))
            .expect("arm")
            .transform
            .rotation
    };
    d.target.node_mut().expect("loaded").advance(0.5);
    assert_eq!(arm(&d), Quat::IDENTITY);

    let mut audio = Silent::default();
    let mut sched = ManualScheduler::default();
    d.handle_pick(at, Viewport { width: W, height: H }, &mut audio, &mut sched);
    d.target.node_mut().expect("loaded").advance(0.5);
    assert!(arm(&d).angle_between(Quat::IDENTITY) > 1.0);
}
