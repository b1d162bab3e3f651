// Host-side tests for the per-frame driver.

mod common;

use common::*;
use glam::Vec3;
use snowglobe_core::anim::{AnimationClip, AnimationMixer, Channel, Track};
use snowglobe_core::pick::{PointerSample, Viewport};
use snowglobe_core::scene::{AnimatedNode, SceneNode, TriMesh};
use snowglobe_core::schedule::ManualScheduler;
use snowglobe_core::{
    Backdrop, Diorama, FrameOrchestrator, FrameStats, FrameView, PickOutcome, RenderSink,
    ANIMATION_STEP,
};
use std::time::Duration;

#[derive(Default)]
struct RecordingSink {
    frames: usize,
    node_counts: Vec<usize>,
    positions_dirty: Vec<bool>,
    colors_dirty: Vec<bool>,
    first_positions: Vec<Vec3>,
    strengths: Vec<f32>,
    backdrops: Vec<Backdrop>,
}

impl RenderSink for RecordingSink {
    fn render(&mut self, frame: &FrameView<'_>) -> bool {
        self.frames += 1;
        self.node_counts.push(frame.nodes.len());
        self.positions_dirty.push(frame.snow.positions_dirty());
        self.colors_dirty.push(frame.snow.colors_dirty());
        self.first_positions.push(frame.snow.positions()[0]);
        self.strengths.push(frame.bloom.strength);
        self.backdrops.push(frame.backdrop);
        true
    }
}

/// Drops the frames listed in `skip` without uploading anything.
#[derive(Default)]
struct SkippingSink {
    skip: Vec<usize>,
    seen: usize,
    colors_dirty_uploaded: Vec<bool>,
}

impl RenderSink for SkippingSink {
    fn render(&mut self, frame: &FrameView<'_>) -> bool {
        let index = self.seen;
        self.seen += 1;
        if self.skip.contains(&index) {
            return false;
        }
        self.colors_dirty_uploaded.push(frame.snow.colors_dirty());
        true
    }
}

fn spinning_centerpiece() -> AnimatedNode {
    let root = SceneNode::new("centerpiece")
        .with_mesh(TriMesh::cuboid(Vec3::splat(10.0), [1.0; 3]))
        .with_child(SceneNode::new("flag").with_mesh(TriMesh::cuboid(Vec3::ONE, [1.0; 3])));
    let mut mixer = AnimationMixer::default();
    mixer.add_clip(AnimationClip::new(
        "bob",
        vec![Channel {
            node: "flag".into(),
            track: Track::Translation(vec![
                (0.0, Vec3::ZERO),
                (10.0, Vec3::new(0.0, 10.0, 0.0)),
            ]),
        }],
    ));
    AnimatedNode::new(root, mixer)
}

#[test]
fn tick_renders_once_with_updated_snow() {
    let mut d = diorama();
    let mut orch = FrameOrchestrator::new(ANIMATION_STEP);
    let mut sink = RecordingSink::default();
    let before = d.snow.positions()[0];

    orch.tick(&mut d, &mut sink);

    assert_eq!(sink.frames, 1);
    assert_eq!(orch.ticks(), 1);
    assert!(sink.positions_dirty[0], "render must see the fresh positions");
    assert!(sink.colors_dirty[0], "initial colors still need an upload");
    assert_ne!(sink.first_positions[0], before);
    assert!(!d.snow.positions_dirty());
    assert!(!d.snow.colors_dirty());

    orch.tick(&mut d, &mut sink);
    assert!(sink.positions_dirty[1]);
    assert!(!sink.colors_dirty[1]);
}

#[test]
fn recolor_survives_a_dropped_frame() {
    let mut d = loaded_diorama();
    let mut orch = FrameOrchestrator::new(ANIMATION_STEP);
    let mut sink = SkippingSink {
        skip: vec![1],
        ..SkippingSink::default()
    };
    orch.tick(&mut d, &mut sink);

    let mut audio = CountingAudio::default();
    let mut sched = ManualScheduler::default();
    let viewport = Viewport {
        width: 600.0,
        height: 600.0,
    };
    let center = PointerSample { x: 300.0, y: 300.0 };
    let hit = d.handle_pick(center, viewport, &mut audio, &mut sched);
    assert_eq!(hit, PickOutcome::Entered);

    orch.tick(&mut d, &mut sink);
    assert!(d.snow.colors_dirty(), "skipped frame keeps the recolor pending");
    assert!(d.snow.positions_dirty());

    orch.tick(&mut d, &mut sink);
    assert_eq!(sink.colors_dirty_uploaded, [true, true]);
    assert!(!d.snow.colors_dirty());
}

#[test]
fn mixers_advance_by_fixed_step_regardless_of_frame_time() {
    let config = small_config();
    let mut d = Diorama::new(&config, spinning_centerpiece(), 1.0).unwrap();
    let mut orch = FrameOrchestrator::new(config.animation_step);
    let mut sink = RecordingSink::default();

    for _ in 0..100 {
        orch.tick(&mut d, &mut sink);
    }

    let action = d.props[0].mixer.action("bob").unwrap();
    assert!(action.is_playing(), "environment clips loop from load");
    assert!((action.time() - 100.0 * ANIMATION_STEP).abs() < 1e-4);
    let flag = d.props[0].root.find("flag").unwrap();
    assert!((flag.transform.translation.y - 1.0).abs() < 1e-3);
}

#[test]
fn environment_clip_loops() {
    let mut d = Diorama::new(&small_config(), spinning_centerpiece(), 1.0).unwrap();
    let mut orch = FrameOrchestrator::new(2.5);
    let mut sink = RecordingSink::default();
    for _ in 0..5 {
        orch.tick(&mut d, &mut sink);
    }
    let t = d.props[0].mixer.action("bob").unwrap().time();
    assert!((t - 2.5).abs() < 1e-4, "12.5 wraps to 2.5, got {t}");
}

#[test]
fn target_joins_render_once_loaded_and_its_clip_waits_for_celebration() {
    let mut d = diorama();
    let mut orch = FrameOrchestrator::new(ANIMATION_STEP);
    let mut sink = RecordingSink::default();

    orch.tick(&mut d, &mut sink);
    d.attach_target(animated_rig(), Some(WAVE.into()));
    orch.tick(&mut d, &mut sink);
    assert_eq!(sink.node_counts, [1, 2]);

    let rig = d.target.node_mut().unwrap();
    assert_eq!(rig.mixer.action(WAVE).unwrap().time(), 0.0);
    assert!(d.target.trigger_celebration_clip());
    orch.tick(&mut d, &mut sink);
    let rig = d.target.node_mut().unwrap();
    assert!((rig.mixer.action(WAVE).unwrap().time() - ANIMATION_STEP).abs() < 1e-6);
    let body = rig.root.find("body").unwrap();
    assert!(body.transform.translation.x > 0.0);
}

#[test]
fn render_sees_bloom_and_backdrop_changes() {
    let mut d = diorama();
    let mut orch = FrameOrchestrator::new(ANIMATION_STEP);
    let mut sink = RecordingSink::default();
    d.celebration.pulse_bloom();
    d.celebration.set_backdrop(Backdrop::Night);
    orch.tick(&mut d, &mut sink);
    assert_eq!(sink.strengths, [3.5]);
    assert_eq!(sink.backdrops, [Backdrop::Night]);
}

#[test]
fn enclosure_radius_follows_centerpiece_bounds() {
    let d = diorama();
    // cube of half-extent 10: half diagonal 10√3, scaled by 0.7
    let expected = 10.0 * 3.0_f32.sqrt() * 0.7;
    assert!((d.enclosure_radius() - expected).abs() < 1e-3);
    assert_eq!(d.snow.radius(), d.enclosure_radius());
}

#[test]
fn geometry_free_centerpiece_is_rejected() {
    let empty = AnimatedNode::still(SceneNode::new("nothing"));
    assert!(Diorama::new(&small_config(), empty, 1.0).is_err());
}

#[test]
fn frame_stats_average_recent_frames() {
    let mut stats = FrameStats::default();
    assert_eq!(stats.fps(), None);
    for _ in 0..120 {
        stats.record(Duration::from_millis(20));
    }
    assert_eq!(stats.frames(), 120);
    let fps = stats.fps().unwrap();
    assert!((fps - 50.0).abs() < 0.5, "got {fps}");
    for _ in 0..60 {
        stats.record(Duration::from_millis(10));
    }
    assert!((stats.fps().unwrap() - 100.0).abs() < 1.0);
}
