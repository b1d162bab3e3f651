//! Keyframed clip playback for scene nodes.

use crate::scene::SceneNode;
use fnv::FnvHashMap;
use glam::{Quat, Vec3};

#[derive(Clone, Debug)]
pub enum Track {
    Translation(Vec<(f32, Vec3)>),
    Rotation(Vec<(f32, Quat)>),
    Scale(Vec<(f32, Vec3)>),
}

#[derive(Clone, Debug)]
pub struct Channel {
    pub node: String,
    pub track: Track,
}

#[derive(Clone, Debug)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
    pub channels: Vec<Channel>,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>, channels: Vec<Channel>) -> Self {
        let duration = channels
            .iter()
            .map(|c| match &c.track {
                Track::Translation(k) | Track::Scale(k) => k.last().map_or(0.0, |k| k.0),
                Track::Rotation(k) => k.last().map_or(0.0, |k| k.0),
            })
            .fold(0.0_f32, f32::max);
        Self {
            name: name.into(),
            duration,
            channels,
        }
    }
}

/// Keyframe pair bracketing `t` plus the blend factor between them.
fn bracket<T: Copy>(keys: &[(f32, T)], t: f32) -> Option<(T, T, f32)> {
    let first = keys.first()?;
    if keys.len() == 1 || t <= first.0 {
        return Some((first.1, first.1, 0.0));
    }
    let i = keys.partition_point(|k| k.0 <= t);
    if i >= keys.len() {
        let last = keys[keys.len() - 1].1;
        return Some((last, last, 0.0));
    }
    let (t0, a) = keys[i - 1];
    let (t1, b) = keys[i];
    let span = t1 - t0;
    let f = if span > 0.0 { (t - t0) / span } else { 0.0 };
    Some((a, b, f))
}

pub fn sample_vec3(keys: &[(f32, Vec3)], t: f32) -> Option<Vec3> {
    bracket(keys, t).map(|(a, b, f)| a.lerp(b, f))
}

pub fn sample_quat(keys: &[(f32, Quat)], t: f32) -> Option<Quat> {
    bracket(keys, t).map(|(a, b, f)| a.slerp(b, f))
}

/// Playback cursor for one clip. Loops forever once started.
#[derive(Clone, Debug)]
pub struct ClipAction {
    clip: AnimationClip,
    time: f32,
    playing: bool,
}

impl ClipAction {
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

#[derive(Default)]
pub struct AnimationMixer {
    actions: FnvHashMap<String, ClipAction>,
}

impl AnimationMixer {
    pub fn add_clip(&mut self, clip: AnimationClip) {
        self.actions.insert(
            clip.name.clone(),
            ClipAction {
                clip,
                time: 0.0,
                playing: false,
            },
        );
    }

    /// Start a clip. Returns `false` if the mixer has no clip by that name.
    /// Playing an already running clip leaves its cursor alone.
    pub fn play(&mut self, name: &str) -> bool {
        match self.actions.get_mut(name) {
            Some(a) => {
                a.playing = true;
                true
            }
            None => false,
        }
    }

    pub fn play_all(&mut self) {
        for a in self.actions.values_mut() {
            a.playing = true;
        }
    }

    pub fn action(&self, name: &str) -> Option<&ClipAction> {
        self.actions.get(name)
    }

    pub fn has_active(&self) -> bool {
        self.actions.values().any(|a| a.playing)
    }

    pub fn advance(&mut self, delta: f32) {
        for a in self.actions.values_mut().filter(|a| a.playing) {
            a.time += delta;
            if a.clip.duration > 0.0 {
                a.time = a.time.rem_euclid(a.clip.duration);
            }
        }
    }

    /// Write sampled transforms of every playing clip into `root`.
    pub fn apply(&self, root: &mut SceneNode) {
        for a in self.actions.values().filter(|a| a.playing) {
            for ch in &a.clip.channels {
                let Some(node) = root.find_mut(&ch.node) else {
                    continue;
                };
                match &ch.track {
                    Track::Translation(k) => {
                        if let Some(v) = sample_vec3(k, a.time) {
                            node.transform.translation = v;
                        }
                    }
                    Track::Rotation(k) => {
                        if let Some(q) = sample_quat(k, a.time) {
                            node.transform.rotation = q;
                        }
                    }
                    Track::Scale(k) => {
                        if let Some(v) = sample_vec3(k, a.time) {
                            node.transform.scale = v;
                        }
                    }
                }
            }
        }
    }
}
