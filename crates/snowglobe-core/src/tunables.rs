//! Debug panel: live-tunable backdrop and bloom parameters.
//!
//! Manual edits are clamped to each parameter's panel range. The
//! celebration pulse writes strength directly and may leave the range.

use crate::constants::*;
use crate::state::{Backdrop, BloomParams};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tunable {
    BloomStrength,
    BloomRadius,
    BloomThreshold,
}

impl Tunable {
    pub fn label(self) -> &'static str {
        match self {
            Tunable::BloomStrength => "strength",
            Tunable::BloomRadius => "radius",
            Tunable::BloomThreshold => "threshold",
        }
    }

    pub fn range(self) -> (f32, f32) {
        match self {
            Tunable::BloomStrength => (0.0, BLOOM_STRENGTH_MAX),
            Tunable::BloomRadius => (0.0, BLOOM_RADIUS_MAX),
            Tunable::BloomThreshold => (0.0, BLOOM_THRESHOLD_MAX),
        }
    }

    /// Key-press increment: a twentieth of the range.
    pub fn step(self) -> f32 {
        let (lo, hi) = self.range();
        (hi - lo) / 20.0
    }

    pub fn get(self, bloom: &BloomParams) -> f32 {
        match self {
            Tunable::BloomStrength => bloom.strength,
            Tunable::BloomRadius => bloom.radius,
            Tunable::BloomThreshold => bloom.threshold,
        }
    }

    /// Clamp into range and store. Returns the stored value.
    pub fn set(self, bloom: &mut BloomParams, value: f32) -> f32 {
        let (lo, hi) = self.range();
        let v = if value.is_finite() {
            value.clamp(lo, hi)
        } else {
            self.get(bloom).clamp(lo, hi)
        };
        match self {
            Tunable::BloomStrength => bloom.strength = v,
            Tunable::BloomRadius => bloom.radius = v,
            Tunable::BloomThreshold => bloom.threshold = v,
        }
        v
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanelAction {
    SelectBackdrop(Backdrop),
    Nudge(Tunable, f32),
    ResetBloom,
}

/// Keyboard layout of the panel.
///
/// `1`/`2` pick the backdrop, `[`/`]` strength, `;`/`'` radius,
/// `,`/`.` threshold, `0` restores bloom defaults. Shift makes nudges finer.
pub fn panel_action_for_key(key: &str, fine: bool) -> Option<PanelAction> {
    let nudge = |t: Tunable, dir: f32| {
        let step = if fine { t.step() * 0.2 } else { t.step() };
        Some(PanelAction::Nudge(t, dir * step))
    };
    match key {
        "1" => Some(PanelAction::SelectBackdrop(Backdrop::Sunset)),
        "2" => Some(PanelAction::SelectBackdrop(Backdrop::Night)),
        "[" | "{" => nudge(Tunable::BloomStrength, -1.0),
        "]" | "}" => nudge(Tunable::BloomStrength, 1.0),
        ";" | ":" => nudge(Tunable::BloomRadius, -1.0),
        "'" | "\"" => nudge(Tunable::BloomRadius, 1.0),
        "," | "<" => nudge(Tunable::BloomThreshold, -1.0),
        "." | ">" => nudge(Tunable::BloomThreshold, 1.0),
        "0" => Some(PanelAction::ResetBloom),
        _ => None,
    }
}

/// Apply a panel action to the live parameters.
pub fn apply_panel_action(action: PanelAction, bloom: &mut BloomParams, backdrop: &mut Backdrop) {
    match action {
        PanelAction::SelectBackdrop(b) => *backdrop = b,
        PanelAction::Nudge(t, delta) => {
            let v = t.get(bloom) + delta;
            t.set(bloom, v);
        }
        PanelAction::ResetBloom => *bloom = BloomParams::default(),
    }
}

/// One-line summary for the hint overlay.
pub fn panel_summary(bloom: &BloomParams, backdrop: Backdrop) -> String {
    format!(
        "Sky: {} • Bloom {:.2} / radius {:.2} / threshold {:.2}",
        backdrop, bloom.strength, bloom.radius, bloom.threshold
    )
}
