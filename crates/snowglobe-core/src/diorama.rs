//! Composition root owning every subsystem of the scene.
//!
//! Hosts hold one `Diorama` and feed it pointer events, scheduler firings
//! and panel actions; a `FrameOrchestrator` ticks it once per frame.

use crate::celebration::{AudioCue, Celebration, CelebrationContext, PickOutcome};
use crate::config::SceneConfig;
use crate::error::ConfigError;
use crate::frame::FrameView;
use crate::orbit::OrbitControls;
use crate::pick::{resolve_pick, PointerSample, Viewport};
use crate::scene::{enclosure_radius, AnimatedNode, InteractiveTarget};
use crate::schedule::{Scheduler, Task};
use crate::snow::ParticleField;
use crate::state::Camera;
use crate::tunables::{apply_panel_action, PanelAction};
use smallvec::SmallVec;

pub struct Diorama {
    pub snow: ParticleField,
    pub target: InteractiveTarget,
    /// Centerpiece first, then static props.
    pub props: Vec<AnimatedNode>,
    pub celebration: Celebration,
    pub camera: Camera,
    pub orbit: OrbitControls,
    enclosure_radius: f32,
}

impl Diorama {
    /// Build around a loaded centerpiece. Its clips all start looping and
    /// its bounds fix the enclosure radius for the session.
    pub fn new(
        config: &SceneConfig,
        mut centerpiece: AnimatedNode,
        aspect: f32,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let radius = enclosure_radius(&centerpiece.root, config.enclosure_scale)
            .ok_or(ConfigError::InvalidRadius(0.0))?;
        let snow = ParticleField::new(config.particle_request, radius, config.seed)?;
        centerpiece.mixer.play_all();
        let mut camera = Camera::home(aspect);
        camera.eye = config.home_eye;
        log::info!(
            "[snow] enclosure radius {:.2}, {} particles",
            radius,
            snow.len()
        );
        Ok(Self {
            snow,
            target: InteractiveTarget::pending(),
            props: vec![centerpiece],
            celebration: Celebration::new(
                config.bloom,
                config.backdrop,
                config.celebration_eye,
                config.seed.wrapping_add(1),
            ),
            camera,
            orbit: OrbitControls::default(),
            enclosure_radius: radius,
        })
    }

    pub fn enclosure_radius(&self) -> f32 {
        self.enclosure_radius
    }

    pub fn add_prop(&mut self, prop: AnimatedNode) {
        self.props.push(prop);
    }

    pub fn attach_target(&mut self, node: AnimatedNode, celebration_clip: Option<String>) {
        self.target.attach(node, celebration_clip);
    }

    /// Resolve a pointer press and feed a hit to the celebration.
    pub fn handle_pick(
        &mut self,
        pointer: PointerSample,
        viewport: Viewport,
        audio: &mut dyn AudioCue,
        scheduler: &mut dyn Scheduler,
    ) -> PickOutcome {
        let Some(hit) = resolve_pick(pointer, viewport, &self.camera, &self.target) else {
            return PickOutcome::Ignored;
        };
        log::debug!("[pick] hit `{}` at {:.2}", hit.node, hit.distance);
        self.celebration.on_pick_hit(CelebrationContext {
            target: &mut self.target,
            snow: &mut self.snow,
            camera: &mut self.camera,
            audio,
            scheduler,
        })
    }

    pub fn on_task(&mut self, task: Task) {
        self.celebration.on_task(task);
    }

    pub fn apply_panel(&mut self, action: PanelAction) {
        let mut backdrop = self.celebration.backdrop();
        apply_panel_action(action, self.celebration.bloom_mut(), &mut backdrop);
        self.celebration.set_backdrop(backdrop);
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.camera.set_aspect(width, height);
    }

    pub fn frame_view(&self) -> FrameView<'_> {
        let mut nodes: SmallVec<[_; 4]> = self.props.iter().map(|p| &p.root).collect();
        if let Some(root) = self.target.root() {
            nodes.push(root);
        }
        FrameView {
            camera: &self.camera,
            snow: &self.snow,
            bloom: self.celebration.bloom(),
            backdrop: self.celebration.backdrop(),
            enclosure_radius: self.enclosure_radius,
            nodes,
        }
    }
}
