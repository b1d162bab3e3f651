//! Minimal scene graph: transforms, triangle meshes, bounds.
//!
//! Nodes form a tree; world matrices are computed on the fly during
//! traversal, so animation only has to write local transforms.

use crate::anim::AnimationMixer;
use crate::constants::{ENCLOSURE_RINGS, ENCLOSURE_SEGMENTS, ENCLOSURE_TINT};
use glam::{Mat4, Quat, Vec3};
use std::f32::consts::{PI, TAU};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Uniform scale, rotation about +Y, then translation.
    pub fn placed(translation: Vec3, yaw: f32, scale: f32) -> Self {
        Self {
            translation,
            rotation: Quat::from_rotation_y(yaw),
            scale: Vec3::splat(scale),
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut it = points.into_iter();
        let first = it.next()?;
        let mut b = Aabb {
            min: first,
            max: first,
        };
        for p in it {
            b.min = b.min.min(p);
            b.max = b.max.max(p);
        }
        Some(b)
    }

    pub fn union(self, other: Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Bounds of this box after an affine transform (all eight corners).
    pub fn transformed(&self, m: Mat4) -> Aabb {
        let corners = (0..8).map(|i| {
            let c = Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
            m.transform_point3(c)
        });
        // eight corners, never empty
        Aabb::from_points(corners).unwrap_or(*self)
    }

    /// Sphere through the box corners: `(center, half diagonal)`.
    pub fn bounding_sphere(&self) -> (Vec3, f32) {
        (self.center(), (self.max - self.min).length() * 0.5)
    }
}

#[derive(Clone, Debug)]
pub struct TriMesh {
    pub positions: Vec<Vec3>,
    pub indices: Vec<[u32; 3]>,
    pub color: [f32; 3],
    /// Front faces are counter-clockwise; single-sided meshes ignore back-face hits.
    pub double_sided: bool,
    bounds: Aabb,
}

impl TriMesh {
    pub fn new(positions: Vec<Vec3>, indices: Vec<[u32; 3]>, color: [f32; 3]) -> Self {
        let bounds = Aabb::from_points(positions.iter().copied()).unwrap_or(Aabb {
            min: Vec3::ZERO,
            max: Vec3::ZERO,
        });
        Self {
            positions,
            indices,
            color,
            double_sided: false,
            bounds,
        }
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.iter().filter_map(|t| {
            Some([
                *self.positions.get(t[0] as usize)?,
                *self.positions.get(t[1] as usize)?,
                *self.positions.get(t[2] as usize)?,
            ])
        })
    }

    /// Axis-aligned box centered on the origin.
    pub fn cuboid(half: Vec3, color: [f32; 3]) -> Self {
        let (x, y, z) = (half.x, half.y, half.z);
        let positions = vec![
            Vec3::new(-x, -y, -z),
            Vec3::new(x, -y, -z),
            Vec3::new(x, y, -z),
            Vec3::new(-x, y, -z),
            Vec3::new(-x, -y, z),
            Vec3::new(x, -y, z),
            Vec3::new(x, y, z),
            Vec3::new(-x, y, z),
        ];
        let indices = vec![
            [4, 5, 6],
            [4, 6, 7], // +z
            [1, 0, 3],
            [1, 3, 2], // -z
            [5, 1, 2],
            [5, 2, 6], // +x
            [0, 4, 7],
            [0, 7, 3], // -x
            [7, 6, 2],
            [7, 2, 3], // +y
            [0, 1, 5],
            [0, 5, 4], // -y
        ];
        Self::new(positions, indices, color)
    }

    pub fn uv_sphere(radius: f32, segments: u32, rings: u32, color: [f32; 3]) -> Self {
        let segments = segments.max(3);
        let rings = rings.max(2);
        let mut positions = Vec::with_capacity(((segments + 1) * (rings + 1)) as usize);
        for r in 0..=rings {
            let phi = PI * r as f32 / rings as f32;
            for s in 0..=segments {
                let theta = TAU * s as f32 / segments as f32;
                positions.push(Vec3::new(
                    radius * phi.sin() * theta.cos(),
                    radius * phi.cos(),
                    -radius * phi.sin() * theta.sin(),
                ));
            }
        }
        let stride = segments + 1;
        let mut indices = Vec::with_capacity((segments * rings * 2) as usize);
        for r in 0..rings {
            for s in 0..segments {
                let a = r * stride + s;
                let b = a + stride;
                if r != 0 {
                    indices.push([a, b, a + 1]);
                }
                if r != rings - 1 {
                    indices.push([a + 1, b, b + 1]);
                }
            }
        }
        Self::new(positions, indices, color)
    }

    /// Cone with its base on y = 0 and apex at y = height.
    pub fn cone(radius: f32, height: f32, segments: u32, color: [f32; 3]) -> Self {
        let segments = segments.max(3);
        let mut positions = vec![Vec3::new(0.0, height, 0.0), Vec3::ZERO];
        for s in 0..segments {
            let theta = TAU * s as f32 / segments as f32;
            positions.push(Vec3::new(
                radius * theta.cos(),
                0.0,
                -radius * theta.sin(),
            ));
        }
        let mut indices = Vec::with_capacity(segments as usize * 2);
        for s in 0..segments {
            let a = 2 + s;
            let b = 2 + (s + 1) % segments;
            indices.push([a, b, 0]);
            indices.push([b, a, 1]);
        }
        Self::new(positions, indices, color)
    }
}

#[derive(Clone, Debug, Default)]
pub struct SceneNode {
    pub name: String,
    pub transform: Transform,
    pub mesh: Option<TriMesh>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_mesh(mut self, mesh: TriMesh) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Depth-first walk handing each node its world matrix.
    pub fn traverse<'a>(&'a self, parent: Mat4, visit: &mut impl FnMut(&'a SceneNode, Mat4)) {
        let world = parent * self.transform.matrix();
        visit(self, world);
        for child in &self.children {
            child.traverse(world, visit);
        }
    }

    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut SceneNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(name))
    }

    /// World-space bounds of every mesh in the subtree.
    pub fn world_bounds(&self) -> Option<Aabb> {
        let mut acc: Option<Aabb> = None;
        self.traverse(Mat4::IDENTITY, &mut |node, world| {
            if let Some(mesh) = &node.mesh {
                let b = mesh.bounds().transformed(world);
                acc = Some(acc.map_or(b, |a| a.union(b)));
            }
        });
        acc
    }

    pub fn mesh_count(&self) -> usize {
        let mut n = 0;
        self.traverse(Mat4::IDENTITY, &mut |node, _| {
            if node.mesh.is_some() {
                n += 1;
            }
        });
        n
    }
}

/// Radius of the glass enclosure around `centerpiece`.
///
/// Falls back to `None` when the subtree has no geometry.
pub fn enclosure_radius(centerpiece: &SceneNode, scale: f32) -> Option<f32> {
    let (_, r) = centerpiece.world_bounds()?.bounding_sphere();
    (r > 0.0).then_some(r * scale)
}

/// Glass shell of the given radius centred on the origin, wound so its
/// outside faces the viewer.
pub fn enclosure_shell(radius: f32) -> TriMesh {
    TriMesh::uv_sphere(radius, ENCLOSURE_SEGMENTS, ENCLOSURE_RINGS, ENCLOSURE_TINT)
}

/// A node hierarchy plus the mixer that animates it.
pub struct AnimatedNode {
    pub root: SceneNode,
    pub mixer: AnimationMixer,
}

impl AnimatedNode {
    pub fn new(root: SceneNode, mixer: AnimationMixer) -> Self {
        Self { root, mixer }
    }

    pub fn still(root: SceneNode) -> Self {
        Self::new(root, AnimationMixer::default())
    }

    pub fn advance(&mut self, delta: f32) {
        if self.mixer.has_active() {
            self.mixer.advance(delta);
            self.mixer.apply(&mut self.root);
        }
    }
}

/// The clickable character. Unusable until its asset load completes.
#[derive(Default)]
pub struct InteractiveTarget {
    loaded: Option<AnimatedNode>,
    celebration_clip: Option<String>,
    triggered: bool,
}

impl InteractiveTarget {
    pub fn pending() -> Self {
        Self::default()
    }

    /// Called by the loader once the rig is available.
    pub fn attach(&mut self, node: AnimatedNode, celebration_clip: Option<String>) {
        log::info!(
            "[assets] interactive target `{}` ready ({} meshes)",
            node.root.name,
            node.root.mesh_count()
        );
        self.loaded = Some(node);
        self.celebration_clip = celebration_clip;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn root(&self) -> Option<&SceneNode> {
        self.loaded.as_ref().map(|n| &n.root)
    }

    pub fn node_mut(&mut self) -> Option<&mut AnimatedNode> {
        self.loaded.as_mut()
    }

    pub fn triggered(&self) -> bool {
        self.triggered
    }

    /// Start the celebration clip the first time only.
    ///
    /// Returns `false` when not loaded, when the rig has no clip, or when
    /// it already fired this session.
    pub fn trigger_celebration_clip(&mut self) -> bool {
        if self.triggered {
            return false;
        }
        let (Some(node), Some(clip)) = (self.loaded.as_mut(), self.celebration_clip.as_deref())
        else {
            return false;
        };
        if !node.mixer.play(clip) {
            log::warn!("[assets] celebration clip `{}` missing from mixer", clip);
            return false;
        }
        self.triggered = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_bounds_follow_transform() {
        let node = SceneNode::new("box")
            .with_transform(Transform::placed(Vec3::new(0.0, -2.0, 0.0), 0.0, 2.0))
            .with_mesh(TriMesh::cuboid(Vec3::ONE, [1.0; 3]));
        let b = node.world_bounds().unwrap();
        assert!((b.min - Vec3::new(-2.0, -4.0, -2.0)).length() < 1e-5);
        assert!((b.max - Vec3::new(2.0, 0.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn bounding_sphere_is_half_diagonal() {
        let b = Aabb {
            min: Vec3::splat(-1.0),
            max: Vec3::splat(1.0),
        };
        let (c, r) = b.bounding_sphere();
        assert_eq!(c, Vec3::ZERO);
        assert!((r - 3.0_f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn empty_node_has_no_enclosure() {
        assert_eq!(enclosure_radius(&SceneNode::new("empty"), 0.7), None);
    }

    #[test]
    fn enclosure_shell_faces_outward_at_radius() {
        let shell = enclosure_shell(12.0);
        assert!(shell.positions.iter().all(|p| (p.length() - 12.0).abs() < 1e-3));
        let mut count = 0;
        for [a, b, c] in shell.triangles() {
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid) > 0.0, "inward face at {centroid}");
            count += 1;
        }
        assert!(count > 0);
    }
}
