//! Pointer picking against the interactive target.
//!
//! Everything here is a pure function of its inputs: the same pointer,
//! camera and target pose always give the same answer. Animated targets
//! are tested in whatever pose they hold at call time.

use crate::scene::{Aabb, InteractiveTarget, SceneNode};
use crate::state::Camera;
use glam::{Mat4, Vec2, Vec3, Vec4};
use smallvec::SmallVec;

const EPSILON: f32 = 1e-7;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Pointer position in viewport pixels (top-left origin).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Intersection {
    pub distance: f32,
    pub point: Vec3,
    pub node: String,
}

pub type PickHit = Intersection;

/// Map pixel coordinates to normalized device coordinates in [-1, 1],
/// with +y up. Returns `None` for empty or non-finite viewports.
pub fn pointer_to_ndc(pointer: PointerSample, viewport: Viewport) -> Option<Vec2> {
    let Viewport { width, height } = viewport;
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return None;
    }
    if !(pointer.x.is_finite() && pointer.y.is_finite()) {
        return None;
    }
    Some(Vec2::new(
        (pointer.x / width) * 2.0 - 1.0,
        -(pointer.y / height) * 2.0 + 1.0,
    ))
}

/// World-space ray from the camera eye through an NDC point.
pub fn camera_ray(camera: &Camera, ndc: Vec2) -> Option<Ray> {
    let inv = camera.view_projection().inverse();
    let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
    if p_far.w.abs() < EPSILON {
        return None;
    }
    let far = p_far.truncate() / p_far.w;
    let dir = (far - camera.eye).try_normalize()?;
    Some(Ray {
        origin: camera.eye,
        dir,
    })
}

/// Möller–Trumbore. Returns the ray parameter of the hit, if in front.
pub fn ray_triangle(ray: &Ray, tri: [Vec3; 3], double_sided: bool) -> Option<f32> {
    let e1 = tri[1] - tri[0];
    let e2 = tri[2] - tri[0];
    let p = ray.dir.cross(e2);
    let det = e1.dot(p);
    // det < 0 means the ray sees the clockwise (back) side
    if double_sided {
        if det.abs() < EPSILON {
            return None;
        }
    } else if det < EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = ray.origin - tri[0];
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = ray.dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}

/// Slab test. Returns the entry parameter (0 when starting inside).
pub fn ray_aabb(ray: &Ray, b: &Aabb) -> Option<f32> {
    let inv = ray.dir.recip();
    let t0 = (b.min - ray.origin) * inv;
    let t1 = (b.max - ray.origin) * inv;
    let tmin = t0.min(t1);
    let tmax = t0.max(t1);
    // NaN from 0 * inf on axis-parallel rays is dropped by max/min_element
    let near = tmin.max_element().max(0.0);
    let far = tmax.min_element();
    (near <= far).then_some(near)
}

/// Every hit in `root`'s hierarchy, nearest first.
pub fn intersect_hierarchy(ray: &Ray, root: &SceneNode) -> SmallVec<[Intersection; 8]> {
    let mut hits: SmallVec<[Intersection; 8]> = SmallVec::new();
    root.traverse(Mat4::IDENTITY, &mut |node, world| {
        let Some(mesh) = &node.mesh else {
            return;
        };
        if ray_aabb(ray, &mesh.bounds().transformed(world)).is_none() {
            return;
        }
        // mirrored transforms flip winding
        let mirrored = world.determinant() < 0.0;
        let nearest = mesh
            .triangles()
            .filter_map(|t| {
                let mut w = t.map(|v| world.transform_point3(v));
                if mirrored {
                    w.swap(1, 2);
                }
                ray_triangle(ray, w, mesh.double_sided)
            })
            .fold(None, |best: Option<f32>, t| Some(best.map_or(t, |b| b.min(t))));
        if let Some(t) = nearest {
            hits.push(Intersection {
                distance: t,
                point: ray.at(t),
                node: node.name.clone(),
            });
        }
    });
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// Cast from the camera through the pointer and test the target.
///
/// Unloaded targets and degenerate viewports report no hit.
pub fn resolve_pick(
    pointer: PointerSample,
    viewport: Viewport,
    camera: &Camera,
    target: &InteractiveTarget,
) -> Option<PickHit> {
    let root = target.root()?;
    let ndc = pointer_to_ndc(pointer, viewport)?;
    let ray = camera_ray(camera, ndc)?;
    intersect_hierarchy(&ray, root).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ndc_corners() {
        let vp = Viewport {
            width: 200.0,
            height: 100.0,
        };
        let tl = pointer_to_ndc(PointerSample { x: 0.0, y: 0.0 }, vp).unwrap();
        assert_eq!(tl, Vec2::new(-1.0, 1.0));
        let br = pointer_to_ndc(PointerSample { x: 200.0, y: 100.0 }, vp).unwrap();
        assert_eq!(br, Vec2::new(1.0, -1.0));
        let c = pointer_to_ndc(PointerSample { x: 100.0, y: 50.0 }, vp).unwrap();
        assert_eq!(c, Vec2::ZERO);
    }

    #[test]
    fn back_faces_are_skipped_unless_double_sided() {
        let tri = [
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let from_front = Ray {
            origin: Vec3::new(0.0, 0.0, 5.0),
            dir: Vec3::NEG_Z,
        };
        let from_back = Ray {
            origin: Vec3::new(0.0, 0.0, -5.0),
            dir: Vec3::Z,
        };
        assert!((ray_triangle(&from_front, tri, false).unwrap() - 5.0).abs() < 1e-5);
        assert_eq!(ray_triangle(&from_back, tri, false), None);
        assert!(ray_triangle(&from_back, tri, true).is_some());
    }

    #[test]
    fn aabb_slab_hits_and_misses() {
        let b = Aabb {
            min: Vec3::splat(-1.0),
            max: Vec3::splat(1.0),
        };
        let hit = Ray {
            origin: Vec3::new(0.0, 0.0, 5.0),
            dir: Vec3::NEG_Z,
        };
        assert!((ray_aabb(&hit, &b).unwrap() - 4.0).abs() < 1e-5);
        let miss = Ray {
            origin: Vec3::new(3.0, 0.0, 5.0),
            dir: Vec3::NEG_Z,
        };
        assert_eq!(ray_aabb(&miss, &b), None);
        let behind = Ray {
            origin: Vec3::new(0.0, 0.0, 5.0),
            dir: Vec3::Z,
        };
        assert_eq!(ray_aabb(&behind, &b), None);
    }
}
