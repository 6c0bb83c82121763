//! Ray picking against mesh nodes.
//!
//! Rays are moved into each node's local space (rotation + translation only,
//! so distances are preserved) and tested against the analytic shape.

use glam::Vec3;
use crate::api::types::NodeId;
use crate::components::mesh::Geometry;
use crate::core::scene::Scene;

const EPSILON: f32 = 1e-6;

/// A ray with a normalized direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// One intersection, in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub node: NodeId,
    pub distance: f32,
    pub point: Vec3,
}

/// Nearest non-negative ray parameter where a local-space ray meets `geometry`.
pub fn intersect_geometry(origin: Vec3, direction: Vec3, geometry: &Geometry) -> Option<f32> {
    match *geometry {
        Geometry::Sphere { radius } => intersect_sphere(origin, direction, radius),
        Geometry::Cylinder { radius, height } => intersect_cylinder(origin, direction, radius, height / 2.0),
    }
}

fn intersect_sphere(origin: Vec3, direction: Vec3, radius: f32) -> Option<f32> {
    let b = origin.dot(direction);
    let c = origin.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let root = disc.sqrt();
    let near = -b - root;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + root;
    (far >= 0.0).then_some(far)
}

fn intersect_cylinder(origin: Vec3, direction: Vec3, radius: f32, half_height: f32) -> Option<f32> {
    let mut best: Option<f32> = None;
    let mut consider = |t: f32| {
        if t >= 0.0 && best.map_or(true, |b| t < b) {
            best = Some(t);
        }
    };

    // Side wall
    let a = direction.x * direction.x + direction.z * direction.z;
    if a > EPSILON {
        let b = origin.x * direction.x + origin.z * direction.z;
        let c = origin.x * origin.x + origin.z * origin.z - radius * radius;
        let disc = b * b - a * c;
        if disc >= 0.0 {
            let root = disc.sqrt();
            for t in [(-b - root) / a, (-b + root) / a] {
                let y = origin.y + direction.y * t;
                if y.abs() <= half_height {
                    consider(t);
                }
            }
        }
    }

    // Caps
    if direction.y.abs() > EPSILON {
        for cap in [half_height, -half_height] {
            let t = (cap - origin.y) / direction.y;
            let x = origin.x + direction.x * t;
            let z = origin.z + direction.z * t;
            if x * x + z * z <= radius * radius {
                consider(t);
            }
        }
    }

    best
}

fn in_subtree(scene: &Scene, id: NodeId, root: NodeId) -> bool {
    let mut current = Some(id);
    for _ in 0..=scene.len() {
        match current {
            Some(c) if c == root => return true,
            Some(c) => current = scene.get(c).and_then(|n| n.parent),
            None => return false,
        }
    }
    false
}

/// Every visible mesh node under `root` (`None` = whole scene) hit by `ray`,
/// nearest first. Lines and groups are never hit.
pub fn intersect_subtree(scene: &Scene, root: Option<NodeId>, ray: &Ray) -> Vec<Hit> {
    let mut hits: Vec<Hit> = Vec::new();
    for node in scene.iter() {
        let Some(mesh) = &node.mesh else { continue };
        if let Some(r) = root {
            if !in_subtree(scene, node.id, r) {
                continue;
            }
        }
        if !scene.is_visible(node.id) {
            continue;
        }
        let Some(world) = scene.world_transform(node.id) else { continue };
        let inverse = world.inverse();
        let local_origin = inverse.transform_point3(ray.origin);
        let local_dir = inverse.transform_vector3(ray.direction);
        if let Some(t) = intersect_geometry(local_origin, local_dir, &mesh.geometry) {
            hits.push(Hit {
                node: node.id,
                distance: t,
                point: ray.at(t),
            });
        }
    }
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mesh::{Material, MeshComponent};
    use crate::components::node::Node;

    fn sphere_node(id: u32, pos: Vec3, radius: f32) -> Node {
        Node::new(NodeId(id))
            .with_position(pos)
            .with_mesh(MeshComponent::new(Geometry::sphere(radius), Material::default()))
    }

    #[test]
    fn sphere_hit_distance() {
        let t = intersect_sphere(Vec3::new(0.0, 0.0, 100.0), Vec3::NEG_Z, 10.0).unwrap();
        assert!((t - 90.0).abs() < 1e-4);
    }

    #[test]
    fn sphere_behind_ray_misses() {
        assert!(intersect_sphere(Vec3::new(0.0, 0.0, 100.0), Vec3::Z, 10.0).is_none());
    }

    #[test]
    fn cylinder_cap_hit_from_above() {
        let t = intersect_cylinder(Vec3::new(0.0, 100.0, 0.0), Vec3::NEG_Y, 50.0, 5.0).unwrap();
        assert!((t - 95.0).abs() < 1e-4);
    }

    #[test]
    fn cylinder_side_hit() {
        let t = intersect_cylinder(Vec3::new(0.0, 0.0, 100.0), Vec3::NEG_Z, 50.0, 5.0).unwrap();
        assert!((t - 50.0).abs() < 1e-4);
    }

    #[test]
    fn cylinder_passing_over_rim_misses() {
        assert!(intersect_cylinder(Vec3::new(0.0, 6.0, 100.0), Vec3::NEG_Z, 50.0, 5.0).is_none());
    }

    #[test]
    fn hits_sorted_nearest_first() {
        let mut scene = Scene::new();
        scene.spawn(sphere_node(1, Vec3::ZERO, 10.0));
        scene.spawn(sphere_node(2, Vec3::new(0.0, 0.0, 50.0), 5.0));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 200.0), Vec3::NEG_Z);
        let hits = intersect_subtree(&scene, None, &ray);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].node, NodeId(2));
        assert_eq!(hits[1].node, NodeId(1));
    }

    #[test]
    fn child_uses_world_position_and_visibility() {
        let mut scene = Scene::new();
        scene.spawn(Node::new(NodeId(1)).with_position(Vec3::new(100.0, 0.0, 0.0)));
        scene.attach(sphere_node(2, Vec3::ZERO, 5.0), Some(NodeId(1))).unwrap();
        let ray = Ray::new(Vec3::new(100.0, 0.0, 200.0), Vec3::NEG_Z);
        assert_eq!(intersect_subtree(&scene, None, &ray).len(), 1);
        assert_eq!(intersect_subtree(&scene, Some(NodeId(1)), &ray).len(), 1);

        scene.get_mut(NodeId(1)).unwrap().visible = false;
        assert!(intersect_subtree(&scene, None, &ray).is_empty());
    }
}
