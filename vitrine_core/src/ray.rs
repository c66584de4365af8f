// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ray casting against scene nodes.
//!
//! Hit-testable nodes are unit quads spanning `[-0.5, 0.5]²` in their local
//! XY plane; position, rotation, and size all come from the node's world
//! transform. The caster transforms the ray into each node's local space,
//! intersects the `z = 0` plane, and reports hits ordered nearest-first.
//!
//! Requires world transforms to be current: call
//! [`SceneStore::evaluate`](crate::scene::SceneStore::evaluate) before
//! casting.

use alloc::vec::Vec;

use kurbo::Point;

use crate::scene::{NodeId, NodeKind, SceneStore};
use crate::transform::{Transform3d, Vec3};

/// A world-space ray with unit direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Ray origin.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Creates a ray, normalizing `direction`.
    ///
    /// Returns `None` if the direction has (near) zero length.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.normalize()?;
        Some(Self { origin, direction })
    }

    /// Builds the pointing ray of a controller from its world transform:
    /// origin at the translation column, direction along the rotated local
    /// −Z axis.
    #[must_use]
    pub fn from_controller(world: &Transform3d) -> Option<Self> {
        Self::new(
            world.translation(),
            world.transform_vector(Vec3::new(0.0, 0.0, -1.0)),
        )
    }
}

/// A single ray/node hit.
#[derive(Clone, Copy, Debug)]
pub struct Intersection {
    /// The node that was hit.
    pub node: NodeId,
    /// World-space hit point.
    pub point: Vec3,
    /// Hit position on the quad, `(0, 0)` bottom-left to `(1, 1)` top-right.
    pub uv: Point,
    /// Distance from the ray origin to the hit point.
    pub distance: f64,
}

/// Casts `ray` against `targets`, returning hits ordered nearest-first.
///
/// Nodes that are effectively hidden, have a singular world transform, or are
/// grouping/anchor nodes (no geometry) produce no hit. Stale handles panic,
/// matching the store's accessor contract.
#[must_use]
pub fn cast(store: &SceneStore, targets: &[NodeId], ray: &Ray) -> Vec<Intersection> {
    let mut hits = Vec::new();

    for &node in targets {
        if !store.effective_visible(node) {
            continue;
        }
        if matches!(store.kind(node), NodeKind::Group | NodeKind::Anchor) {
            continue;
        }

        let world = store.world_transform(node);
        let Some(inv) = world.inverse() else {
            continue;
        };

        let local_origin = inv.transform_point(ray.origin);
        let local_dir = inv.transform_vector(ray.direction);
        if local_dir.z.abs() < 1e-12 {
            // Ray parallel to the quad plane.
            continue;
        }

        let t = -local_origin.z / local_dir.z;
        if t <= 1e-9 {
            // Plane is behind the ray origin.
            continue;
        }

        let local = local_origin + local_dir * t;
        if local.x.abs() > 0.5 || local.y.abs() > 0.5 {
            continue;
        }

        let point = world.transform_point(local);
        hits.push(Intersection {
            node,
            point,
            uv: Point::new(local.x + 0.5, local.y + 0.5),
            distance: point.distance(ray.origin),
        });
    }

    hits.sort_unstable_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

#[cfg(test)]
mod tests {
    use crate::transform::Quat;

    use super::*;

    fn quad(store: &mut SceneStore, kind: NodeKind, transform: Transform3d) -> NodeId {
        let id = store.create_node(kind);
        store.set_transform(id, transform);
        id
    }

    fn forward_ray() -> Ray {
        Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0)).expect("unit direction")
    }

    #[test]
    fn hits_centered_quad() {
        let mut store = SceneStore::new();
        let panel = quad(
            &mut store,
            NodeKind::Panel,
            Transform3d::from_translation(0.0, 0.0, -2.0),
        );
        let _ = store.evaluate();

        let hits = cast(&store, &[panel], &forward_ray());
        assert_eq!(hits.len(), 1);
        let hit = &hits[0];
        assert_eq!(hit.node, panel);
        assert!((hit.distance - 2.0).abs() < 1e-9);
        assert!((hit.uv.x - 0.5).abs() < 1e-9 && (hit.uv.y - 0.5).abs() < 1e-9);
    }

    #[test]
    fn off_center_hit_maps_uv() {
        let mut store = SceneStore::new();
        // 2×1 panel centered at the origin, 2 m away.
        let panel = quad(
            &mut store,
            NodeKind::Panel,
            Transform3d::from_translation(0.0, 0.0, -2.0) * Transform3d::from_scale(2.0, 1.0, 1.0),
        );
        let _ = store.evaluate();

        // Aim 0.5 m to the right of center: 3/4 across a 2 m panel.
        let ray = Ray::new(Vec3::new(0.5, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0)).expect("ray");
        let hits = cast(&store, &[panel], &ray);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].uv.x - 0.75).abs() < 1e-9, "uv {:?}", hits[0].uv);
    }

    #[test]
    fn misses_outside_bounds() {
        let mut store = SceneStore::new();
        let panel = quad(
            &mut store,
            NodeKind::Panel,
            Transform3d::from_translation(0.0, 0.0, -2.0),
        );
        let _ = store.evaluate();

        let ray = Ray::new(Vec3::new(0.6, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0)).expect("ray");
        assert!(cast(&store, &[panel], &ray).is_empty());
    }

    #[test]
    fn behind_origin_is_not_hit() {
        let mut store = SceneStore::new();
        let panel = quad(
            &mut store,
            NodeKind::Panel,
            Transform3d::from_translation(0.0, 0.0, 2.0),
        );
        let _ = store.evaluate();

        assert!(cast(&store, &[panel], &forward_ray()).is_empty());
    }

    #[test]
    fn hits_are_ordered_by_distance() {
        let mut store = SceneStore::new();
        let far = quad(
            &mut store,
            NodeKind::Panel,
            Transform3d::from_translation(0.0, 0.0, -5.0),
        );
        let near = quad(
            &mut store,
            NodeKind::Glass,
            Transform3d::from_translation(0.0, 0.0, -1.0),
        );
        let _ = store.evaluate();

        let hits = cast(&store, &[far, near], &forward_ray());
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].node, near);
        assert_eq!(hits[1].node, far);
    }

    #[test]
    fn hidden_nodes_are_skipped() {
        let mut store = SceneStore::new();
        let panel = quad(
            &mut store,
            NodeKind::Panel,
            Transform3d::from_translation(0.0, 0.0, -2.0),
        );
        store.set_visible(panel, false);
        let _ = store.evaluate();

        assert!(cast(&store, &[panel], &forward_ray()).is_empty());
    }

    #[test]
    fn rotated_quad_is_hit_through_its_plane() {
        let mut store = SceneStore::new();
        // Quad 2 m ahead, yawed 45°; still crosses the forward ray at center.
        let pose = crate::transform::Pose::new(
            Vec3::new(0.0, 0.0, -2.0),
            Quat::from_rotation_y(core::f64::consts::FRAC_PI_4),
        );
        let panel = quad(&mut store, NodeKind::Panel, pose.to_transform());
        let _ = store.evaluate();

        let hits = cast(&store, &[panel], &forward_ray());
        assert_eq!(hits.len(), 1);
        assert!((hits[0].uv.x - 0.5).abs() < 1e-9);
        assert!((hits[0].distance - 2.0).abs() < 1e-9);
    }

    #[test]
    fn controller_ray_points_down_negative_z() {
        let world = Transform3d::from_translation(0.2, 1.6, 0.0);
        let ray = Ray::from_controller(&world).expect("ray");
        assert_eq!(ray.origin, Vec3::new(0.2, 1.6, 0.0));
        assert!((ray.direction.z + 1.0).abs() < 1e-9);
    }
}
