// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transparent proxy surface for a movable compositor layer.
//!
//! A compositor layer is rendered by the XR runtime outside the scene graph,
//! so it cannot be hit-tested or parented directly. The glass layer is an
//! in-scene stand-in: a transparent quad that tracks the layer's size and
//! pose, takes the ray hits, and carries controller-driven moves.
//!
//! # Sync direction
//!
//! The two objects stay co-located with one authoritative direction per
//! phase, never reading a value written in the same phase:
//!
//! - **Pose, glass → layer**: each [`update_on_render`](GlassLayer::update_on_render)
//!   reads the glass node's evaluated *world* pose (it may be parented to a
//!   controller anchor mid-drag, so a local read would be wrong) and writes
//!   it into the layer transform.
//! - **Size, layer → glass**: the node's scale is then rewritten from the
//!   layer's current `2×width, 2×height`.
//!
//! After a controller attach/detach or an engage/disengage resize, both
//! objects re-converge on the next frame.

use vitrine_core::scene::{NodeId, NodeKind, SceneStore};
use vitrine_core::transform::{Pose, Transform3d, Vec3};

use crate::binding::CompositorLayer;

/// In-scene proxy quad for one movable compositor layer.
#[derive(Clone, Copy, Debug)]
pub struct GlassLayer {
    node: NodeId,
}

impl GlassLayer {
    /// Creates the glass node co-located with `layer`, scaled to twice its
    /// dimensions.
    pub fn new(store: &mut SceneStore, layer: &CompositorLayer) -> Self {
        let node = store.create_node(NodeKind::Glass);
        store.set_transform(
            node,
            layer.transform.to_transform() * Self::scale_for(layer),
        );
        Self { node }
    }

    /// The proxy node (hit-test and grab target).
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// Writes a controller-provided pose into the glass node, preserving its
    /// scale.
    ///
    /// The pose is written as the node's local transform, so this is only
    /// meaningful while the glass is in the world frame (not attached to an
    /// anchor).
    pub fn move_to(&self, store: &mut SceneStore, pose: Pose) {
        let scale = Self::extract_scale(&store.local_transform(self.node));
        store.set_transform(
            self.node,
            pose.to_transform() * Transform3d::from_scale(scale.x, scale.y, scale.z),
        );
    }

    /// Re-synchronizes the glass with the layer's pose (layer → glass), used
    /// after the layer is repositioned programmatically.
    pub fn follow_layer(&self, store: &mut SceneStore, layer: &CompositorLayer) {
        self.move_to(store, layer.transform);
    }

    /// Attaches the glass to a controller/joint anchor, preserving its world
    /// pose. The glass then follows the anchor until [`detach`](Self::detach).
    pub fn attach_to(&self, store: &mut SceneStore, anchor: NodeId) {
        store.reparent_keep_world(self.node, anchor);
    }

    /// Returns the glass to the world frame, preserving its world pose.
    /// No-op if it is already a root.
    pub fn detach(&self, store: &mut SceneStore) {
        if store.parent(self.node).is_some() {
            store.remove_from_parent_keep_world(self.node);
        }
    }

    /// Per-frame sync. Call after [`SceneStore::evaluate`].
    ///
    /// Reads the node's evaluated world pose into `layer.transform`, then
    /// rewrites the node's scale from the layer's dimensions.
    pub fn update_on_render(&self, store: &mut SceneStore, layer: &mut CompositorLayer) {
        let world = store.world_transform(self.node);
        layer.transform = Pose::from_transform(&world);

        let local = store.local_transform(self.node);
        let pose = Pose::from_transform(&local);
        store.set_transform(self.node, pose.to_transform() * Self::scale_for(layer));
    }

    fn scale_for(layer: &CompositorLayer) -> Transform3d {
        Transform3d::from_scale(2.0 * layer.width, 2.0 * layer.height, 1.0)
    }

    fn extract_scale(t: &Transform3d) -> Vec3 {
        let c = &t.cols;
        Vec3::new(
            Vec3::new(c[0][0], c[0][1], c[0][2]).length(),
            Vec3::new(c[1][0], c[1][1], c[1][2]).length(),
            Vec3::new(c[2][0], c[2][1], c[2][2]).length(),
        )
    }
}

#[cfg(test)]
mod tests {
    use vitrine_core::transform::Quat;

    use crate::binding::{LayerHandle, LayerKind};

    use super::*;

    fn quad_layer() -> CompositorLayer {
        CompositorLayer {
            handle: LayerHandle(1),
            kind: LayerKind::Quad,
            width: 1.5,
            height: 0.75,
            transform: Pose::from_translation(0.0, 1.3, -2.75),
        }
    }

    fn world_pose(store: &SceneStore, node: NodeId) -> Pose {
        Pose::from_transform(&store.world_transform(node))
    }

    #[test]
    fn glass_starts_colocated_and_double_sized() {
        let mut store = SceneStore::new();
        let layer = quad_layer();
        let glass = GlassLayer::new(&mut store, &layer);
        let _ = store.evaluate();

        let pose = world_pose(&store, glass.node());
        assert!(pose.position.distance(layer.transform.position) < 1e-9);

        let scale = GlassLayer::extract_scale(&store.world_transform(glass.node()));
        assert!((scale.x - 3.0).abs() < 1e-9 && (scale.y - 1.5).abs() < 1e-9);
    }

    #[test]
    fn layer_pose_round_trips_through_glass() {
        let mut store = SceneStore::new();
        let mut layer = quad_layer();
        let glass = GlassLayer::new(&mut store, &layer);

        // Direction A: reposition the layer, follow, and the glass world
        // pose matches.
        let p = Pose::new(Vec3::new(0.5, 1.0, -2.0), Quat::from_rotation_y(0.4));
        layer.transform = p;
        glass.follow_layer(&mut store, &layer);
        let _ = store.evaluate();
        let glass_pose = world_pose(&store, glass.node());
        assert!(glass_pose.position.distance(p.position) < 1e-9);

        // Direction B: the write-back leaves the layer at the same pose.
        glass.update_on_render(&mut store, &mut layer);
        assert!(layer.transform.position.distance(p.position) < 1e-9);
        let v = Vec3::new(0.2, 0.7, -0.1);
        assert!(
            layer
                .transform
                .orientation
                .rotate(v)
                .distance(p.orientation.rotate(v))
                < 1e-9
        );
    }

    #[test]
    fn controller_move_writes_back_to_layer() {
        let mut store = SceneStore::new();
        let mut layer = quad_layer();
        let glass = GlassLayer::new(&mut store, &layer);

        let q = Pose::new(Vec3::new(-1.0, 2.0, -1.5), Quat::from_rotation_z(0.2));
        glass.move_to(&mut store, q);
        let _ = store.evaluate();
        glass.update_on_render(&mut store, &mut layer);

        assert!(layer.transform.position.distance(q.position) < 1e-9);
    }

    #[test]
    fn attach_detach_cycle_converges_within_one_frame() {
        let mut store = SceneStore::new();
        let mut layer = quad_layer();
        let glass = GlassLayer::new(&mut store, &layer);
        let controller = store.create_node(NodeKind::Anchor);
        store.set_transform(controller, Transform3d::from_translation(0.2, 1.4, -0.5));

        // Grab: attachment itself must not move anything.
        glass.attach_to(&mut store, controller);
        let _ = store.evaluate();
        glass.update_on_render(&mut store, &mut layer);
        assert!(
            layer
                .transform
                .position
                .distance(Vec3::new(0.0, 1.3, -2.75))
                < 1e-9
        );

        // Drag the controller; the glass world pose follows and writes back.
        store.set_transform(controller, Transform3d::from_translation(0.2, 1.4, -1.5));
        let _ = store.evaluate();
        glass.update_on_render(&mut store, &mut layer);
        assert!(
            (layer.transform.position.z - (-3.75)).abs() < 1e-9,
            "layer followed the 1 m controller drag, got {:?}",
            layer.transform.position
        );

        // Release: detaching preserves the world pose.
        glass.detach(&mut store);
        let _ = store.evaluate();
        glass.update_on_render(&mut store, &mut layer);
        assert!((layer.transform.position.z - (-3.75)).abs() < 1e-9);
        assert_eq!(store.parent(glass.node()), None);
    }

    #[test]
    fn resize_resyncs_glass_scale() {
        let mut store = SceneStore::new();
        let mut layer = quad_layer();
        let glass = GlassLayer::new(&mut store, &layer);
        let _ = store.evaluate();

        layer.width = 3.0;
        layer.height = 1.5;
        glass.update_on_render(&mut store, &mut layer);
        let _ = store.evaluate();

        let scale = GlassLayer::extract_scale(&store.world_transform(glass.node()));
        assert!((scale.x - 6.0).abs() < 1e-9 && (scale.y - 3.0).abs() < 1e-9);
    }

    #[test]
    fn detach_without_parent_is_a_no_op() {
        let mut store = SceneStore::new();
        let layer = quad_layer();
        let glass = GlassLayer::new(&mut store, &layer);
        glass.detach(&mut store);
        assert_eq!(store.parent(glass.node()), None);
    }
}
