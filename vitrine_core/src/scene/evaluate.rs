// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame evaluation and change tracking.
//!
//! Evaluation follows a drain-recompute pattern for each dirty channel:
//!
//! 1. **TRANSFORM** — Drain dirty indices, recompute each node's
//!    `world_transform` as `parent_world * local_transform`.
//! 2. **VISIBILITY** — Drain dirty indices, recompute each node's
//!    `effective_visible` as `parent_effective && visible`, reporting
//!    transitions in the `shown`/`hidden` lists.
//! 3. **TOPOLOGY** — Drain and discard (the traversal order was already
//!    rebuilt at the start of evaluation if needed).
//!
//! [`FrameChanges`] uses raw slot indices (`u32`) rather than [`NodeId`]
//! handles so that per-frame consumers can index directly into the store's
//! SoA arrays via the `*_at()` accessors without paying for generation checks
//! on every access.
//!
//! [`NodeId`]: super::NodeId

use alloc::vec::Vec;

use super::id::INVALID;
use super::store::SceneStore;
use crate::dirty;

/// The set of changes produced by a single [`SceneStore::evaluate`] call.
///
/// Each field contains the raw slot indices of nodes that changed in the
/// corresponding category.
#[derive(Clone, Debug, Default)]
pub struct FrameChanges {
    /// Nodes whose world transform was recomputed.
    pub transforms: Vec<u32>,
    /// Nodes that transitioned from visible to effectively hidden.
    pub hidden: Vec<u32>,
    /// Nodes that transitioned from effectively hidden to visible.
    pub shown: Vec<u32>,
    /// Nodes added since the last evaluate.
    pub added: Vec<u32>,
    /// Nodes removed since the last evaluate.
    pub removed: Vec<u32>,
    /// Whether the tree topology changed (traversal order was rebuilt).
    pub topology_changed: bool,
}

impl FrameChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.transforms.clear();
        self.hidden.clear();
        self.shown.clear();
        self.added.clear();
        self.removed.clear();
        self.topology_changed = false;
    }
}

impl SceneStore {
    /// Evaluates the node tree, recomputing dirty properties and returning
    /// the set of changes.
    ///
    /// Rebuilds the traversal order if topology changed, then drains each
    /// dirty channel and recomputes world transforms and effective visibility
    /// in parent-before-child order.
    pub fn evaluate(&mut self) -> FrameChanges {
        let mut changes = FrameChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer
    /// to avoid allocation.
    pub fn evaluate_into(&mut self, changes: &mut FrameChanges) {
        changes.clear();

        if self.traversal_dirty {
            self.rebuild_traversal_order();
            changes.topology_changed = true;
            self.traversal_dirty = false;
        }

        // Drain TRANSFORM channel — collect dirty indices, then recompute.
        let dirty_transforms: Vec<u32> = self
            .dirty
            .drain(dirty::TRANSFORM)
            .affected()
            .deterministic()
            .run()
            .collect();
        for &idx in &dirty_transforms {
            let parent_idx = self.parent[idx as usize];
            let parent_world = if parent_idx != INVALID {
                self.world_transform[parent_idx as usize]
            } else {
                crate::transform::Transform3d::IDENTITY
            };
            self.world_transform[idx as usize] = parent_world * self.local_transform[idx as usize];
        }
        changes.transforms = dirty_transforms;

        // Drain VISIBILITY channel.
        let dirty_visibility: Vec<u32> = self
            .dirty
            .drain(dirty::VISIBILITY)
            .affected()
            .deterministic()
            .run()
            .collect();
        for &idx in &dirty_visibility {
            let parent_idx = self.parent[idx as usize];
            let parent_visible = if parent_idx != INVALID {
                self.effective_visible[parent_idx as usize]
            } else {
                true
            };
            let new_visible = parent_visible && self.visible[idx as usize];
            let old_visible = self.effective_visible[idx as usize];
            if new_visible != old_visible {
                if new_visible {
                    changes.shown.push(idx);
                } else {
                    changes.hidden.push(idx);
                }
                self.effective_visible[idx as usize] = new_visible;
            }
        }

        // Drain TOPOLOGY channel (just consume, changes are structural).
        let _: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();

        // Move lifecycle lists.
        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
    }

    /// Returns the current traversal order (depth-first pre-order).
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called at least
    /// once.
    #[must_use]
    pub fn traversal_order(&self) -> &[u32] {
        &self.traversal_order
    }

    /// Rebuilds the depth-first pre-order traversal of all live nodes.
    fn rebuild_traversal_order(&mut self) {
        self.traversal_order.clear();
        for idx in 0..self.len {
            if self.parent[idx as usize] == INVALID && !self.free_list.contains(&idx) {
                self.dfs_collect(idx);
            }
        }
    }

    /// Depth-first pre-order collection starting from `idx`.
    fn dfs_collect(&mut self, idx: u32) {
        self.traversal_order.push(idx);
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            self.dfs_collect(child);
            child = self.next_sibling[child as usize];
        }
    }
}
