// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene-node data model.
//!
//! A *node* is an entry in the in-world mesh tree that gesture and toolbar
//! code manipulates: UI panels, progress bars, resize and glass handles,
//! gesture-spawned markers, and the anchor nodes that stand in for
//! controllers and hand joints. Each node has:
//!
//! - An identity ([`NodeId`]) — a generational handle that becomes stale when
//!   the node is destroyed, preventing use-after-free bugs at the API level.
//! - Topology — parent, first-child, and sibling links forming an ordered
//!   tree. [`reparent_keep_world`](SceneStore::reparent_keep_world) moves a
//!   node between parents without a visual jump, which is how grabbed objects
//!   transfer between the world frame and a hand-joint frame.
//! - **Local properties** set by the caller:
//!   [`transform`](SceneStore::set_transform) and
//!   [`visible`](SceneStore::set_visible), plus an immutable [`NodeKind`]
//!   assigned at creation that hit-test consumers dispatch on.
//! - **Computed properties** produced by [`evaluate`](SceneStore::evaluate):
//!   `world_transform` (product of ancestor local transforms) and
//!   `effective_visible` (AND of ancestor visibility flags).
//!
//! Nodes are stored in struct-of-arrays layout with index-based handles for
//! cache-friendly traversal. Property mutations automatically mark the
//! corresponding dirty channel (see [`dirty`](crate::dirty)).

mod evaluate;
mod id;
mod store;
mod traverse;

pub use evaluate::FrameChanges;
pub use id::{INVALID, NodeId};
pub use store::{NodeKind, SceneStore};
pub use traverse::Children;
