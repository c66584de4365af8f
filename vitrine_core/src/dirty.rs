// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The scene store uses multi-channel dirty tracking (via [`understory_dirty`])
//! to propagate invalidation through the node tree. Each channel represents an
//! independent category of change.
//!
//! # Propagation semantics
//!
//! - **Propagating** — [`TRANSFORM`] and [`VISIBILITY`] use
//!   [`EagerPolicy`](understory_dirty::EagerPolicy) and have dependency edges
//!   from child to parent. Marking a parent dirty automatically marks all
//!   descendants, because world transforms and effective visibility are
//!   inherited properties.
//!
//! - **Structural** — [`TOPOLOGY`] is marked on topology mutations
//!   (add/remove child, create/destroy node, reparent). It triggers a
//!   traversal-order rebuild during evaluation but does not propagate to
//!   descendants.
//!
//! # Consumption
//!
//! Callers never query dirty state directly. Each
//! [`SceneStore::evaluate`](crate::scene::SceneStore::evaluate) call drains
//! all channels and surfaces the results as
//! [`FrameChanges`](crate::scene::FrameChanges).

use understory_dirty::Channel;

/// Transform changed — requires world transform recomputation for descendants.
pub const TRANSFORM: Channel = Channel::new(0);

/// Visibility flag changed — requires effective-visibility recomputation for
/// descendants.
pub const VISIBILITY: Channel = Channel::new(1);

/// Tree topology changed — triggers traversal order rebuild.
pub const TOPOLOGY: Channel = Channel::new(2);
