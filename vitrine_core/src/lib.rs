// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene-node tree, ray casting, and hand-gesture recognition for XR media
//! scenes.
//!
//! `vitrine_core` provides the foundational data structures for in-world
//! interaction: a tree of hit-testable scene nodes, distance-threshold
//! gesture classification over per-frame hand-joint snapshots, and the ray
//! casting that connects controller input to UI surfaces. It is `no_std`
//! compatible (with `alloc`) and uses array-based struct-of-arrays storage
//! with index handles for cache-friendly traversal.
//!
//! # Architecture
//!
//! Everything runs inside a single per-frame callback:
//!
//! ```text
//!   input sources ──► HandFrame snapshots ──► GestureDetector ──► GestureEvent
//!        │                                                            │
//!        ▼                                                            ▼
//!   controller pose ──► Ray ──► ray::cast() ──► Intersection      caller acts
//!                                  ▲                              (spawn, grab,
//!                                  │                               delete, seek)
//!                        SceneStore::evaluate()
//! ```
//!
//! **[`scene`]** — Struct-of-arrays node tree with generational handles.
//! Transforms and visibility are set by the caller; world transforms and
//! effective visibility are computed by evaluation. Reparenting helpers
//! preserve world pose for grab interactions.
//!
//! **[`dirty`]** — Multi-channel dirty tracking via `understory_dirty`.
//! TRANSFORM and VISIBILITY propagate to descendants; TOPOLOGY triggers a
//! traversal rebuild.
//!
//! **[`transform`]** — Minimal 3-D math: `Vec3`, `Quat`, `Pose`, and a
//! column-major 4×4 `Transform3d` with affine inversion.
//!
//! **[`ray`]** — Controller-ray casting against unit-quad nodes, producing
//! distance-ordered `{node, point, uv}` intersection records.
//!
//! **[`hand`]** — Per-frame hand-joint snapshots. Untracked joints are
//! absent, never errors.
//!
//! **[`gesture`]** — Pinch, grab, snap, and spider-pose detectors as
//! poll-and-diff state machines emitting edge-triggered events.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! interaction-loop instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod dirty;
pub mod gesture;
pub mod hand;
pub mod ray;
pub mod scene;
pub mod trace;
pub mod transform;
