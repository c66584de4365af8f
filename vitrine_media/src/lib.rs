// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compositor media layers with toolbar and glass-handle interaction.
//!
//! `vitrine_media` builds on [`vitrine_core`]'s scene tree to manage
//! stereoscopic video surfaces composited by the XR runtime: creation
//! against a session, an in-world playback toolbar, and a transparent glass
//! proxy for moving and resizing flat layers. It is `no_std` compatible
//! (with `alloc`).
//!
//! # Architecture
//!
//! ```text
//!   XrSession ──► MediaLayerManager::create_media_layer() ──► MediaLayer
//!                        │  (async: reference space, then factory)   │
//!                        ▼                                           ▼
//!                  LayerFactory                         CompositorLayer + Toolbar
//!                                                          + GlassLayer (quads)
//! ```
//!
//! **[`session`]** — The consumed collaborator traits: a layer-capable
//! [`XrSession`], an HTML5-style [`VideoSource`], and the 2-D
//! [`PanelPainter`].
//!
//! **[`binding`]** — [`CompositorLayer`] data model, creation options, and
//! the session-scoped [`LayerFactory`] contract.
//!
//! **[`manager`]** — [`MediaLayerManager`]: eager kind validation, one
//! async reference-space acquisition, factory dispatch.
//!
//! **[`layer`]** — [`MediaLayer`]: one compositor layer + toolbar +
//! optional glass handle as a lifecycle unit with a per-frame update hook.
//!
//! **[`toolbar`]** — Transport buttons, progress bar with UV-accurate
//! seeking, expand/compress steps, and ratio-based fluid resize.
//!
//! **[`glass`]** — The transparent proxy quad and its phase-ordered
//! bidirectional pose/size sync with the compositor layer.
//!
//! **[`visibility`]** — Per-layer-key toolbar visibility owned by the scene
//! controller.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod binding;
pub mod glass;
pub mod layer;
pub mod manager;
pub mod session;
pub mod toolbar;
pub mod visibility;

pub use binding::{CompositorLayer, LayerFactory, LayerHandle, LayerInit, LayerKind, StereoLayout};
pub use glass::GlassLayer;
pub use layer::MediaLayer;
pub use manager::{MediaLayerError, MediaLayerManager};
pub use session::{ReferenceSpace, ReferenceSpaceKind, SessionEnded, VideoSource, XrSession};
pub use toolbar::{
    PanelPainter, PanelSpec, Toolbar, ToolbarGroupConfig, UiPanelConfig,
};
pub use visibility::VisibilityMap;
