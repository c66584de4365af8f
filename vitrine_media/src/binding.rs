// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compositor-layer handles and the layer-binding factory contract.
//!
//! A compositor layer is rendered by the XR runtime outside the normal scene
//! graph. The subsystem owns a [`CompositorLayer`] *data model* — kind,
//! dimensions, and transform — that the platform mirrors to the real layer
//! each frame, the same way a presenter applies store state to a native tree.

use vitrine_core::transform::Pose;

use crate::session::ReferenceSpace;

/// Opaque platform identifier for a created layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerHandle(pub u32);

/// Which compositor-layer shape to create.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// 360° equirectangular background sphere. Not spatially repositionable.
    Equirect,
    /// Flat movable panel.
    Quad,
}

impl LayerKind {
    /// The wire/config tag for this kind.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Equirect => "equirect",
            Self::Quad => "quad",
        }
    }
}

/// How stereo content is packed in the video frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StereoLayout {
    /// Monoscopic content.
    #[default]
    Mono,
    /// Left eye on the left half.
    StereoLeftRight,
    /// Left eye on the top half.
    StereoTopBottom,
}

/// Creation options for a compositor layer.
///
/// One struct covers both kinds: quads consume `transform`/`width`/`height`,
/// equirects consume `radius`. Unused fields are ignored by the factory.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerInit {
    /// Stereo packing of the source video.
    pub layout: StereoLayout,
    /// Initial placement (quad layers).
    pub transform: Pose,
    /// Initial width in world units (quad layers).
    pub width: f64,
    /// Initial height in world units (quad layers).
    pub height: f64,
    /// Sphere radius in world units, `0.0` for infinite (equirect layers).
    pub radius: f64,
}

impl Default for LayerInit {
    fn default() -> Self {
        Self {
            layout: StereoLayout::Mono,
            transform: Pose::IDENTITY,
            width: 1.0,
            height: 0.5625,
            radius: 0.0,
        }
    }
}

/// The mutable data model of one compositor layer.
///
/// Exclusively owned by one [`MediaLayer`](crate::MediaLayer). Width, height,
/// and transform are written by toolbar and glass interactions; the platform
/// backend reads them to update the real layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompositorLayer {
    /// Platform identifier.
    pub handle: LayerHandle,
    /// Layer shape.
    pub kind: LayerKind,
    /// Width in world units.
    pub width: f64,
    /// Height in world units.
    pub height: f64,
    /// Position and orientation in the layer's reference space.
    pub transform: Pose,
}

/// Session-scoped factory for compositor layers.
///
/// Acquired once per manager via
/// [`XrSession::create_media_binding`](crate::session::XrSession::create_media_binding).
pub trait LayerFactory {
    /// Creates a flat movable quad layer.
    fn create_quad(&mut self, space: &ReferenceSpace, init: &LayerInit) -> CompositorLayer;

    /// Creates an equirectangular background layer.
    fn create_equirect(&mut self, space: &ReferenceSpace, init: &LayerInit) -> CompositorLayer;
}
