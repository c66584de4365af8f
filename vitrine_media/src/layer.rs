// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One compositor layer with its interaction surfaces.
//!
//! A [`MediaLayer`] couples one [`CompositorLayer`], its video source, a
//! [`Toolbar`], and — for movable quad layers — a [`GlassLayer`] into one
//! lifecycle unit. Equirect layers are backgrounds and never get a glass
//! handle.
//!
//! Per frame, the scene controller:
//!
//! 1. casts controller rays against [`objects`](MediaLayer::objects),
//! 2. routes hits through [`press`](MediaLayer::press) /
//!    [`update`](MediaLayer::update) / [`drag_resize`](MediaLayer::drag_resize)
//!    according to trigger state,
//! 3. evaluates the scene store, and
//! 4. calls [`update_on_render`](MediaLayer::update_on_render).

use alloc::vec::Vec;

use vitrine_core::ray::Intersection;
use vitrine_core::scene::{NodeId, SceneStore};
use vitrine_core::transform::Vec3;

use crate::binding::{CompositorLayer, LayerKind};
use crate::glass::GlassLayer;
use crate::session::VideoSource;
use crate::toolbar::{PanelPainter, Toolbar, ToolbarGroupConfig, UiPanelConfig};

/// One compositor layer, its toolbar, and (for quads) its glass handle.
#[derive(Debug)]
pub struct MediaLayer<V: VideoSource> {
    layer: CompositorLayer,
    video: V,
    toolbar: Toolbar,
    glass: Option<GlassLayer>,
}

impl<V: VideoSource> MediaLayer<V> {
    /// Builds the interaction surfaces for a freshly created compositor
    /// layer.
    ///
    /// With no explicit `toolbar_group` config, the toolbar sits directly
    /// under the layer's bottom edge. Quad layers get a glass handle and a
    /// resizable toolbar; equirect layers get neither.
    pub fn new(
        store: &mut SceneStore,
        layer: CompositorLayer,
        video: V,
        ui: UiPanelConfig,
        toolbar_group: Option<ToolbarGroupConfig>,
    ) -> Self {
        let movable = layer.kind == LayerKind::Quad;
        let group_config =
            toolbar_group.unwrap_or_else(|| ToolbarGroupConfig::below_layer(&layer));
        let toolbar = Toolbar::new(store, &layer, ui, &group_config, movable);
        let glass = movable.then(|| GlassLayer::new(store, &layer));
        Self {
            layer,
            video,
            toolbar,
            glass,
        }
    }

    /// The compositor-layer data model.
    #[must_use]
    pub const fn layer(&self) -> &CompositorLayer {
        &self.layer
    }

    /// The video source.
    #[must_use]
    pub const fn video(&self) -> &V {
        &self.video
    }

    /// Mutable access to the video source.
    pub const fn video_mut(&mut self) -> &mut V {
        &mut self.video
    }

    /// The toolbar.
    #[must_use]
    pub const fn toolbar(&self) -> &Toolbar {
        &self.toolbar
    }

    /// The glass handle, present iff the layer is a movable quad.
    #[must_use]
    pub const fn glass(&self) -> Option<&GlassLayer> {
        self.glass.as_ref()
    }

    /// The toolbar group node (show/hide target).
    #[must_use]
    pub const fn toolbar_group(&self) -> NodeId {
        self.toolbar.group()
    }

    /// The nodes eligible for ray intersection: toolbar controls plus the
    /// glass handle when present.
    #[must_use]
    pub fn objects(&self) -> Vec<NodeId> {
        let mut objects = self.toolbar.objects();
        if let Some(glass) = &self.glass {
            objects.push(glass.node());
        }
        objects
    }

    /// Routes held-trigger intersections to the toolbar (progress-bar seek).
    pub fn update(
        &mut self,
        store: &mut SceneStore,
        intersections: &[Intersection],
    ) -> Option<&'static str> {
        self.toolbar.update(store, &mut self.video, intersections)
    }

    /// Handles a trigger press: button dispatch or resize engagement.
    pub fn press(
        &mut self,
        store: &SceneStore,
        intersections: &[Intersection],
        controller_pos: Vec3,
    ) -> Option<&'static str> {
        let Self {
            layer,
            video,
            toolbar,
            ..
        } = self;
        toolbar.press(store, video, layer, intersections, controller_pos)
    }

    /// Advances an engaged fluid resize from the controller position.
    pub fn drag_resize(&mut self, controller_pos: Vec3) {
        self.toolbar.update_resize(&mut self.layer, controller_pos);
    }

    /// Handles a trigger release (ends any engaged resize).
    pub fn release(&mut self) {
        self.toolbar.end_resize();
    }

    /// Per-frame refresh. Call after [`SceneStore::evaluate`].
    ///
    /// Refreshes the toolbar visuals, then runs the glass↔layer sync. The
    /// toolbar reads the layer pose written by the *previous* frame's glass
    /// sync, so the two converge one frame after any controller-driven move.
    pub fn update_on_render(&mut self, store: &mut SceneStore, painter: &mut dyn PanelPainter) {
        let Self {
            layer,
            video,
            toolbar,
            glass,
        } = self;
        toolbar.update_on_render(store, video, layer, glass.is_some(), painter);
        if let Some(glass) = glass {
            glass.update_on_render(store, layer);
        }
    }
}
