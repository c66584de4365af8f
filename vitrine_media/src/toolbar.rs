// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Playback-control toolbar for one media layer.
//!
//! The toolbar owns a group of scene nodes: a button panel, a progress-bar
//! pair (full-width track plus a left-aligned fill that grows with playback),
//! and — for movable layers — a draggable resize handle. Ray intersections
//! come in from the scene controller; the toolbar translates them into video
//! transport and layer-resize commands.
//!
//! Button hit regions live in panel canvas pixels, the same space a 2-D
//! panel painter draws in. A hit's quad UV is mapped to canvas pixels and
//! dispatched against the typed button table.

use alloc::vec;
use alloc::vec::Vec;

use kurbo::{Point, Rect};

use vitrine_core::ray::Intersection;
use vitrine_core::scene::{NodeId, NodeKind, SceneStore};
use vitrine_core::transform::{Pose, Transform3d, Vec3};

use crate::binding::CompositorLayer;
use crate::session::VideoSource;

/// Smallest width a fluid resize may leave a layer with, in world units.
pub const MIN_LAYER_WIDTH: f64 = 0.5;

/// Largest width a fluid resize may leave a layer with, in world units.
pub const MAX_LAYER_WIDTH: f64 = 10.0;

/// Seconds skipped by the prev/next buttons.
pub const SKIP_SECONDS: f64 = 5.0;

/// Per-click scale factor of the expand/compress buttons.
pub const RESIZE_STEP: f64 = 1.25;

/// Fractional correction applied when a fluid resize crosses a width bound.
const RESIZE_NUDGE: f64 = 0.001;

/// World-space thickness of the resize handle.
const RESIZE_HANDLE_THICKNESS: f64 = 0.05;

/// Playback and resize controls shown on the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ButtonKind {
    /// Skip back five seconds.
    SkipBack,
    /// Toggle play/pause.
    PlayPause,
    /// Skip forward five seconds.
    SkipForward,
    /// Restart playback from zero.
    Restart,
    /// Grow the layer by one resize step.
    Expand,
    /// Shrink the layer by one resize step.
    Compress,
}

impl ButtonKind {
    /// The label painted on this button. The play/pause label reflects the
    /// action a press would take.
    #[must_use]
    pub const fn label(self, paused: bool) -> &'static str {
        match self {
            Self::SkipBack => "<<",
            Self::PlayPause => {
                if paused {
                    ">"
                } else {
                    "||"
                }
            }
            Self::SkipForward => ">>",
            Self::Restart => "Restart",
            Self::Expand => "E",
            Self::Compress => "C",
        }
    }
}

/// One button's hit region in panel canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonConfig {
    /// Which control this is.
    pub kind: ButtonKind,
    /// Hit region, y-down canvas pixels.
    pub rect: Rect,
}

/// Panel geometry and button table.
#[derive(Clone, Debug, PartialEq)]
pub struct UiPanelConfig {
    /// Panel width in world units.
    pub panel_width: f64,
    /// Panel height in world units.
    pub panel_height: f64,
    /// Canvas height in pixels; canvas width follows the panel aspect.
    pub canvas_height: f64,
    /// Panel-center offset inside the toolbar group.
    pub offset: Vec3,
    /// Button table.
    pub buttons: Vec<ButtonConfig>,
}

impl UiPanelConfig {
    /// The standard transport layout: skip back, play/pause, skip forward on
    /// the left, restart on the right, and — when `resizable` — expand and
    /// compress between them. Panel is 2×0.5 world units on a 512×128 canvas.
    #[must_use]
    pub fn with_default_controls(resizable: bool) -> Self {
        let mut buttons = vec![
            ButtonConfig {
                kind: ButtonKind::SkipBack,
                rect: Rect::new(0.0, 32.0, 64.0, 96.0),
            },
            ButtonConfig {
                kind: ButtonKind::PlayPause,
                rect: Rect::new(64.0, 35.0, 160.0, 87.0),
            },
            ButtonConfig {
                kind: ButtonKind::SkipForward,
                rect: Rect::new(160.0, 32.0, 224.0, 96.0),
            },
            ButtonConfig {
                kind: ButtonKind::Restart,
                rect: Rect::new(352.0, 35.0, 502.0, 87.0),
            },
        ];
        if resizable {
            buttons.push(ButtonConfig {
                kind: ButtonKind::Expand,
                rect: Rect::new(280.0, 35.0, 312.0, 87.0),
            });
            buttons.push(ButtonConfig {
                kind: ButtonKind::Compress,
                rect: Rect::new(240.0, 35.0, 272.0, 87.0),
            });
        }
        Self {
            panel_width: 2.0,
            panel_height: 0.5,
            canvas_height: 128.0,
            offset: Vec3::ZERO,
            buttons,
        }
    }
}

/// Placement of the whole toolbar group in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToolbarGroupConfig {
    /// Group position.
    pub position: Vec3,
    /// Tilt around X, radians (e.g. −π/4 to angle a floor toolbar upward).
    pub rotate_x: f64,
}

impl ToolbarGroupConfig {
    /// The default placement for a layer: directly under its bottom edge,
    /// nudged toward the viewer.
    #[must_use]
    pub fn below_layer(layer: &CompositorLayer) -> Self {
        let p = layer.transform.position;
        Self {
            position: Vec3::new(p.x, p.y - layer.height / 2.0, p.z + 0.05),
            rotate_x: 0.0,
        }
    }
}

/// A button as handed to the panel painter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonView {
    /// Which control.
    pub kind: ButtonKind,
    /// Hit region, y-down canvas pixels.
    pub rect: Rect,
    /// Current label text.
    pub label: &'static str,
}

/// What the panel painter is asked to draw.
#[derive(Debug)]
pub struct PanelSpec<'a> {
    /// Canvas width in pixels.
    pub canvas_width: f64,
    /// Canvas height in pixels.
    pub canvas_height: f64,
    /// Buttons with their current labels.
    pub buttons: &'a [ButtonView],
}

/// The consumed 2-D panel renderer.
///
/// Called when the panel content changes (initially, and whenever the
/// play/pause label flips). Painting is external; the toolbar only decides
/// *when* a repaint is needed and what it contains.
pub trait PanelPainter {
    /// Repaints the button panel.
    fn paint(&mut self, spec: &PanelSpec<'_>);
}

/// A painter that draws nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopPainter;

impl PanelPainter for NoopPainter {
    fn paint(&mut self, _spec: &PanelSpec<'_>) {}
}

/// An engaged fluid-resize drag.
///
/// Endpoints and the controller-distance ratio are captured at engage time;
/// per-frame updates scale the engage-time dimensions by how far the ratio
/// has moved.
#[derive(Clone, Copy, Debug)]
struct ResizeDrag {
    left: Vec3,
    right: Vec3,
    base_ratio: f64,
    base_width: f64,
    base_height: f64,
}

/// Playback-control toolbar for one media layer.
#[derive(Debug)]
pub struct Toolbar {
    group: NodeId,
    panel: NodeId,
    track: NodeId,
    fill: NodeId,
    resize_handle: Option<NodeId>,

    panel_width: f64,
    panel_height: f64,
    canvas_width: f64,
    canvas_height: f64,
    offset: Vec3,
    bar_y: f64,
    handle_y: f64,
    buttons: Vec<ButtonConfig>,

    painted_paused: Option<bool>,
    drag: Option<ResizeDrag>,
}

impl Toolbar {
    /// Builds the toolbar node group.
    ///
    /// `resizable` layers (movable quads) additionally get the resize handle
    /// under the panel. The group starts visible; the scene controller owns
    /// show/hide policy via its visibility map.
    pub fn new(
        store: &mut SceneStore,
        layer: &CompositorLayer,
        ui: UiPanelConfig,
        group_config: &ToolbarGroupConfig,
        resizable: bool,
    ) -> Self {
        let UiPanelConfig {
            panel_width,
            panel_height,
            canvas_height,
            offset,
            buttons,
        } = ui;
        let canvas_width = canvas_height * panel_width / panel_height;
        let bar_y = offset.y + 0.6 * panel_height;
        let handle_y = offset.y - panel_height;

        let group = store.create_node(NodeKind::Group);
        let p = group_config.position;
        store.set_transform(
            group,
            Transform3d::from_translation(p.x, p.y, p.z)
                * Transform3d::from_rotation_x(group_config.rotate_x),
        );

        let panel = store.create_node(NodeKind::Panel);
        store.set_transform(
            panel,
            Transform3d::from_translation(offset.x, offset.y, offset.z)
                * Transform3d::from_scale(panel_width, panel_height, 1.0),
        );
        store.add_child(group, panel);

        let track = store.create_node(NodeKind::ProgressTrack);
        store.set_transform(
            track,
            Transform3d::from_translation(offset.x, bar_y, offset.z)
                * Transform3d::from_scale(panel_width, panel_height / 5.0, 1.0),
        );
        store.add_child(group, track);

        let fill = store.create_node(NodeKind::ProgressFill);
        store.set_transform(
            fill,
            Transform3d::from_translation(offset.x - panel_width / 2.0, bar_y, offset.z + 0.001)
                * Transform3d::from_scale(0.0, panel_height / 5.0, 1.0),
        );
        store.add_child(group, fill);

        let resize_handle = resizable.then(|| {
            let handle = store.create_node(NodeKind::ResizeHandle);
            store.set_transform(
                handle,
                Transform3d::from_translation(offset.x, handle_y, offset.z)
                    * Transform3d::from_scale(layer.width, RESIZE_HANDLE_THICKNESS, 1.0),
            );
            store.add_child(group, handle);
            handle
        });

        Self {
            group,
            panel,
            track,
            fill,
            resize_handle,
            panel_width,
            panel_height,
            canvas_width,
            canvas_height,
            offset,
            bar_y,
            handle_y,
            buttons,
            painted_paused: None,
            drag: None,
        }
    }

    /// The toolbar group node (show/hide target).
    #[must_use]
    pub const fn group(&self) -> NodeId {
        self.group
    }

    /// The nodes eligible for ray intersection: panel, progress fill and
    /// track, and the resize handle when present.
    #[must_use]
    pub fn objects(&self) -> Vec<NodeId> {
        let mut objects = vec![self.panel, self.fill, self.track];
        if let Some(handle) = self.resize_handle {
            objects.push(handle);
        }
        objects
    }

    /// Whether a fluid resize is currently engaged.
    #[must_use]
    pub const fn is_resizing(&self) -> bool {
        self.drag.is_some()
    }

    /// Routes held-trigger intersections: a hit on the progress bar seeks.
    ///
    /// Returns the action label when a seek happened.
    pub fn update<V: VideoSource>(
        &self,
        store: &mut SceneStore,
        video: &mut V,
        intersections: &[Intersection],
    ) -> Option<&'static str> {
        let hit = intersections
            .iter()
            .find(|hit| hit.node == self.fill || hit.node == self.track)?;

        let duration = video.duration();
        if !duration.is_finite() || duration <= 0.0 {
            return None;
        }

        let fraction = if hit.node == self.track {
            // The track spans the full panel, so the UV is the fraction.
            hit.uv.x
        } else {
            let fill_width = self.progress_width(video);
            hit.uv.x * fill_width / self.panel_width
        }
        .clamp(0.0, 1.0);

        video.set_current_time(fraction * duration);
        self.refresh_progress(store, video);
        Some("seek")
    }

    /// Handles a trigger press: panel hits dispatch a button, resize-handle
    /// hits engage a fluid resize.
    ///
    /// `controller_pos` is the pressing controller's world position, used as
    /// the resize reference point. Returns the executed action's label.
    pub fn press<V: VideoSource>(
        &mut self,
        store: &SceneStore,
        video: &mut V,
        layer: &mut CompositorLayer,
        intersections: &[Intersection],
        controller_pos: Vec3,
    ) -> Option<&'static str> {
        for hit in intersections {
            if hit.node == self.panel {
                let kind = self.button_at(hit.uv)?;
                return Some(Self::execute_button(kind, video, layer));
            }
            if self.resize_handle == Some(hit.node) {
                return self
                    .engage_resize(store, hit.node, layer, controller_pos)
                    .then_some("resize-grip");
            }
        }
        None
    }

    /// Advances an engaged fluid resize from the controller's current
    /// position.
    ///
    /// The resize factor is the controller's left/right endpoint distance
    /// ratio relative to the engage-time ratio, applied to the engage-time
    /// dimensions. Width is kept inside
    /// [`MIN_LAYER_WIDTH`]..=[`MAX_LAYER_WIDTH`]; crossing a bound nudges the
    /// width a fraction inside it instead of pinning exactly to the bound.
    pub fn update_resize(&mut self, layer: &mut CompositorLayer, controller_pos: Vec3) {
        let Some(drag) = self.drag else {
            return;
        };
        let d_left = controller_pos.distance(drag.left);
        let d_right = controller_pos.distance(drag.right);
        if d_right < 1e-9 || drag.base_ratio < 1e-9 {
            return;
        }

        let ratio = (d_left / d_right) / drag.base_ratio;
        let mut width = drag.base_width * ratio;
        if width < MIN_LAYER_WIDTH {
            width = MIN_LAYER_WIDTH * (1.0 + RESIZE_NUDGE);
        } else if width > MAX_LAYER_WIDTH {
            width = MAX_LAYER_WIDTH * (1.0 - RESIZE_NUDGE);
        }
        layer.width = width;
        layer.height = drag.base_height * (width / drag.base_width);
    }

    /// Ends an engaged fluid resize (trigger release).
    pub fn end_resize(&mut self) {
        self.drag = None;
    }

    /// Per-frame refresh: progress bar, resize-handle width, panel repaint on
    /// label change, and — when the layer has a glass handle — the group
    /// follows the layer's pose.
    pub fn update_on_render<V: VideoSource>(
        &mut self,
        store: &mut SceneStore,
        video: &V,
        layer: &CompositorLayer,
        has_glass: bool,
        painter: &mut dyn PanelPainter,
    ) {
        if has_glass {
            let p = layer.transform.position;
            let pose = Pose::new(
                Vec3::new(p.x, p.y - layer.height / 2.0, p.z + 0.05),
                layer.transform.orientation,
            );
            store.set_transform(self.group, pose.to_transform());
        }

        self.refresh_progress(store, video);

        if let Some(handle) = self.resize_handle {
            store.set_transform(
                handle,
                Transform3d::from_translation(self.offset.x, self.handle_y, self.offset.z)
                    * Transform3d::from_scale(layer.width, RESIZE_HANDLE_THICKNESS, 1.0),
            );
        }

        let paused = video.paused();
        if self.painted_paused != Some(paused) {
            let views: Vec<ButtonView> = self
                .buttons
                .iter()
                .map(|b| ButtonView {
                    kind: b.kind,
                    rect: b.rect,
                    label: b.kind.label(paused),
                })
                .collect();
            painter.paint(&PanelSpec {
                canvas_width: self.canvas_width,
                canvas_height: self.canvas_height,
                buttons: &views,
            });
            self.painted_paused = Some(paused);
        }
    }

    /// Current progress-bar fill width in world units.
    ///
    /// `(current_time / duration) × panel_width`, clamped to the panel, and
    /// zero while the duration is unknown.
    #[must_use]
    pub fn progress_width<V: VideoSource>(&self, video: &V) -> f64 {
        let duration = video.duration();
        if !duration.is_finite() || duration <= 0.0 {
            return 0.0;
        }
        (video.current_time() / duration).clamp(0.0, 1.0) * self.panel_width
    }

    /// Rewrites the fill node from the video's current position. The fill is
    /// left-aligned on the track: its center sits at
    /// `-(panel_width - fill_width) / 2`.
    fn refresh_progress<V: VideoSource>(&self, store: &mut SceneStore, video: &V) {
        let fill_width = self.progress_width(video);
        store.set_transform(
            self.fill,
            Transform3d::from_translation(
                self.offset.x - (self.panel_width - fill_width) / 2.0,
                self.bar_y,
                self.offset.z + 0.001,
            ) * Transform3d::from_scale(fill_width, self.panel_height / 5.0, 1.0),
        );
    }

    /// Maps a panel UV hit to the button under it.
    fn button_at(&self, uv: Point) -> Option<ButtonKind> {
        let px = Point::new(
            uv.x * self.canvas_width,
            (1.0 - uv.y) * self.canvas_height,
        );
        self.buttons
            .iter()
            .find(|b| b.rect.contains(px))
            .map(|b| b.kind)
    }

    fn execute_button<V: VideoSource>(
        kind: ButtonKind,
        video: &mut V,
        layer: &mut CompositorLayer,
    ) -> &'static str {
        match kind {
            ButtonKind::SkipBack => {
                video.set_current_time(video.current_time() - SKIP_SECONDS);
                "skip-back"
            }
            ButtonKind::PlayPause => {
                if video.paused() {
                    video.play();
                    "play"
                } else {
                    video.pause();
                    "pause"
                }
            }
            ButtonKind::SkipForward => {
                video.set_current_time(video.current_time() + SKIP_SECONDS);
                "skip-forward"
            }
            ButtonKind::Restart => {
                video.set_current_time(0.0);
                "restart"
            }
            ButtonKind::Expand => {
                layer.width *= RESIZE_STEP;
                layer.height *= RESIZE_STEP;
                "expand"
            }
            ButtonKind::Compress => {
                layer.width /= RESIZE_STEP;
                layer.height /= RESIZE_STEP;
                "compress"
            }
        }
    }

    fn engage_resize(
        &mut self,
        store: &SceneStore,
        handle: NodeId,
        layer: &CompositorLayer,
        controller_pos: Vec3,
    ) -> bool {
        let world = store.world_transform_fresh(handle);
        let left = world.transform_point(Vec3::new(-0.5, 0.0, 0.0));
        let right = world.transform_point(Vec3::new(0.5, 0.0, 0.0));
        let d_left = controller_pos.distance(left);
        let d_right = controller_pos.distance(right);
        if d_left < 1e-9 || d_right < 1e-9 {
            return false;
        }
        self.drag = Some(ResizeDrag {
            left,
            right,
            base_ratio: d_left / d_right,
            base_width: layer.width,
            base_height: layer.height,
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use vitrine_core::ray::{Ray, cast};
    use vitrine_core::transform::Quat;

    use crate::binding::{LayerHandle, LayerKind};

    use super::*;

    /// Minimal in-module video double; the full scripted one lives in the
    /// harness crate.
    struct FakeVideo {
        current: f64,
        duration: f64,
        paused: bool,
    }

    impl FakeVideo {
        fn new(duration: f64) -> Self {
            Self {
                current: 0.0,
                duration,
                paused: true,
            }
        }
    }

    impl VideoSource for FakeVideo {
        fn current_time(&self) -> f64 {
            self.current
        }

        fn set_current_time(&mut self, seconds: f64) {
            self.current = if self.duration.is_finite() {
                seconds.clamp(0.0, self.duration)
            } else {
                seconds.max(0.0)
            };
        }

        fn duration(&self) -> f64 {
            self.duration
        }

        fn paused(&self) -> bool {
            self.paused
        }

        fn play(&mut self) {
            self.paused = false;
        }

        fn pause(&mut self) {
            self.paused = true;
        }

        fn ready(&self) -> bool {
            true
        }
    }

    #[derive(Default)]
    struct RecordingPainter {
        paints: Vec<Vec<(ButtonKind, &'static str)>>,
    }

    impl PanelPainter for RecordingPainter {
        fn paint(&mut self, spec: &PanelSpec<'_>) {
            self.paints
                .push(spec.buttons.iter().map(|b| (b.kind, b.label)).collect());
        }
    }

    fn quad_layer() -> CompositorLayer {
        CompositorLayer {
            handle: LayerHandle(0),
            kind: LayerKind::Quad,
            width: 2.0,
            height: 1.0,
            transform: Pose::from_translation(0.0, 1.3, -2.75),
        }
    }

    fn toolbar(store: &mut SceneStore, layer: &CompositorLayer, resizable: bool) -> Toolbar {
        Toolbar::new(
            store,
            layer,
            UiPanelConfig::with_default_controls(resizable),
            &ToolbarGroupConfig {
                position: Vec3::ZERO,
                rotate_x: 0.0,
            },
            resizable,
        )
    }

    fn hit(node: NodeId, uv: Point) -> Intersection {
        Intersection {
            node,
            point: Vec3::ZERO,
            uv,
            distance: 1.0,
        }
    }

    #[test]
    fn track_seek_reconstructs_fraction_exactly() {
        let mut store = SceneStore::new();
        let layer = quad_layer();
        let bar = toolbar(&mut store, &layer, false);
        let mut video = FakeVideo::new(100.0);
        // Half way through: the fill covers half of the 2-unit panel.
        video.current = 50.0;

        let action = bar.update(&mut store, &mut video, &[hit(bar.track, Point::new(0.5, 0.5))]);
        assert_eq!(action, Some("seek"));
        assert!((video.current - 50.0).abs() < 1e-12, "0.5 × duration");
    }

    #[test]
    fn fill_seek_scales_by_fill_width() {
        let mut store = SceneStore::new();
        let layer = quad_layer();
        let bar = toolbar(&mut store, &layer, false);
        let mut video = FakeVideo::new(100.0);
        video.current = 50.0; // fill width = 1.0 of panel width 2.0

        bar.update(&mut store, &mut video, &[hit(bar.fill, Point::new(0.5, 0.5))]);
        // 0.5 × 1.0 / 2.0 = 0.25 of the duration.
        assert!((video.current - 25.0).abs() < 1e-12);
    }

    #[test]
    fn seek_ignores_unknown_duration() {
        let mut store = SceneStore::new();
        let layer = quad_layer();
        let bar = toolbar(&mut store, &layer, false);
        let mut video = FakeVideo::new(f64::NAN);
        video.current = 3.0;

        let action = bar.update(&mut store, &mut video, &[hit(bar.track, Point::new(0.5, 0.5))]);
        assert_eq!(action, None);
        assert!((video.current - 3.0).abs() < 1e-12, "no seek happened");
    }

    #[test]
    fn progress_fill_tracks_current_time() {
        let mut store = SceneStore::new();
        let layer = quad_layer();
        let mut bar = toolbar(&mut store, &layer, false);
        let mut video = FakeVideo::new(10.0);
        let mut painter = NoopPainter;

        let mut last_width = -1.0;
        for step in 0..=10 {
            video.current = f64::from(step);
            bar.update_on_render(&mut store, &video, &layer, false, &mut painter);

            let width = bar.progress_width(&video);
            assert!(width >= last_width, "fill width is non-decreasing");
            assert!(
                (width + (bar.panel_width - width) - bar.panel_width).abs() < 1e-12,
                "fill plus remainder always spans the panel"
            );
            last_width = width;
        }
        assert!((last_width - bar.panel_width).abs() < 1e-12, "full at end");
    }

    #[test]
    fn progress_fill_is_clamped_to_panel() {
        let mut store = SceneStore::new();
        let layer = quad_layer();
        let bar = toolbar(&mut store, &layer, false);
        let mut video = FakeVideo::new(10.0);
        video.duration = 10.0;
        video.current = 10.0;
        // A current time past the duration must not overflow the panel.
        video.current = 25.0;
        assert!((bar.progress_width(&video) - bar.panel_width).abs() < 1e-12);
    }

    #[test]
    fn play_pause_button_toggles_and_repaints() {
        let mut store = SceneStore::new();
        let mut layer = quad_layer();
        let mut bar = toolbar(&mut store, &layer, false);
        let mut video = FakeVideo::new(100.0);
        let mut painter = RecordingPainter::default();

        // Initial paint shows the paused label.
        bar.update_on_render(&mut store, &video, &layer, false, &mut painter);
        assert_eq!(painter.paints.len(), 1);
        assert!(painter.paints[0].contains(&(ButtonKind::PlayPause, ">")));

        // Press play: pause button center is (112, 61) px on the 512×128
        // canvas.
        let uv = Point::new(112.0 / 512.0, 1.0 - 61.0 / 128.0);
        let action = bar.press(
            &store,
            &mut video,
            &mut layer,
            &[hit(bar.panel, uv)],
            Vec3::ZERO,
        );
        assert_eq!(action, Some("play"));
        assert!(!video.paused());

        // The label swap triggers exactly one more paint.
        bar.update_on_render(&mut store, &video, &layer, false, &mut painter);
        bar.update_on_render(&mut store, &video, &layer, false, &mut painter);
        assert_eq!(painter.paints.len(), 2);
        assert!(painter.paints[1].contains(&(ButtonKind::PlayPause, "||")));
    }

    #[test]
    fn skip_buttons_move_five_seconds() {
        let mut store = SceneStore::new();
        let mut layer = quad_layer();
        let mut bar = toolbar(&mut store, &layer, false);
        let mut video = FakeVideo::new(100.0);
        video.current = 20.0;

        // Skip-forward center: (192, 64) px.
        let fwd = Point::new(192.0 / 512.0, 1.0 - 64.0 / 128.0);
        bar.press(&store, &mut video, &mut layer, &[hit(bar.panel, fwd)], Vec3::ZERO);
        assert!((video.current - 25.0).abs() < 1e-12);

        // Skip-back center: (32, 64) px.
        let back = Point::new(32.0 / 512.0, 1.0 - 64.0 / 128.0);
        bar.press(&store, &mut video, &mut layer, &[hit(bar.panel, back)], Vec3::ZERO);
        assert!((video.current - 20.0).abs() < 1e-12);
    }

    #[test]
    fn restart_button_rewinds_to_zero() {
        let mut store = SceneStore::new();
        let mut layer = quad_layer();
        let mut bar = toolbar(&mut store, &layer, false);
        let mut video = FakeVideo::new(100.0);
        video.current = 42.0;

        // Restart center: (427, 61) px.
        let uv = Point::new(427.0 / 512.0, 1.0 - 61.0 / 128.0);
        let action = bar.press(
            &store,
            &mut video,
            &mut layer,
            &[hit(bar.panel, uv)],
            Vec3::ZERO,
        );
        assert_eq!(action, Some("restart"));
        assert!((video.current - 0.0).abs() < 1e-12);
    }

    #[test]
    fn expand_compress_round_trip_is_exact() {
        let mut store = SceneStore::new();
        let mut layer = quad_layer();
        let mut bar = toolbar(&mut store, &layer, true);
        let mut video = FakeVideo::new(100.0);

        let expand = Point::new(296.0 / 512.0, 1.0 - 61.0 / 128.0);
        let compress = Point::new(256.0 / 512.0, 1.0 - 61.0 / 128.0);

        let (w0, h0) = (layer.width, layer.height);
        for _ in 0..5 {
            let action = bar.press(
                &store,
                &mut video,
                &mut layer,
                &[hit(bar.panel, expand)],
                Vec3::ZERO,
            );
            assert_eq!(action, Some("expand"));
        }
        assert!((layer.width - w0 * RESIZE_STEP.powi(5)).abs() < 1e-9);

        for _ in 0..5 {
            let action = bar.press(
                &store,
                &mut video,
                &mut layer,
                &[hit(bar.panel, compress)],
                Vec3::ZERO,
            );
            assert_eq!(action, Some("compress"));
        }
        assert!((layer.width - w0).abs() < 1e-9, "five of each round-trips");
        assert!((layer.height - h0).abs() < 1e-9);
    }

    #[test]
    fn equirect_toolbar_has_no_resize_buttons() {
        let mut store = SceneStore::new();
        let mut layer = quad_layer();
        let mut bar = toolbar(&mut store, &layer, false);
        let mut video = FakeVideo::new(100.0);

        let (w0, h0) = (layer.width, layer.height);
        let expand = Point::new(296.0 / 512.0, 1.0 - 61.0 / 128.0);
        let action = bar.press(
            &store,
            &mut video,
            &mut layer,
            &[hit(bar.panel, expand)],
            Vec3::ZERO,
        );
        assert_eq!(action, None, "no button occupies that region");
        assert!((layer.width - w0).abs() < 1e-12 && (layer.height - h0).abs() < 1e-12);
        assert!(bar.objects().len() == 3, "no resize handle either");
    }

    #[test]
    fn fluid_resize_scales_by_endpoint_ratio() {
        let mut store = SceneStore::new();
        let mut layer = quad_layer();
        let mut bar = toolbar(&mut store, &layer, true);
        let mut video = FakeVideo::new(100.0);
        let handle = bar.resize_handle.expect("resizable toolbar has a handle");

        // Handle spans x ∈ [−1, 1] at y = handle_y (group at the origin).
        let y = bar.handle_y;
        let engage_pos = Vec3::new(-2.0, y, 0.0); // d_left = 1, d_right = 3
        let action = bar.press(
            &store,
            &mut video,
            &mut layer,
            &[hit(handle, Point::new(0.1, 0.5))],
            engage_pos,
        );
        assert_eq!(action, Some("resize-grip"));
        assert!(bar.is_resizing());

        // Same position: ratio 1, dimensions unchanged.
        bar.update_resize(&mut layer, engage_pos);
        assert!((layer.width - 2.0).abs() < 1e-9);

        // Pull toward the right endpoint: ratio (2.5/0.5)/(1/3) = 15 caps at
        // the max width via the nudge, height follows proportionally.
        bar.update_resize(&mut layer, Vec3::new(1.5, y, 0.0));
        assert!((layer.width - MAX_LAYER_WIDTH * (1.0 - RESIZE_NUDGE)).abs() < 1e-9);
        assert!(layer.width <= MAX_LAYER_WIDTH);
        assert!((layer.height - layer.width / 2.0).abs() < 1e-9);

        bar.end_resize();
        assert!(!bar.is_resizing());
    }

    #[test]
    fn fluid_resize_never_leaves_bounds() {
        let mut store = SceneStore::new();
        let mut layer = quad_layer();
        let mut bar = toolbar(&mut store, &layer, true);
        let mut video = FakeVideo::new(100.0);
        let handle = bar.resize_handle.expect("handle");
        let y = bar.handle_y;

        bar.press(
            &store,
            &mut video,
            &mut layer,
            &[hit(handle, Point::new(0.5, 0.5))],
            Vec3::new(-2.0, y, 0.0),
        );

        let mut x = -1.9;
        while x < 1.9 {
            bar.update_resize(&mut layer, Vec3::new(x, y, 0.0));
            assert!(
                (MIN_LAYER_WIDTH..=MAX_LAYER_WIDTH).contains(&layer.width),
                "width {} escaped bounds at x {x}",
                layer.width
            );
            x += 0.05;
        }
    }

    #[test]
    fn toolbar_follows_layer_pose_when_glassed() {
        let mut store = SceneStore::new();
        let mut layer = quad_layer();
        let mut bar = toolbar(&mut store, &layer, true);
        let video = FakeVideo::new(100.0);
        let mut painter = NoopPainter;

        layer.transform = Pose::new(
            Vec3::new(0.4, 1.8, -2.0),
            Quat::from_rotation_y(0.3),
        );
        bar.update_on_render(&mut store, &video, &layer, true, &mut painter);
        let _ = store.evaluate();

        let group_pose = Pose::from_transform(&store.world_transform(bar.group()));
        let expected = Vec3::new(0.4, 1.8 - layer.height / 2.0, -2.0 + 0.05);
        assert!(group_pose.position.distance(expected) < 1e-9);
    }

    #[test]
    fn toolbar_nodes_are_hit_testable_through_cast() {
        let mut store = SceneStore::new();
        let layer = quad_layer();
        let mut bar = toolbar(&mut store, &layer, true);
        let mut video = FakeVideo::new(100.0);
        video.current = 50.0;
        let mut painter = NoopPainter;
        bar.update_on_render(&mut store, &video, &layer, false, &mut painter);
        let _ = store.evaluate();

        // Straight-on ray at the panel center (panel sits at the group
        // origin, facing +Z).
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0)).expect("ray");
        let hits = cast(&store, &bar.objects(), &ray);
        assert_eq!(hits.len(), 1, "only the panel spans the origin");
        assert_eq!(hits[0].node, bar.panel);

        // A ray through the bar area hits fill (front) before track.
        let ray = Ray::new(Vec3::new(-0.6, bar.bar_y, 5.0), Vec3::new(0.0, 0.0, -1.0))
            .expect("ray");
        let hits = cast(&store, &bar.objects(), &ray);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].node, bar.fill, "fill is in front of the track");
        assert_eq!(hits[1].node, bar.track);
    }
}
