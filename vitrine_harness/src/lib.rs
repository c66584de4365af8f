// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic doubles for demos and tests.
//!
//! Everything here is scripted and immediate: the session grants reference
//! spaces on the first poll (unless ended), the video advances only when
//! told to, and hand input plays back from a prerecorded frame list. Demos
//! and integration tests drive the real subsystem against these doubles and
//! assert on exact state.

#![no_std]

extern crate alloc;

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::future::Future;
use core::pin::pin;
use core::task::{Context, Poll, Waker};

use vitrine_core::hand::HandFrame;
use vitrine_media::binding::{CompositorLayer, LayerFactory, LayerHandle, LayerInit, LayerKind};
use vitrine_media::session::{
    ReferenceSpace, ReferenceSpaceKind, SessionEnded, VideoSource, XrSession,
};
use vitrine_media::toolbar::{PanelPainter, PanelSpec};

// ---------------------------------------------------------------------------
// Executor helpers
// ---------------------------------------------------------------------------

/// Polls a future exactly once with a no-op waker.
pub fn poll_once<F: Future>(fut: F) -> Poll<F::Output> {
    let mut fut = pin!(fut);
    let mut cx = Context::from_waker(Waker::noop());
    fut.as_mut().poll(&mut cx)
}

/// Drives a future to completion by polling in a loop.
///
/// Suitable only for the scripted futures in this crate, which never park on
/// external wakeups.
pub fn block_on<F: Future>(fut: F) -> F::Output {
    let mut fut = pin!(fut);
    let mut cx = Context::from_waker(Waker::noop());
    loop {
        if let Poll::Ready(value) = fut.as_mut().poll(&mut cx) {
            return value;
        }
    }
}

// ---------------------------------------------------------------------------
// Scripted video element
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct VideoState {
    current: f64,
    duration: f64,
    paused: bool,
    ready: bool,
}

/// A shared-handle fake video element.
///
/// Clones share state, mirroring how a scene controller and a media layer
/// both hold the same underlying element.
#[derive(Clone, Debug)]
pub struct ScriptedVideo {
    inner: Rc<RefCell<VideoState>>,
}

impl ScriptedVideo {
    /// Creates a ready, paused video with the given duration.
    #[must_use]
    pub fn new(duration: f64) -> Self {
        Self {
            inner: Rc::new(RefCell::new(VideoState {
                current: 0.0,
                duration,
                paused: true,
                ready: true,
            })),
        }
    }

    /// Creates a video whose metadata has not loaded yet: unknown duration
    /// and not ready.
    #[must_use]
    pub fn unloaded() -> Self {
        Self {
            inner: Rc::new(RefCell::new(VideoState {
                current: 0.0,
                duration: f64::NAN,
                paused: true,
                ready: false,
            })),
        }
    }

    /// Marks metadata as loaded with the given duration.
    pub fn load(&self, duration: f64) {
        let mut state = self.inner.borrow_mut();
        state.duration = duration;
        state.ready = true;
    }

    /// Advances playback by `seconds` if playing, wrapping at the duration
    /// like a looping video element.
    pub fn advance(&self, seconds: f64) {
        let mut state = self.inner.borrow_mut();
        if state.paused || !state.duration.is_finite() || state.duration <= 0.0 {
            return;
        }
        state.current = (state.current + seconds) % state.duration;
    }
}

impl VideoSource for ScriptedVideo {
    fn current_time(&self) -> f64 {
        self.inner.borrow().current
    }

    fn set_current_time(&mut self, seconds: f64) {
        let mut state = self.inner.borrow_mut();
        state.current = if state.duration.is_finite() && state.duration > 0.0 {
            seconds.clamp(0.0, state.duration)
        } else {
            seconds.max(0.0)
        };
    }

    fn duration(&self) -> f64 {
        self.inner.borrow().duration
    }

    fn paused(&self) -> bool {
        self.inner.borrow().paused
    }

    fn play(&mut self) {
        self.inner.borrow_mut().paused = false;
    }

    fn pause(&mut self) {
        self.inner.borrow_mut().paused = true;
    }

    fn ready(&self) -> bool {
        self.inner.borrow().ready
    }
}

// ---------------------------------------------------------------------------
// Scripted session + factory
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct SessionState {
    ended: Cell<bool>,
    space_requests: Cell<u32>,
}

/// A layer-capable session double.
///
/// Reference-space requests resolve on the first poll. After
/// [`end`](Self::end), requests fail with [`SessionEnded`] — including
/// requests that were started earlier and complete late, modeling an
/// in-flight creation losing the race with `sessionend`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSession {
    inner: Rc<SessionState>,
}

impl ScriptedSession {
    /// Creates a live session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ends the session.
    pub fn end(&self) {
        self.inner.ended.set(true);
    }

    /// Whether the session has ended.
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.inner.ended.get()
    }

    /// How many reference-space requests the session has seen.
    #[must_use]
    pub fn space_requests(&self) -> u32 {
        self.inner.space_requests.get()
    }
}

impl XrSession for ScriptedSession {
    type Factory = ScriptedFactory;

    fn create_media_binding(&self) -> ScriptedFactory {
        ScriptedFactory { next_handle: 0 }
    }

    async fn request_reference_space(
        &self,
        _kind: ReferenceSpaceKind,
    ) -> Result<ReferenceSpace, SessionEnded> {
        self.inner.space_requests.set(self.inner.space_requests.get() + 1);
        if self.inner.ended.get() {
            Err(SessionEnded)
        } else {
            Ok(ReferenceSpace(0))
        }
    }
}

/// Layer factory double that materializes layers straight from their init.
#[derive(Debug)]
pub struct ScriptedFactory {
    next_handle: u32,
}

impl ScriptedFactory {
    fn create(&mut self, kind: LayerKind, init: &LayerInit) -> CompositorLayer {
        let handle = LayerHandle(self.next_handle);
        self.next_handle += 1;
        CompositorLayer {
            handle,
            kind,
            width: init.width,
            height: init.height,
            transform: init.transform,
        }
    }
}

impl LayerFactory for ScriptedFactory {
    fn create_quad(&mut self, _space: &ReferenceSpace, init: &LayerInit) -> CompositorLayer {
        self.create(LayerKind::Quad, init)
    }

    fn create_equirect(&mut self, _space: &ReferenceSpace, init: &LayerInit) -> CompositorLayer {
        self.create(LayerKind::Equirect, init)
    }
}

// ---------------------------------------------------------------------------
// Recording painter
// ---------------------------------------------------------------------------

/// A panel painter that records what it was asked to draw.
#[derive(Debug, Default)]
pub struct RecordingPainter {
    /// One entry per repaint: the button labels in table order.
    pub paints: Vec<Vec<&'static str>>,
}

impl RecordingPainter {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PanelPainter for RecordingPainter {
    fn paint(&mut self, spec: &PanelSpec<'_>) {
        self.paints
            .push(spec.buttons.iter().map(|b| b.label).collect());
    }
}

// ---------------------------------------------------------------------------
// Hand input playback
// ---------------------------------------------------------------------------

/// Prerecorded per-frame hand input.
///
/// [`next`](Self::next) yields one frame per call; after the script runs
/// out, the hand reads as untracked (lost), matching a hand leaving the
/// sensor volume.
#[derive(Clone, Debug, Default)]
pub struct HandScript {
    frames: Vec<HandFrame>,
    cursor: usize,
}

impl HandScript {
    /// Creates a script from prerecorded frames.
    #[must_use]
    pub fn new(frames: Vec<HandFrame>) -> Self {
        Self { frames, cursor: 0 }
    }

    /// Yields the next frame, or an untracked frame once exhausted.
    pub fn next(&mut self) -> HandFrame {
        let frame = self
            .frames
            .get(self.cursor)
            .copied()
            .unwrap_or_else(HandFrame::untracked);
        self.cursor += 1;
        frame
    }

    /// Whether the script has frames left.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.frames.len().saturating_sub(self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use vitrine_core::hand::JointId;
    use vitrine_core::transform::Vec3;

    use super::*;

    #[test]
    fn scripted_video_clamps_seeks() {
        let mut video = ScriptedVideo::new(10.0);
        video.set_current_time(25.0);
        assert!((video.current_time() - 10.0).abs() < 1e-12);
        video.set_current_time(-5.0);
        assert!((video.current_time() - 0.0).abs() < 1e-12);
    }

    #[test]
    fn unloaded_video_reports_nan_duration() {
        let video = ScriptedVideo::unloaded();
        assert!(!video.ready());
        assert!(video.duration().is_nan());
        video.load(30.0);
        assert!(video.ready());
        assert!((video.duration() - 30.0).abs() < 1e-12);
    }

    #[test]
    fn advance_only_moves_while_playing() {
        let mut video = ScriptedVideo::new(10.0);
        video.advance(1.0);
        assert!((video.current_time() - 0.0).abs() < 1e-12);
        video.play();
        video.advance(1.0);
        assert!((video.current_time() - 1.0).abs() < 1e-12);
        // Looping wrap.
        video.advance(9.5);
        assert!((video.current_time() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn clones_share_state() {
        let mut a = ScriptedVideo::new(10.0);
        let b = a.clone();
        a.play();
        assert!(!b.paused());
    }

    #[test]
    fn session_requests_resolve_immediately() {
        let session = ScriptedSession::new();
        let result = block_on(session.request_reference_space(ReferenceSpaceKind::Local));
        assert_eq!(result, Ok(ReferenceSpace(0)));
        assert_eq!(session.space_requests(), 1);
    }

    #[test]
    fn ended_session_rejects_requests() {
        let session = ScriptedSession::new();
        session.end();
        let result = block_on(session.request_reference_space(ReferenceSpaceKind::Local));
        assert_eq!(result, Err(SessionEnded));
    }

    #[test]
    fn hand_script_goes_untracked_when_exhausted() {
        let mut frame = HandFrame::untracked();
        frame.set(JointId::IndexTip, Vec3::new(0.1, 1.4, -0.3));
        let mut script = HandScript::new(vec![frame]);

        assert!(script.next().is_tracked());
        assert_eq!(script.remaining(), 0);
        assert!(!script.next().is_tracked());
    }

    #[test]
    fn media_layer_pipeline_seeks_through_a_cast_ray() {
        use vitrine_core::ray::{Ray, cast};
        use vitrine_core::scene::SceneStore;
        use vitrine_core::transform::Pose;
        use vitrine_media::{MediaLayerManager, UiPanelConfig};

        let session = ScriptedSession::new();
        let video = ScriptedVideo::new(100.0);
        let mut store = SceneStore::new();
        let mut manager = MediaLayerManager::new(session.clone());

        let mut media = block_on(manager.create_media_layer(
            &mut store,
            video.clone(),
            LayerKind::Quad,
            LayerInit {
                width: 1.0,
                height: 0.5625,
                transform: Pose::from_translation(0.0, 1.3, -2.75),
                ..LayerInit::default()
            },
            UiPanelConfig::with_default_controls(true),
            None,
        ))
        .expect("quad creation against the scripted session");
        assert_eq!(session.space_requests(), 1);

        let _ = store.evaluate();

        // The default toolbar hangs under the layer's bottom edge; aim at
        // the progress track a quarter of the way across.
        let group_y = 1.3 - 0.5625 / 2.0;
        let ray = Ray::new(
            Vec3::new(-0.5, group_y + 0.3, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
        )
        .expect("forward ray");
        let hits = cast(&store, &media.objects(), &ray);
        assert!(!hits.is_empty(), "the controller ray reaches the toolbar");

        let action = media.update(&mut store, &hits);
        assert_eq!(action, Some("seek"));
        assert!(
            (video.current_time() - 25.0).abs() < 1e-9,
            "uv 0.25 on the track seeks a 100 s video to 25 s, got {}",
            video.current_time()
        );
    }

    #[test]
    fn snap_clears_half_of_the_marker_set() {
        use vitrine_core::gesture::{
            GestureConfig, GestureDetector, GestureEvent, snap_delete_count,
        };
        use vitrine_core::hand::Handedness;
        use vitrine_core::scene::{NodeKind, SceneStore};

        let mut store = SceneStore::new();
        let mut markers: Vec<_> = (0..5)
            .map(|_| store.create_node(NodeKind::Marker))
            .collect();
        let mut detector = GestureDetector::new(Handedness::Right, GestureConfig::default());

        let mut arm = HandFrame::untracked();
        arm.set(JointId::ThumbTip, Vec3::new(0.25, 1.35, -0.40));
        arm.set(JointId::MiddleTip, Vec3::new(0.26, 1.36, -0.41));
        arm.set(JointId::IndexMetacarpal, Vec3::new(0.32, 1.28, -0.40));

        let mut fire = HandFrame::untracked();
        fire.set(JointId::ThumbTip, Vec3::new(0.25, 1.35, -0.40));
        fire.set(JointId::MiddleTip, Vec3::new(0.30, 1.30, -0.41));
        fire.set(JointId::IndexMetacarpal, Vec3::new(0.32, 1.28, -0.40));

        assert!(detector.update(&arm, &[]).is_empty());
        let events = detector.update(&fire, &[]);
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GestureEvent::Snap { .. })),
            "armed follow-through fires the snap"
        );

        let doomed = snap_delete_count(markers.len());
        for marker in markers.drain(..doomed) {
            store.destroy_node(marker);
        }
        assert_eq!(markers.len(), 2, "5 markers minus ceil(5/2)");

        // Holding the fire position must not delete again.
        assert!(detector.update(&fire, &[]).is_empty());
    }
}
