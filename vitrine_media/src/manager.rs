// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Session-scoped media-layer factory.
//!
//! [`MediaLayerManager`] is created once per layer-capable session; it
//! acquires the session's layer-binding factory at construction and turns
//! creation requests into [`MediaLayer`] units.
//!
//! Creation is asynchronous — a reference space must be requested from the
//! session before the compositor layer can be created — but kind validation
//! is eager: an unknown layer tag fails on the first poll, before the
//! reference-space request is made.
//!
//! The caller owns what happens next: inserting the returned compositor
//! layer into the session's render-state layer list (media layers go before
//! the projection layer) and guarding creation with a per-session one-shot
//! flag.

use alloc::string::String;
use core::fmt;

use vitrine_core::scene::SceneStore;

use crate::binding::{CompositorLayer, LayerFactory, LayerInit, LayerKind};
use crate::layer::MediaLayer;
use crate::session::{ReferenceSpaceKind, SessionEnded, VideoSource, XrSession};
use crate::toolbar::{ToolbarGroupConfig, UiPanelConfig};

/// Errors surfaced by media-layer creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaLayerError {
    /// The requested layer tag is not one of the supported kinds.
    InvalidLayerKind {
        /// The rejected tag.
        tag: String,
    },
    /// The session ended before the reference-space request resolved.
    SessionEnded,
}

impl fmt::Display for MediaLayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLayerKind { tag } => {
                write!(f, "invalid layer kind `{tag}`: expected `equirect` or `quad`")
            }
            Self::SessionEnded => f.write_str("XR session ended before the layer was created"),
        }
    }
}

impl core::error::Error for MediaLayerError {}

impl From<SessionEnded> for MediaLayerError {
    fn from(_: SessionEnded) -> Self {
        Self::SessionEnded
    }
}

impl LayerKind {
    /// Parses a layer tag as found in scene configs and route parameters.
    ///
    /// # Errors
    ///
    /// Returns [`MediaLayerError::InvalidLayerKind`] for anything other than
    /// `"equirect"` or `"quad"`.
    pub fn from_tag(tag: &str) -> Result<Self, MediaLayerError> {
        match tag {
            "equirect" => Ok(Self::Equirect),
            "quad" => Ok(Self::Quad),
            _ => Err(MediaLayerError::InvalidLayerKind { tag: tag.into() }),
        }
    }
}

/// Creates media layers against one session.
///
/// At most one manager exists per session; it holds the session-scoped
/// layer-binding factory acquired once at construction.
pub struct MediaLayerManager<S: XrSession> {
    session: S,
    factory: S::Factory,
}

impl<S: XrSession> fmt::Debug for MediaLayerManager<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaLayerManager").finish_non_exhaustive()
    }
}

impl<S: XrSession> MediaLayerManager<S>
where
    S::Factory: LayerFactory,
{
    /// Creates the manager for a session, acquiring its layer binding.
    pub fn new(session: S) -> Self {
        let factory = session.create_media_binding();
        Self { session, factory }
    }

    /// Creates a compositor layer of `kind` and wraps it with its toolbar
    /// and (for quads) glass handle.
    ///
    /// Awaits a `Local` reference space from the session; the only failure
    /// mode is the session ending first.
    ///
    /// # Errors
    ///
    /// [`MediaLayerError::SessionEnded`] if the session ends before the
    /// reference-space request resolves.
    pub async fn create_media_layer<V: VideoSource>(
        &mut self,
        store: &mut SceneStore,
        video: V,
        kind: LayerKind,
        init: LayerInit,
        ui: UiPanelConfig,
        toolbar_group: Option<ToolbarGroupConfig>,
    ) -> Result<MediaLayer<V>, MediaLayerError> {
        let space = self
            .session
            .request_reference_space(ReferenceSpaceKind::Local)
            .await?;

        let layer: CompositorLayer = match kind {
            LayerKind::Quad => self.factory.create_quad(&space, &init),
            LayerKind::Equirect => self.factory.create_equirect(&space, &init),
        };

        Ok(MediaLayer::new(store, layer, video, ui, toolbar_group))
    }

    /// Like [`create_media_layer`](Self::create_media_layer), taking the
    /// layer kind as a config tag.
    ///
    /// # Errors
    ///
    /// [`MediaLayerError::InvalidLayerKind`] for an unknown tag — raised
    /// before the reference-space request, so the first poll fails without
    /// touching the session. [`MediaLayerError::SessionEnded`] as above.
    pub async fn create_media_layer_from_tag<V: VideoSource>(
        &mut self,
        store: &mut SceneStore,
        video: V,
        tag: &str,
        init: LayerInit,
        ui: UiPanelConfig,
        toolbar_group: Option<ToolbarGroupConfig>,
    ) -> Result<MediaLayer<V>, MediaLayerError> {
        let kind = LayerKind::from_tag(tag)?;
        self.create_media_layer(store, video, kind, init, ui, toolbar_group)
            .await
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::string::ToString as _;
    use core::cell::Cell;
    use core::future::Future;
    use core::pin::pin;
    use core::task::{Context, Poll, Waker};

    use crate::binding::LayerHandle;
    use crate::session::ReferenceSpace;

    use super::*;

    /// Polls a future exactly once with a no-op waker.
    fn poll_once<F: Future>(fut: F) -> Poll<F::Output> {
        let mut fut = pin!(fut);
        let mut cx = Context::from_waker(Waker::noop());
        fut.as_mut().poll(&mut cx)
    }

    #[derive(Clone)]
    struct TestSession {
        space_requests: Rc<Cell<u32>>,
        ended: bool,
    }

    impl TestSession {
        fn new() -> Self {
            Self {
                space_requests: Rc::new(Cell::new(0)),
                ended: false,
            }
        }
    }

    impl XrSession for TestSession {
        type Factory = TestFactory;

        fn create_media_binding(&self) -> TestFactory {
            TestFactory { next_handle: 0 }
        }

        async fn request_reference_space(
            &self,
            _kind: ReferenceSpaceKind,
        ) -> Result<ReferenceSpace, SessionEnded> {
            self.space_requests.set(self.space_requests.get() + 1);
            if self.ended {
                Err(SessionEnded)
            } else {
                Ok(ReferenceSpace(0))
            }
        }
    }

    struct TestFactory {
        next_handle: u32,
    }

    impl TestFactory {
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

    impl LayerFactory for TestFactory {
        fn create_quad(&mut self, _space: &ReferenceSpace, init: &LayerInit) -> CompositorLayer {
            self.create(LayerKind::Quad, init)
        }

        fn create_equirect(
            &mut self,
            _space: &ReferenceSpace,
            init: &LayerInit,
        ) -> CompositorLayer {
            self.create(LayerKind::Equirect, init)
        }
    }

    struct NullVideo;

    impl VideoSource for NullVideo {
        fn current_time(&self) -> f64 {
            0.0
        }

        fn set_current_time(&mut self, _seconds: f64) {}

        fn duration(&self) -> f64 {
            f64::NAN
        }

        fn paused(&self) -> bool {
            true
        }

        fn play(&mut self) {}

        fn pause(&mut self) {}

        fn ready(&self) -> bool {
            false
        }
    }

    #[test]
    fn from_tag_round_trips() {
        assert_eq!(LayerKind::from_tag("equirect"), Ok(LayerKind::Equirect));
        assert_eq!(LayerKind::from_tag("quad"), Ok(LayerKind::Quad));
        assert_eq!(LayerKind::Equirect.tag(), "equirect");
        assert_eq!(LayerKind::Quad.tag(), "quad");
    }

    #[test]
    fn invalid_tag_fails_before_the_reference_space_request() {
        let session = TestSession::new();
        let requests = Rc::clone(&session.space_requests);
        let mut manager = MediaLayerManager::new(session);
        let mut store = SceneStore::new();

        let fut = manager.create_media_layer_from_tag(
            &mut store,
            NullVideo,
            "cylinder",
            LayerInit::default(),
            UiPanelConfig::with_default_controls(true),
            None,
        );
        match poll_once(fut) {
            Poll::Ready(Err(MediaLayerError::InvalidLayerKind { tag })) => {
                assert_eq!(tag, "cylinder");
            }
            other => panic!("expected an immediate invalid-kind error, got {other:?}"),
        }
        assert_eq!(requests.get(), 0, "the session must not have been asked");
    }

    #[test]
    fn quad_creation_completes_with_glass() {
        let session = TestSession::new();
        let requests = Rc::clone(&session.space_requests);
        let mut manager = MediaLayerManager::new(session);
        let mut store = SceneStore::new();

        let init = LayerInit {
            width: 2.0,
            height: 1.0,
            ..LayerInit::default()
        };
        let fut = manager.create_media_layer(
            &mut store,
            NullVideo,
            LayerKind::Quad,
            init,
            UiPanelConfig::with_default_controls(true),
            None,
        );
        let Poll::Ready(Ok(media)) = poll_once(fut) else {
            panic!("creation should complete against the immediate test session");
        };
        assert_eq!(requests.get(), 1);
        assert_eq!(media.layer().kind, LayerKind::Quad);
        assert!((media.layer().width - 2.0).abs() < 1e-12);
        assert!(media.glass().is_some());
    }

    #[test]
    fn equirect_creation_has_no_glass() {
        let mut manager = MediaLayerManager::new(TestSession::new());
        let mut store = SceneStore::new();

        let fut = manager.create_media_layer_from_tag(
            &mut store,
            NullVideo,
            "equirect",
            LayerInit::default(),
            UiPanelConfig::with_default_controls(false),
            None,
        );
        let Poll::Ready(Ok(media)) = poll_once(fut) else {
            panic!("creation should complete");
        };
        assert_eq!(media.layer().kind, LayerKind::Equirect);
        assert!(media.glass().is_none());
    }

    #[test]
    fn ended_session_surfaces_session_ended() {
        let mut session = TestSession::new();
        session.ended = true;
        let mut manager = MediaLayerManager::new(session);
        let mut store = SceneStore::new();

        let fut = manager.create_media_layer(
            &mut store,
            NullVideo,
            LayerKind::Quad,
            LayerInit::default(),
            UiPanelConfig::with_default_controls(true),
            None,
        );
        assert!(matches!(
            poll_once(fut),
            Poll::Ready(Err(MediaLayerError::SessionEnded))
        ));
    }

    #[test]
    fn error_messages_name_the_problem() {
        let err = MediaLayerError::InvalidLayerKind {
            tag: "cube".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid layer kind `cube`: expected `equirect` or `quad`"
        );
        assert_eq!(
            MediaLayerError::SessionEnded.to_string(),
            "XR session ended before the layer was created"
        );
    }
}
