// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Consumed session collaborators.
//!
//! The media subsystem never talks to a platform directly. It consumes three
//! narrow traits — an XR session, a video element, and a 2-D panel painter —
//! that platform backends (and the deterministic harness) implement. The
//! traits mirror the platform surface the subsystem actually touches, not the
//! full platform API.

use core::fmt;
use core::future::Future;

/// The coordinate frame a reference space is anchored to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReferenceSpaceKind {
    /// Seated-scale space near the session origin.
    Local,
    /// Standing-scale space with the floor at y = 0.
    LocalFloor,
    /// Head-locked space.
    Viewer,
}

/// An opaque reference-space token minted by the session.
///
/// Layer factories require one; its meaning is entirely session-internal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReferenceSpace(pub u32);

/// The session ended before an asynchronous request completed.
///
/// Not a programming error: an in-flight reference-space request can lose a
/// race with `sessionend`. Callers give up on the creation (the session-scoped
/// one-shot guard prevents re-entry) and wait for a new session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionEnded;

impl fmt::Display for SessionEnded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("XR session ended")
    }
}

impl core::error::Error for SessionEnded {}

/// A layer-capable XR session.
///
/// Implementations are cheap handles (the harness session clones an inner
/// shared state); the manager holds one for the session's lifetime and must
/// not outlive it.
pub trait XrSession {
    /// The layer-binding factory type this session produces.
    type Factory;

    /// Acquires the session-scoped layer-binding factory.
    ///
    /// Called once per [`MediaLayerManager`](crate::MediaLayerManager).
    fn create_media_binding(&self) -> Self::Factory;

    /// Requests a reference space of the given kind.
    ///
    /// This is the single suspension point in layer creation. Fails with
    /// [`SessionEnded`] if the session ends before the request resolves.
    fn request_reference_space(
        &self,
        kind: ReferenceSpaceKind,
    ) -> impl Future<Output = Result<ReferenceSpace, SessionEnded>>;
}

/// An HTML5-style video element.
///
/// Times are in seconds. [`duration`](Self::duration) may be NaN before
/// metadata loads; consumers must treat a non-finite duration as "unknown"
/// and skip progress math.
pub trait VideoSource {
    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    /// Seeks to `seconds`, clamped to `[0, duration]` when the duration is
    /// known.
    fn set_current_time(&mut self, seconds: f64);

    /// Media duration in seconds, or NaN if not yet known.
    fn duration(&self) -> f64;

    /// Whether playback is paused.
    fn paused(&self) -> bool;

    /// Starts playback.
    fn play(&mut self);

    /// Pauses playback.
    fn pause(&mut self);

    /// Whether enough data is buffered to present a frame.
    fn ready(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString as _;

    use super::*;

    #[test]
    fn session_ended_displays() {
        assert_eq!(SessionEnded.to_string(), "XR session ended");
    }
}
