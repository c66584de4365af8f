// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the interaction loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! frame loop calls at each stage. All method bodies default to no-ops, so
//! implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace`
//! feature is **off**, every `Tracer` method compiles to nothing (zero
//! overhead). When **on**, each method performs a single `Option` branch
//! before dispatching.

use crate::gesture::GestureEvent;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted at the start of a frame callback.
#[derive(Clone, Copy, Debug)]
pub struct FrameBeginEvent {
    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Emitted at the end of a frame callback.
#[derive(Clone, Copy, Debug)]
pub struct FrameEndEvent {
    /// Monotonic frame counter.
    pub frame_index: u64,
    /// Number of gesture events emitted this frame.
    pub gesture_events: u32,
    /// Number of ray intersections processed this frame.
    pub intersections: u32,
}

/// Emitted when a gesture detector produces a discrete event.
#[derive(Clone, Copy, Debug)]
pub struct GestureTraceEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// The gesture event.
    pub event: GestureEvent,
}

/// Emitted when a compositor media layer is created.
#[derive(Clone, Copy, Debug)]
pub struct LayerCreatedEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Layer kind tag (`"equirect"` or `"quad"`).
    pub kind: &'static str,
    /// Layer width in world units.
    pub width: f64,
    /// Layer height in world units.
    pub height: f64,
}

/// Emitted when a toolbar control executes an action.
#[derive(Clone, Copy, Debug)]
pub struct ToolbarActionEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Action label (`"play"`, `"pause"`, `"seek"`, `"expand"`, ...).
    pub action: &'static str,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the interaction loop.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called at the start of a frame callback.
    fn on_frame_begin(&mut self, e: &FrameBeginEvent) {
        _ = e;
    }

    /// Called at the end of a frame callback.
    fn on_frame_end(&mut self, e: &FrameEndEvent) {
        _ = e;
    }

    /// Called for each discrete gesture event.
    fn on_gesture(&mut self, e: &GestureTraceEvent) {
        _ = e;
    }

    /// Called when a media layer is created.
    fn on_layer_created(&mut self, e: &LayerCreatedEvent) {
        _ = e;
    }

    /// Called when a toolbar action executes.
    fn on_toolbar_action(&mut self, e: &ToolbarActionEvent) {
        _ = e;
    }
}

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`FrameBeginEvent`].
    #[inline]
    pub fn frame_begin(&mut self, e: &FrameBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_frame_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FrameEndEvent`].
    #[inline]
    pub fn frame_end(&mut self, e: &FrameEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_frame_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`GestureTraceEvent`].
    #[inline]
    pub fn gesture(&mut self, e: &GestureTraceEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_gesture(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`LayerCreatedEvent`].
    #[inline]
    pub fn layer_created(&mut self, e: &LayerCreatedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_layer_created(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ToolbarActionEvent`].
    #[inline]
    pub fn toolbar_action(&mut self, e: &ToolbarActionEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_toolbar_action(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

#[cfg(all(test, feature = "trace"))]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[derive(Default)]
    struct CountingSink {
        frames: Vec<u64>,
        actions: u32,
    }

    impl TraceSink for CountingSink {
        fn on_frame_begin(&mut self, e: &FrameBeginEvent) {
            self.frames.push(e.frame_index);
        }

        fn on_toolbar_action(&mut self, _e: &ToolbarActionEvent) {
            self.actions += 1;
        }
    }

    #[test]
    fn tracer_dispatches_to_sink() {
        let mut sink = CountingSink::default();
        let mut tracer = Tracer::new(&mut sink);
        tracer.frame_begin(&FrameBeginEvent { frame_index: 7 });
        tracer.toolbar_action(&ToolbarActionEvent {
            frame_index: 7,
            action: "play",
        });
        drop(tracer);
        assert_eq!(sink.frames, [7]);
        assert_eq!(sink.actions, 1);
    }

    #[test]
    fn none_tracer_is_silent() {
        let mut tracer = Tracer::none();
        tracer.frame_begin(&FrameBeginEvent { frame_index: 0 });
    }
}
