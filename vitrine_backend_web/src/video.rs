// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `HtmlVideoElement` adapter.

use vitrine_media::session::VideoSource;
use web_sys::HtmlVideoElement;

/// `HAVE_CURRENT_DATA`: enough data to present at least one frame.
const READY_STATE_HAVE_CURRENT_DATA: u16 = 2;

/// A [`VideoSource`] backed by a real `<video>` element.
#[derive(Clone, Debug)]
pub struct HtmlVideo {
    element: HtmlVideoElement,
}

impl HtmlVideo {
    /// Wraps a video element.
    #[must_use]
    pub const fn new(element: HtmlVideoElement) -> Self {
        Self { element }
    }

    /// The underlying element.
    #[must_use]
    pub const fn element(&self) -> &HtmlVideoElement {
        &self.element
    }
}

impl VideoSource for HtmlVideo {
    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        let duration = self.element.duration();
        let clamped = if duration.is_finite() && duration > 0.0 {
            seconds.clamp(0.0, duration)
        } else {
            seconds.max(0.0)
        };
        self.element.set_current_time(clamped);
    }

    fn duration(&self) -> f64 {
        self.element.duration()
    }

    fn paused(&self) -> bool {
        self.element.paused()
    }

    fn play(&mut self) {
        // The returned play promise resolves (or is rejected by autoplay
        // policy) out of band; transport state is re-read every frame.
        let _ = self.element.play();
    }

    fn pause(&mut self) {
        let _ = self.element.pause();
    }

    fn ready(&self) -> bool {
        self.element.ready_state() >= READY_STATE_HAVE_CURRENT_DATA
    }
}
