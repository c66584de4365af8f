// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for vitrine.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`HtmlVideo`]: adapts a `web_sys::HtmlVideoElement` to the
//!   [`VideoSource`] contract
//! - [`RafLoop`]: `requestAnimationFrame` frame-callback source
//!
//! Only builds for `wasm32` targets; it is not a default workspace member.

#![no_std]

extern crate alloc;

mod raf;
mod video;

pub use raf::{FrameStamp, RafLoop};
pub use video::HtmlVideo;

pub use vitrine_media::session::VideoSource;
