// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-layer toolbar visibility state.
//!
//! Owned by the scene controller (not hung off the session or scene object)
//! and keyed by the layer's registry key. Every layer's entry is reset to
//! hidden at creation.
//!
//! Two controllers toggling the same key in one frame resolve by the fixed
//! controller iteration order — deterministic last-writer-wins. Scene
//! controllers that want one toggle per frame consume the first trigger edge
//! only.

use alloc::collections::BTreeMap;
use alloc::string::String;

/// Per-layer-key visibility flags for toolbar groups.
#[derive(Clone, Debug, Default)]
pub struct VisibilityMap {
    entries: BTreeMap<String, bool>,
}

impl VisibilityMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a layer key, resetting its toolbar to hidden.
    ///
    /// Called at layer creation; re-registering an existing key also resets
    /// it.
    pub fn register(&mut self, key: &str) {
        self.entries.insert(key.into(), false);
    }

    /// Whether the toolbar for `key` is visible. Unregistered keys are
    /// hidden.
    #[must_use]
    pub fn is_visible(&self, key: &str) -> bool {
        self.entries.get(key).copied().unwrap_or(false)
    }

    /// Sets the visibility for `key`, registering it if needed.
    pub fn set(&mut self, key: &str, visible: bool) {
        self.entries.insert(key.into(), visible);
    }

    /// Flips the visibility for `key` and returns the new state.
    /// Unregistered keys flip from hidden to shown.
    pub fn toggle(&mut self, key: &str) -> bool {
        let entry = self.entries.entry(key.into()).or_insert(false);
        *entry = !*entry;
        *entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_starts_hidden() {
        let mut map = VisibilityMap::new();
        map.register("equirect");
        assert!(!map.is_visible("equirect"));
    }

    #[test]
    fn unknown_keys_are_hidden() {
        let map = VisibilityMap::new();
        assert!(!map.is_visible("quad"));
    }

    #[test]
    fn toggle_flips_and_reports_the_new_state() {
        let mut map = VisibilityMap::new();
        map.register("quad");
        assert!(map.toggle("quad"));
        assert!(map.is_visible("quad"));
        assert!(!map.toggle("quad"));
        assert!(!map.is_visible("quad"));
    }

    #[test]
    fn re_registration_resets_to_hidden() {
        let mut map = VisibilityMap::new();
        map.set("quad", true);
        map.register("quad");
        assert!(!map.is_visible("quad"), "layer creation resets visibility");
    }

    #[test]
    fn last_writer_wins_is_deterministic() {
        let mut map = VisibilityMap::new();
        map.register("quad");
        // Two controllers toggling in the fixed iteration order: the second
        // one lands last.
        map.toggle("quad");
        map.toggle("quad");
        assert!(!map.is_visible("quad"));
    }
}
