// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame hand-joint snapshots.
//!
//! Joint positions are sampled fresh from the session's input sources every
//! frame; a [`HandFrame`] has no cross-frame identity. A joint the platform
//! is not tracking this frame is simply absent — detectors treat that as
//! "no gesture", never as an error.

use crate::transform::Vec3;

/// Which hand an input source belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handedness {
    /// Left hand.
    Left,
    /// Right hand.
    Right,
}

impl Handedness {
    /// Both hands, in the fixed per-frame processing order.
    pub const BOTH: [Self; 2] = [Self::Left, Self::Right];

    /// Short label for diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// The hand joints the gesture detectors consume.
///
/// This is the subset of the platform skeleton that distance-threshold
/// classification actually reads, not the full 25-joint set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JointId {
    /// Thumb tip.
    ThumbTip,
    /// Index finger tip.
    IndexTip,
    /// Index finger metacarpal.
    IndexMetacarpal,
    /// Middle finger tip.
    MiddleTip,
    /// Middle finger metacarpal.
    MiddleMetacarpal,
    /// Ring finger tip.
    RingTip,
    /// Ring finger metacarpal.
    RingMetacarpal,
    /// Pinky finger tip.
    PinkyTip,
    /// Wrist.
    Wrist,
}

impl JointId {
    /// Number of joints in the snapshot.
    pub const COUNT: usize = 9;

    /// All joints, in slot order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::ThumbTip,
        Self::IndexTip,
        Self::IndexMetacarpal,
        Self::MiddleTip,
        Self::MiddleMetacarpal,
        Self::RingTip,
        Self::RingMetacarpal,
        Self::PinkyTip,
        Self::Wrist,
    ];

    /// The five fingertip joints (thumb first).
    pub const FINGERTIPS: [Self; 5] = [
        Self::ThumbTip,
        Self::IndexTip,
        Self::MiddleTip,
        Self::RingTip,
        Self::PinkyTip,
    ];

    /// Returns the snapshot slot for this joint.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::ThumbTip => 0,
            Self::IndexTip => 1,
            Self::IndexMetacarpal => 2,
            Self::MiddleTip => 3,
            Self::MiddleMetacarpal => 4,
            Self::RingTip => 5,
            Self::RingMetacarpal => 6,
            Self::PinkyTip => 7,
            Self::Wrist => 8,
        }
    }
}

/// A one-frame snapshot of one hand's joint positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandFrame {
    joints: [Option<Vec3>; JointId::COUNT],
}

impl Default for HandFrame {
    fn default() -> Self {
        Self::untracked()
    }
}

impl HandFrame {
    /// A snapshot with no joints tracked.
    #[must_use]
    pub const fn untracked() -> Self {
        Self {
            joints: [None; JointId::COUNT],
        }
    }

    /// Sets a joint position.
    pub const fn set(&mut self, joint: JointId, position: Vec3) {
        self.joints[joint.index()] = Some(position);
    }

    /// Marks a joint as not tracked this frame.
    pub const fn clear(&mut self, joint: JointId) {
        self.joints[joint.index()] = None;
    }

    /// Returns the position of a joint, if tracked this frame.
    #[must_use]
    pub const fn joint(&self, joint: JointId) -> Option<Vec3> {
        self.joints[joint.index()]
    }

    /// Returns whether any joint is tracked this frame.
    #[must_use]
    pub fn is_tracked(&self) -> bool {
        self.joints.iter().any(Option::is_some)
    }

    /// Iterates over the tracked fingertip positions.
    pub fn fingertips(&self) -> impl Iterator<Item = Vec3> + '_ {
        JointId::FINGERTIPS
            .iter()
            .filter_map(|&j| self.joint(j))
    }
}
