// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hand-gesture recognition from per-frame joint snapshots.
//!
//! Detects pinch, grab, finger-snap, and the spider pose from
//! [`HandFrame`] joint positions. Classification is distance-threshold
//! based, recomputed fresh every frame, with no smoothing or filtering.
//!
//! All detectors are poll-and-diff state machines: each `update` compares
//! this frame's classification against the previous frame's and derives
//! discrete edge events from the transitions. Callers never register
//! callbacks.
//!
//! # Sentinel convention
//!
//! A joint pair whose per-axis differences are all *exactly* zero is treated
//! as "joint data not yet available this session" and classifies as no
//! gesture. Real tracked hands never report two distinct joints at
//! bit-identical positions. Missing joints and NaN positions likewise
//! classify as no gesture — never as an error.

use alloc::vec::Vec;

use crate::hand::{HandFrame, Handedness, JointId};
use crate::scene::NodeId;
use crate::transform::Vec3;

/// Distance thresholds for gesture classification, in meters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Maximum per-axis distance between index and thumb tips for a pinch.
    pub pinch_threshold: f64,
    /// Maximum per-axis middle-tip↔thumb-tip distance to arm a snap.
    pub snap_arm_threshold: f64,
    /// Maximum per-axis middle-tip↔index-metacarpal distance to fire an
    /// armed snap.
    pub snap_fire_threshold: f64,
    /// Tolerance for the spider-pose joint distances.
    pub pose_tolerance: f64,
    /// Fingertip-to-object-center engage radius for grabs.
    pub grab_radius: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pinch_threshold: 0.02,
            snap_arm_threshold: 0.02,
            snap_fire_threshold: 0.05,
            pose_tolerance: 0.02,
            grab_radius: 0.04,
        }
    }
}

/// Static hand poses recognized by [`PoseDetector`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PoseKind {
    /// Middle and ring tips curled to their metacarpals and touching.
    Spider,
}

/// A discrete gesture event, produced and consumed within one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// A pinch began this frame.
    PinchStart {
        /// Hand that pinched.
        hand: Handedness,
        /// Index-tip position at the pinch.
        position: Vec3,
    },
    /// A pinch released this frame.
    PinchEnd {
        /// Hand that released.
        hand: Handedness,
    },
    /// A fingertip engaged an object this frame.
    GrabStart {
        /// Hand that grabbed.
        hand: Handedness,
        /// The engaged object.
        node: NodeId,
        /// Fingertip position at engagement.
        position: Vec3,
    },
    /// A held object was released this frame.
    GrabEnd {
        /// Hand that released.
        hand: Handedness,
        /// The released object.
        node: NodeId,
    },
    /// An armed snap fired this frame.
    Snap {
        /// Hand that snapped.
        hand: Handedness,
        /// Middle-tip position at the snap.
        position: Vec3,
    },
    /// A static pose was recognized this frame.
    PoseDetected {
        /// Hand holding the pose.
        hand: Handedness,
        /// Which pose.
        kind: PoseKind,
    },
}

/// How many objects a snap's bulk delete removes from a tracked list of
/// `len` objects: ⌈len/2⌉.
#[must_use]
pub const fn snap_delete_count(len: usize) -> usize {
    len.div_ceil(2)
}

/// Per-axis closeness test with the zero-sentinel convention.
///
/// True iff every per-axis absolute difference is below `threshold`, except
/// that the all-zero triple (untracked sentinel) is never close. NaN
/// components fail every comparison and classify as not close.
fn close_within(a: Vec3, b: Vec3, threshold: f64) -> bool {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    let dz = (a.z - b.z).abs();
    if dx == 0.0 && dy == 0.0 && dz == 0.0 {
        return false;
    }
    dx < threshold && dy < threshold && dz < threshold
}

// ---------------------------------------------------------------------------
// Pinch
// ---------------------------------------------------------------------------

/// Edge-triggered index-to-thumb pinch detector.
///
/// A discrete pinch produces exactly one `started` and one `ended`
/// transition, no matter how many frames the fingers stay together; one-shot
/// actions (spawning a marker, say) key off the edges, not the held state.
#[derive(Clone, Copy, Debug, Default)]
pub struct PinchDetector {
    pinching: bool,
}

/// Result of one [`PinchDetector::update`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PinchUpdate {
    /// The pinch condition holds this frame.
    pub pinching: bool,
    /// The pinch began this frame.
    pub started: bool,
    /// The pinch released this frame.
    pub ended: bool,
}

impl PinchDetector {
    /// Classifies one frame of index-tip and thumb-tip positions.
    pub fn update(
        &mut self,
        index_tip: Option<Vec3>,
        thumb_tip: Option<Vec3>,
        threshold: f64,
    ) -> PinchUpdate {
        let now = match (index_tip, thumb_tip) {
            (Some(index), Some(thumb)) => close_within(index, thumb, threshold),
            _ => false,
        };
        let was = self.pinching;
        self.pinching = now;
        PinchUpdate {
            pinching: now,
            started: now && !was,
            ended: !now && was,
        }
    }

    /// Whether the last update classified as pinching.
    #[must_use]
    pub const fn is_pinching(&self) -> bool {
        self.pinching
    }
}

// ---------------------------------------------------------------------------
// Snap
// ---------------------------------------------------------------------------

/// Two-stage finger-snap detector.
///
/// Stage 1 *arms* when the middle tip touches the thumb tip. Stage 2 *fires*
/// when the armed middle tip lands near the index metacarpal (the follow-
/// through of a snap), then disarms. Each armed→fire sequence toggles
/// [`did_snap`](Self::did_snap) exactly once and reports exactly one fire.
#[derive(Clone, Copy, Debug, Default)]
pub struct SnapDetector {
    armed: bool,
    did_snap: bool,
}

impl SnapDetector {
    /// Classifies one frame. Returns `true` when an armed snap fires.
    pub fn update(
        &mut self,
        middle_tip: Option<Vec3>,
        thumb_tip: Option<Vec3>,
        index_metacarpal: Option<Vec3>,
        config: &GestureConfig,
    ) -> bool {
        if let (Some(middle), Some(thumb)) = (middle_tip, thumb_tip)
            && close_within(middle, thumb, config.snap_arm_threshold)
        {
            self.armed = true;
        }

        if self.armed
            && let (Some(middle), Some(carpal)) = (middle_tip, index_metacarpal)
            && close_within(middle, carpal, config.snap_fire_threshold)
        {
            self.did_snap = !self.did_snap;
            self.armed = false;
            return true;
        }
        false
    }

    /// Whether stage 1 is currently armed.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed
    }

    /// The snap toggle, flipped once per armed→fire sequence.
    #[must_use]
    pub const fn did_snap(&self) -> bool {
        self.did_snap
    }
}

// ---------------------------------------------------------------------------
// Grab
// ---------------------------------------------------------------------------

/// Fingertip-proximity grab detector.
///
/// Engages on the nearest object whose center is within the engage radius of
/// any tracked fingertip. While held, the grip survives until every
/// fingertip leaves a 1.5× hysteresis radius (or the hand stops tracking),
/// so jitter at the boundary does not drop the object.
///
/// The detector only classifies; the caller performs the actual ownership
/// transfer (reparenting the node to a joint anchor and back).
#[derive(Clone, Copy, Debug, Default)]
pub struct GrabDetector {
    held: Option<NodeId>,
}

/// Result of one [`GrabDetector::update`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GrabUpdate {
    /// No object engaged.
    Idle,
    /// An object was engaged this frame.
    Started {
        /// The engaged object.
        node: NodeId,
        /// Fingertip position at engagement.
        position: Vec3,
    },
    /// The grip continues.
    Held {
        /// The held object.
        node: NodeId,
    },
    /// The held object was released this frame.
    Released {
        /// The released object.
        node: NodeId,
    },
}

impl GrabDetector {
    /// Classifies one frame against the current object centers.
    ///
    /// `objects` carries each candidate node with its world-space center,
    /// including the currently held object (whose center moves with the
    /// hand while parented to it).
    pub fn update(
        &mut self,
        frame: &HandFrame,
        objects: &[(NodeId, Vec3)],
        radius: f64,
    ) -> GrabUpdate {
        if let Some(held) = self.held {
            let release = match objects.iter().find(|(node, _)| *node == held) {
                // Object vanished from the tracked set.
                None => true,
                Some((_, center)) => {
                    let release_radius = radius * 1.5;
                    !frame
                        .fingertips()
                        .any(|tip| tip.distance(*center) <= release_radius)
                }
            };
            if release {
                self.held = None;
                return GrabUpdate::Released { node: held };
            }
            return GrabUpdate::Held { node: held };
        }

        let mut nearest: Option<(NodeId, Vec3, f64)> = None;
        for tip in frame.fingertips() {
            for &(node, center) in objects {
                let d = tip.distance(center);
                if d <= radius && nearest.is_none_or(|(_, _, best)| d < best) {
                    nearest = Some((node, tip, d));
                }
            }
        }

        match nearest {
            Some((node, position, _)) => {
                self.held = Some(node);
                GrabUpdate::Started { node, position }
            }
            None => GrabUpdate::Idle,
        }
    }

    /// The currently held object, if any.
    #[must_use]
    pub const fn held(&self) -> Option<NodeId> {
        self.held
    }
}

// ---------------------------------------------------------------------------
// Static pose
// ---------------------------------------------------------------------------

/// Spider-pose detector: middle and ring tips touching each other and each
/// curled to its own metacarpal, all concurrently.
#[derive(Clone, Copy, Debug, Default)]
pub struct PoseDetector {
    active: bool,
}

/// Result of one [`PoseDetector::update`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoseUpdate {
    /// The pose holds this frame.
    pub active: bool,
    /// The pose began this frame.
    pub started: bool,
    /// The pose released this frame.
    pub ended: bool,
}

impl PoseDetector {
    /// Classifies one frame of joint positions.
    pub fn update(&mut self, frame: &HandFrame, tolerance: f64) -> PoseUpdate {
        let now = match (
            frame.joint(JointId::MiddleTip),
            frame.joint(JointId::RingTip),
            frame.joint(JointId::MiddleMetacarpal),
            frame.joint(JointId::RingMetacarpal),
        ) {
            (Some(middle), Some(ring), Some(middle_carpal), Some(ring_carpal)) => {
                close_within(middle, ring, tolerance)
                    && close_within(middle, middle_carpal, tolerance)
                    && close_within(ring, ring_carpal, tolerance)
            }
            _ => false,
        };
        let was = self.active;
        self.active = now;
        PoseUpdate {
            active: now,
            started: now && !was,
            ended: !now && was,
        }
    }
}

// ---------------------------------------------------------------------------
// Combined per-hand detector
// ---------------------------------------------------------------------------

/// Per-hand umbrella over the four detectors.
///
/// Feed one [`HandFrame`] per frame; discrete [`GestureEvent`]s come back in
/// a fixed order (pinch, grab, snap, pose). An untracked hand classifies as
/// no gesture everywhere and releases any engaged grab.
#[derive(Clone, Debug)]
pub struct GestureDetector {
    hand: Handedness,
    config: GestureConfig,
    pinch: PinchDetector,
    snap: SnapDetector,
    grab: GrabDetector,
    pose: PoseDetector,
}

impl GestureDetector {
    /// Creates a detector for one hand with the given thresholds.
    #[must_use]
    pub fn new(hand: Handedness, config: GestureConfig) -> Self {
        Self {
            hand,
            config,
            pinch: PinchDetector::default(),
            snap: SnapDetector::default(),
            grab: GrabDetector::default(),
            pose: PoseDetector::default(),
        }
    }

    /// Which hand this detector classifies.
    #[must_use]
    pub const fn hand(&self) -> Handedness {
        self.hand
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// The currently grabbed object, if any.
    #[must_use]
    pub const fn held(&self) -> Option<NodeId> {
        self.grab.held()
    }

    /// Classifies one frame, returning the discrete events it produced.
    ///
    /// `grab_targets` carries the grabbable nodes with their current
    /// world-space centers.
    pub fn update(
        &mut self,
        frame: &HandFrame,
        grab_targets: &[(NodeId, Vec3)],
    ) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        let hand = self.hand;

        let index_tip = frame.joint(JointId::IndexTip);
        let thumb_tip = frame.joint(JointId::ThumbTip);
        let pinch = self
            .pinch
            .update(index_tip, thumb_tip, self.config.pinch_threshold);
        if pinch.started
            && let Some(position) = index_tip
        {
            events.push(GestureEvent::PinchStart { hand, position });
        }
        if pinch.ended {
            events.push(GestureEvent::PinchEnd { hand });
        }

        match self.grab.update(frame, grab_targets, self.config.grab_radius) {
            GrabUpdate::Started { node, position } => {
                events.push(GestureEvent::GrabStart {
                    hand,
                    node,
                    position,
                });
            }
            GrabUpdate::Released { node } => {
                events.push(GestureEvent::GrabEnd { hand, node });
            }
            GrabUpdate::Idle | GrabUpdate::Held { .. } => {}
        }

        let middle_tip = frame.joint(JointId::MiddleTip);
        if self.snap.update(
            middle_tip,
            thumb_tip,
            frame.joint(JointId::IndexMetacarpal),
            &self.config,
        ) && let Some(position) = middle_tip
        {
            events.push(GestureEvent::Snap { hand, position });
        }

        if self.pose.update(frame, self.config.pose_tolerance).started {
            events.push(GestureEvent::PoseDetected {
                hand,
                kind: PoseKind::Spider,
            });
        }

        events
    }
}
