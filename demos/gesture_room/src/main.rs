// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted gesture room.
//!
//! Plays prerecorded two-hand input through the gesture detectors and acts
//! on the events the way a headset scene would: left-hand pinches spawn
//! marker spheres at the index tip, grabs parent the nearest marker to the
//! hand, a right-hand finger snap deletes half the markers, and the spider
//! pose is reported. Every event goes through the trace sink.

use vitrine_core::gesture::{
    GestureConfig, GestureDetector, GestureEvent, snap_delete_count,
};
use vitrine_core::hand::{HandFrame, Handedness, JointId};
use vitrine_core::scene::{NodeId, NodeKind, SceneStore};
use vitrine_core::trace::{FrameBeginEvent, FrameEndEvent, GestureTraceEvent, TraceSink, Tracer};
use vitrine_core::transform::{Transform3d, Vec3};
use vitrine_harness::HandScript;

const FRAME_COUNT: u64 = 16;

/// Prints every gesture event as it is classified.
struct StdoutSink;

impl TraceSink for StdoutSink {
    fn on_gesture(&mut self, e: &GestureTraceEvent) {
        println!("frame {:02}: {:?}", e.frame_index, e.event);
    }
}

/// Index and thumb tips touching at `at` (a pinch).
fn pinch_frame(at: Vec3) -> HandFrame {
    let mut frame = HandFrame::untracked();
    frame.set(JointId::IndexTip, at);
    frame.set(JointId::ThumbTip, at + Vec3::new(0.008, 0.005, 0.003));
    frame
}

/// Open hand with the index tip at `at`.
fn open_frame(at: Vec3) -> HandFrame {
    let mut frame = HandFrame::untracked();
    frame.set(JointId::IndexTip, at);
    frame.set(JointId::ThumbTip, at + Vec3::new(0.09, 0.02, 0.0));
    frame
}

/// Middle tip against the thumb tip (snap stage 1).
fn snap_arm_frame() -> HandFrame {
    let mut frame = HandFrame::untracked();
    frame.set(JointId::ThumbTip, Vec3::new(0.25, 1.35, -0.40));
    frame.set(JointId::MiddleTip, Vec3::new(0.26, 1.36, -0.41));
    frame.set(JointId::IndexMetacarpal, Vec3::new(0.32, 1.28, -0.40));
    frame
}

/// Middle tip landed at the index metacarpal (snap stage 2).
fn snap_fire_frame() -> HandFrame {
    let mut frame = HandFrame::untracked();
    frame.set(JointId::ThumbTip, Vec3::new(0.25, 1.35, -0.40));
    frame.set(JointId::MiddleTip, Vec3::new(0.30, 1.30, -0.41));
    frame.set(JointId::IndexMetacarpal, Vec3::new(0.32, 1.28, -0.40));
    frame
}

/// Middle and ring tips curled to their metacarpals (spider pose).
fn spider_frame() -> HandFrame {
    let mut frame = HandFrame::untracked();
    frame.set(JointId::MiddleTip, Vec3::new(0.250, 1.300, -0.400));
    frame.set(JointId::RingTip, Vec3::new(0.260, 1.305, -0.405));
    frame.set(JointId::MiddleMetacarpal, Vec3::new(0.255, 1.310, -0.410));
    frame.set(JointId::RingMetacarpal, Vec3::new(0.265, 1.295, -0.395));
    frame
}

/// Left hand: three discrete pinches at distinct spots (withdrawing after
/// each so the fresh marker is not immediately grabbed), then a grab of the
/// surviving marker and a short drag before tracking is lost.
fn left_script() -> HandScript {
    let p1 = Vec3::new(-0.30, 1.20, -0.50);
    let p2 = Vec3::new(-0.10, 1.30, -0.55);
    let p3 = Vec3::new(0.10, 1.25, -0.45);
    let withdraw = Vec3::new(0.0, 0.15, 0.0);
    let rest = Vec3::new(0.0, 1.0, -0.2);
    HandScript::new(vec![
        open_frame(rest),
        pinch_frame(p1),
        open_frame(p1 + withdraw),
        pinch_frame(p2),
        open_frame(p2 + withdraw),
        pinch_frame(p3),
        open_frame(p3 + withdraw),
        open_frame(rest), // idle while the right hand works
        open_frame(rest),
        open_frame(rest),
        // Reach the surviving marker at p3 and drag it 20 cm right.
        open_frame(p3 + Vec3::new(0.0, 0.02, 0.0)),
        open_frame(p3 + Vec3::new(0.10, 0.02, 0.0)),
        open_frame(p3 + Vec3::new(0.20, 0.02, 0.0)),
        // Script ends: the hand leaves tracking and the grab releases.
    ])
}

/// Right hand: the spider pose, then a finger snap.
fn right_script() -> HandScript {
    HandScript::new(vec![
        HandFrame::untracked(),
        HandFrame::untracked(),
        HandFrame::untracked(),
        HandFrame::untracked(),
        HandFrame::untracked(),
        HandFrame::untracked(),
        spider_frame(),
        HandFrame::untracked(),
        snap_arm_frame(),
        snap_fire_frame(),
    ])
}

fn main() {
    let mut store = SceneStore::new();
    let mut sink = StdoutSink;

    let anchors = [
        store.create_node(NodeKind::Anchor),
        store.create_node(NodeKind::Anchor),
    ];
    let mut detectors = [
        GestureDetector::new(Handedness::Left, GestureConfig::default()),
        GestureDetector::new(Handedness::Right, GestureConfig::default()),
    ];
    let mut scripts = [left_script(), right_script()];

    let mut markers: Vec<NodeId> = Vec::new();

    for frame_index in 0..FRAME_COUNT {
        let mut tracer = Tracer::new(&mut sink);
        tracer.frame_begin(&FrameBeginEvent { frame_index });
        let mut gesture_events = 0;

        // Fixed hand order: deterministic last-writer-wins on shared state.
        for side in 0..2 {
            let frame = scripts[side].next();

            // The grab anchor follows the hand's index tip while tracked.
            if let Some(tip) = frame.joint(JointId::IndexTip) {
                store.set_transform(
                    anchors[side],
                    Transform3d::from_translation(tip.x, tip.y, tip.z),
                );
            }

            let targets: Vec<(NodeId, Vec3)> = markers
                .iter()
                .map(|&m| (m, store.world_transform_fresh(m).translation()))
                .collect();

            for event in detectors[side].update(&frame, &targets) {
                gesture_events += 1;
                tracer.gesture(&GestureTraceEvent { frame_index, event });
                match event {
                    GestureEvent::PinchStart { position, .. } => {
                        let marker = store.create_node(NodeKind::Marker);
                        store.set_transform(
                            marker,
                            Transform3d::from_translation(position.x, position.y, position.z),
                        );
                        markers.push(marker);
                    }
                    GestureEvent::GrabStart { node, .. } => {
                        store.reparent_keep_world(node, anchors[side]);
                    }
                    GestureEvent::GrabEnd { node, .. } => {
                        if store.is_alive(node) && store.parent(node).is_some() {
                            store.remove_from_parent_keep_world(node);
                        }
                    }
                    GestureEvent::Snap { .. } => {
                        let doomed = snap_delete_count(markers.len());
                        println!(
                            "frame {frame_index:02}: snap deletes {doomed} of {} markers",
                            markers.len()
                        );
                        for marker in markers.drain(..doomed) {
                            store.destroy_node(marker);
                        }
                    }
                    GestureEvent::PoseDetected { hand, kind } => {
                        println!(
                            "frame {frame_index:02}: {} hand holds the {kind:?} pose",
                            hand.as_str()
                        );
                    }
                    GestureEvent::PinchEnd { .. } => {}
                }
            }
        }

        let _ = store.evaluate();
        tracer.frame_end(&FrameEndEvent {
            frame_index,
            gesture_events,
            intersections: 0,
        });
    }

    println!("markers remaining: {}", markers.len());
    for &marker in &markers {
        let at = store.world_transform(marker).translation();
        println!("  marker at ({:+.2}, {:+.2}, {:+.2})", at.x, at.y, at.z);
    }
}
