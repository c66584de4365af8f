// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted media-layer player.
//!
//! Builds a [`MediaLayerManager`] over the scripted session, creates an
//! equirectangular background and a movable quad layer (behind the usual
//! per-session one-shot guard), then walks a fixed interaction script with
//! synthetic controller rays: toolbar show/hide, progress-bar seeking,
//! expand/compress clicks, a fluid resize drag, and a glass grab-and-move.
//! Finishes by demonstrating the invalid-tag and stale-session failure
//! paths.

use vitrine_core::ray::{Ray, cast};
use vitrine_core::scene::{NodeKind, SceneStore};
use vitrine_core::trace::{LayerCreatedEvent, ToolbarActionEvent, TraceSink, Tracer};
use vitrine_core::transform::{Pose, Quat, Transform3d, Vec3};
use vitrine_harness::{RecordingPainter, ScriptedSession, ScriptedVideo, block_on};
use vitrine_media::session::VideoSource as _;
use vitrine_media::{
    LayerInit, LayerKind, MediaLayer, MediaLayerManager, StereoLayout, ToolbarGroupConfig,
    UiPanelConfig, VisibilityMap,
};

const VIDEO_SECONDS: f64 = 120.0;
const QUAD_POSITION: Vec3 = Vec3::new(0.0, 1.3, -2.75);
const QUAD_WIDTH: f64 = 1.0;
const QUAD_HEIGHT: f64 = 0.5625;

/// Prints layer lifecycle and toolbar actions.
struct StdoutSink;

impl TraceSink for StdoutSink {
    fn on_layer_created(&mut self, e: &LayerCreatedEvent) {
        println!(
            "frame {:02}: created {} layer {}x{}",
            e.frame_index, e.kind, e.width, e.height
        );
    }

    fn on_toolbar_action(&mut self, e: &ToolbarActionEvent) {
        println!("frame {:02}: toolbar action `{}`", e.frame_index, e.action);
    }
}

/// A ray from half a meter in front of the viewer straight at `target`.
fn aim_at(target: Vec3) -> Ray {
    let origin = Vec3::new(target.x, target.y, 0.5);
    Ray::new(origin, target - origin).expect("target is ahead of the origin")
}

/// World position of a panel-canvas pixel on the quad layer's toolbar.
///
/// The toolbar group hangs under the quad's bottom edge; the panel is the
/// 2×0.5 default at the group origin with a 512×128 canvas.
fn panel_pixel(group: Vec3, px: f64, py: f64) -> Vec3 {
    let u = px / 512.0;
    let v = 1.0 - py / 128.0;
    Vec3::new(
        group.x + (u - 0.5) * 2.0,
        group.y + (v - 0.5) * 0.5,
        group.z,
    )
}

fn toolbar_group_origin() -> Vec3 {
    Vec3::new(
        QUAD_POSITION.x,
        QUAD_POSITION.y - QUAD_HEIGHT / 2.0,
        QUAD_POSITION.z + 0.05,
    )
}

fn main() {
    let session = ScriptedSession::new();
    let video = ScriptedVideo::new(VIDEO_SECONDS);
    let mut store = SceneStore::new();
    let mut visibility = VisibilityMap::new();
    let mut painter = RecordingPainter::new();
    let mut sink = StdoutSink;

    let mut manager = MediaLayerManager::new(session.clone());

    // A bad layer tag fails eagerly: the session is never asked for a
    // reference space.
    let err = block_on(manager.create_media_layer_from_tag(
        &mut store,
        video.clone(),
        "cylinder",
        LayerInit::default(),
        UiPanelConfig::with_default_controls(false),
        None,
    ))
    .expect_err("cylinder is not a supported layer kind");
    println!(
        "rejected: {err} (reference-space requests so far: {})",
        session.space_requests()
    );

    // First frame with a layer-capable session and a ready video: create the
    // layer pair once, guarded exactly like a render loop would.
    let mut has_media_layer = false;
    assert!(video.ready() && !has_media_layer);
    has_media_layer = true;

    let mut background = block_on(manager.create_media_layer(
        &mut store,
        video.clone(),
        LayerKind::Equirect,
        LayerInit {
            layout: StereoLayout::StereoTopBottom,
            ..LayerInit::default()
        },
        UiPanelConfig::with_default_controls(false),
        Some(ToolbarGroupConfig {
            position: Vec3::new(0.0, 1.0, -2.0),
            rotate_x: -core::f64::consts::FRAC_PI_4,
        }),
    ))
    .expect("equirect layer creation");

    let mut panel_layer = block_on(manager.create_media_layer(
        &mut store,
        video.clone(),
        LayerKind::Quad,
        LayerInit {
            layout: StereoLayout::StereoTopBottom,
            transform: Pose::new(QUAD_POSITION, Quat::IDENTITY),
            width: QUAD_WIDTH,
            height: QUAD_HEIGHT,
            ..LayerInit::default()
        },
        UiPanelConfig::with_default_controls(true),
        None,
    ))
    .expect("quad layer creation");

    {
        let mut tracer = Tracer::new(&mut sink);
        for media in [&background, &panel_layer] {
            tracer.layer_created(&LayerCreatedEvent {
                frame_index: 0,
                kind: media.layer().kind.tag(),
                width: media.layer().width,
                height: media.layer().height,
            });
        }
    }

    // Media layers sit in front of the projection layer in the render state.
    println!(
        "render-state layers: [{:?}, {:?}, projection]",
        background.layer().handle,
        panel_layer.layer().handle
    );

    // Toolbars start hidden; first trigger press shows them.
    visibility.register("equirect");
    visibility.register("quad");
    store.set_visible(background.toolbar_group(), false);
    store.set_visible(panel_layer.toolbar_group(), false);

    let mut transport = video.clone();
    transport.play();

    let group = toolbar_group_origin();
    let track_point = Vec3::new(group.x - 0.5, group.y + 0.3, group.z); // uv.x = 0.25
    let expand_point = panel_pixel(group, 296.0, 61.0);
    let handle_left = Vec3::new(group.x - QUAD_WIDTH / 2.0, group.y - 0.5, group.z);

    let controller = store.create_node(NodeKind::Anchor);

    for frame_index in 0..10_u64 {
        let _ = store.evaluate();
        let mut tracer = Tracer::new(&mut sink);

        match frame_index {
            // Trigger press with a hidden toolbar: show it.
            1 => {
                if !visibility.is_visible("quad") {
                    visibility.set("quad", true);
                    store.set_visible(panel_layer.toolbar_group(), true);
                    println!("frame 01: toolbar shown");
                }
            }
            // Held trigger on the progress track: seek to 25%.
            2 => {
                let hits = cast(&store, &panel_layer.objects(), &aim_at(track_point));
                if let Some(action) = panel_layer.update(&mut store, &hits) {
                    tracer.toolbar_action(&ToolbarActionEvent {
                        frame_index,
                        action,
                    });
                }
                println!(
                    "frame 02: seeked to {:.1}s of {:.0}s",
                    panel_layer.video().current_time(),
                    VIDEO_SECONDS
                );
            }
            // Press the expand button.
            3 => {
                let ray = aim_at(expand_point);
                let hits = cast(&store, &panel_layer.objects(), &ray);
                if let Some(action) = panel_layer.press(&store, &hits, ray.origin) {
                    tracer.toolbar_action(&ToolbarActionEvent {
                        frame_index,
                        action,
                    });
                }
            }
            // Engage the resize handle, ...
            4 => {
                let ray = aim_at(Vec3::new(group.x, group.y - 0.5, group.z));
                let hits = cast(&store, &panel_layer.objects(), &ray);
                let engaged = panel_layer.press(
                    &store,
                    &hits,
                    Vec3::new(handle_left.x - 0.3, handle_left.y, handle_left.z),
                );
                if let Some(action) = engaged {
                    tracer.toolbar_action(&ToolbarActionEvent {
                        frame_index,
                        action,
                    });
                }
            }
            // ...drag it for a couple of frames, then release.
            5 | 6 => {
                let pull = 0.25 * (frame_index - 4) as f64;
                panel_layer.drag_resize(Vec3::new(
                    handle_left.x - 0.3 + pull,
                    handle_left.y,
                    handle_left.z,
                ));
                println!(
                    "frame {:02}: fluid resize -> {:.3} x {:.3}",
                    frame_index,
                    panel_layer.layer().width,
                    panel_layer.layer().height
                );
            }
            7 => {
                panel_layer.release();
                // Grab the glass handle with the controller.
                store.set_transform(
                    controller,
                    Transform3d::from_translation(0.0, 1.3, -0.5),
                );
                let glass = *panel_layer.glass().expect("quad layer has a glass handle");
                glass.attach_to(&mut store, controller);
            }
            // Drag the controller half a meter left; the layer follows.
            8 => {
                store.set_transform(
                    controller,
                    Transform3d::from_translation(-0.5, 1.3, -0.5),
                );
            }
            9 => {
                let glass = *panel_layer.glass().expect("glass");
                glass.detach(&mut store);
                println!("frame 09: glass released back to the world frame");
            }
            _ => {}
        }

        drop(tracer);
        update_layers(&mut store, &mut background, &mut panel_layer, &mut painter);
        video.advance(1.0);
    }

    let at = panel_layer.layer().transform.position;
    println!(
        "layer settled at ({:+.2}, {:+.2}, {:+.2}) | final width {:.3}",
        at.x,
        at.y,
        at.z,
        panel_layer.layer().width
    );
    println!(
        "panel repaints: {} | playing: {}",
        painter.paints.len(),
        !panel_layer.video().paused()
    );

    // Ending the session fails any later creation; the one-shot guard keeps
    // the render loop from retrying.
    session.end();
    let err = block_on(manager.create_media_layer(
        &mut store,
        video,
        LayerKind::Quad,
        LayerInit::default(),
        UiPanelConfig::with_default_controls(true),
        None,
    ))
    .expect_err("creation races sessionend and loses");
    println!("after sessionend: {err} (guard still set: {has_media_layer})");
}

fn update_layers(
    store: &mut SceneStore,
    background: &mut MediaLayer<ScriptedVideo>,
    panel_layer: &mut MediaLayer<ScriptedVideo>,
    painter: &mut RecordingPainter,
) {
    background.update_on_render(store, painter);
    panel_layer.update_on_render(store, painter);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aim_at_hits_the_target_point() {
        let target = Vec3::new(-0.5, 1.0, -2.7);
        let ray = aim_at(target);
        let to_target = target - ray.origin;
        // The direction is the normalized vector toward the target.
        assert!(
            (ray.direction.dot(to_target) - to_target.length()).abs() < 1e-9,
            "direction points at the target"
        );
    }

    #[test]
    fn panel_pixel_maps_the_canvas_center() {
        let group = toolbar_group_origin();
        let center = panel_pixel(group, 256.0, 64.0);
        assert!((center.x - group.x).abs() < 1e-12);
        assert!((center.y - group.y).abs() < 1e-12);
    }
}
