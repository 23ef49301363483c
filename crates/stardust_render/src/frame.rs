//! Per-frame drawing decisions, kept free of ECS plumbing.
//!
//! Everything here works in simulation screen space (origin top-left, y down);
//! [`to_bevy`] converts to the 2D camera's centered, y-up space at the end.

use bevy::math::{DVec2, Vec2};
use bevy::prelude::Color;
use rand::Rng;
use stardust_core::{Body, Rgb, star_glow_multiplier};
use stardust_sim::Camera;

/// Off-screen margin before a body is culled
pub const CULL_MARGIN_PX: f64 = 200.0;
/// Trails are hidden at or below this zoom
pub const TRAIL_MIN_ZOOM: f64 = 0.5;
/// Consecutive trail points closer than this (both axes) are skipped
pub const TRAIL_MIN_STEP_PX: f64 = 2.0;
/// In performance mode bodies smaller than this draw as squares
pub const TINY_BODY_PX: f64 = 2.0;
/// In performance mode only stars larger than this glow
pub const PERF_GLOW_MIN_PX: f64 = 10.0;
pub const GLOW_RADIUS_FACTOR: f64 = 3.0;
pub const SHADING_MIN_PX: f64 = 3.0;
pub const FOLLOW_RING_MIN_PX: f64 = 5.0;
/// Tracking blue, sRGB 33/150/243
pub const FOLLOW_RING_RGB: [u8; 3] = [33, 150, 243];
/// Stars per square world unit of the visible area
pub const STARFIELD_DENSITY: f64 = 0.0002;
pub const STARFIELD_MAX: usize = 2000;
/// HUD stays fully visible this long after the pointer last moved
pub const HUD_IDLE_SECS: f64 = 3.0;
pub const HUD_FADE_SECS: f64 = 0.5;

pub fn to_bevy(screen: DVec2, viewport: DVec2) -> Vec2 {
    Vec2::new(
        (screen.x - viewport.x / 2.0) as f32,
        (viewport.y / 2.0 - screen.y) as f32,
    )
}

pub fn to_color(rgb: Rgb) -> Color {
    Color::srgb_u8(rgb.r, rgb.g, rgb.b)
}

/// Body disk intersects the viewport widened by [`CULL_MARGIN_PX`]
pub fn is_visible(camera: &Camera, body: &Body) -> bool {
    let half = camera.visible_half_extent(CULL_MARGIN_PX);
    let d = (body.position - camera.center).abs();
    d.x - body.radius <= half.x && d.y - body.radius <= half.y
}

/// How a body's core is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyShape {
    /// Filled circle of the given pixel radius
    Disk(f64),
    /// Fixed 2 px square, for dust in performance mode
    Square,
}

/// Everything needed to draw one body this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyVisual {
    pub screen: DVec2,
    pub radius_px: f64,
    pub shape: BodyShape,
    /// Star glow: outer radius in pixels and peak alpha
    pub glow: Option<(f64, f64)>,
    /// Highlight on planets
    pub shaded: bool,
    /// Pulsing ring around the followed body
    pub ring: bool,
}

/// Pulse of a star's glow at `seconds` of wall time
pub fn glow_pulse(seconds: f64) -> f64 {
    0.5 + (seconds * 0.3).sin() * 0.1
}

/// Follow ring around a body of `radius_px` at `seconds` of wall time:
/// pixel radius and stroke alpha. Both pulse, the radius twice as fast.
pub fn follow_ring(radius_px: f64, seconds: f64) -> (f64, f32) {
    let t = seconds * 5.0;
    let alpha = (0.7 + t.sin() * 0.3) * 0.8;
    (radius_px + 8.0 + (t * 2.0).sin() * 3.0, alpha as f32)
}

/// Decide how to draw `body`. `now` is the simulation clock used for the
/// birth flare; `wall` drives the pulse.
pub fn body_visual(
    body: &Body,
    camera: &Camera,
    performance_mode: bool,
    fusion_threshold: f64,
    followed: bool,
    now: f64,
    wall: f64,
) -> Option<BodyVisual> {
    let screen = camera.world_to_screen(body.position);
    let radius_px = body.radius * camera.zoom();
    if !(screen.is_finite() && radius_px.is_finite() && radius_px > 0.0) {
        return None;
    }

    if performance_mode && radius_px < TINY_BODY_PX {
        return Some(BodyVisual {
            screen,
            radius_px,
            shape: BodyShape::Square,
            glow: None,
            shaded: false,
            ring: false,
        });
    }

    let star = body.is_star(fusion_threshold);
    let glow = (star && (!performance_mode || radius_px > PERF_GLOW_MIN_PX)).then(|| {
        let alpha = glow_pulse(wall) * star_glow_multiplier(body.birth_time, now);
        (radius_px * GLOW_RADIUS_FACTOR, alpha)
    });

    Some(BodyVisual {
        screen,
        radius_px,
        shape: BodyShape::Disk(radius_px),
        glow,
        shaded: !star && !performance_mode && radius_px > SHADING_MIN_PX,
        ring: followed && radius_px > FOLLOW_RING_MIN_PX,
    })
}

pub fn trails_enabled(zoom: f64, performance_mode: bool) -> bool {
    !performance_mode && zoom > TRAIL_MIN_ZOOM
}

/// Screen-space polyline for a trail, ending at the body's current position.
/// Points within [`TRAIL_MIN_STEP_PX`] of the last kept one are dropped.
pub fn trail_polyline<'a>(
    trail: impl IntoIterator<Item = &'a DVec2>,
    head: DVec2,
    camera: &Camera,
) -> Vec<DVec2> {
    let mut out: Vec<DVec2> = Vec::new();
    let points = trail
        .into_iter()
        .copied()
        .chain(std::iter::once(head))
        .map(|p| camera.world_to_screen(p));
    for p in points {
        if let Some(last) = out.last() {
            let d = (p - *last).abs();
            if d.x < TRAIL_MIN_STEP_PX && d.y < TRAIL_MIN_STEP_PX {
                continue;
            }
        }
        out.push(p);
    }
    out
}

/// Twinkling background stars for one frame: screen position and brightness
pub fn starfield<R: Rng>(
    camera: &Camera,
    performance_mode: bool,
    rng: &mut R,
) -> Vec<(DVec2, f32)> {
    let density = if performance_mode {
        STARFIELD_DENSITY / 2.0
    } else {
        STARFIELD_DENSITY
    };
    let visible = camera.viewport / camera.zoom();
    let count = ((visible.x * visible.y * density) as usize).min(STARFIELD_MAX);

    (0..count)
        .map(|_| {
            let p = DVec2::new(
                rng.gen_range(0.0..camera.viewport.x.max(1.0)),
                rng.gen_range(0.0..camera.viewport.y.max(1.0)),
            );
            (p, rng.r#gen::<f32>() * 0.5)
        })
        .collect()
}

/// HUD opacity after `idle` seconds without pointer motion
pub fn hud_alpha(idle: f64) -> f32 {
    if idle <= HUD_IDLE_SECS {
        1.0
    } else {
        (1.0 - (idle - HUD_IDLE_SECS) / HUD_FADE_SECS).clamp(0.0, 1.0) as f32
    }
}
