use bevy::color::{Alpha, Mix};
use bevy::math::Isometry2d;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use stardust_sim::Simulation;

use super::frame::{self, BodyShape};

const GLOW_RINGS: u32 = 4;
const TRAIL_ALPHA: f32 = 0.3;

/// Paint-side state: starfield randomness and a frame counter
#[derive(Resource)]
pub struct OverlayState {
    rng: ChaCha8Rng,
    frame: u64,
}

impl Default for OverlayState {
    fn default() -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(0x5747),
            frame: 0,
        }
    }
}

/// Twinkling background, thinned and drawn every third frame in performance mode
pub fn draw_starfield(mut gizmos: Gizmos, sim: Res<Simulation>, mut state: ResMut<OverlayState>) {
    state.frame = state.frame.wrapping_add(1);
    let performance_mode = sim.clock().performance_mode();
    if performance_mode && state.frame % 3 != 0 {
        return;
    }

    let camera = sim.camera();
    for (p, brightness) in frame::starfield(camera, performance_mode, &mut state.rng) {
        gizmos.rect_2d(
            Isometry2d::from_translation(frame::to_bevy(p, camera.viewport)),
            Vec2::ONE,
            Color::srgba(1.0, 1.0, 1.0, brightness),
        );
    }
}

/// Trails, star glow, planet highlights, follow ring and performance-mode dust
pub fn draw_body_overlays(mut gizmos: Gizmos, sim: Res<Simulation>, time: Res<Time>) {
    let camera = sim.camera();
    let clock = sim.clock();
    let performance_mode = clock.performance_mode();
    let fusion_threshold = sim.config().fusion_threshold;
    let followed = camera.following();
    let show_trails = frame::trails_enabled(camera.zoom(), performance_mode);
    let wall = time.elapsed_secs_f64();

    for body in sim.store().iter() {
        if !frame::is_visible(camera, body) {
            continue;
        }
        let Some(visual) = frame::body_visual(
            body,
            camera,
            performance_mode,
            fusion_threshold,
            followed == Some(body.id),
            clock.elapsed(),
            wall,
        ) else {
            continue;
        };

        let color = frame::to_color(body.color);
        let center = frame::to_bevy(visual.screen, camera.viewport);
        let radius = visual.radius_px as f32;

        if show_trails && body.trail.len() > 1 {
            let line = frame::trail_polyline(body.trail.iter(), body.position, camera);
            gizmos.linestrip_2d(
                line.into_iter().map(|p| frame::to_bevy(p, camera.viewport)),
                color.with_alpha(TRAIL_ALPHA),
            );
        }

        if visual.shape == BodyShape::Square {
            gizmos.rect_2d(Isometry2d::from_translation(center), Vec2::splat(2.0), color);
            continue;
        }

        if let Some((glow_radius, alpha)) = visual.glow {
            draw_glow(&mut gizmos, center, radius, glow_radius as f32, alpha as f32);
        }

        if visual.shaded {
            // light from the upper left
            let offset = Vec2::new(-0.3, 0.3) * radius;
            gizmos.circle_2d(
                Isometry2d::from_translation(center + offset),
                radius * 0.4,
                Color::srgba(1.0, 1.0, 1.0, 0.15),
            );
        }

        if visual.ring {
            let (ring_radius, ring_alpha) = frame::follow_ring(visual.radius_px, wall);
            let [r, g, b] = frame::FOLLOW_RING_RGB;
            gizmos.circle_2d(
                Isometry2d::from_translation(center),
                ring_radius as f32,
                Color::srgb_u8(r, g, b).with_alpha(ring_alpha),
            );
        }
    }
}

/// Concentric rings fading from warm white at the surface to gold at the rim
fn draw_glow(gizmos: &mut Gizmos, center: Vec2, radius: f32, glow_radius: f32, alpha: f32) {
    let inner = Srgba::new(1.0, 1.0, 200.0 / 255.0, 1.0);
    let outer = Srgba::new(1.0, 215.0 / 255.0, 0.0, 1.0);
    for k in 1..=GLOW_RINGS {
        let t = k as f32 / GLOW_RINGS as f32;
        let ring_alpha = (alpha * (1.0 - t * 0.8)).clamp(0.0, 1.0);
        let ring_color = inner.mix(&outer, t).with_alpha(ring_alpha);
        gizmos.circle_2d(
            Isometry2d::from_translation(center),
            radius + (glow_radius - radius) * t,
            ring_color,
        );
    }
}
