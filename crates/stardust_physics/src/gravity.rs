//! Pairwise Newtonian attraction and semi-implicit Euler integration.
//!
//! Direct O(n^2) summation over unordered pairs, with a distance window instead
//! of softening: pairs closer than `min_distance` or further than
//! `max_distance` are ignored.

use glam::DVec2;
use stardust_core::{Body, SimConfig};

use crate::store::BodyStore;

/// Per-step integration parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityParams {
    /// Gravity multiplier
    pub g: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub max_velocity: f64,
    /// Skip pairs whose disks already overlap
    pub skip_overlapping_pairs: bool,
    /// Record a trail point every N steps
    pub trail_sample_interval: u32,
}

impl GravityParams {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            g: config.gravity,
            min_distance: config.min_interaction_distance,
            max_distance: config.max_interaction_distance,
            max_velocity: config.max_velocity,
            skip_overlapping_pairs: config.skip_overlapping_pairs,
            trail_sample_interval: config.trail_sample_interval.max(1),
        }
    }
}

/// Force exerted on `a` by `b`, or `None` when the pair is outside the
/// interaction window.
pub fn pair_force(a: &Body, b: &Body, params: &GravityParams) -> Option<DVec2> {
    let r = b.position - a.position;
    let dist2 = r.length_squared();
    let dist = dist2.sqrt();

    if dist < params.min_distance || dist > params.max_distance {
        return None;
    }
    if params.skip_overlapping_pairs && dist < a.radius + b.radius {
        return None;
    }

    let magnitude = params.g * a.mass * b.mass / dist2;
    Some(r * (magnitude / dist))
}

/// Net force on every body, written into `out` (same order as `bodies`)
pub fn accumulate_forces(bodies: &[Body], params: &GravityParams, out: &mut [DVec2]) {
    for f in out.iter_mut() {
        *f = DVec2::ZERO;
    }

    let n = bodies.len();
    for i in 0..n {
        let bi = &bodies[i];
        for j in (i + 1)..n {
            if let Some(f) = pair_force(bi, &bodies[j], params) {
                // equal and opposite
                out[i] += f;
                out[j] -= f;
            }
        }
    }
}

/// Limit each component, then the magnitude, to `max`
pub fn clamp_velocity(v: DVec2, max: f64) -> DVec2 {
    let v = v.clamp(DVec2::splat(-max), DVec2::splat(max));
    let speed = v.length();
    if speed > max { v * (max / speed) } else { v }
}

/// Advance one body by `dt` under `force`.
///
/// A velocity axis whose update is not finite keeps its previous value for
/// this step. The speed clamp runs after that, before the position update.
pub fn step_body(body: &mut Body, force: DVec2, params: &GravityParams, dt: f64) {
    body.frame_count = body.frame_count.wrapping_add(1);
    if body.frame_count % params.trail_sample_interval == 0 {
        let here = body.position;
        body.push_trail(here);
    }

    let accel = force / body.mass;

    let vx = body.velocity.x + accel.x * dt;
    if vx.is_finite() {
        body.velocity.x = vx;
    }
    let vy = body.velocity.y + accel.y * dt;
    if vy.is_finite() {
        body.velocity.y = vy;
    }

    body.velocity = clamp_velocity(body.velocity, params.max_velocity);
    body.position += body.velocity * dt;
}

/// Advance every body in the store by one step of `dt` seconds.
///
/// All forces are computed from the positions at the start of the step before
/// any body moves.
pub fn integrate(store: &mut BodyStore, params: &GravityParams, dt: f64) {
    let n = store.len();
    if n == 0 {
        return;
    }

    let mut forces = vec![DVec2::ZERO; n];
    accumulate_forces(store.bodies(), params, &mut forces);

    for (body, force) in store.bodies_mut().iter_mut().zip(forces) {
        step_body(body, force, params, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> GravityParams {
        GravityParams::from_config(&SimConfig {
            gravity: 1.0,
            ..SimConfig::default()
        })
    }

    fn pair(dist: f64, m1: f64, m2: f64) -> BodyStore {
        let mut store = BodyStore::new();
        store
            .spawn(DVec2::new(-dist / 2.0, 0.0), m1, DVec2::ZERO, 10)
            .unwrap();
        store
            .spawn(DVec2::new(dist / 2.0, 0.0), m2, DVec2::ZERO, 10)
            .unwrap();
        store
    }

    fn forces(store: &BodyStore, p: &GravityParams) -> Vec<DVec2> {
        let mut out = vec![DVec2::ZERO; store.len()];
        accumulate_forces(store.bodies(), p, &mut out);
        out
    }

    #[test]
    fn test_newton_third_law() {
        let store = pair(10.0, 2.0, 3.0);
        let f = forces(&store, &params());
        assert!((f[0] + f[1]).length() < 1e-12);
        // G m1 m2 / r^2 = 6 / 100
        assert!((f[0].x - 0.06).abs() < 1e-12);
    }

    #[test]
    fn test_attraction_points_toward_other_body() {
        let store = pair(10.0, 1.0, 1.0);
        let f = forces(&store, &params());
        assert!(f[0].x > 0.0 && f[1].x < 0.0);
        assert_eq!(f[0].y, 0.0);
    }

    #[test]
    fn test_inverse_square() {
        let p = params();
        let near = forces(&pair(10.0, 1.0, 1.0), &p)[0].length();
        let far = forces(&pair(20.0, 1.0, 1.0), &p)[0].length();
        assert!((near / far - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_interaction_window() {
        let p = params();
        assert_eq!(forces(&pair(0.05, 1.0, 1.0), &p)[0], DVec2::ZERO);
        assert_eq!(forces(&pair(2500.0, 1.0, 1.0), &p)[0], DVec2::ZERO);
    }

    #[test]
    fn test_overlapping_pairs_can_be_skipped() {
        let p = GravityParams {
            skip_overlapping_pairs: true,
            ..params()
        };
        // radii are 2.0 each, centers 3.0 apart
        assert_eq!(forces(&pair(3.0, 1.0, 1.0), &p)[0], DVec2::ZERO);
        assert_ne!(forces(&pair(3.0, 1.0, 1.0), &params())[0], DVec2::ZERO);
    }

    #[test]
    fn test_velocity_then_position_update() {
        let mut store = pair(10.0, 1.0, 1.0);
        let p = params();
        integrate(&mut store, &p, 1.0);
        let a = &store.bodies()[0];
        // a = 1/100, v = 0.01, x = -5 + 0.01
        assert!((a.velocity.x - 0.01).abs() < 1e-12);
        assert!((a.position.x + 4.99).abs() < 1e-12);
    }

    #[test]
    fn test_extreme_encounter_is_speed_clamped() {
        let p = GravityParams {
            g: 2.5,
            ..params()
        };
        for dist in [0.01, 0.2, 1.0] {
            let mut store = pair(dist, 1000.0, 1000.0);
            for _ in 0..10 {
                integrate(&mut store, &p, 1.0 / 60.0 * 25.0);
                for b in store.iter() {
                    assert!(b.velocity.length() <= p.max_velocity + 1e-9);
                    assert!(b.is_finite());
                }
            }
        }
    }

    #[test]
    fn test_clamp_velocity_keeps_direction() {
        let v = clamp_velocity(DVec2::new(3000.0, 4000.0), 1000.0);
        assert!((v.length() - 1000.0).abs() < 1e-9);
        assert!(v.x > 0.0 && v.y > 0.0);
        assert_eq!(clamp_velocity(DVec2::new(3.0, 4.0), 1000.0), DVec2::new(3.0, 4.0));
    }

    #[test]
    fn test_non_finite_axis_is_discarded() {
        let mut store = pair(10.0, 1.0, 1.0);
        let p = params();
        let body = &mut store.bodies_mut()[0];
        body.velocity = DVec2::new(5.0, 7.0);
        step_body(body, DVec2::new(f64::NAN, 1.0), &p, 1.0);
        assert_eq!(body.velocity.x, 5.0);
        assert_eq!(body.velocity.y, 8.0);
        assert!(body.position.is_finite());
    }

    #[test]
    fn test_trail_sampled_every_interval() {
        let mut store = pair(10.0, 1.0, 1.0);
        let p = GravityParams {
            trail_sample_interval: 3,
            ..params()
        };
        for _ in 0..9 {
            integrate(&mut store, &p, 0.1);
        }
        assert_eq!(store.bodies()[0].trail.len(), 3);
        assert_eq!(store.bodies()[0].frame_count, 9);
    }

    #[test]
    fn test_empty_store_is_noop() {
        let mut store = BodyStore::new();
        integrate(&mut store, &params(), 1.0);
        assert!(store.is_empty());
    }
}
