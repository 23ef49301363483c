//! Protoplanetary cloud seeding

use std::f64::consts::TAU;

use glam::DVec2;
use rand::Rng;
use stardust_core::{BodyId, CLOUD_SPIN_SCALE, SimConfig, SpinLaw};

use crate::store::BodyStore;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudSpec {
    pub count: usize,
    pub radius: f64,
    pub spin: f64,
    pub spin_law: SpinLaw,
    pub center: DVec2,
    /// Mass of every seeded body
    pub mass: f64,
    pub trail_capacity: usize,
}

impl CloudSpec {
    /// Cloud of dust (mass 1) sized from the current config
    pub fn from_config(config: &SimConfig, center: DVec2) -> Self {
        Self {
            count: config.cloud_count as usize,
            radius: config.cloud_radius,
            spin: config.cloud_spin,
            spin_law: config.spin_law,
            center,
            mass: 1.0,
            trail_capacity: config.trail_max_len,
        }
    }

    /// Orbital speed given to a body `r` from the center
    pub fn tangential_speed(&self, r: f64) -> f64 {
        match self.spin_law {
            SpinLaw::Linear => self.spin * CLOUD_SPIN_SCALE * r,
            SpinLaw::Normalized if self.radius > 0.0 => self.spin * r / self.radius,
            SpinLaw::Normalized => 0.0,
        }
    }
}

/// Scatter `spec.count` bodies uniformly over the disk and set them rotating
/// counter-clockwise about its center.
pub fn spawn_cloud<R: Rng>(store: &mut BodyStore, spec: &CloudSpec, rng: &mut R) -> Vec<BodyId> {
    let mut ids = Vec::with_capacity(spec.count);

    for _ in 0..spec.count {
        let angle = rng.gen_range(0.0..TAU);
        // sqrt keeps the density uniform per unit area
        let r = spec.radius * rng.r#gen::<f64>().sqrt();
        let (sin, cos) = angle.sin_cos();

        let position = spec.center + DVec2::new(cos, sin) * r;
        let velocity = DVec2::new(-sin, cos) * spec.tangential_speed(r);

        match store.spawn(position, spec.mass, velocity, spec.trail_capacity) {
            Ok(id) => ids.push(id),
            Err(e) => {
                log::warn!("Cloud spawn rejected: {}", e);
                break;
            }
        }
    }

    log::info!(
        "Spawned cloud of {} bodies at ({:.0}, {:.0}), radius {:.0}",
        ids.len(),
        spec.center.x,
        spec.center.y,
        spec.radius
    );
    ids
}
