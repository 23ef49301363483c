use std::collections::VecDeque;
use std::fmt;

use glam::DVec2;

use crate::color::{Rgb, color_for_mass};
use crate::constants::RADIUS_SCALE;

/// Stable handle to a body.
///
/// `slot` indexes the store's slot table, `generation` is bumped every time the
/// slot is vacated, so a handle is never valid for two different bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId {
    pub slot: u32,
    pub generation: u32,
}

impl BodyId {
    pub const fn new(slot: u32, generation: u32) -> Self {
        Self { slot, generation }
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.slot, self.generation)
    }
}

/// A simulated point mass with extent
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: BodyId,
    /// World position
    pub position: DVec2,
    /// World units per second
    pub velocity: DVec2,
    /// Always > 0
    pub mass: f64,
    /// RADIUS_SCALE * sqrt(mass)
    pub radius: f64,
    /// Derived from mass, see [`color_for_mass`]
    pub color: Rgb,
    /// Past positions, oldest first
    pub trail: VecDeque<DVec2>,
    /// Upper bound for `trail.len()`
    pub trail_capacity: usize,
    /// Physics ticks this body (or its heaviest ancestor) has lived through
    pub frame_count: u32,
    /// Clock time at which this body first crossed the fusion threshold
    pub birth_time: Option<f64>,
}

impl Body {
    pub fn new(
        id: BodyId,
        position: DVec2,
        velocity: DVec2,
        mass: f64,
        trail_capacity: usize,
    ) -> Self {
        Self {
            id,
            position,
            velocity,
            mass,
            radius: radius_for_mass(mass),
            color: color_for_mass(mass),
            trail: VecDeque::with_capacity(trail_capacity),
            trail_capacity,
            frame_count: 0,
            birth_time: None,
        }
    }

    pub fn momentum(&self) -> DVec2 {
        self.velocity * self.mass
    }

    pub fn is_star(&self, fusion_threshold: f64) -> bool {
        self.mass >= fusion_threshold
    }

    /// True when `point` lies inside the body's disk (boundary included)
    pub fn contains(&self, point: DVec2) -> bool {
        self.position.distance(point) <= self.radius
    }

    /// Append a trail point, evicting the oldest ones past capacity
    pub fn push_trail(&mut self, point: DVec2) {
        self.trail.push_back(point);
        while self.trail.len() > self.trail_capacity {
            self.trail.pop_front();
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.mass.is_finite()
    }
}

/// Radius of a body of the given mass
pub fn radius_for_mass(mass: f64) -> f64 {
    RADIUS_SCALE * mass.sqrt()
}
