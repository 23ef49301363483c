//! Authoritative body storage for one simulation instance.
//!
//! Bodies live in a dense `Vec` (iteration order = spawn order, which render and
//! pair scans rely on) and are addressed from outside through generation-tagged
//! [`BodyId`]s. A slot table maps each id to its dense index in O(1). Removal is
//! mark-and-compact: vacate the slots, `retain` the survivors in order, then
//! re-point the slot table.

use std::collections::HashSet;

use glam::DVec2;
use stardust_core::{Body, BodyId, SpawnError};

#[derive(Debug, Clone, Copy)]
struct Slot {
    generation: u32,
    dense: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct BodyStore {
    bodies: Vec<Body>,
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl BodyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Add one body and return its handle.
    ///
    /// Rejects non-positive or non-finite mass and non-finite kinematics.
    pub fn spawn(
        &mut self,
        position: DVec2,
        mass: f64,
        velocity: DVec2,
        trail_capacity: usize,
    ) -> Result<BodyId, SpawnError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SpawnError::InvalidMass(mass));
        }
        if !(position.is_finite() && velocity.is_finite()) {
            return Err(SpawnError::NonFinite);
        }

        let id = self.allocate_id();
        self.slots[id.slot as usize].dense = Some(self.bodies.len());
        self.bodies
            .push(Body::new(id, position, velocity, mass, trail_capacity));
        Ok(id)
    }

    fn allocate_id(&mut self) -> BodyId {
        match self.free.pop() {
            Some(slot) => BodyId::new(slot, self.slots[slot as usize].generation),
            None => {
                let slot = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    dense: None,
                });
                BodyId::new(slot, 0)
            }
        }
    }

    /// Dense index of a live body
    pub fn index_of(&self, id: BodyId) -> Option<usize> {
        let slot = self.slots.get(id.slot as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.dense
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.index_of(id).map(|i| &self.bodies[i])
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        let i = self.index_of(id)?;
        Some(&mut self.bodies[i])
    }

    /// All live bodies in spawn order
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// In-place access for the integrator and resolver. Callers must not
    /// rewrite `Body::id`.
    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.bodies.iter().map(|b| b.id)
    }

    /// Delete the given bodies, keeping survivors in their relative order.
    /// Stale or unknown ids are ignored. Returns how many bodies were removed.
    pub fn remove(&mut self, ids: &HashSet<BodyId>) -> usize {
        let mut removed = 0;
        for &id in ids {
            if self.index_of(id).is_some() {
                self.vacate(id.slot);
                removed += 1;
            }
        }
        if removed == 0 {
            return 0;
        }

        self.bodies.retain(|b| !ids.contains(&b.id));
        for (i, b) in self.bodies.iter().enumerate() {
            self.slots[b.id.slot as usize].dense = Some(i);
        }
        removed
    }

    /// Remove every body. Outstanding ids become permanently stale.
    pub fn clear(&mut self) {
        let slots: Vec<u32> = self.bodies.iter().map(|b| b.id.slot).collect();
        for slot in slots {
            self.vacate(slot);
        }
        self.bodies.clear();
    }

    fn vacate(&mut self, slot: u32) {
        let entry = &mut self.slots[slot as usize];
        entry.dense = None;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(slot);
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    pub fn total_momentum(&self) -> DVec2 {
        self.bodies.iter().map(Body::momentum).sum()
    }

    /// Heaviest body, first one wins ties
    pub fn heaviest(&self) -> Option<&Body> {
        self.bodies
            .iter()
            .fold(None, |best: Option<&Body>, b| match best {
                Some(top) if top.mass >= b.mass => Some(top),
                _ => Some(b),
            })
    }
}
