//! Collision grid and merge resolver.
//!
//! Bodies are bucketed by center into a uniform grid. Overlapping pairs found in
//! neighboring cells are joined in a union-find, so every connected cluster of
//! touching bodies fuses into one body in a single pass.

use std::collections::{HashMap, HashSet};

use glam::DVec2;
use stardust_core::{Body, BodyId, OVERLAP_FACTOR, SimConfig, color_for_mass};

use crate::store::BodyStore;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionParams {
    /// Nominal grid cell edge
    pub cell_size: f64,
    /// Bodies touch when center distance < factor * (ri + rj)
    pub overlap_factor: f64,
    /// Mass at which a body becomes a star
    pub fusion_threshold: f64,
}

impl CollisionParams {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            cell_size: config.collision_cell_size,
            overlap_factor: OVERLAP_FACTOR,
            fusion_threshold: config.fusion_threshold,
        }
    }
}

/// Result of fusing one cluster
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    /// Body that absorbed the cluster (the heaviest contributor keeps its id)
    pub survivor: BodyId,
    /// Bodies removed from the store
    pub absorbed: Vec<BodyId>,
    /// Mass after the merge
    pub mass: f64,
    /// The merge pushed the survivor over the fusion threshold
    pub ignited: bool,
}

impl MergeOutcome {
    /// True when `id` went into this merge, as survivor or absorbed
    pub fn involves(&self, id: BodyId) -> bool {
        self.survivor == id || self.absorbed.contains(&id)
    }
}

/// Disjoint-set forest with path compression and union by size
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // compress
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Join the sets of `a` and `b`. Returns false if already joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
        true
    }

    /// Sets with more than one member, each sorted ascending, ordered by
    /// their smallest member
    pub fn groups(&mut self) -> Vec<Vec<usize>> {
        let n = self.parent.len();
        let mut by_root: HashMap<usize, Vec<usize>> = HashMap::new();
        for i in 0..n {
            let root = self.find(i);
            by_root.entry(root).or_default().push(i);
        }
        let mut groups: Vec<Vec<usize>> = by_root
            .into_values()
            .filter(|g| g.len() > 1)
            .collect();
        groups.sort_unstable_by_key(|g| g[0]);
        groups
    }
}

type Cell = (i64, i64);

// Half of the 8-neighborhood; the other half is visited from the opposite cell
const FORWARD_NEIGHBORS: [Cell; 4] = [(1, -1), (1, 0), (1, 1), (0, 1)];

/// Grid cell holding `p`. Far-out positions saturate to the edge cells.
fn cell_of(p: DVec2, cell_size: f64) -> Cell {
    (
        (p.x / cell_size).floor() as i64,
        (p.y / cell_size).floor() as i64,
    )
}

/// Cell edge actually used for a scan.
///
/// Widened past `cell_size` when the largest possible contact distance would
/// otherwise span more than one cell, so no overlap between big bodies is
/// missed.
pub fn effective_cell_size(bodies: &[Body], params: &CollisionParams) -> f64 {
    let max_radius = bodies.iter().map(|b| b.radius).fold(0.0, f64::max);
    params.cell_size.max(params.overlap_factor * 2.0 * max_radius)
}

pub fn overlaps(a: &Body, b: &Body, overlap_factor: f64) -> bool {
    let reach = overlap_factor * (a.radius + b.radius);
    a.position.distance_squared(b.position) < reach * reach
}

/// Union every overlapping pair among `bodies` (indices follow slice order)
pub fn find_clusters(bodies: &[Body], params: &CollisionParams) -> UnionFind {
    let mut uf = UnionFind::new(bodies.len());
    if bodies.len() < 2 {
        return uf;
    }

    let cell_size = effective_cell_size(bodies, params);
    let mut grid: HashMap<Cell, Vec<usize>> = HashMap::new();
    for (i, b) in bodies.iter().enumerate() {
        grid.entry(cell_of(b.position, cell_size)).or_default().push(i);
    }

    for (&(cx, cy), members) in &grid {
        for (k, &i) in members.iter().enumerate() {
            for &j in &members[k + 1..] {
                if overlaps(&bodies[i], &bodies[j], params.overlap_factor) {
                    uf.union(i, j);
                }
            }
        }

        for (dx, dy) in FORWARD_NEIGHBORS {
            // no neighbor past the edge of the cell range
            let (Some(nx), Some(ny)) = (cx.checked_add(dx), cy.checked_add(dy)) else {
                continue;
            };
            let Some(others) = grid.get(&(nx, ny)) else {
                continue;
            };
            for &i in members {
                for &j in others {
                    if overlaps(&bodies[i], &bodies[j], params.overlap_factor) {
                        uf.union(i, j);
                    }
                }
            }
        }
    }

    uf
}

/// Fuse the bodies at `group` into the heaviest one, in place.
///
/// Mass and momentum are summed, position is the mass-weighted centroid and
/// the radius conserves total disk area. The heaviest body keeps its id,
/// trail and frame counter, and its trail gains the merged position.
fn fuse(
    bodies: &mut [Body],
    group: &[usize],
    params: &CollisionParams,
    now: f64,
) -> MergeOutcome {
    // first index wins ties
    let mut heaviest = group[0];
    for &i in &group[1..] {
        if bodies[i].mass > bodies[heaviest].mass {
            heaviest = i;
        }
    }

    let mut mass = 0.0;
    let mut momentum = DVec2::ZERO;
    let mut weighted_position = DVec2::ZERO;
    let mut area = 0.0;
    for &i in group {
        let b = &bodies[i];
        mass += b.mass;
        momentum += b.momentum();
        weighted_position += b.position * b.mass;
        area += b.radius * b.radius;
    }

    let absorbed = group
        .iter()
        .filter(|&&i| i != heaviest)
        .map(|&i| bodies[i].id)
        .collect();

    let survivor = &mut bodies[heaviest];
    let crossed = survivor.mass < params.fusion_threshold && mass >= params.fusion_threshold;

    survivor.mass = mass;
    survivor.velocity = momentum / mass;
    survivor.position = weighted_position / mass;
    survivor.radius = area.sqrt();
    survivor.color = color_for_mass(mass);
    let here = survivor.position;
    survivor.push_trail(here);
    if crossed {
        survivor.birth_time = Some(now);
    }

    MergeOutcome {
        survivor: survivor.id,
        absorbed,
        mass,
        ignited: crossed,
    }
}

/// Detect every overlapping cluster and fuse each into a single body.
///
/// The scan reads positions as they stand after integration; fusion and
/// removal happen only after the scan completes. `now` is the clock time
/// recorded as a star's birth.
pub fn resolve_collisions(
    store: &mut BodyStore,
    params: &CollisionParams,
    now: f64,
) -> Vec<MergeOutcome> {
    let groups = find_clusters(store.bodies(), params).groups();
    if groups.is_empty() {
        return Vec::new();
    }

    let mut outcomes = Vec::with_capacity(groups.len());
    for group in &groups {
        let outcome = fuse(store.bodies_mut(), group, params, now);
        if outcome.ignited {
            log::info!("Star born: {} at mass {:.1}", outcome.survivor, outcome.mass);
        }
        outcomes.push(outcome);
    }

    let gone: HashSet<BodyId> = outcomes
        .iter()
        .flat_map(|o| o.absorbed.iter().copied())
        .collect();
    let removed = store.remove(&gone);
    log::debug!("Merged {} clusters, {} bodies absorbed", outcomes.len(), removed);

    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> CollisionParams {
        CollisionParams::from_config(&SimConfig::default())
    }

    fn spawn(store: &mut BodyStore, x: f64, y: f64, mass: f64, vx: f64) -> BodyId {
        store
            .spawn(DVec2::new(x, y), mass, DVec2::new(vx, 0.0), 50)
            .unwrap()
    }

    #[test]
    fn test_union_find_chains() {
        let mut uf = UnionFind::new(5);
        uf.union(0, 1);
        uf.union(3, 4);
        uf.union(1, 4);
        assert_eq!(uf.find(0), uf.find(3));
        assert_ne!(uf.find(2), uf.find(0));
        assert_eq!(uf.groups(), vec![vec![0, 1, 3, 4]]);
        assert!(!uf.union(0, 4));
    }

    #[test]
    fn test_merge_conserves_mass_and_momentum() {
        let mut store = BodyStore::new();
        spawn(&mut store, 0.0, 0.0, 9.0, 10.0);
        spawn(&mut store, 1.0, 0.0, 9.0, -10.0);

        let outcomes = resolve_collisions(&mut store, &params(), 0.0);
        assert_eq!(outcomes.len(), 1);
        assert_eq!(store.len(), 1);

        let b = &store.bodies()[0];
        assert!((b.mass - 18.0).abs() < 1e-12);
        assert!(b.velocity.length() < 1e-12);
        assert!((b.position.x - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_merge_conserves_area() {
        let mut store = BodyStore::new();
        // mass 2.25 gives radius 3
        spawn(&mut store, 0.0, 0.0, 2.25, 0.0);
        spawn(&mut store, 2.0, 0.0, 2.25, 0.0);
        resolve_collisions(&mut store, &params(), 0.0);

        let r = store.bodies()[0].radius;
        assert!((r - 18.0_f64.sqrt()).abs() < 1e-9, "got {r}");
    }

    #[test]
    fn test_chain_fuses_once() {
        let mut store = BodyStore::new();
        // radius 2 each: A-B and B-C touch, A-C are 6 apart
        spawn(&mut store, 0.0, 0.0, 1.0, 0.0);
        spawn(&mut store, 3.0, 0.0, 1.0, 0.0);
        spawn(&mut store, 6.0, 0.0, 1.0, 0.0);
        assert!(!overlaps(&store.bodies()[0], &store.bodies()[2], OVERLAP_FACTOR));

        let outcomes = resolve_collisions(&mut store, &params(), 0.0);
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].absorbed.len(), 2);
        assert_eq!(store.len(), 1);
        assert!((store.total_mass() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_heaviest_keeps_identity_and_trail() {
        let mut store = BodyStore::new();
        let light = spawn(&mut store, 0.0, 0.0, 1.0, 0.0);
        let heavy = spawn(&mut store, 1.0, 0.0, 5.0, 0.0);
        store.get_mut(heavy).unwrap().push_trail(DVec2::new(-7.0, 0.0));
        store.get_mut(light).unwrap().push_trail(DVec2::new(99.0, 0.0));

        let outcomes = resolve_collisions(&mut store, &params(), 0.0);
        assert_eq!(outcomes[0].survivor, heavy);
        assert_eq!(outcomes[0].absorbed, vec![light]);
        assert!(outcomes[0].involves(light));

        let b = store.get(heavy).unwrap();
        assert_eq!(b.trail.len(), 2);
        assert_eq!(b.trail[0], DVec2::new(-7.0, 0.0));
        assert_eq!(b.trail[1], b.position);
        assert!(store.get(light).is_none());
    }

    #[test]
    fn test_crossing_fusion_threshold_records_birth() {
        let mut store = BodyStore::new();
        spawn(&mut store, 0.0, 0.0, 200.0, 0.0);
        spawn(&mut store, 1.0, 0.0, 100.0, 0.0);

        let outcomes = resolve_collisions(&mut store, &params(), 12.5);
        assert!(outcomes[0].ignited);
        assert_eq!(store.bodies()[0].birth_time, Some(12.5));
    }

    #[test]
    fn test_existing_star_is_not_reborn() {
        let mut store = BodyStore::new();
        spawn(&mut store, 0.0, 0.0, 300.0, 0.0);
        spawn(&mut store, 1.0, 0.0, 10.0, 0.0);

        let outcomes = resolve_collisions(&mut store, &params(), 3.0);
        assert!(!outcomes[0].ignited);
        assert_eq!(store.bodies()[0].birth_time, None);
    }

    #[test]
    fn test_separated_bodies_do_not_merge() {
        let mut store = BodyStore::new();
        spawn(&mut store, 0.0, 0.0, 1.0, 0.0);
        // radii 2 + 2, 0.95 * 4 = 3.8
        spawn(&mut store, 3.9, 0.0, 1.0, 0.0);
        spawn(&mut store, 500.0, 500.0, 1.0, 0.0);

        assert!(resolve_collisions(&mut store, &params(), 0.0).is_empty());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_neighbor_cells_are_scanned() {
        let mut store = BodyStore::new();
        // straddle the x = 100 and y = 100 cell borders
        spawn(&mut store, 99.5, 99.5, 1.0, 0.0);
        spawn(&mut store, 100.5, 100.5, 1.0, 0.0);
        spawn(&mut store, 199.5, 0.5, 1.0, 0.0);
        spawn(&mut store, 200.5, -0.5, 1.0, 0.0);

        let outcomes = resolve_collisions(&mut store, &params(), 0.0);
        assert_eq!(outcomes.len(), 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_big_bodies_spanning_cells_still_merge() {
        let mut store = BodyStore::new();
        // radius 80 each, centers 150 apart: two cells away at cell size 100
        spawn(&mut store, 0.0, 0.0, 1600.0, 0.0);
        spawn(&mut store, 150.0, 0.0, 1600.0, 0.0);
        assert!(effective_cell_size(store.bodies(), &params()) > 150.0);

        resolve_collisions(&mut store, &params(), 0.0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_many_bodies_conserve_mass() {
        let mut store = BodyStore::new();
        for i in 0..20 {
            for j in 0..20 {
                spawn(&mut store, i as f64 * 3.0, j as f64 * 3.0, 1.0, 0.0);
            }
        }
        resolve_collisions(&mut store, &params(), 0.0);
        assert_eq!(store.len(), 1);
        assert!((store.total_mass() - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_far_away_bodies_do_not_break_the_grid() {
        let mut store = BodyStore::new();
        spawn(&mut store, 0.0, 0.0, 1.0, 0.0);
        spawn(&mut store, 1.0, 0.0, 1.0, 0.0);
        spawn(&mut store, 1e300, 0.0, 1.0, 0.0);
        spawn(&mut store, 0.0, -1e300, 1.0, 0.0);
        spawn(&mut store, -1e300, 1e300, 1.0, 0.0);

        let outcomes = resolve_collisions(&mut store, &params(), 0.0);
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].absorbed.len(), 1);
        assert_eq!(store.len(), 4);
        assert!((store.total_mass() - 5.0).abs() < 1e-12);
    }
}
