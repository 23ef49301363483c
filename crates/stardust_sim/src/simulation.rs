use std::collections::VecDeque;

use bevy::prelude::Resource;
use glam::DVec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use stardust_core::{BodyId, SimConfig, SpawnError};
use stardust_physics::{
    BodyStore, CloudSpec, CollisionParams, GravityParams, integrate, resolve_collisions,
    spawn_cloud,
};

use crate::camera::Camera;
use crate::clock::SimClock;
use crate::command::SimCommand;

/// What one call to [`Simulation::tick`] did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Commands drained from the queue
    pub commands: usize,
    /// Physics advanced (false while paused)
    pub stepped: bool,
    /// Clusters fused this tick
    pub merges: usize,
    /// Bodies removed by those merges
    pub absorbed: usize,
    /// Bodies that became stars
    pub ignited: usize,
    /// Live bodies after the tick
    pub bodies: usize,
    /// Performance mode flipped to this value
    pub performance_mode: Option<bool>,
}

/// One simulation instance: bodies, camera, clock and settings, tracked as a
/// Bevy Resource. Physics is the only writer of the body store; input talks to
/// it through the command queue.
#[derive(Resource)]
pub struct Simulation {
    store: BodyStore,
    camera: Camera,
    clock: SimClock,
    config: SimConfig,
    queue: VecDeque<SimCommand>,
    rng: ChaCha8Rng,
    /// Whether the initial cloud has been considered
    seeded: bool,
}

impl Simulation {
    pub fn new(config: SimConfig, viewport: DVec2) -> Self {
        let config = config.clamped();
        Self {
            store: BodyStore::new(),
            camera: Camera::from_config(&config, viewport),
            clock: SimClock::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            queue: VecDeque::new(),
            seeded: false,
        }
    }

    pub fn store(&self) -> &BodyStore {
        &self.store
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// For frame-rate bookkeeping by the paint loop
    pub fn clock_mut(&mut self) -> &mut SimClock {
        &mut self.clock
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn is_paused(&self) -> bool {
        self.clock.paused
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn enqueue(&mut self, command: SimCommand) {
        self.queue.push_back(command);
    }

    pub fn spawn_cloud(&mut self) {
        self.enqueue(SimCommand::SpawnCloud { center: None });
    }

    pub fn clear(&mut self) {
        self.enqueue(SimCommand::Clear);
    }

    pub fn reset_view(&mut self) {
        self.enqueue(SimCommand::ResetView);
    }

    /// Run one fixed tick: apply queued commands, then (unless paused)
    /// integrate, resolve collisions and move the camera, in that order.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();

        if !self.seeded {
            self.seeded = true;
            if self.config.initial_cloud {
                self.apply(SimCommand::SpawnCloud { center: None });
            }
        }

        while let Some(command) = self.queue.pop_front() {
            self.apply(command);
            report.commands += 1;
        }

        if !self.clock.paused {
            self.step(&mut report);
        }

        report.bodies = self.store.len();
        report
    }

    fn step(&mut self, report: &mut TickReport) {
        let gravity = GravityParams::from_config(&self.config);
        integrate(&mut self.store, &gravity, self.config.step_dt());

        let bodies = self.store.len();
        report.performance_mode = self.clock.advance(self.config.fixed_timestep, bodies);
        if let Some(on) = report.performance_mode {
            log::info!(
                "Performance mode {} ({} bodies, fps {:?})",
                if on { "on" } else { "off" },
                self.store.len(),
                self.clock.fps()
            );
        }

        if self.clock.collisions_due() {
            let params = CollisionParams::from_config(&self.config);
            let outcomes = resolve_collisions(&mut self.store, &params, self.clock.elapsed());
            self.camera.retarget(&outcomes);

            report.merges = outcomes.len();
            report.absorbed = outcomes.iter().map(|o| o.absorbed.len()).sum();
            report.ignited = outcomes.iter().filter(|o| o.ignited).count();
        }

        self.camera.update_follow(&self.store);
        report.stepped = true;
    }

    fn spawn_body(
        &mut self,
        position: DVec2,
        mass: f64,
        velocity: DVec2,
    ) -> Result<BodyId, SpawnError> {
        self.store
            .spawn(position, mass, velocity, self.config.trail_max_len)
    }

    fn apply(&mut self, command: SimCommand) {
        match command {
            SimCommand::SpawnBody {
                position,
                mass,
                velocity,
            } => {
                if let Err(e) = self.spawn_body(position, mass, velocity) {
                    log::warn!("Spawn rejected: {}", e);
                }
            }
            SimCommand::SpawnAtScreen(screen) => {
                let position = self.camera.screen_to_world(screen);
                if let Err(e) = self.spawn_body(position, self.config.spawn_mass, DVec2::ZERO) {
                    log::warn!("Spawn rejected: {}", e);
                }
            }
            SimCommand::SpawnCloud { center } => {
                let center = center.unwrap_or(self.camera.center);
                let spec = CloudSpec::from_config(&self.config, center);
                spawn_cloud(&mut self.store, &spec, &mut self.rng);
            }
            SimCommand::Clear => {
                log::info!("Cleared {} bodies", self.store.len());
                self.store.clear();
                self.camera.unfollow();
            }
            SimCommand::ResetView => self.camera.reset(),
            SimCommand::Pan(delta) => self.camera.pan(delta),
            SimCommand::Zoom { factor, anchor } => self.camera.zoom_by(factor, anchor),
            SimCommand::Click(screen) => match self.camera.closest_body_at(&self.store, screen) {
                Some(id) => {
                    log::debug!("Following {}", id);
                    self.camera.follow(id);
                }
                None => self.camera.unfollow(),
            },
            SimCommand::Follow(id) => {
                if self.store.contains(id) {
                    self.camera.follow(id);
                }
            }
            SimCommand::Unfollow => self.camera.unfollow(),
            SimCommand::TogglePause => self.clock.toggle_pause(),
            SimCommand::SetPaused(paused) => self.clock.paused = paused,
            SimCommand::SetGravity(g) => self.reconfigure(|c| c.gravity = g),
            SimCommand::AdjustGravity(dg) => self.reconfigure(|c| c.gravity += dg),
            SimCommand::SetSpeed(s) => self.reconfigure(|c| c.speed = s),
            SimCommand::ScaleSpeed(f) => self.reconfigure(|c| c.speed *= f),
            SimCommand::SetCloud { count, radius, spin } => self.reconfigure(|c| {
                c.cloud_count = count;
                c.cloud_radius = radius;
                c.cloud_spin = spin;
            }),
            SimCommand::Resize(viewport) => self.camera.resize(viewport),
        }
    }

    /// Edit the config and pull it back into range
    fn reconfigure(&mut self, edit: impl FnOnce(&mut SimConfig)) {
        edit(&mut self.config);
        self.config = self.config.clamped();
    }
}
