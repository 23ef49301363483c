use bevy::prelude::*;
use glam::DVec2;
use stardust_core::SimConfig;
use stardust_sim::{SimCommand, Simulation, SimulationPlugin};

const VIEWPORT: DVec2 = DVec2::new(1280.0, 720.0);

/// Cloud of 500 dust bodies, G = 2.5, one fixed 1/60 s step per tick
fn cloud_simulation() -> Simulation {
    let config = SimConfig {
        gravity: 2.5,
        speed: 1.0,
        cloud_count: 500,
        cloud_radius: 300.0,
        cloud_spin: 20.0,
        seed: 1234,
        ..SimConfig::default()
    };
    let mut sim = Simulation::new(config, VIEWPORT);
    sim.enqueue(SimCommand::SpawnCloud {
        center: Some(DVec2::ZERO),
    });
    sim
}

fn spawn(sim: &mut Simulation, x: f64, mass: f64) {
    sim.enqueue(SimCommand::SpawnBody {
        position: DVec2::new(x, 0.0),
        mass,
        velocity: DVec2::ZERO,
    });
}

// ==================================================================================
// End to end
// ==================================================================================

#[test]
fn cloud_run_conserves_mass_and_stays_finite() {
    let mut sim = cloud_simulation();
    sim.tick();
    assert!(sim.store().len() <= 500);

    let mut last = sim.store().len();
    for _ in 1..600 {
        let report = sim.tick();
        assert!(report.bodies <= last, "body count grew from {} to {}", last, report.bodies);
        last = report.bodies;
    }

    assert!((sim.store().total_mass() - 500.0).abs() < 1e-9);
    for b in sim.store().iter() {
        assert!(b.is_finite(), "non-finite body {:?}", b);
        assert!(b.velocity.length() <= sim.config().max_velocity + 1e-9);
        assert!(b.trail.len() <= sim.config().trail_max_len);
    }
}

#[test]
fn same_seed_same_outcome() {
    let mut a = cloud_simulation();
    let mut b = cloud_simulation();
    for _ in 0..60 {
        a.tick();
        b.tick();
    }
    assert_eq!(a.store().bodies(), b.store().bodies());
}

// ==================================================================================
// Follow continuity
// ==================================================================================

#[test]
fn followed_body_hands_over_to_merge_survivor() {
    let mut sim = Simulation::new(SimConfig::default(), VIEWPORT);
    sim.enqueue(SimCommand::SetPaused(true));
    spawn(&mut sim, 0.0, 1.0);
    spawn(&mut sim, 1.0, 5.0);
    sim.tick();

    let light = sim.store().bodies()[0].id;
    let heavy = sim.store().bodies()[1].id;
    sim.enqueue(SimCommand::Follow(light));
    sim.enqueue(SimCommand::SetPaused(false));
    let report = sim.tick();

    assert_eq!(report.merges, 1);
    assert_eq!(sim.camera().following(), Some(heavy));
    assert!(sim.store().contains(heavy));
    assert!(!sim.store().contains(light));
}

#[test]
fn camera_glides_toward_followed_body() {
    let mut sim = Simulation::new(SimConfig::default(), VIEWPORT);
    spawn(&mut sim, 500.0, 1.0);
    sim.tick();
    let id = sim.store().bodies()[0].id;
    sim.enqueue(SimCommand::Follow(id));

    sim.tick();
    let first = sim.camera().center.x;
    assert!(first > 0.0 && first < 500.0, "camera should not snap, got {first}");
    for _ in 0..200 {
        sim.tick();
    }
    assert!((sim.camera().center.x - 500.0).abs() < 1e-3);
}

// ==================================================================================
// Pause
// ==================================================================================

#[test]
fn pause_toggles_leave_bodies_untouched() {
    let mut sim = cloud_simulation();
    for _ in 0..30 {
        sim.tick();
    }
    sim.enqueue(SimCommand::SetPaused(true));
    sim.tick();
    let before = sim.store().bodies().to_vec();
    let ticks = sim.clock().ticks();

    for _ in 0..10 {
        for _ in 0..4 {
            sim.enqueue(SimCommand::TogglePause);
        }
        let report = sim.tick();
        assert!(!report.stepped);
    }

    assert!(sim.is_paused());
    assert_eq!(sim.store().bodies(), before.as_slice());
    assert_eq!(sim.clock().ticks(), ticks);
}

// ==================================================================================
// Plugin lifecycle
// ==================================================================================

#[test]
fn plugin_ticks_only_while_resource_exists() {
    let mut app = App::new();
    app.add_plugins(SimulationPlugin::default());

    let mut sim = Simulation::new(SimConfig::default(), VIEWPORT);
    sim.enqueue(SimCommand::SpawnBody {
        position: DVec2::ZERO,
        mass: 1.0,
        velocity: DVec2::new(10.0, 0.0),
    });
    app.insert_resource(sim);

    app.world_mut().run_schedule(FixedUpdate);
    app.world_mut().run_schedule(FixedUpdate);
    {
        let sim = app.world().resource::<Simulation>();
        assert_eq!(sim.clock().ticks(), 2);
        assert_eq!(sim.store().len(), 1);
    }

    // teardown: nothing may touch the removed instance afterwards
    let removed = app.world_mut().remove_resource::<Simulation>();
    assert!(removed.is_some());
    app.world_mut().run_schedule(FixedUpdate);
    assert!(!app.world().contains_resource::<Simulation>());
}

#[test]
fn plugin_configures_fixed_timestep() {
    let mut app = App::new();
    app.add_plugins(SimulationPlugin { timestep: 1.0 / 30.0 });
    let fixed = app.world().resource::<Time<Fixed>>();
    assert!((fixed.timestep().as_secs_f64() - 1.0 / 30.0).abs() < 1e-9);
}
