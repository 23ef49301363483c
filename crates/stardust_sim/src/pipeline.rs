use bevy::prelude::*;
use stardust_core::FIXED_TIMESTEP;

use super::simulation::Simulation;

/// Bevy plugin for the physics pipeline.
///
/// Physics runs in `FixedUpdate` at its own cadence, painting happens in
/// `Update`. Every system is gated on the [`Simulation`] resource, so removing
/// the resource tears the instance down and nothing keeps ticking.
pub struct SimulationPlugin {
    /// Seconds between physics ticks
    pub timestep: f64,
}

impl Default for SimulationPlugin {
    fn default() -> Self {
        Self {
            timestep: FIXED_TIMESTEP,
        }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_seconds(self.timestep))
            .add_systems(FixedUpdate, simulation_tick.run_if(resource_exists::<Simulation>))
            .add_systems(Update, measure_frame_rate.run_if(resource_exists::<Simulation>));
    }
}

/// One physics tick
fn simulation_tick(mut sim: ResMut<Simulation>) {
    let report = sim.tick();
    if report.ignited > 0 {
        info!("{} new star(s), {} bodies left", report.ignited, report.bodies);
    }
}

fn measure_frame_rate(mut sim: ResMut<Simulation>, time: Res<Time>) {
    sim.clock_mut().record_frame(time.delta_secs_f64());
}
