use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use bevy::math::DVec2;
use bevy::prelude::*;
use clap::Parser;
use stardust_core::SimConfig;
use stardust_render::StardustRenderPlugin;
use stardust_sim::{Simulation, SimulationPlugin};

/// Interactive 2D gravity sandbox
#[derive(Parser, Debug)]
struct Args {
    /// YAML file with simulation settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Override the seed used for cloud generation
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 1600.0)]
    width: f32,
    #[arg(long, default_value_t = 900.0)]
    height: f32,
}

fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(Some(path.as_path()))
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    let viewport = DVec2::new(args.width as f64, args.height as f64);

    let exit = App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Stardust - Gravity Sandbox".into(),
                resolution: (args.width, args.height).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(SimulationPlugin {
            timestep: config.fixed_timestep,
        })
        .insert_resource(Simulation::new(config, viewport))
        .add_plugins(StardustRenderPlugin)
        .run();

    if let AppExit::Error(code) = exit {
        bail!("app exited with code {}", code);
    }
    Ok(())
}
