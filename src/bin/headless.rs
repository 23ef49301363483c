//! Batch runner: step a simulation for a fixed number of ticks without a
//! window and report what is left.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use bevy::math::DVec2;
use clap::Parser;
use stardust_core::SimConfig;
use stardust_sim::{SimCommand, Simulation};

#[derive(Parser, Debug)]
struct Args {
    /// YAML file with simulation settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Override the seed used for cloud generation
    #[arg(long)]
    seed: Option<u64>,
    /// Physics ticks to run
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,
    /// Log progress every N ticks (0 = never)
    #[arg(long, default_value_t = 60)]
    every: u64,
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
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    log::info!(
        "Running {} ticks: G {:.2}, speed {:.1}x, cloud {} x r{:.0}, seed {}",
        args.ticks,
        config.gravity,
        config.speed,
        config.cloud_count,
        config.cloud_radius,
        config.seed
    );

    let initial_cloud = config.initial_cloud;
    let mut sim = Simulation::new(config, DVec2::new(1280.0, 720.0));
    if !initial_cloud {
        sim.enqueue(SimCommand::SpawnCloud {
            center: Some(DVec2::ZERO),
        });
    }

    let mut merges = 0;
    let mut stars = 0;
    let mut start_mass = None;
    for t in 1..=args.ticks {
        let report = sim.tick();
        start_mass.get_or_insert_with(|| sim.store().total_mass());
        merges += report.merges;
        stars += report.ignited;
        if args.every > 0 && t % args.every == 0 {
            log::info!("tick {:>6}: {} bodies, {} merges so far", t, report.bodies, merges);
        }
    }

    let store = sim.store();
    let total_mass = store.total_mass();
    let momentum = store.total_momentum();
    println!("bodies:        {}", store.len());
    println!("total mass:    {:.6}", total_mass);
    if let Some(m0) = start_mass {
        println!("mass drift:    {:.3e}", total_mass - m0);
    }
    println!("momentum:      ({:.4}, {:.4})", momentum.x, momentum.y);
    println!("merges:        {}", merges);
    println!("stars born:    {}", stars);
    if let Some(heaviest) = store.heaviest() {
        println!(
            "heaviest:      {} mass {:.1} at ({:.1}, {:.1})",
            heaviest.id, heaviest.mass, heaviest.position.x, heaviest.position.y
        );
    }

    let broken = store.iter().filter(|b| !b.is_finite()).count();
    if broken > 0 {
        bail!("{} bodies have non-finite state", broken);
    }
    Ok(())
}
