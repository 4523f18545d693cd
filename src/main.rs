//! LiDAR Rover entry point
//!
//! Headless runner: builds a simulation, ticks it for a fixed number of
//! frames and logs what the rover did. Drawing is left to other frontends.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use lidar_rover::hud;
use lidar_rover::settings::{SimConfig, TuningCommand};
use lidar_rover::sim::{
    Arena, LayoutParams, MotionOutcome, Simulation, World, random_obstacles, reference_obstacles,
};

#[derive(Parser)]
#[command(name = "lidar-rover")]
#[command(about = "Run the LiDAR rover avoidance simulation headless")]
struct Args {
    /// JSON config file (defaults reproduce the reference arena)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// Use a seeded random obstacle layout instead of the reference one
    #[arg(long)]
    seed: Option<u64>,

    /// Print one JSON line per tick (pose, avoidance, sectors, outcome)
    #[arg(long)]
    dump: bool,

    /// Tuning keys applied before the run (W/S speed, A/D turn rate, Q/E threshold)
    #[arg(long, default_value = "")]
    tune: String,

    /// Log HUD status lines every N ticks (0 = never)
    #[arg(long, default_value_t = 600)]
    status_every: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SimConfig::default(),
    };

    let arena = Arena::new(config.arena_width, config.arena_height);
    let obstacles = match args.seed {
        Some(seed) => {
            let params = LayoutParams {
                keep_out: glam::Vec2::new(config.start_x, config.start_y),
                ..LayoutParams::default()
            };
            random_obstacles(seed, &arena, &params)
        }
        None => reference_obstacles(),
    };

    // The runner plays the input handler: it owns clamping
    let mut tunables = config.tunables.clamped();
    for key in args.tune.chars() {
        match TuningCommand::from_key(key) {
            Some(command) => {
                tunables.apply(command);
                log::debug!("Tuning {}: {:?}", command.as_str(), tunables);
            }
            None => log::warn!("Ignoring unknown tuning key {:?}", key),
        }
    }
    let mut sim = Simulation::new(&config, World::new(arena, obstacles))
        .context("invalid simulation config")?;

    log::info!("LiDAR Rover starting ({} ticks)", args.ticks);

    let mut turns = 0u64;
    let mut blocked = 0u64;
    for _ in 0..args.ticks {
        let frame = sim.tick(&tunables);
        match frame.outcome {
            MotionOutcome::TurnStarted => turns += 1,
            MotionOutcome::Blocked => blocked += 1,
            MotionOutcome::Turned | MotionOutcome::Advanced => {}
        }

        if args.dump {
            let line = serde_json::json!({
                "tick": frame.tick,
                "pose": frame.pose,
                "avoidance": frame.avoidance,
                "sectors": frame.sectors,
                "outcome": frame.outcome,
            });
            println!("{line}");
        }

        if args.status_every > 0 && frame.tick % args.status_every == 0 {
            for line in hud::status_lines(&frame, &tunables) {
                log::info!("[{}] {}", frame.tick, line);
            }
        }
    }

    log::info!(
        "Done: {} ticks, {} avoidance turns, {} blocked moves, final pose ({:.1}, {:.1}) @ {:.1}°",
        sim.ticks,
        turns,
        blocked,
        sim.pose.position.x,
        sim.pose.position.y,
        sim.pose.heading_deg
    );

    Ok(())
}
