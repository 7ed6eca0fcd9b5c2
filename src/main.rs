//! Belief Diffusion Simulation
//!
//! Driver: loads the parameter file, runs the configured replicates
//! back-to-back, drains interaction/travel events into per-role JSONL sinks
//! at step boundaries, and writes the per-step belief snapshots when each
//! replicate finishes.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use infodemic::config::{Config, DEFAULT_CONFIG_PATH};
use infodemic::events::{EventSink, JsonlWriter};
use infodemic::{SimError, World};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "infodemic")]
#[command(about = "Belief diffusion under science, media framing, and propaganda")]
struct Args {
    /// Random seed for reproducibility; replicate r runs with seed + r
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Path to the parameter file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Directory for snapshot and event output
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Override the configured replicate count
    #[arg(long)]
    replicates: Option<u32>,

    /// Override the configured steps per replicate
    #[arg(long)]
    steps: Option<u64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut config = Config::load_or_default(&args.config);
    if let Some(replicates) = args.replicates {
        config.simulation.replicates = replicates;
    }
    if let Some(steps) = args.steps {
        config.simulation.steps = steps;
    }

    println!("Belief Diffusion Simulation");
    println!("===========================");
    println!("Seed: {}", args.seed);
    println!("Replicates: {}", config.simulation.replicates);
    println!("Steps per replicate: {}", config.simulation.steps);
    println!("Grid: {}x{}", config.grid.width, config.grid.height);
    println!("Scientists: {}", config.population.scientists);
    println!("Journalists: {}", config.population.journalists);
    println!("Propagandists: {}", config.population.propagandists);
    println!("Citizens: {}", config.population.citizens);
    println!("Policymakers: {}", config.population.policymakers);
    println!();

    if let Err(e) = run(&args, &config) {
        eprintln!("Simulation failed: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args, config: &Config) -> Result<(), SimError> {
    config.validate()?;
    std::fs::create_dir_all(&args.output_dir)?;

    let mut events = EventSink::open(&args.output_dir)?;
    let mut snapshots = JsonlWriter::create(args.output_dir.join("snapshots.jsonl"))?;

    println!("Starting simulation...");
    for replicate in 0..config.simulation.replicates {
        println!("Executing replicate {}", replicate);
        let seed = args.seed.wrapping_add(replicate as u64);
        let mut world = World::new(config, seed, replicate)?;

        for _ in 0..config.simulation.steps {
            world.step()?;
            let mut buffer = world.drain_events();
            events.consume(&mut buffer)?;
        }

        for row in world.take_snapshots() {
            snapshots.log(&row)?;
        }
        tracing::info!(
            replicate,
            steps = config.simulation.steps,
            "replicate complete"
        );
    }

    events.flush()?;
    snapshots.flush()?;

    println!();
    println!(
        "Finished. Wrote {} snapshot rows and {} event records to {}.",
        snapshots.record_count(),
        events.record_count(),
        args.output_dir.display()
    );
    Ok(())
}
