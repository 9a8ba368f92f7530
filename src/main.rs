//! QUARRY - CLI Entry Point
//!
//! Predator-prey ecosystem simulator.

use clap::{Parser, Subcommand};
use quarry::{benchmark, Config, World};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "quarry")]
#[command(version)]
#[command(about = "Predator-prey ecosystem simulator on a bounded 2D grid")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a new simulation
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Number of ticks to simulate
        #[arg(short, long, default_value = "10000")]
        ticks: u64,

        /// Output directory for statistics
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Grid width override
        #[arg(long)]
        width: Option<u16>,

        /// Grid height override
        #[arg(long)]
        height: Option<u16>,

        /// Prey per cell, converted to an initial count
        #[arg(long)]
        prey_density: Option<f32>,

        /// Predators per cell, converted to an initial count
        #[arg(long)]
        predator_density: Option<f32>,

        /// Quiet mode (minimal output)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of ticks
        #[arg(short, long, default_value = "1000")]
        ticks: u64,

        /// Square grid side length
        #[arg(short, long, default_value = "64")]
        size: u16,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            ticks,
            output,
            seed,
            width,
            height,
            prey_density,
            predator_density,
            quiet,
        } => run_simulation(RunArgs {
            config_path: config,
            ticks,
            output,
            seed,
            width,
            height,
            prey_density,
            predator_density,
            quiet,
        }),

        Commands::Benchmark { ticks, size } => run_benchmark(ticks, size),

        Commands::Init { output } => generate_config(output),
    }
}

struct RunArgs {
    config_path: PathBuf,
    ticks: u64,
    output: PathBuf,
    seed: Option<u64>,
    width: Option<u16>,
    height: Option<u16>,
    prey_density: Option<f32>,
    predator_density: Option<f32>,
    quiet: bool,
}

fn run_simulation(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Load or create config
    let mut config = if args.config_path.exists() {
        println!("Loading config from: {:?}", args.config_path);
        Config::from_file(&args.config_path)?
    } else {
        println!("Using default configuration");
        Config::default()
    };

    // Command-line overrides
    if let Some(width) = args.width {
        config.world.width = width;
    }
    if let Some(height) = args.height {
        config.world.height = height;
    }
    let cells = config.world.width as f32 * config.world.height as f32;
    if let Some(density) = args.prey_density {
        config.agents.initial_prey = (cells * density) as usize;
    }
    if let Some(density) = args.predator_density {
        config.agents.initial_predators = (cells * density) as usize;
    }

    // Create output directory
    std::fs::create_dir_all(&args.output)?;

    // Create world
    let mut world = if let Some(s) = args.seed {
        println!("Using seed: {}", s);
        World::new_with_seed(config, s)?
    } else {
        World::new(config)?
    };

    println!("Starting simulation");
    println!(
        "  Grid: {}x{}",
        world.config.world.width, world.config.world.height
    );
    println!(
        "  Prey: {}  Predators: {}  Spawners: {}",
        world.prey_count(),
        world.predator_count(),
        world.spawner_count()
    );
    println!("  Ticks: {}", args.ticks);
    println!();

    let start = Instant::now();
    let stats_interval = world.config.logging.stats_interval;

    for _ in 0..args.ticks {
        if !world.step() {
            println!("\nSpecies extinct at tick {}", world.tick);
            break;
        }

        // Stats output
        if !args.quiet && world.tick % stats_interval == 0 {
            if let Some(sample) = world.history().latest() {
                println!("{}", sample.summary());
            }
        }
    }

    let elapsed = start.elapsed();
    let ticks_per_sec = world.tick as f64 / elapsed.as_secs_f64();

    println!();
    println!("=== Simulation Complete ===");
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Ticks: {}", world.tick);
    println!("Speed: {:.1} ticks/s", ticks_per_sec);
    println!(
        "Final population: {} prey, {} predators",
        world.prey_count(),
        world.predator_count()
    );
    println!("Explored cells: {}", world.visibility().explored().len());

    // Save statistics table
    let csv_path = args.output.join("stats.csv");
    world.history().export_csv(&csv_path)?;
    println!("Statistics: {:?}", csv_path);

    let json_path = args.output.join("stats_history.json");
    world.history().save_json(&json_path)?;
    println!("Stats history: {:?}", json_path);

    Ok(())
}

fn run_benchmark(ticks: u64, size: u16) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== QUARRY Benchmark ===");
    println!("Ticks: {}", ticks);
    println!("Grid: {}x{}", size, size);
    println!();

    let result = benchmark(ticks, size)?;
    println!("{}", result);

    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}
