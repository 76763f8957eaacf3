//! Formica CLI - run ant colony foraging simulations from the terminal.

mod commands;
mod topology;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::topology::{Topology, WorldShape};

#[derive(Parser)]
#[command(name = "formica")]
#[command(author, version, about = "Formica - concurrent ant colony foraging", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a colony until the food target is met or every ant stops
    Run {
        #[command(flatten)]
        world: WorldArgs,

        /// Number of ants
        #[arg(short, long, default_value = "8")]
        ants: usize,

        /// Worst food pheromone an ant accepts before exploring
        #[arg(short, long, default_value = "10")]
        impatience: i64,

        /// How long an ant may wait for a full clearing, in milliseconds
        #[arg(short, long, default_value = "200")]
        disguise: u64,

        /// Base seed for reproducible route choices
        #[arg(long)]
        seed: Option<u64>,

        /// Cancel the colony after this many seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Write every recorded ant event to this file as JSON
        #[arg(long)]
        events: Option<PathBuf>,
    },

    /// Describe a generated world without running it
    Show {
        #[command(flatten)]
        world: WorldArgs,
    },
}

#[derive(Args)]
struct WorldArgs {
    /// World shape
    #[arg(short, long, value_enum, default_value = "grid")]
    topology: Topology,

    /// Clearings in a line or ring; side length of a grid
    #[arg(short, long, default_value = "4")]
    size: usize,

    /// Units of food per source
    #[arg(short, long, default_value = "5")]
    food: u64,

    /// Clearing capacity (0 = unbounded)
    #[arg(long, default_value = "3")]
    clearing_capacity: usize,

    /// Trail capacity (0 = unbounded)
    #[arg(long, default_value = "2")]
    trail_capacity: usize,
}

impl WorldArgs {
    fn shape(&self) -> WorldShape {
        WorldShape {
            topology: self.topology,
            size: self.size,
            food: self.food,
            clearing_capacity: self.clearing_capacity,
            trail_capacity: self.trail_capacity,
        }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "formica_cli=debug,formica_runtime=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_names(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            world,
            ants,
            impatience,
            disguise,
            seed,
            timeout,
            events,
        } => {
            let colony = formica::prelude::ColonyConfig {
                ant_count: ants,
                impatience,
                disguise_ms: disguise,
                seed,
            };
            commands::run::run(&world.shape(), &colony, timeout, events.as_deref(), cli.verbose)
        }
        Commands::Show { world } => commands::show::run(&world.shape()),
    }
}
