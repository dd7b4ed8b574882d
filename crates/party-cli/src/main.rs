//! Party CLI - run the zombie party from the command line.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "party")]
#[command(author, version, about = "Party - a zombie party simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default party.toml
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Run the simulation
    Run {
        /// Number of ticks to run (default: from party.toml)
        #[arg(short, long)]
        ticks: Option<u64>,

        /// Number of normals
        #[arg(short, long)]
        normals: Option<usize>,

        /// Number of zombies
        #[arg(short, long)]
        zombies: Option<usize>,

        /// Number of defenders
        #[arg(short, long)]
        defenders: Option<usize>,

        /// Random seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print the final snapshot as JSON on stdout
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Run { ticks, normals, zombies, defenders, seed, json } => {
            let overrides = commands::run::Overrides {
                ticks,
                normals,
                zombies,
                defenders,
                seed,
            };
            commands::run::run(overrides, json, cli.verbose)
        }
    }
}
