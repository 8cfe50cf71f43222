mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pixdiff", about = "Image comparison tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show image file metadata
    Info(commands::info::InfoArgs),
    /// Compute a pixel-difference heat map between two images
    Diff(commands::diff::DiffArgs),
    /// Sample the color of a single pixel
    Sample(commands::sample::SampleArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => {
            debug!("running info command");
            commands::info::run(args)
        }
        Commands::Diff(args) => {
            debug!("running diff command");
            commands::diff::run(args)
        }
        Commands::Sample(args) => {
            debug!("running sample command");
            commands::sample::run(args)
        }
    }
}
