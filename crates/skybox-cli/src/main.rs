//! SkyBox CLI - Command-line interface for rig recording analysis.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "skybox")]
#[command(author, version, about = "SkyBox recording analysis CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a recording file and print its structure and test properties
    Inspect(commands::inspect::InspectArgs),

    /// Compute the single-sided spectrum of one channel
    Spectrum(commands::spectrum::SpectrumArgs),

    /// Remove channel offsets measured over a quiet window
    Tare(commands::tare::TareArgs),

    /// Estimate the time shift between two channels
    Sync(commands::sync::SyncArgs),

    /// Show or export a rig's channel catalog
    Catalog(commands::catalog::CatalogArgs),
}

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so stdout stays clean for reports
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect(args) => commands::inspect::run(args),
        Commands::Spectrum(args) => commands::spectrum::run(args),
        Commands::Tare(args) => commands::tare::run(args),
        Commands::Sync(args) => commands::sync::run(args),
        Commands::Catalog(args) => commands::catalog::run(args),
    }
}
