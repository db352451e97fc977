mod commands;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quadview", about = "Split-view image comparison tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Defaults file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show image dimensions, rotation and sync factors
    Info(commands::info::InfoArgs),
    /// Compute the pane rectangles for a split point
    Split(commands::split::SplitArgs),
    /// Render a split-view composite of two to four images
    Compose(commands::compose::ComposeArgs),
    /// Measure a distance with a ruler
    Measure(commands::measure::MeasureArgs),
    /// Import an annotation file and report its contents
    Annotations(commands::annotations::AnnotationsArgs),
    /// Print or save the default settings as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let defaults = commands::load_defaults(cli.config.as_deref())?;

    match &cli.command {
        Commands::Info(args) => commands::info::run(args, &defaults),
        Commands::Split(args) => commands::split::run(args, &defaults),
        Commands::Compose(args) => commands::compose::run(args, &defaults),
        Commands::Measure(args) => commands::measure::run(args, &defaults),
        Commands::Annotations(args) => commands::annotations::run(args, &defaults),
        Commands::Config(args) => commands::config::run(args, &defaults),
    }
}
