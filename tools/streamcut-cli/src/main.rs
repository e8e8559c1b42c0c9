//! Streamcut CLI — Command-line interface for clipping streams into
//! vertical composites.
//!
//! Usage:
//!   streamcut cut <INPUT> <OUTPUT>   Select regions and render a clip
//!   streamcut probe <INPUT>          Show source video information
//!   streamcut check                  Check system capabilities

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use streamcut_clip_model::TargetAspect;

mod commands;
mod window;

#[derive(Parser)]
#[command(
    name = "streamcut",
    about = "Cut a webcam + gamefeed stream into a vertical clip",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select two regions on the first frame, then composite and remux
    Cut {
        /// Path to the source video
        input: PathBuf,

        /// Output file path
        output: PathBuf,

        /// Output dimensions as WIDTHxHEIGHT (defaults to the configured
        /// output size, or 720x1280)
        #[arg(long)]
        aspect: Option<TargetAspect>,

        /// Read selection events from a JSONL file instead of a window
        #[arg(long)]
        events: Option<PathBuf>,
    },

    /// Show source video information
    Probe {
        /// Path to the source video
        input: PathBuf,
    },

    /// Check system capabilities
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    streamcut_common::logging::init_logging(&streamcut_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    });

    let config = streamcut_common::AppConfig::load();

    match cli.command {
        Commands::Cut {
            input,
            output,
            aspect,
            events,
        } => commands::cut::run(input, output, aspect, events, &config),
        Commands::Probe { input } => commands::probe::run(input),
        Commands::Check => commands::check::run(),
    }
}
