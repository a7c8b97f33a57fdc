//! CamGrab CLI — inspect capture devices and grab frames.
//!
//! Usage:
//!   camgrab devices            List capture devices
//!   camgrab formats <INDEX>    Show advertised formats and resolutions
//!   camgrab grab [INDEX]       Grab a frame and write it to disk

use std::path::PathBuf;

use camgrab_common::config::AppConfig;
use camgrab_common::logging::init_logging;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "camgrab",
    about = "Logical video-capture source: enumerate, negotiate, grab",
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
    /// List capture devices
    Devices,

    /// Show advertised formats and deduplicated resolutions for a device
    Formats {
        /// Zero-based device index
        index: u32,
    },

    /// Open a capture, pull frames, and write the last one to disk
    Grab {
        /// Zero-based device index
        #[arg(default_value = "0")]
        index: u32,

        /// Requested frame width (negotiation may pick a different one)
        #[arg(long)]
        width: Option<u32>,

        /// Requested frame height
        #[arg(long)]
        height: Option<u32>,

        /// Output pixel encoding: i420, rgb24, or rgba32
        #[arg(long)]
        encoding: Option<String>,

        /// Number of frames to pull before writing the last one
        #[arg(long, default_value = "1")]
        frames: u32,

        /// Output file (PPM for rgb24, raw bytes otherwise)
        #[arg(short, long, default_value = "frame.out")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load();
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    init_logging(&config.logging);

    match cli.command {
        Commands::Devices => commands::devices::run(),
        Commands::Formats { index } => commands::formats::run(index),
        Commands::Grab {
            index,
            width,
            height,
            encoding,
            frames,
            output,
        } => commands::grab::run(
            index,
            width,
            height,
            encoding,
            frames,
            output,
            &config.capture,
        ),
    }
}
