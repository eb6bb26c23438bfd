//! imuframe CLI: Convert IMU logs into per-frame Gyroflow protobuf records.
//!
//! Usage:
//!   imuframe convert <INPUT> [OPTIONS]   Convert a gcsv log to a framed .bin file
//!   imuframe inspect <PATH>              Summarize a framed .bin file

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "imuframe",
    about = "Convert gcsv IMU logs into length-prefixed Gyroflow protobuf frames",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    /// JSON configuration file; command-line flags override it
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a gcsv IMU log into framed protobuf records
    Convert {
        /// Path to the gcsv log (defaults to `conversion.input_path` from the config)
        input: Option<PathBuf>,

        /// Output file (defaults to INPUT with a .bin extension, else `conversion.output_path`)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Video frame rate (frames per second)
        #[arg(long)]
        fps: Option<f64>,

        /// IMU sample rate (samples per second)
        #[arg(long)]
        imu_rate: Option<f64>,

        /// Seconds per raw timestamp unit
        #[arg(long)]
        tscale: Option<f64>,

        /// Use the log's own `tscale` preamble entry when present
        #[arg(long)]
        tscale_from_log: bool,
    },

    /// Summarize the records in a framed protobuf file
    Inspect {
        /// Path to the framed file
        path: PathBuf,

        /// Print one line per frame
        #[arg(long)]
        frames: bool,

        /// Print frames as JSON lines
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let app_config = commands::load_app_config(cli.config.as_deref())?;

    // Initialize logging
    let logging = commands::resolve_logging(app_config.logging, cli.verbose, cli.log_json);
    imuframe_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Convert {
            input,
            output,
            fps,
            imu_rate,
            tscale,
            tscale_from_log,
        } => commands::convert::run(
            commands::convert::ConvertArgs {
                input,
                output,
                fps,
                imu_rate,
                tscale,
                tscale_from_log,
            },
            app_config.conversion,
        ),
        Commands::Inspect { path, frames, json } => commands::inspect::run(path, frames, json),
    }
}
