use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file (created with defaults if missing)
    #[arg(short, long, default_value = crate::config::AppConfig::DEFAULT_PATH)]
    pub config: PathBuf,

    /// Override the open angle in degrees (0-180)
    #[arg(long)]
    pub open_angle: Option<i32>,

    /// Emit command batches as JSON lines instead of the console table
    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Drive the hands from a folder of still images
    Batch {
        /// Folder with png/jpg images and their `<image>.json` landmark files
        folder: PathBuf,

        /// Pause between images in milliseconds
        #[arg(long)]
        dwell_ms: Option<u64>,
    },

    /// Drive the hands from detection frames on stdin, one JSON object per line
    Stream,

    /// Print the validated pin table
    Bindings,
}
