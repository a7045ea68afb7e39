// vidtag-cli/src/cli.rs
//
// Defines the command-line argument structure using clap.

use clap::Parser;
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "vidtag: tag video filenames with duration and resolution",
    long_about = "Scans a folder for video files, probes each one with ffprobe and appends \
                  a `_{N}min_{W}x{H}` tag to the file name. Runs as a preview unless \
                  --apply is given."
)]
pub struct Cli {
    /// Folder to scan recursively
    #[arg(required = true, value_name = "FOLDER")]
    pub folder: PathBuf,

    /// Rename files instead of only showing the plan
    #[arg(long, default_value_t = false)]
    pub apply: bool,

    /// Video extensions to include (e.g. --ext mp4 mkv, or --ext mp4,mkv)
    #[arg(long = "ext", value_name = "EXT", num_args = 1.., value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Number of parallel ffprobe workers (0 = one per CPU)
    #[arg(short, long, value_name = "N", default_value_t = 0, env = "VIDTAG_JOBS")]
    pub jobs: usize,

    /// Minutes a legacy duration label may differ from the probed duration
    #[arg(long, value_name = "MIN", default_value_t = 0)]
    pub tolerance: u32,

    /// Seconds a single ffprobe call may run before the file is skipped
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub probe_timeout: u64,

    /// Emit newline-delimited JSON instead of a table
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
