use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dev-tools")]
#[command(about = "Duration formatting, console progress bars and resilient logging", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Format a number of seconds as a compact human-readable duration
    FormatDuration {
        /// Seconds to format (fractions allowed)
        #[arg(allow_negative_numbers = true)]
        seconds: f64,
    },

    /// Run a demo loop with a progress bar
    Progress {
        /// Number of items to iterate over
        #[arg(long, default_value = "20")]
        count: usize,

        /// Simulated work per item, in milliseconds
        #[arg(long = "delay-ms", default_value = "50")]
        delay_ms: u64,

        /// Text before the bar
        #[arg(long, default_value = "")]
        prefix: String,

        /// Text after the percentage
        #[arg(long, default_value = "")]
        suffix: String,

        /// Fill character
        #[arg(long, default_value = "█")]
        fill: String,

        /// Bar width in characters
        #[arg(long, default_value = "50")]
        length: usize,

        /// Decimals shown in the percentage
        #[arg(long, default_value = "1")]
        decimals: usize,

        /// End every frame with "\r\n" instead of "\r"
        #[arg(long = "newline-frames")]
        newline_frames: bool,

        /// Render even when DEBUG is off
        #[arg(long)]
        debug: bool,

        /// Show elapsed and remaining time even when TIMING is off
        #[arg(long)]
        timing: bool,
    },

    /// Create the log table in a SQLite database file
    InitDb {
        /// Database file, created if missing
        #[arg(long)]
        path: PathBuf,

        /// Table name (defaults to LOGGER_DB_TABLE, then transfer_data_log)
        #[arg(long)]
        table: Option<String>,
    },

    /// Initialize logging and emit one event through every configured layer
    Emit {
        /// Level of the event
        #[arg(long, value_enum, default_value = "info")]
        level: EmitLevel,

        /// Script identifier (defaults to SCRIPT_NAME)
        #[arg(long)]
        script: Option<String>,

        /// Message to log
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EmitLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}
