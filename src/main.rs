use anyhow::Result;
use clap::Parser;
use dev_tools::cli::{Cli, Commands};
use dev_tools::commands;
use dev_tools::config::LoggerSettings;
use dev_tools::progress::ProgressConfig;
use std::time::Duration;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::FormatDuration { seconds } => {
            commands::print_duration(seconds, &mut std::io::stdout().lock())
        }
        Commands::Progress {
            count,
            delay_ms,
            prefix,
            suffix,
            fill,
            length,
            decimals,
            newline_frames,
            debug,
            timing,
        } => {
            let defaults = ProgressConfig::from_env();
            let (env_debug, env_timing) = (defaults.debug, defaults.timing);
            let config = defaults
                .prefix(prefix)
                .suffix(suffix)
                .fill(fill)
                .length(length)
                .decimals(decimals)
                .line_end(if newline_frames { "\r\n" } else { "\r" })
                .debug(env_debug || debug)
                .timing(env_timing || timing);
            commands::run_progress(
                count,
                Duration::from_millis(delay_ms),
                config,
                std::io::stdout(),
            )?;
            Ok(())
        }
        Commands::InitDb { path, table } => {
            let table = table.unwrap_or_else(|| LoggerSettings::from_env().table);
            commands::init_database(&path, &table)
        }
        Commands::Emit {
            level,
            script,
            message,
        } => {
            let _guard = commands::emit_event(level, script.as_deref(), &message)?;
            Ok(())
        }
    }
}
