//! Dated log folder layout.
//!
//! ```text
//! {LOGGER_PATH}[/{script}]/{year}/{month}.{MonthName}[/{day}]/{%Y-%m-%dT%H%M%S}.log
//! logs/provisioning/2026/1.January/7/2026-01-07T093015.log
//! ```

use crate::config::LoggerSettings;
use chrono::{DateTime, Datelike, TimeZone};
use std::path::PathBuf;

/// Folder that receives today's log files.
///
/// The script segment is only added when script folders are enabled and a
/// script name is known (explicit, else `SCRIPT_NAME`).
pub fn log_folder<Tz>(settings: &LoggerSettings, script: Option<&str>, now: &DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut folder = settings.root.clone();

    if settings.flags.script_folders {
        if let Some(script) = script.or(settings.script_name.as_deref()) {
            folder.push(script);
        }
    }

    folder.push(now.year().to_string());
    folder.push(format!("{}.{}", now.month(), now.format("%B")));

    if settings.flags.day_folders {
        folder.push(now.day().to_string());
    }
    folder
}

/// Log file name for a run started at `now`.
pub fn log_file_name<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("{}.log", now.format("%Y-%m-%dT%H%M%S"))
}

pub fn log_file_path<Tz>(settings: &LoggerSettings, script: Option<&str>, now: &DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    log_folder(settings, script, now).join(log_file_name(now))
}
