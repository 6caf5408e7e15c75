//! Boolean feature flags read from the environment.
//!
//! Every flag is off unless its variable holds one of `true`, `1`, `t` or
//! `yes` (case-insensitive).

pub const DEBUG: &str = "DEBUG";
pub const TIMING: &str = "TIMING";
pub const LOGGER_DATABASE: &str = "LOGGER_DATABASE";
pub const LOGGER_DAY_SPECIFIC: &str = "LOGGER_DAY_SPECIFIC";
pub const LOGGER_SCRIPT_FOLDERS: &str = "LOGGER_SCRIPT_FOLDERS";

const TRUTHY: [&str; 4] = ["true", "1", "t", "yes"];

/// Parse a flag value.
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    TRUTHY.contains(&value.as_str())
}

/// Snapshot of the toolkit's environment flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    /// Gates progress rendering and raises log verbosity
    pub debug: bool,
    /// Gates elapsed/remaining time estimation
    pub timing: bool,
    /// Attaches the database log layer
    pub database_logging: bool,
    /// Sorts log files into per-day folders
    pub day_folders: bool,
    /// Sorts log files into per-script folders
    pub script_folders: bool,
}

impl Flags {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read flags through an arbitrary lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str| lookup(key).is_some_and(|v| is_truthy(&v));
        Self {
            debug: flag(DEBUG),
            timing: flag(TIMING),
            database_logging: flag(LOGGER_DATABASE),
            day_folders: flag(LOGGER_DAY_SPECIFIC),
            script_folders: flag(LOGGER_SCRIPT_FOLDERS),
        }
    }
}

pub fn is_debug_on() -> bool {
    Flags::from_env().debug
}

pub fn is_timing_on() -> bool {
    Flags::from_env().timing
}
