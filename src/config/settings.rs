//! Logger and database settings resolved from the environment.

use super::flags::Flags;
use crate::errors::{LoggingError, LoggingResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_ROOT: &str = "./logs";
pub const DEFAULT_CONF_PATH: &str = "logging.toml";
pub const DEFAULT_DEV_CONF_PATH: &str = "logging_dev.toml";
pub const DEFAULT_TABLE: &str = "transfer_data_log";

/// Where and how the logging pipeline writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerSettings {
    pub flags: Flags,
    /// Root folder for dated log folders (`LOGGER_PATH`)
    pub root: PathBuf,
    /// Logging configuration file, the dev variant when debug is on
    pub conf_path: PathBuf,
    /// Table the database layer inserts into (`LOGGER_DB_TABLE`)
    pub table: String,
    /// Script identifier from `SCRIPT_NAME`, if set
    pub script_name: Option<String>,
    pub database: DatabaseSettings,
}

impl LoggerSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Settings from `lookup`, falling back to the entries of an env file.
    ///
    /// Variables already present in `lookup` win over the file, the way
    /// [`load_dotenv`] leaves existing process variables untouched.
    pub fn from_env_file<F>(path: &Path, lookup: F) -> LoggingResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = read_env_file(path)?;
        Ok(Self::from_lookup(|key| {
            lookup(key).or_else(|| file.get(key).cloned())
        }))
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flags = Flags::from_lookup(&lookup);
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let conf_path = if flags.debug {
            non_empty("LOGGER_CONF_DEV_PATH").unwrap_or_else(|| DEFAULT_DEV_CONF_PATH.into())
        } else {
            non_empty("LOGGER_CONF_PATH").unwrap_or_else(|| DEFAULT_CONF_PATH.into())
        };

        Self {
            flags,
            root: non_empty("LOGGER_PATH")
                .unwrap_or_else(|| DEFAULT_LOG_ROOT.into())
                .into(),
            conf_path: conf_path.into(),
            table: non_empty("LOGGER_DB_TABLE").unwrap_or_else(|| DEFAULT_TABLE.into()),
            script_name: non_empty("SCRIPT_NAME"),
            database: DatabaseSettings::from_lookup(&lookup),
        }
    }

    /// Script identifier: the explicit name, then `SCRIPT_NAME`, then the
    /// base name of the current directory.
    pub fn script_identifier(&self, explicit: Option<&str>) -> String {
        explicit
            .map(str::to_string)
            .or_else(|| self.script_name.clone())
            .unwrap_or_else(current_dir_name)
    }
}

/// Connection parameters for the log database.
///
/// The server is the directory holding the SQLite file and the database is
/// its file name. The driver, when given, must name SQLite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub server: Option<String>,
    pub database: Option<String>,
    pub driver: Option<String>,
}

impl DatabaseSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            server: non_empty("LOGGER_DB_SERVER"),
            database: non_empty("LOGGER_DB_NAME"),
            driver: non_empty("LOGGER_SQL_DRIVER"),
        }
    }

    /// Settings pointing straight at a database file.
    pub fn for_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self {
            server: path.parent().map(|p| p.display().to_string()),
            database: path.file_name().map(|n| n.to_string_lossy().into_owned()),
            driver: None,
        }
    }

    /// Full path of the database file, if a database name is configured.
    pub fn database_path(&self) -> Option<PathBuf> {
        let name = self.database.as_deref()?;
        Some(match self.server.as_deref() {
            Some(server) => Path::new(server).join(name),
            None => PathBuf::from(name),
        })
    }
}

/// Load `.env` from the working directory or its parents into the process
/// environment. A missing file is not an error.
pub fn load_dotenv() {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            eprintln!("Warning: {}. Ignoring .env file.", err);
        }
    }
}

/// Parse an env file into a map without touching the process environment.
pub fn read_env_file(path: &Path) -> LoggingResult<HashMap<String, String>> {
    let env_error = |err: dotenvy::Error| LoggingError::EnvFile {
        path: path.to_path_buf(),
        reason: err.to_string(),
    };
    dotenvy::from_path_iter(path)
        .map_err(env_error)?
        .map(|item| item.map_err(env_error))
        .collect()
}

/// Base name of the working directory, used when no script name is known.
pub fn current_dir_name() -> String {
    std::env::current_dir()
        .ok()
        .and_then(|dir| dir.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_default()
}
