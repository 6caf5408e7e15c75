//! TOML logging configuration file.
//!
//! When the configured file exists it fully describes the pipeline and the
//! `LOGGER_DATABASE` flag is ignored. A minimal file:
//!
//! ```toml
//! level = "debug"
//!
//! [console]
//! level = "info"
//! format = "simple"
//!
//! [file]
//! level = "debug"
//! format = "complex"
//!
//! [database]
//! enabled = true
//! table = "nightly_import_log"
//! ```

use crate::errors::{LoggingError, LoggingResult};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing_subscriber::filter::LevelFilter;

/// Line layout of a text handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineFormat {
    /// `LEVEL | target | message`
    #[default]
    Simple,
    /// `LEVEL | time | target | span | message`
    Complex,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct HandlerConfig {
    pub level: Option<String>,
    #[serde(default)]
    pub format: Option<LineFormat>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct DatabaseHandlerConfig {
    #[serde(default)]
    pub enabled: bool,
    pub level: Option<String>,
    pub table: Option<String>,
}

/// Contents of a logging configuration file. Missing sections fall back to
/// the defaults for the current debug mode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct LoggingFileConfig {
    pub level: Option<String>,
    #[serde(default)]
    pub console: HandlerConfig,
    #[serde(default)]
    pub file: HandlerConfig,
    #[serde(default)]
    pub database: DatabaseHandlerConfig,
}

/// Fully resolved handler levels and formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub root_level: LevelFilter,
    pub console_level: LevelFilter,
    pub console_format: LineFormat,
    pub file_level: LevelFilter,
    pub file_format: LineFormat,
    pub database: Option<DatabasePipelineConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabasePipelineConfig {
    pub level: LevelFilter,
    pub table: String,
}

impl PipelineConfig {
    /// Built-in layout: quiet console, verbose file, database on request.
    pub fn defaults(debug: bool, database_table: Option<&str>) -> Self {
        let root_level = if debug { LevelFilter::DEBUG } else { LevelFilter::INFO };
        Self {
            root_level,
            console_level: if debug { LevelFilter::INFO } else { LevelFilter::WARN },
            console_format: LineFormat::Simple,
            file_level: root_level,
            file_format: LineFormat::Complex,
            database: database_table.map(|table| DatabasePipelineConfig {
                level: root_level,
                table: table.to_string(),
            }),
        }
    }

    /// Overlay a parsed file on the defaults for `debug`.
    pub fn from_file_config(
        file: &LoggingFileConfig,
        debug: bool,
        default_table: &str,
    ) -> LoggingResult<Self> {
        let base = Self::defaults(debug, None);
        let root_level = parse_level(file.level.as_deref(), base.root_level)?;

        let database = if file.database.enabled {
            Some(DatabasePipelineConfig {
                level: parse_level(file.database.level.as_deref(), root_level)?,
                table: file
                    .database
                    .table
                    .clone()
                    .unwrap_or_else(|| default_table.to_string()),
            })
        } else {
            None
        };

        Ok(Self {
            root_level,
            console_level: parse_level(file.console.level.as_deref(), base.console_level)?,
            console_format: file.console.format.unwrap_or(base.console_format),
            file_level: parse_level(file.file.level.as_deref(), root_level)?,
            file_format: file.file.format.unwrap_or(base.file_format),
            database,
        })
    }
}

fn parse_level(value: Option<&str>, default: LevelFilter) -> LoggingResult<LevelFilter> {
    match value {
        None => Ok(default),
        // Accept the common spelling used by other logging stacks.
        Some(v) if v.eq_ignore_ascii_case("warning") => Ok(LevelFilter::WARN),
        Some(v) => v
            .parse::<LevelFilter>()
            .map_err(|_| LoggingError::InvalidLevel(v.to_string())),
    }
}

/// Parse configuration text.
pub fn parse_logging_config(contents: &str, path: &Path) -> LoggingResult<LoggingFileConfig> {
    toml::from_str::<LoggingFileConfig>(contents).map_err(|e| LoggingError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Load the configuration file if it exists.
///
/// A missing file is `Ok(None)`; an unreadable or invalid one is an error.
pub fn load_logging_config(path: &Path) -> LoggingResult<Option<LoggingFileConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path).map_err(|e| LoggingError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_logging_config(&contents, path).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_follow_debug_mode() {
        let quiet = PipelineConfig::defaults(false, None);
        assert_eq!(quiet.root_level, LevelFilter::INFO);
        assert_eq!(quiet.console_level, LevelFilter::WARN);
        assert_eq!(quiet.file_level, LevelFilter::INFO);
        assert!(quiet.database.is_none());

        let loud = PipelineConfig::defaults(true, Some("t"));
        assert_eq!(loud.root_level, LevelFilter::DEBUG);
        assert_eq!(loud.console_level, LevelFilter::INFO);
        assert_eq!(loud.file_level, LevelFilter::DEBUG);
        assert_eq!(loud.database.unwrap().table, "t");
    }

    #[test]
    fn test_file_config_overlay() {
        let text = r#"
            level = "debug"

            [console]
            level = "error"
            format = "complex"

            [database]
            enabled = true
            level = "warning"
        "#;
        let parsed = parse_logging_config(text, Path::new("logging.toml")).unwrap();
        let config = PipelineConfig::from_file_config(&parsed, false, "fallback").unwrap();

        assert_eq!(config.root_level, LevelFilter::DEBUG);
        assert_eq!(config.console_level, LevelFilter::ERROR);
        assert_eq!(config.console_format, LineFormat::Complex);
        assert_eq!(config.file_level, LevelFilter::DEBUG);
        assert_eq!(config.file_format, LineFormat::Complex);
        let db = config.database.unwrap();
        assert_eq!(db.level, LevelFilter::WARN);
        assert_eq!(db.table, "fallback");
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        let parsed = parse_logging_config("level = \"loud\"", Path::new("x.toml")).unwrap();
        let err = PipelineConfig::from_file_config(&parsed, false, "t").unwrap_err();
        assert!(matches!(err, LoggingError::InvalidLevel(ref l) if l == "loud"));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = parse_logging_config("[console]\ncolour = true", Path::new("x.toml"));
        assert!(matches!(err, Err(LoggingError::Config { .. })));
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_logging_config(&dir.path().join("nope.toml")).unwrap(), None);
    }

    #[test]
    fn test_load_existing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[file]\nformat = \"simple\"").unwrap();
        let loaded = load_logging_config(file.path()).unwrap().unwrap();
        assert_eq!(loaded.file.format, Some(LineFormat::Simple));
    }
}
