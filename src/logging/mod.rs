//! Logging bootstrap.
//!
//! [`init_logging`] installs a `tracing` subscriber with up to three layers:
//!
//! - console: stdout, `LEVEL | target | message`
//! - file: a dated log file, `LEVEL | time | target | span | message`
//! - database: [`database::DatabaseLayer`], when enabled
//!
//! Levels come from the logging configuration file when it exists and from
//! the `DEBUG` flag otherwise. `RUST_LOG` overrides the root level.
//!
//! ```ignore
//! let _guard = dev_tools::logging::init_logging(Some("nightly_import"))?;
//! tracing::info!("starting");
//! // "Exit code: 0" is logged when the guard drops
//! ```

pub mod database;
mod format;
pub mod paths;

pub use format::PipeFormat;
pub use paths::{log_file_name, log_file_path, log_folder};

use crate::config::{load_dotenv, load_logging_config, LoggerSettings, PipelineConfig};
use crate::errors::{LoggingError, LoggingResult, StoreError};
use crate::observability::log_exit_code;
use chrono::Local;
use database::{report_connect_failure, validate_table_name, DatabaseLayer, RowContext};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::registry::Registry;
use tracing_subscriber::Layer;

type Base = Layered<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<Base> + Send + Sync + 'static>;
type PipelineSubscriber = Layered<Vec<BoxedLayer>, Base>;

/// Set up logging from the environment and install it process-wide.
///
/// A `.env` file is loaded first; variables already set in the process keep
/// their values. `script_name` overrides `SCRIPT_NAME` for the log folder
/// and the database rows.
pub fn init_logging(script_name: Option<&str>) -> LoggingResult<LoggingGuard> {
    load_dotenv();
    LoggingPipeline::build(&LoggerSettings::from_env(), script_name)?.install()
}

/// A configured but not yet installed subscriber.
pub struct LoggingPipeline {
    subscriber: PipelineSubscriber,
    log_file: PathBuf,
    script: String,
    config: PipelineConfig,
    connect_error: Option<StoreError>,
}

impl LoggingPipeline {
    /// Create the log folder and file, resolve the configuration and
    /// assemble the layers.
    pub fn build(settings: &LoggerSettings, script_name: Option<&str>) -> LoggingResult<Self> {
        let now = Local::now();
        let script = settings.script_identifier(script_name);

        let folder = log_folder(settings, script_name, &now);
        fs::create_dir_all(&folder).map_err(|source| LoggingError::CreateDir {
            path: folder.clone(),
            source,
        })?;

        let log_file = folder.join(log_file_name(&now));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .map_err(|source| LoggingError::OpenFile {
                path: log_file.clone(),
                source,
            })?;

        let debug = settings.flags.debug;
        let config = match load_logging_config(&settings.conf_path)? {
            Some(file_config) => PipelineConfig::from_file_config(&file_config, debug, &settings.table)?,
            None => PipelineConfig::defaults(
                debug,
                settings
                    .flags
                    .database_logging
                    .then_some(settings.table.as_str()),
            ),
        };

        let mut layers: Vec<BoxedLayer> = vec![
            fmt::layer()
                .event_format(PipeFormat::new(config.console_format))
                .with_writer(std::io::stdout)
                .with_filter(config.console_level)
                .boxed(),
            fmt::layer()
                .event_format(PipeFormat::new(config.file_format))
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .with_filter(config.file_level)
                .boxed(),
        ];

        let mut connect_error = None;
        if let Some(db) = &config.database {
            validate_table_name(&db.table)?;
            let layer = DatabaseLayer::connect(
                &settings.database,
                db.table.clone(),
                RowContext::new(script.clone()),
            );
            connect_error = layer.connect_error().cloned();
            layers.push(layer.with_filter(db.level).boxed());
        }

        let env_filter = EnvFilter::builder()
            .with_default_directive(config.root_level.into())
            .from_env_lossy();
        let subscriber = Registry::default().with(env_filter).with(layers);

        Ok(Self {
            subscriber,
            log_file,
            script,
            config,
            connect_error,
        })
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Install as the global default subscriber.
    pub fn install(self) -> LoggingResult<LoggingGuard> {
        let Self {
            subscriber,
            log_file,
            script,
            connect_error,
            ..
        } = self;
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;
        Ok(LoggingGuard::announce(log_file, script, connect_error, None))
    }

    /// Install for the current thread only, until the guard drops.
    pub fn install_scoped(self) -> LoggingGuard {
        let Self {
            subscriber,
            log_file,
            script,
            connect_error,
            ..
        } = self;
        let default = tracing::subscriber::set_default(subscriber);
        LoggingGuard::announce(log_file, script, connect_error, Some(default))
    }
}

/// Keeps logging alive and logs the exit code when dropped.
///
/// The exit code is 1 while unwinding from a panic or after
/// [`LoggingGuard::set_exit_code`], else 0.
pub struct LoggingGuard {
    log_file: PathBuf,
    script: String,
    exit_code: Option<i32>,
    // Dropped after `Drop::drop` runs, so the exit code still reaches it.
    _default: Option<tracing::subscriber::DefaultGuard>,
}

impl LoggingGuard {
    fn announce(
        log_file: PathBuf,
        script: String,
        connect_error: Option<StoreError>,
        default: Option<tracing::subscriber::DefaultGuard>,
    ) -> Self {
        if let Some(err) = &connect_error {
            report_connect_failure(err);
        }
        tracing::info!("Setting up logger for {}", script);
        Self {
            log_file,
            script,
            exit_code: None,
            _default: default,
        }
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn set_exit_code(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

impl Drop for LoggingGuard {
    fn drop(&mut self) {
        let code = match self.exit_code {
            Some(code) => code,
            None if std::thread::panicking() => 1,
            None => 0,
        };
        log_exit_code(code);
    }
}
