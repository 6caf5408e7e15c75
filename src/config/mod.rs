//! Environment flags, logger settings and the logging configuration file.

pub mod flags;
mod loader;
pub mod settings;

pub use flags::{is_debug_on, is_timing_on, is_truthy, Flags};
pub use loader::{
    load_logging_config, parse_logging_config, DatabaseHandlerConfig, DatabasePipelineConfig,
    HandlerConfig, LineFormat, LoggingFileConfig, PipelineConfig,
};
pub use settings::{current_dir_name, load_dotenv, read_env_file, DatabaseSettings, LoggerSettings};
