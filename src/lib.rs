// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod formatting;
pub mod logging;
pub mod observability;
pub mod progress;

// Re-export commonly used types
pub use crate::config::{is_debug_on, is_timing_on, Flags, LoggerSettings};
pub use crate::errors::{LoggingError, LoggingResult, RenderError, StoreError};
pub use crate::formatting::{format_duration, format_duration_secs};
pub use crate::logging::database::DatabaseLayer;
pub use crate::logging::{init_logging, LoggingGuard, LoggingPipeline};
pub use crate::observability::{timed, TimingSpan};
pub use crate::progress::{progress_bar, ProgressConfig, ProgressIter, ProgressIteratorExt};
