//! Error types for dev-tools.
//!
//! Three failure domains exist, and none of them is allowed to take the
//! instrumented program down:
//!
//! - [`RenderError`]: a progress frame could not be written
//! - [`StoreError`]: the log database could not be reached or rejected a row
//! - [`LoggingError`]: the logging pipeline could not be bootstrapped
//!
//! Only [`LoggingError`] is ever returned to a caller. The others, along with
//! [`MessageConversionError`] for events the database sink cannot render, are
//! recovered where they happen and reported through `tracing`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A progress frame could not be rendered.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The output encoding cannot represent a character of the frame
    #[error("cannot encode '{glyph}' for {encoding} output")]
    UnsupportedGlyph {
        glyph: char,
        encoding: &'static str,
    },

    /// Writing or flushing the output stream failed
    #[error("failed to write progress frame: {0}")]
    Io(#[from] io::Error),
}

/// Deduplication key for [`RenderError`]: one log line per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderErrorKind {
    UnsupportedGlyph,
    Io(io::ErrorKind),
}

impl RenderError {
    pub fn kind(&self) -> RenderErrorKind {
        match self {
            RenderError::UnsupportedGlyph { .. } => RenderErrorKind::UnsupportedGlyph,
            RenderError::Io(e) => RenderErrorKind::Io(e.kind()),
        }
    }
}

/// Failures of the log database store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be opened
    #[error("Failed to connect to log database '{target}': {reason}")]
    Connect { target: String, reason: String },

    /// The store refused our credentials or authorization
    #[error("Log database rejected credentials: {0}")]
    AuthenticationRejected(String),

    /// The insert statement failed
    #[error("Error executing insert statement: {0}")]
    Insert(String),

    /// Values could not be bound to the statement
    #[error("Type error with provided values: {0}")]
    Parameters(String),

    /// Anything the classification does not recognize
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl StoreError {
    /// Whether the failure is a credential problem an operator can fix.
    pub fn is_authentication(&self) -> bool {
        matches!(self, StoreError::AuthenticationRejected(_))
    }
}

/// The message of an event could not be turned into text.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("formatting field '{field}' failed")]
pub struct MessageConversionError {
    pub field: &'static str,
}

/// Errors raised while installing the logging pipeline.
#[derive(Error, Debug)]
pub enum LoggingError {
    /// Failed to create the dated log folder
    #[error("Error creating log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to open the log file for appending
    #[error("Error opening log file {path}: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The logging configuration file could not be read or parsed
    #[error("Error setting up logging configuration from {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    /// A level name that tracing does not know
    #[error("Invalid log level '{0}': expected trace, debug, info, warn or error")]
    InvalidLevel(String),

    /// A database table name that cannot be bracket-quoted
    #[error("Invalid log table name '{0}'")]
    InvalidTable(String),

    /// The `.env` file exists but could not be parsed
    #[error("Error reading environment file {path}: {reason}")]
    EnvFile { path: PathBuf, reason: String },

    /// The log table could not be created
    #[error("Error creating log table '{table}': {reason}")]
    Schema { table: String, reason: String },

    /// A global subscriber is already installed
    #[error("Logging is already initialized: {0}")]
    AlreadyInitialized(String),
}

pub type LoggingResult<T> = Result<T, LoggingError>;
