//! Resilient database sink.
//!
//! Every event that reaches [`DatabaseLayer`] becomes one row of the log
//! table: the message has its single quotes doubled and is capped at
//! [`MAX_LOG_LEN`] characters, and the row is stamped with the script
//! identifier, the current user and the process id.
//!
//! The sink never takes the program down. A failed connection disables it,
//! a failed insert drops that record, and both are reported on the
//! [`DIAGNOSTIC_TARGET`] target, which the sink itself ignores.
//! [`DatabaseLayer::with_reporter`] redirects the insert-time reports.

mod layer;
mod record;
mod row;
pub mod schema;
mod store;

pub use layer::{
    connect_failure_message, report_connect_failure, store_error_message, DatabaseLayer, Reporter,
};
pub use crate::errors::MessageConversionError;
pub use record::{level_number, LogRecord};
pub use row::{current_user, normalize_message, LogRow, RowContext, COLUMNS, MAX_LOG_LEN, TRUNCATION_MARKER};
pub use schema::{create_log_table, validate_table_name};
pub use store::{classify, insert_statement, LogStore, SqliteStore, SCHEMA};

/// Target of the sink's own diagnostics.
pub const DIAGNOSTIC_TARGET: &str = "sql_logger";
