//! Command implementations behind the `dev-tools` binary.
//!
//! - **format-duration**: print a compact duration
//! - **progress**: iterate a demo workload behind a progress bar
//! - **init-db**: create the log table in a SQLite file
//! - **emit**: push one event through the configured logging pipeline

pub mod emit;
pub mod format_duration;
pub mod init_db;
pub mod progress;

pub use emit::emit_event;
pub use format_duration::print_duration;
pub use init_db::init_database;
pub use progress::run_progress;
