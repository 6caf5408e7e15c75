//! Run-level instrumentation: elapsed-time spans and the exit-code line.
//!
//! ## Usage
//!
//! ```ignore
//! use dev_tools::observability::timed;
//!
//! let rows = timed("extract", || extract_rows(&source));
//! ```

pub mod timing;

pub use timing::{elapsed_message, timed, TimingSpan};

/// Log the exit code of the run at INFO.
pub fn log_exit_code(code: i32) {
    tracing::info!("Exit code: {}", code);
}
