//! Text formatting helpers shared by progress rendering and timing output.

pub mod duration;

pub use duration::{format_duration, format_duration_secs, TimeUnit, UNITS};
