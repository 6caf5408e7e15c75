//! Pure frame rendering for the progress bar.
//!
//! Nothing here touches the terminal; [`super::iter::ProgressIter`] decides
//! when to render and where the text goes.

use super::ProgressConfig;
use crate::formatting::format_duration_secs;
use std::time::Duration;

/// Marker shown while no remaining-time estimate exists.
pub const ETA_UNAVAILABLE: &str = "N/A";

/// Trailing pad that wipes leftovers of a longer previous frame.
const PAD: &str = "          ";

/// Percentage complete with `decimals` fractional digits.
pub fn percent(iteration: usize, total: usize, decimals: usize) -> String {
    let value = 100.0 * (iteration as f64 / total as f64);
    format!("{:.*}", decimals, value)
}

/// Number of filled bar cells: `floor(length * iteration / total)`, capped
/// at `length`.
pub fn filled_length(iteration: usize, total: usize, length: usize) -> usize {
    let filled = (length as u128 * iteration as u128) / total as u128;
    (filled as usize).min(length)
}

pub fn bar(fill: &str, filled: usize, length: usize) -> String {
    let mut out = fill.repeat(filled);
    out.push_str(&"-".repeat(length.saturating_sub(filled)));
    out
}

/// Linear remaining-time extrapolation in seconds.
///
/// `None` until at least one iteration completed and some time has passed.
pub fn eta_seconds(iteration: usize, total: usize, elapsed: Duration) -> Option<f64> {
    let et = elapsed.as_secs_f64();
    if iteration == 0 || total == 0 || et <= 0.0 {
        return None;
    }
    let fraction = iteration as f64 / total as f64;
    Some((et / fraction - et).max(0.0))
}

/// ` |--Elapsed time: .. - Time remaining: ..--|`
pub fn timing_segment(iteration: usize, total: usize, elapsed: Duration) -> String {
    let eta = eta_seconds(iteration, total, elapsed)
        .map(format_duration_secs)
        .unwrap_or_else(|| ETA_UNAVAILABLE.to_string());
    format!(
        " |--Elapsed time: {} - Time remaining: {}--|",
        format_duration_secs(elapsed.as_secs_f64()),
        eta
    )
}

/// Render one complete frame, line terminator included.
///
/// `elapsed` is `None` when timing is disabled, which drops the timing
/// segment entirely. `total` must be nonzero.
pub fn render_frame(
    config: &ProgressConfig,
    iteration: usize,
    total: usize,
    elapsed: Option<Duration>,
) -> String {
    let filled = filled_length(iteration, total, config.length);
    let timing = elapsed
        .map(|et| timing_segment(iteration, total, et))
        .unwrap_or_default();
    format!(
        "{} |{}| {}% {}{}{}{}",
        config.prefix,
        bar(&config.fill, filled, config.length),
        percent(iteration, total, config.decimals),
        config.suffix,
        timing,
        PAD,
        config.line_end
    )
}
