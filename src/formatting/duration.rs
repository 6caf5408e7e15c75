//! Human-readable duration breakdowns.
//!
//! A duration is split across a fixed table of [`TimeUnit`]s, largest first:
//!
//! ```text
//! 90061.0    -> "1 day 1h 1m 1.000s"
//! 63115261.0 -> "2 years 1m 1.000s"
//! ```
//!
//! Two year-like units exist. The actual year (365.25 days) is tried first;
//! when it consumes anything the calendar year (365 days) is skipped so the
//! same span is never counted twice. The calendar year therefore only shows
//! up for durations between 365 and 365.25 days.
//!
//! Sub-second remainders are always kept in the seconds part, so `0.5`
//! renders as `"0.500s"` and `60.5` as `"1m 0.500s"` rather than being
//! rounded away, and the parts always add back up to the input.

use std::time::Duration;

/// One entry of the breakdown table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeUnit {
    /// Suffix used when the count is exactly one
    pub singular: &'static str,
    /// Suffix used for every other count
    pub plural: &'static str,
    /// Size of the unit in seconds
    pub seconds: u64,
    /// Whether the unit absorbs the fractional remainder
    pub fractional: bool,
}

impl TimeUnit {
    const fn new(singular: &'static str, plural: &'static str, seconds: u64, fractional: bool) -> Self {
        Self {
            singular,
            plural,
            seconds,
            fractional,
        }
    }

    fn size(&self) -> f64 {
        self.seconds as f64
    }

    fn suffix(&self, count: u64) -> &'static str {
        if count == 1 {
            self.singular
        } else {
            self.plural
        }
    }
}

pub const ACTUAL_YEAR: TimeUnit = TimeUnit::new(" year", " years", 31_557_600, false);
pub const YEAR: TimeUnit = TimeUnit::new(" year", " years", 365 * 24 * 60 * 60, false);
pub const DAY: TimeUnit = TimeUnit::new(" day", " days", 24 * 60 * 60, false);
pub const HOUR: TimeUnit = TimeUnit::new("h", "h", 60 * 60, false);
pub const MINUTE: TimeUnit = TimeUnit::new("m", "m", 60, false);
pub const SECOND: TimeUnit = TimeUnit::new("s", "s", 1, true);

/// Breakdown order, largest to smallest.
pub const UNITS: [TimeUnit; 6] = [ACTUAL_YEAR, YEAR, DAY, HOUR, MINUTE, SECOND];

const ZERO: &str = "0.000s";

/// Format a [`Duration`] as a unit breakdown.
pub fn format_duration(duration: Duration) -> String {
    format_duration_secs(duration.as_secs_f64())
}

/// Format a number of seconds as a unit breakdown.
///
/// Negative and non-finite inputs are treated as zero.
///
/// # Examples
///
/// ```
/// use dev_tools::formatting::format_duration_secs;
///
/// assert_eq!(format_duration_secs(0.0), "0.000s");
/// assert_eq!(format_duration_secs(3665.0), "1h 1m 5.000s");
/// assert_eq!(format_duration_secs(31_536_000.0), "1 year");
/// ```
pub fn format_duration_secs(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return ZERO.to_string();
    }

    let mut remaining = seconds;
    let mut parts = Vec::new();
    let mut skip_calendar_year = false;

    for unit in UNITS {
        if skip_calendar_year && unit == YEAR {
            continue;
        }

        if unit.fractional {
            // Sub-unit remainders land here instead of being dropped.
            if remaining > 0.0 {
                parts.push(format!("{:.3}{}", remaining, unit.singular));
            }
            remaining = 0.0;
            continue;
        }

        if remaining < unit.size() {
            continue;
        }

        let (count, rest) = divmod(remaining, unit.size());
        remaining = rest;
        if unit == ACTUAL_YEAR && count > 0 {
            skip_calendar_year = true;
        }
        parts.push(format!("{}{}", count, unit.suffix(count)));
    }

    if parts.is_empty() {
        ZERO.to_string()
    } else {
        parts.join(" ")
    }
}

/// Floored division returning an integral count and the exact remainder.
fn divmod(value: f64, size: f64) -> (u64, f64) {
    let rest = value % size;
    let count = ((value - rest) / size).round() as u64;
    (count, rest)
}
