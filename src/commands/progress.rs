use crate::progress::{ProgressConfig, ProgressIteratorExt};
use anyhow::Result;
use std::io::Write;
use std::thread;
use std::time::Duration;

/// Walk `count` items behind a bar drawn on `out`, sleeping `delay` per
/// item. Returns how many items were processed.
pub fn run_progress<W: Write>(
    count: usize,
    delay: Duration,
    config: ProgressConfig,
    out: W,
) -> Result<usize> {
    let mut processed = 0;
    for _ in (0..count).progress_to(config, out) {
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        processed += 1;
    }
    tracing::debug!(processed, "Progress demo finished");
    Ok(processed)
}
