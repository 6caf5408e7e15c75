//! The progress-wrapping iterator.
//!
//! Frames are rendered lazily, at the moment the consumer asks for the next
//! item: the first call renders iteration 0, every later call renders the
//! number of items handed out so far, and the call that observes exhaustion
//! renders the final frame followed by a newline. A consumer that stops
//! early never sees the final frame or the newline.

use super::{render, ProgressConfig};
use crate::errors::{RenderError, RenderErrorKind};
use std::collections::HashSet;
use std::io::{self, Write};
use std::iter::FusedIterator;
use std::time::{Duration, Instant};

/// Per-iterator bookkeeping.
#[derive(Debug, Clone)]
pub struct ProgressState {
    total: usize,
    started_at: Option<Instant>,
    iteration: usize,
    reported: HashSet<RenderErrorKind>,
}

impl ProgressState {
    fn new(total: usize) -> Self {
        Self {
            total,
            started_at: None,
            iteration: 0,
            reported: HashSet::new(),
        }
    }

    /// Length of the wrapped sequence, fixed at construction.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Items handed out and accounted for so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.map(|t| t.elapsed()).unwrap_or_default()
    }

    /// Render error kinds already logged by this iterator.
    pub fn reported_errors(&self) -> &HashSet<RenderErrorKind> {
        &self.reported
    }
}

/// Iterator adapter that draws a progress bar while yielding `inner`'s
/// items unchanged.
pub struct ProgressIter<I, W = io::Stdout> {
    inner: I,
    config: ProgressConfig,
    out: W,
    state: ProgressState,
    started: bool,
    pending: bool,
    finished: bool,
}

impl<I: ExactSizeIterator> ProgressIter<I, io::Stdout> {
    /// Wrap `inner`, drawing on standard output.
    pub fn new(inner: I, config: ProgressConfig) -> Self {
        Self::with_writer(inner, config, io::stdout())
    }
}

impl<I: ExactSizeIterator, W: Write> ProgressIter<I, W> {
    /// Wrap `inner`, drawing on `out`.
    pub fn with_writer(inner: I, config: ProgressConfig, out: W) -> Self {
        let total = inner.len();
        Self {
            inner,
            config,
            out,
            state: ProgressState::new(total),
            started: false,
            pending: false,
            finished: false,
        }
    }
}

impl<I, W: Write> ProgressIter<I, W> {
    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn config(&self) -> &ProgressConfig {
        &self.config
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    fn rendering(&self) -> bool {
        self.config.debug && self.state.total > 0
    }

    fn render(&mut self) {
        if !self.rendering() {
            return;
        }
        let elapsed = self.config.timing.then(|| self.state.elapsed());
        let frame = render::render_frame(
            &self.config,
            self.state.iteration,
            self.state.total,
            elapsed,
        );
        if let Err(err) = self.write_text(&frame) {
            self.report(err);
        }
    }

    fn finish(&mut self) {
        if !self.rendering() {
            return;
        }
        if let Err(err) = self.write_text("\n") {
            self.report(err);
        }
    }

    fn write_text(&mut self, text: &str) -> Result<(), RenderError> {
        self.config.encoding.check(text)?;
        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    fn report(&mut self, err: RenderError) {
        if self.state.reported.insert(err.kind()) {
            tracing::error!(
                error = %err,
                debug = self.config.debug,
                "Progress bar is not able to print"
            );
        }
    }
}

impl<I: Iterator, W: Write> Iterator for ProgressIter<I, W> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.finished {
            return None;
        }

        if !self.started {
            self.started = true;
            self.state.started_at = Some(Instant::now());
            self.render();
        } else if self.pending {
            self.pending = false;
            self.state.iteration += 1;
            self.render();
        }

        match self.inner.next() {
            Some(item) => {
                self.pending = true;
                Some(item)
            }
            None => {
                self.finished = true;
                self.finish();
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            (0, Some(0))
        } else {
            self.inner.size_hint()
        }
    }
}

impl<I: ExactSizeIterator, W: Write> ExactSizeIterator for ProgressIter<I, W> {}

impl<I: Iterator, W: Write> FusedIterator for ProgressIter<I, W> {}

/// Adds `.progress()` to every iterator of known length.
pub trait ProgressIteratorExt: ExactSizeIterator + Sized {
    /// Wrap with a bar configured from the environment.
    fn progress(self) -> ProgressIter<Self> {
        ProgressIter::new(self, ProgressConfig::from_env())
    }

    fn progress_with(self, config: ProgressConfig) -> ProgressIter<Self> {
        ProgressIter::new(self, config)
    }

    fn progress_to<W: Write>(self, config: ProgressConfig, out: W) -> ProgressIter<Self, W> {
        ProgressIter::with_writer(self, config, out)
    }
}

impl<I: ExactSizeIterator> ProgressIteratorExt for I {}

/// Wrap anything iterable whose length is known up front.
pub fn progress_bar<T>(iterable: T, config: ProgressConfig) -> ProgressIter<T::IntoIter>
where
    T: IntoIterator,
    T::IntoIter: ExactSizeIterator,
{
    ProgressIter::new(iterable.into_iter(), config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled() -> ProgressConfig {
        ProgressConfig::default().fill("#").length(4).debug(true)
    }

    fn frames(out: &[u8]) -> Vec<String> {
        String::from_utf8_lossy(out)
            .split('\r')
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_nothing_rendered_before_first_next() {
        let iter = vec![1, 2].into_iter().progress_to(enabled(), Vec::new());
        assert!(iter.writer().is_empty());
    }

    #[test]
    fn test_frame_per_item_plus_initial() {
        let mut iter = vec!['a', 'b'].into_iter().progress_to(enabled(), Vec::new());
        assert_eq!(iter.next(), Some('a'));
        assert_eq!(frames(iter.writer()).len(), 1);
        assert_eq!(iter.next(), Some('b'));
        assert_eq!(iter.state().iteration(), 1);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.state().iteration(), 2);

        let out = iter.into_writer();
        let frames = frames(&out);
        assert_eq!(frames.len(), 4, "three frames and the final newline");
        assert!(frames[0].starts_with(" |----| 0.0%"));
        assert!(frames[1].starts_with(" |##--| 50.0%"));
        assert!(frames[2].starts_with(" |####| 100.0%"));
        assert_eq!(frames[3], "\n");
    }

    #[test]
    fn test_fused_after_exhaustion() {
        let mut iter = Vec::<u8>::new().into_iter().progress_to(enabled(), Vec::new());
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
        assert!(iter.writer().is_empty());
    }

    #[test]
    fn test_early_stop_has_no_newline() {
        let mut iter = (0..5).progress_to(enabled(), Vec::new());
        iter.next();
        iter.next();
        let out = String::from_utf8(iter.into_writer()).unwrap();
        assert!(!out.contains('\n'));
    }

    #[test]
    fn test_exact_size_is_forwarded() {
        let mut iter = (0..3).progress_to(enabled(), Vec::new());
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
    }
}
