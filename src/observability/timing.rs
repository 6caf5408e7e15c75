//! Elapsed-time reporting for functions and scopes.
//!
//! ```ignore
//! use dev_tools::time_span;
//!
//! fn load_batch() {
//!     time_span!("load_batch");
//!     // ...
//! }
//! // prints "Elapsed time for load_batch: 0.42 seconds"
//! ```
//!
//! The line always goes to stdout. It is also logged at INFO when `TIMING`
//! is on.

use crate::config::is_timing_on;
use std::io::Write;
use std::time::{Duration, Instant};

/// RAII guard that reports its lifetime when dropped.
///
/// Create via [`TimingSpan::new`] or the [`time_span!`](crate::time_span) macro.
pub struct TimingSpan {
    name: &'static str,
    start: Instant,
    log: bool,
}

impl TimingSpan {
    /// Start timing; logging follows the `TIMING` flag.
    #[inline]
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self::with_logging(name, is_timing_on())
    }

    #[inline]
    #[must_use]
    pub fn with_logging(name: &'static str, log: bool) -> Self {
        Self {
            name,
            start: Instant::now(),
            log,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for TimingSpan {
    fn drop(&mut self) {
        let line = elapsed_message(self.name, self.start.elapsed());
        let mut out = std::io::stdout().lock();
        // Nothing useful to do if stdout is gone.
        let _ = writeln!(out, "{line}");
        if self.log {
            tracing::info!("{}", line);
        }
    }
}

/// `Elapsed time for {name}: {secs:.2} seconds`
pub fn elapsed_message(name: &str, elapsed: Duration) -> String {
    format!("Elapsed time for {}: {:.2} seconds", name, elapsed.as_secs_f64())
}

/// Run `f` inside a [`TimingSpan`] and return its result.
pub fn timed<T>(name: &'static str, f: impl FnOnce() -> T) -> T {
    let _span = TimingSpan::new(name);
    f()
}

/// Time the rest of the enclosing scope.
///
/// # Example
///
/// ```ignore
/// fn transfer() {
///     time_span!("transfer");
///     // ... work ...
/// }
/// ```
#[macro_export]
macro_rules! time_span {
    ($name:expr) => {
        let _timing_span = $crate::observability::TimingSpan::new($name);
    };
    ($name:expr, log: $log:expr) => {
        let _timing_span = $crate::observability::TimingSpan::with_logging($name, $log);
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    #[derive(Clone, Default)]
    struct Messages(Arc<Mutex<Vec<String>>>);

    struct MessageField<'a>(&'a mut String);

    impl Visit for MessageField<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                *self.0 = format!("{value:?}");
            }
        }
    }

    impl<S: tracing::Subscriber> Layer<S> for Messages {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let mut message = String::new();
            event.record(&mut MessageField(&mut message));
            self.0.lock().unwrap().push(message);
        }
    }

    #[test]
    fn test_message_format() {
        assert_eq!(
            elapsed_message("load", Duration::from_millis(1234)),
            "Elapsed time for load: 1.23 seconds"
        );
    }

    #[test]
    fn test_timed_returns_result() {
        assert_eq!(timed("answer", || 6 * 7), 42);
    }

    #[test]
    fn test_logging_follows_flag() {
        let messages = Messages::default();
        let subscriber = tracing_subscriber::registry().with(messages.clone());

        tracing::subscriber::with_default(subscriber, || {
            drop(TimingSpan::with_logging("quiet", false));
            drop(TimingSpan::with_logging("loud", true));
        });

        let logged = messages.0.lock().unwrap();
        assert_eq!(logged.len(), 1);
        assert!(logged[0].starts_with("Elapsed time for loud: "));
    }

    #[test]
    fn test_macro_expands_in_scope() {
        time_span!("scoped", log: false);
    }
}
