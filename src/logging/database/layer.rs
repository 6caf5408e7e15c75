//! The `tracing` layer that persists events to the log database.

use super::record::LogRecord;
use super::row::{LogRow, RowContext};
use super::store::{LogStore, SqliteStore};
use super::DIAGNOSTIC_TARGET;
use crate::config::DatabaseSettings;
use crate::errors::StoreError;
use chrono::Local;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

/// Writes one row per event into `table`.
///
/// Without a store the layer is inert. Store failures go to the reporter,
/// by default the [`DIAGNOSTIC_TARGET`] target, and the event is dropped;
/// nothing is ever propagated to the code that emitted the event.
pub struct DatabaseLayer<S = SqliteStore> {
    store: Option<Mutex<S>>,
    table: String,
    context: RowContext,
    connect_error: Option<StoreError>,
    reporter: Reporter,
}

/// Receives the sink's diagnostic messages.
pub type Reporter = Arc<dyn Fn(&str) + Send + Sync>;

fn tracing_reporter() -> Reporter {
    Arc::new(|message: &str| tracing::error!(target: DIAGNOSTIC_TARGET, "{}", message))
}

impl DatabaseLayer<SqliteStore> {
    /// Connect once to the configured database.
    ///
    /// A failed connection yields a disabled layer that keeps the error for
    /// [`report_connect_failure`] once a subscriber is listening.
    pub fn connect(settings: &DatabaseSettings, table: impl Into<String>, context: RowContext) -> Self {
        match SqliteStore::connect(settings) {
            Ok(store) => Self::with_store(store, table, context),
            Err(err) => Self {
                connect_error: Some(err),
                ..Self::disabled(table, context)
            },
        }
    }
}

impl<S: LogStore> DatabaseLayer<S> {
    pub fn with_store(store: S, table: impl Into<String>, context: RowContext) -> Self {
        Self {
            store: Some(Mutex::new(store)),
            table: table.into(),
            context,
            connect_error: None,
            reporter: tracing_reporter(),
        }
    }

    /// A layer that ignores everything.
    pub fn disabled(table: impl Into<String>, context: RowContext) -> Self {
        Self {
            store: None,
            table: table.into(),
            context,
            connect_error: None,
            reporter: tracing_reporter(),
        }
    }

    /// Send diagnostics to `reporter` instead of the diagnostic target.
    ///
    /// Events emitted while another event is being dispatched are dropped by
    /// thread-scoped subscribers, so the default reporter is only reliable
    /// under a global subscriber.
    pub fn with_reporter(mut self, reporter: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.reporter = Arc::new(reporter);
        self
    }

    pub fn is_connected(&self) -> bool {
        self.store.is_some()
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn connect_error(&self) -> Option<&StoreError> {
        self.connect_error.as_ref()
    }

    /// Persist one record. A no-op without a store.
    pub fn handle(&self, record: &LogRecord) {
        let Some(store) = &self.store else {
            return;
        };
        let row = LogRow::from_record(record, &self.context, Local::now());

        // The guard is dropped before reporting so the diagnostic event can
        // never wait on this lock.
        let result = lock(store).insert_row(&self.table, &row);
        if let Err(err) = result {
            (self.reporter)(&store_error_message(&err));
        }
    }

    /// Run `f` against the store, if there is one.
    pub fn with_store_ref<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R> {
        self.store.as_ref().map(|store| f(&lock(store)))
    }
}

fn lock<S>(store: &Mutex<S>) -> MutexGuard<'_, S> {
    store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

const AUTHENTICATION_FAILED: &str = "Log database authentication failed: check credentials";

pub fn connect_failure_message(err: &StoreError) -> String {
    if err.is_authentication() {
        AUTHENTICATION_FAILED.to_string()
    } else {
        format!("Failed to connect to database: {}", err)
    }
}

pub fn store_error_message(err: &StoreError) -> String {
    if err.is_authentication() {
        AUTHENTICATION_FAILED.to_string()
    } else {
        err.to_string()
    }
}

/// Report a failed connection on the diagnostic target.
pub fn report_connect_failure(err: &StoreError) {
    tracing::error!(target: DIAGNOSTIC_TARGET, "{}", connect_failure_message(err));
}

impl<S, Sub> Layer<Sub> for DatabaseLayer<S>
where
    S: LogStore + 'static,
    Sub: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, Sub>) {
        if self.store.is_none() || event.metadata().target() == DIAGNOSTIC_TARGET {
            return;
        }

        let span = ctx
            .event_scope(event)
            .and_then(|mut scope| scope.next())
            .map(|span| span.name());

        match LogRecord::from_event(event, span) {
            Ok(record) => self.handle(&record),
            Err(err) => (self.reporter)(&format!("Error processing log message: {}", err)),
        }
    }
}
