//! Log records as the database sink sees them.

use crate::errors::MessageConversionError;
use std::fmt::{self, Write as _};
use tracing::field::{Field, Visit};
use tracing::{Event, Level};

/// Numeric severity stored in the `log_level` column.
pub fn level_number(level: &Level) -> i64 {
    match *level {
        Level::TRACE => 5,
        Level::DEBUG => 10,
        Level::INFO => 20,
        Level::WARN => 30,
        Level::ERROR => 40,
    }
}

/// A record routed to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: Level,
    /// Logical source, the event target
    pub target: String,
    /// Innermost span, else the module path
    pub function: String,
    pub message: String,
    pub file: Option<String>,
}

impl LogRecord {
    /// Build a record from an event.
    ///
    /// `span` is the name of the innermost span the event was emitted in.
    /// Non-message fields are appended as ` key=value`.
    pub fn from_event(
        event: &Event<'_>,
        span: Option<&str>,
    ) -> Result<Self, MessageConversionError> {
        let meta = event.metadata();
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        if let Some(err) = visitor.error {
            return Err(err);
        }

        let mut message = visitor.message;
        message.push_str(&visitor.fields);

        Ok(Self {
            level: *meta.level(),
            target: meta.target().to_string(),
            function: span
                .or(meta.module_path())
                .unwrap_or_default()
                .to_string(),
            message,
            file: meta.file().map(str::to_string),
        })
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
    error: Option<MessageConversionError>,
}

impl MessageVisitor {
    fn fail(&mut self, field: &Field) {
        self.error.get_or_insert(MessageConversionError {
            field: field.name(),
        });
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        let result = if field.name() == "message" {
            self.message.write_str(value)
        } else {
            write!(self.fields, " {}={}", field.name(), value)
        };
        if result.is_err() {
            self.fail(field);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let result = if field.name() == "message" {
            write!(self.message, "{:?}", value)
        } else {
            write!(self.fields, " {}={:?}", field.name(), value)
        };
        if result.is_err() {
            self.fail(field);
        }
    }
}
