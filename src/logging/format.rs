//! Pipe-separated line layouts for the console and file layers.

use crate::config::LineFormat;
use chrono::Local;
use std::fmt;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// `LEVEL | target | message` or, for [`LineFormat::Complex`],
/// `LEVEL | time | target | span | message`.
#[derive(Debug, Clone, Copy)]
pub struct PipeFormat {
    layout: LineFormat,
}

impl PipeFormat {
    pub fn new(layout: LineFormat) -> Self {
        Self { layout }
    }
}

impl<S, N> FormatEvent<S, N> for PipeFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        write!(writer, "{} | ", meta.level())?;

        match self.layout {
            LineFormat::Simple => {
                write!(writer, "{} | ", meta.target())?;
            }
            LineFormat::Complex => {
                let span = ctx
                    .event_scope()
                    .and_then(|mut scope| scope.next())
                    .map(|span| span.name())
                    .unwrap_or("-");
                write!(
                    writer,
                    "{} | {} | {} | ",
                    Local::now().format(TIME_FORMAT),
                    meta.target(),
                    span
                )?;
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
