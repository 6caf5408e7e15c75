use crate::cli::EmitLevel;
use crate::logging::init_logging;
use anyhow::Result;

/// Install logging and send `message` through it.
///
/// The guard is returned so the caller decides when the exit code line is
/// written.
pub fn emit_event(
    level: EmitLevel,
    script: Option<&str>,
    message: &str,
) -> Result<crate::logging::LoggingGuard> {
    let guard = init_logging(script)?;
    match level {
        EmitLevel::Trace => tracing::trace!("{}", message),
        EmitLevel::Debug => tracing::debug!("{}", message),
        EmitLevel::Info => tracing::info!("{}", message),
        EmitLevel::Warn => tracing::warn!("{}", message),
        EmitLevel::Error => tracing::error!("{}", message),
    }
    Ok(guard)
}
