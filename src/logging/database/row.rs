//! Projection of a [`LogRecord`] into the ten-column log table row.

use super::record::{level_number, LogRecord};
use chrono::{DateTime, Local};

/// Longest text stored in the `log` column, in characters.
pub const MAX_LOG_LEN: usize = 2048;

/// Appended to messages cut down to [`MAX_LOG_LEN`].
pub const TRUNCATION_MARKER: &str = "... too long, check the local logs to see the full msg";

/// Column order of every insert. Values come from [`LogRow`] in this order.
pub const COLUMNS: [&str; 10] = [
    "log_level",
    "log_levelname",
    "log_module",
    "log_func",
    "log",
    "script",
    "created_at",
    "created_by",
    "pathname",
    "process_id",
];

const CREATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Double single quotes and cap the length at [`MAX_LOG_LEN`] characters.
pub fn normalize_message(message: &str) -> String {
    let escaped = message.replace('\'', "''");
    if escaped.chars().count() <= MAX_LOG_LEN {
        return escaped;
    }
    let keep = MAX_LOG_LEN - TRUNCATION_MARKER.chars().count();
    let mut truncated: String = escaped.chars().take(keep).collect();
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}

/// Process-wide values stamped onto every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowContext {
    pub script: String,
    pub user: String,
    pub process_id: u32,
}

impl RowContext {
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            user: current_user(),
            process_id: std::process::id(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRow {
    pub log_level: i64,
    pub log_levelname: String,
    pub log_module: String,
    pub log_func: String,
    pub log: String,
    pub script: String,
    pub created_at: String,
    pub created_by: String,
    pub pathname: String,
    pub process_id: i64,
}

impl LogRow {
    /// `now` is the insertion time, not the time the event was emitted.
    pub fn from_record(record: &LogRecord, context: &RowContext, now: DateTime<Local>) -> Self {
        Self {
            log_level: level_number(&record.level),
            log_levelname: record.level.as_str().to_string(),
            log_module: record.target.clone(),
            log_func: record.function.clone(),
            log: normalize_message(&record.message),
            script: context.script.clone(),
            created_at: now.format(CREATED_AT_FORMAT).to_string(),
            created_by: context.user.clone(),
            pathname: record.file.clone().unwrap_or_default(),
            process_id: i64::from(context.process_id),
        }
    }
}

/// Login name of the current user.
///
/// Checks `LOGNAME`, `USER`, `LNAME` and `USERNAME`, then the password
/// database on Unix.
pub fn current_user() -> String {
    ["LOGNAME", "USER", "LNAME", "USERNAME"]
        .iter()
        .find_map(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
        .or_else(passwd_user)
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(unix)]
fn passwd_user() -> Option<String> {
    let mut buf = vec![0 as libc::c_char; 4096];
    // SAFETY: zeroed passwd is a valid out-parameter for getpwuid_r.
    let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
    let mut result: *mut libc::passwd = std::ptr::null_mut();

    // SAFETY: every pointer is valid for the duration of the call and
    // buf.len() matches the buffer handed over.
    let rc = unsafe {
        libc::getpwuid_r(
            libc::getuid(),
            &mut pwd,
            buf.as_mut_ptr(),
            buf.len(),
            &mut result,
        )
    };
    if rc != 0 || result.is_null() || pwd.pw_name.is_null() {
        return None;
    }

    // SAFETY: pw_name points into buf and is NUL-terminated on success.
    let name = unsafe { std::ffi::CStr::from_ptr(pwd.pw_name) };
    Some(name.to_string_lossy().into_owned())
}

#[cfg(not(unix))]
fn passwd_user() -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use tracing::Level;

    fn record(message: &str) -> LogRecord {
        LogRecord {
            level: Level::WARN,
            target: "importer".into(),
            function: "load_batch".into(),
            message: message.into(),
            file: Some("src/importer.rs".into()),
        }
    }

    fn context() -> RowContext {
        RowContext {
            script: "nightly".into(),
            user: "etl".into(),
            process_id: 4242,
        }
    }

    #[test]
    fn test_quotes_are_doubled() {
        assert_eq!(normalize_message("it's Bob's"), "it''s Bob''s");
    }

    #[test]
    fn test_short_messages_untouched() {
        let exact = "x".repeat(MAX_LOG_LEN);
        assert_eq!(normalize_message(&exact), exact);
    }

    #[test]
    fn test_long_messages_truncated_to_max() {
        let out = normalize_message(&"y".repeat(MAX_LOG_LEN + 1));
        assert_eq!(out.chars().count(), MAX_LOG_LEN);
        assert!(out.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let out = normalize_message(&"é".repeat(3000));
        assert_eq!(out.chars().count(), MAX_LOG_LEN);
        assert!(out.starts_with("éé"));
    }

    #[test]
    fn test_escaping_happens_before_truncation() {
        // 1100 quotes become 2200 characters once doubled.
        let out = normalize_message(&"'".repeat(1100));
        assert_eq!(out.chars().count(), MAX_LOG_LEN);
        assert!(out.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn test_row_projection() {
        let now = Local.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap();
        let row = LogRow::from_record(&record("disk 'a' full"), &context(), now);
        assert_eq!(
            row,
            LogRow {
                log_level: 30,
                log_levelname: "WARN".into(),
                log_module: "importer".into(),
                log_func: "load_batch".into(),
                log: "disk ''a'' full".into(),
                script: "nightly".into(),
                created_at: "2026-03-04T05:06:07.000000".into(),
                created_by: "etl".into(),
                pathname: "src/importer.rs".into(),
                process_id: 4242,
            }
        );
    }

    #[test]
    fn test_current_user_is_never_empty() {
        assert!(!current_user().is_empty());
    }
}
