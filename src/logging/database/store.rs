//! Storage backends for the database sink.

use super::row::{LogRow, COLUMNS};
use crate::config::DatabaseSettings;
use crate::errors::StoreError;
use rusqlite::{params, Connection, ErrorCode, OpenFlags};

/// Schema every log table lives in.
pub const SCHEMA: &str = "main";

/// Something that accepts log rows.
///
/// Implementations report failures and never panic; the caller decides how
/// to surface them.
pub trait LogStore: Send {
    fn insert_row(&mut self, table: &str, row: &LogRow) -> Result<(), StoreError>;
}

/// Log store backed by an existing SQLite database file.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the configured database.
    ///
    /// The file must already exist; a missing file is a connection failure,
    /// not a reason to create an empty database.
    pub fn connect(settings: &DatabaseSettings) -> Result<Self, StoreError> {
        if let Some(driver) = settings.driver.as_deref() {
            if !driver.trim().eq_ignore_ascii_case("sqlite") {
                return Err(StoreError::Connect {
                    target: driver.to_string(),
                    reason: "unsupported driver".to_string(),
                });
            }
        }

        let path = settings.database_path().ok_or_else(|| StoreError::Connect {
            target: settings.server.clone().unwrap_or_default(),
            reason: "LOGGER_DB_NAME is not set".to_string(),
        })?;
        let target = path.display().to_string();

        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(&path, flags)
            .map_err(|e| classify_connect(&target, e))?;

        // Opening is lazy; reading the header proves the file is a database.
        conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
            .map_err(|e| classify_connect(&target, e))?;

        tracing::debug!(target: super::DIAGNOSTIC_TARGET, database = %target, "Connected to log database");
        Ok(Self { conn })
    }

    /// Use an already open connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl LogStore for SqliteStore {
    fn insert_row(&mut self, table: &str, row: &LogRow) -> Result<(), StoreError> {
        let mut stmt = self
            .conn
            .prepare_cached(&insert_statement(table))
            .map_err(classify)?;

        stmt.execute(params![
            row.log_level,
            row.log_levelname,
            row.log_module,
            row.log_func,
            row.log,
            row.script,
            row.created_at,
            row.created_by,
            row.pathname,
            row.process_id,
        ])
        .map_err(classify)?;
        Ok(())
    }
}

/// `INSERT INTO [main].[table] ([col], ...) VALUES (?1, ...)`
pub fn insert_statement(table: &str) -> String {
    let header = COLUMNS
        .iter()
        .map(|c| format!("[{c}]"))
        .collect::<Vec<_>>()
        .join(", ");
    let parameters = (1..=COLUMNS.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("INSERT INTO [{SCHEMA}].[{table}] ({header}) VALUES ({parameters})")
}

fn is_auth_code(code: ErrorCode) -> bool {
    matches!(
        code,
        ErrorCode::AuthorizationForStatementDenied | ErrorCode::PermissionDenied
    )
}

/// Map a statement failure onto [`StoreError`].
pub fn classify(err: rusqlite::Error) -> StoreError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _) if is_auth_code(e.code) => {
            StoreError::AuthenticationRejected(err.to_string())
        }
        rusqlite::Error::SqliteFailure(..) | rusqlite::Error::SqlInputError { .. } => {
            StoreError::Insert(err.to_string())
        }
        rusqlite::Error::ToSqlConversionFailure(_)
        | rusqlite::Error::InvalidParameterCount(..)
        | rusqlite::Error::InvalidParameterName(_)
        | rusqlite::Error::IntegralValueOutOfRange(..) => StoreError::Parameters(err.to_string()),
        _ => StoreError::Unexpected(err.to_string()),
    }
}

fn classify_connect(target: &str, err: rusqlite::Error) -> StoreError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _) if is_auth_code(e.code) => {
            StoreError::AuthenticationRejected(err.to_string())
        }
        _ => StoreError::Connect {
            target: target.to_string(),
            reason: err.to_string(),
        },
    }
}
