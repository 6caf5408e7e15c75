//! Log table schema.

use crate::errors::{LoggingError, LoggingResult};
use rusqlite::Connection;

/// Table names are bracket-quoted into SQL, so they may not contain `]`.
pub fn validate_table_name(table: &str) -> LoggingResult<()> {
    if table.trim().is_empty() || table.contains(']') || table.contains('\0') {
        return Err(LoggingError::InvalidTable(table.to_string()));
    }
    Ok(())
}

fn create_table_sql(table: &str) -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS [{table}] (
    id INTEGER PRIMARY KEY,
    log_level INTEGER NOT NULL,
    log_levelname TEXT NOT NULL,
    log_module TEXT,
    log_func TEXT,
    log TEXT,
    script TEXT,
    created_at TEXT NOT NULL,
    created_by TEXT,
    pathname TEXT,
    process_id INTEGER
)
"#
    )
}

/// Create the log table if it is missing.
pub fn create_log_table(conn: &Connection, table: &str) -> LoggingResult<()> {
    validate_table_name(table)?;
    conn.execute(&create_table_sql(table), [])
        .map_err(|e| LoggingError::Schema {
            table: table.to_string(),
            reason: e.to_string(),
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_log_table(&conn, "transfer_data_log").unwrap();
        create_log_table(&conn, "transfer_data_log").unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                ["transfer_data_log"],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_rejects_unquotable_names() {
        assert!(validate_table_name("logs").is_ok());
        assert!(validate_table_name("log table").is_ok());
        assert!(validate_table_name("x]; DROP TABLE y; --").is_err());
        assert!(validate_table_name("  ").is_err());
    }
}
