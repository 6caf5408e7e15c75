use crate::logging::database::create_log_table;
use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

/// Create `table` in the database at `path`, creating the file if needed.
pub fn init_database(path: &Path, table: &str) -> Result<()> {
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open database {}", path.display()))?;
    create_log_table(&conn, table)?;
    println!("Created log table {} in {}", table, path.display());
    Ok(())
}
