// ==========================================
// Banking Data Loader - SQLite connection setup
// ==========================================
// Goal:
// - one place for Connection::open so every connection gets the
//   same PRAGMA behavior (foreign_keys in particular - referential
//   integrity at commit depends on it)
// - connection string comes from the process environment, not
//   from ambient global state
// ==========================================

use crate::error::{ImportError, ImportResult};
use rusqlite::Connection;
use std::time::Duration;

/// Environment variable holding the connection string.
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";

/// Default busy_timeout (milliseconds).
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Resolve the connection string from the environment.
pub fn database_url_from_env() -> ImportResult<String> {
    std::env::var(ENV_DATABASE_URL).map_err(|_| ImportError::ConfigError {
        key: ENV_DATABASE_URL.to_string(),
        message: "not set in the process environment".to_string(),
    })
}

/// Apply the uniform PRAGMAs to a connection.
///
/// foreign_keys and busy_timeout are per-connection settings in
/// SQLite and must be applied on every open.
pub fn configure_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open a connection to the given database and apply the uniform
/// configuration. The connection is released when dropped, on every
/// exit path.
pub fn open_connection(database_url: &str) -> ImportResult<Connection> {
    let conn = Connection::open(database_url)
        .map_err(|e| ImportError::DatabaseError(format!("cannot open {}: {}", database_url, e)))?;
    configure_connection(&conn)?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreign_keys_enabled() {
        let conn = Connection::open_in_memory().unwrap();
        configure_connection(&conn).unwrap();

        let fk: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }
}
