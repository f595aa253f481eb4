//! Database layer for the skeleton service.

pub mod healthchecks;

use crate::config::DatabaseDsn;
use anyhow::{Result, bail};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Database handle wrapping a SQLite connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Connect using the resolved DSN.
    ///
    /// Understands `sqlite://{path}` and `sqlite::memory:`. Other schemes
    /// pass config validation (which is syntactic) but are rejected here:
    /// this skeleton ships a SQLite backend only.
    pub fn connect(dsn: &DatabaseDsn) -> Result<Self> {
        if dsn.scheme() != "sqlite" {
            bail!(
                "unsupported database scheme '{}': this skeleton ships a SQLite backend",
                dsn.scheme()
            );
        }

        let raw = dsn.as_str();
        let rest = raw
            .strip_prefix("sqlite://")
            .or_else(|| raw.strip_prefix("sqlite:"))
            .unwrap_or("");

        if rest.is_empty() || rest == ":memory:" {
            Self::open_in_memory()
        } else {
            Self::open(rest)
        }
    }

    /// Open or create the database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Enable WAL mode for concurrent access
        conn.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA foreign_keys=ON;
             PRAGMA busy_timeout=5000;",
        )?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.run_migrations()?;

        Ok(db)
    }

    /// Open an in-memory database (for testing and `sqlite::memory:` DSNs).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;

        conn.execute_batch("PRAGMA foreign_keys=ON;")?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.run_migrations()?;

        Ok(db)
    }

    /// Run database migrations.
    fn run_migrations(&self) -> Result<()> {
        let mut conn = self.conn.lock().unwrap();
        embedded::migrations::runner().run(&mut *conn)?;
        Ok(())
    }

    /// Execute a function with exclusive access to the connection.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock().unwrap();
        f(&conn)
    }
}

/// Get the current timestamp in milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseDsn;
    use tempfile::TempDir;

    #[test]
    fn test_connect_in_memory_dsn() {
        let dsn = DatabaseDsn::parse("sqlite::memory:").unwrap();
        let db = Database::connect(&dsn).unwrap();
        let count = db
            .with_conn(|conn| {
                let n: i64 =
                    conn.query_row("SELECT COUNT(*) FROM healthchecks", [], |row| row.get(0))?;
                Ok(n)
            })
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_connect_file_dsn_creates_database() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("svc.db");
        let dsn = DatabaseDsn::parse(&format!("sqlite://{}", path.display())).unwrap();

        Database::connect(&dsn).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_connect_rejects_unsupported_scheme() {
        let dsn = DatabaseDsn::parse("postgres://localhost/db").unwrap();
        assert!(Database::connect(&dsn).is_err());
    }
}
