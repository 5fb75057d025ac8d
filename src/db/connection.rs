use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use chrono::{DateTime, SecondsFormat, Utc};
use crate::errors::PlanixError;

pub struct Database {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn new(path: &str) -> Result<Self, PlanixError> {
        // Ensure parent directory exists
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)
            .map_err(|e| PlanixError::Database(format!("Failed to open database: {}", e)))?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .map_err(|e| PlanixError::Database(format!("Failed to set pragmas: {}", e)))?;

        let db = Self { conn: Arc::new(Mutex::new(conn)) };
        db.initialize()?;
        Ok(db)
    }

    pub fn in_memory() -> Result<Self, PlanixError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| PlanixError::Database(format!("Failed to open in-memory db: {}", e)))?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")
            .map_err(|e| PlanixError::Database(format!("Failed to set pragmas: {}", e)))?;
        let db = Self { conn: Arc::new(Mutex::new(conn)) };
        db.initialize()?;
        Ok(db)
    }

    fn initialize(&self) -> Result<(), PlanixError> {
        let conn = self.lock()?;
        conn.execute_batch(super::schema::CREATE_TABLES)
            .map_err(|e| PlanixError::Database(format!("Failed to create tables: {}", e)))?;
        Ok(())
    }

    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, Connection>, PlanixError> {
        self.conn.lock()
            .map_err(|_| PlanixError::Database("Connection lock poisoned".into()))
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self { conn: self.conn.clone() }
    }
}

/// Fixed-width UTC timestamp so lexical order in SQLite matches time order.
pub(crate) fn to_db_time(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn from_db_time(value: &str) -> Result<DateTime<Utc>, PlanixError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| PlanixError::Database(format!("Bad timestamp '{}': {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_database_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("planix.db");
        let db = Database::new(path.to_str().unwrap()).unwrap();
        drop(db);
        assert!(path.exists());
    }

    #[test]
    fn test_timestamps_are_fixed_width() {
        let a = DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z").unwrap().with_timezone(&Utc);
        let b = DateTime::parse_from_rfc3339("2024-05-01T10:00:00.5Z").unwrap().with_timezone(&Utc);
        let (sa, sb) = (to_db_time(&a), to_db_time(&b));
        assert_eq!(sa.len(), sb.len());
        assert!(sa < sb);
        assert_eq!(from_db_time(&sb).unwrap(), b);
    }
}
