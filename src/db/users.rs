use chrono::Utc;
use rusqlite::OptionalExtension;
use crate::errors::PlanixError;
use crate::models::User;
use super::Database;
use super::connection::{from_db_time, to_db_time};

impl Database {
    /// Register a user and mint a fresh API token.
    pub fn create_user(&self, username: &str) -> Result<User, PlanixError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(PlanixError::Validation("username must not be empty".into()));
        }

        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            username: username.to_string(),
            api_token: uuid::Uuid::new_v4().simple().to_string(),
            created_at: Utc::now(),
        };

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO users (id, username, api_token, created_at) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![user.id, user.username, user.api_token, to_db_time(&user.created_at)],
        ).map_err(|e| match e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                PlanixError::Validation(format!("user '{}' already exists", user.username))
            }
            other => PlanixError::Database(format!("Failed to create user: {}", other)),
        })?;
        Ok(user)
    }

    pub fn user_by_token(&self, token: &str) -> Result<Option<User>, PlanixError> {
        let conn = self.lock()?;
        let row = conn.query_row(
            "SELECT id, username, api_token, created_at FROM users WHERE api_token = ?1",
            rusqlite::params![token],
            |row| Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            )),
        ).optional()
            .map_err(|e| PlanixError::Database(format!("Query failed: {}", e)))?;

        match row {
            Some((id, username, api_token, created_at)) => Ok(Some(User {
                id,
                username,
                api_token,
                created_at: from_db_time(&created_at)?,
            })),
            None => Ok(None),
        }
    }
}
