use chrono::{DateTime, Utc};
use serde::Serialize;

/// A caller identity. `id` is the owner key on projects and analyses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub api_token: String,
    pub created_at: DateTime<Utc>,
}
