use chrono::Utc;
use rusqlite::OptionalExtension;
use crate::errors::PlanixError;
use crate::models::{Platform, Project, ProjectDraft, RiskLevel};
use super::Database;
use super::connection::{from_db_time, to_db_time};

const PROJECT_COLUMNS: &str =
    "id, owner, name, description, platform, tech_stack, scale, budget, risk_level, created_at";

struct ProjectRow {
    id: String,
    owner: String,
    name: String,
    description: String,
    platform: String,
    tech_stack: String,
    scale: String,
    budget: i64,
    risk_level: String,
    created_at: String,
}

impl ProjectRow {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            owner: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            platform: row.get(4)?,
            tech_stack: row.get(5)?,
            scale: row.get(6)?,
            budget: row.get(7)?,
            risk_level: row.get(8)?,
            created_at: row.get(9)?,
        })
    }

    fn into_project(self) -> Result<Project, PlanixError> {
        Ok(Project {
            platform: Platform::from(self.platform.as_str()),
            risk_level: RiskLevel::from(self.risk_level.as_str()),
            budget: self.budget.max(0) as u64,
            created_at: from_db_time(&self.created_at)?,
            id: self.id,
            owner: self.owner,
            name: self.name,
            description: self.description,
            tech_stack: self.tech_stack,
            scale: self.scale,
        })
    }
}

impl Database {
    pub fn create_project(&self, owner: &str, draft: ProjectDraft) -> Result<Project, PlanixError> {
        draft.validate()?;
        let budget = i64::try_from(draft.budget)
            .map_err(|_| PlanixError::Validation("budget is too large".into()))?;
        let project = Project::from_draft(&uuid::Uuid::new_v4().to_string(), owner, draft, Utc::now());

        let conn = self.lock()?;
        conn.execute(
            &format!("INSERT INTO projects ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)", PROJECT_COLUMNS),
            rusqlite::params![
                project.id,
                project.owner,
                project.name,
                project.description,
                project.platform.as_str(),
                project.tech_stack,
                project.scale,
                budget,
                project.risk_level.as_str(),
                to_db_time(&project.created_at),
            ],
        ).map_err(|e| PlanixError::Database(format!("Failed to create project: {}", e)))?;
        Ok(project)
    }

    /// A project owned by someone else is reported as absent.
    pub fn get_project(&self, owner: &str, id: &str) -> Result<Option<Project>, PlanixError> {
        let conn = self.lock()?;
        let row = conn.query_row(
            &format!("SELECT {} FROM projects WHERE id = ?1 AND owner = ?2", PROJECT_COLUMNS),
            rusqlite::params![id, owner],
            ProjectRow::from_row,
        ).optional()
            .map_err(|e| PlanixError::Database(format!("Query failed: {}", e)))?;
        row.map(ProjectRow::into_project).transpose()
    }

    /// The owner's projects, newest first.
    pub fn list_projects(&self, owner: &str) -> Result<Vec<Project>, PlanixError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            &format!("SELECT {} FROM projects WHERE owner = ?1 ORDER BY created_at DESC, rowid DESC", PROJECT_COLUMNS)
        ).map_err(|e| PlanixError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map(rusqlite::params![owner], ProjectRow::from_row)
            .map_err(|e| PlanixError::Database(format!("Query failed: {}", e)))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| PlanixError::Database(format!("Row read failed: {}", e)))?;

        rows.into_iter().map(ProjectRow::into_project).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> ProjectDraft {
        ProjectDraft {
            name: name.to_string(),
            description: "Customer portal".to_string(),
            platform: Platform::Web,
            tech_stack: "Django, Postgres".to_string(),
            scale: "small".to_string(),
            budget: 5000,
            risk_level: RiskLevel::Low,
        }
    }

    #[test]
    fn test_create_and_get_project() {
        let db = Database::in_memory().unwrap();
        let user = db.create_user("alice").unwrap();
        let created = db.create_project(&user.id, draft("Portal")).unwrap();

        let fetched = db.get_project(&user.id, &created.id).unwrap().unwrap();
        assert_eq!(fetched.name, "Portal");
        assert_eq!(fetched.platform, Platform::Web);
        assert_eq!(fetched.risk_level, RiskLevel::Low);
        assert_eq!(fetched.budget, 5000);
        assert_eq!(fetched.created_at, created.created_at);
    }

    #[test]
    fn test_other_owner_sees_nothing() {
        let db = Database::in_memory().unwrap();
        let alice = db.create_user("alice").unwrap();
        let bob = db.create_user("bob").unwrap();
        let project = db.create_project(&alice.id, draft("Portal")).unwrap();

        assert!(db.get_project(&bob.id, &project.id).unwrap().is_none());
        assert!(db.list_projects(&bob.id).unwrap().is_empty());
    }

    #[test]
    fn test_list_newest_first() {
        let db = Database::in_memory().unwrap();
        let user = db.create_user("alice").unwrap();
        db.create_project(&user.id, draft("First")).unwrap();
        db.create_project(&user.id, draft("Second")).unwrap();

        let names: Vec<String> = db.list_projects(&user.id).unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Second", "First"]);
    }

    #[test]
    fn test_invalid_draft_rejected() {
        let db = Database::in_memory().unwrap();
        let user = db.create_user("alice").unwrap();
        let err = db.create_project(&user.id, draft("")).unwrap_err();
        assert!(matches!(err, PlanixError::Validation(_)));
    }
}
