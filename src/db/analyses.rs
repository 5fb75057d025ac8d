use rusqlite::OptionalExtension;
use crate::analysis::SCORING_VERSION;
use crate::errors::PlanixError;
use crate::models::{Analysis, ReportSections, RiskCategory};
use super::Database;
use super::connection::{from_db_time, to_db_time};

const ANALYSIS_COLUMNS: &str = "id, project_id, owner, executive_summary, architecture, threat_model, \
    cost_estimation, sdls_recommendations, testing_plan, security_score, risk_category, scoring_version, created_at";

struct AnalysisRow {
    id: String,
    project_id: String,
    owner: String,
    sections: ReportSections,
    security_score: i64,
    risk_category: String,
    scoring_version: i64,
    created_at: String,
}

impl AnalysisRow {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            project_id: row.get(1)?,
            owner: row.get(2)?,
            sections: ReportSections {
                executive_summary: row.get(3)?,
                architecture: row.get(4)?,
                threat_model: row.get(5)?,
                cost_estimation: row.get(6)?,
                sdls_recommendations: row.get(7)?,
                testing_plan: row.get(8)?,
            },
            security_score: row.get(9)?,
            risk_category: row.get(10)?,
            scoring_version: row.get(11)?,
            created_at: row.get(12)?,
        })
    }

    /// Stored categories are a snapshot of the rules in force when they were
    /// computed; older rows get theirs recomputed from the stored score.
    fn into_analysis(self) -> Result<Analysis, PlanixError> {
        let security_score = self.security_score.clamp(0, 100) as u8;
        let scoring_version = self.scoring_version.max(0) as u32;
        let risk_category = if scoring_version == SCORING_VERSION {
            RiskCategory::from_label(&self.risk_category)
        } else {
            RiskCategory::from_score(security_score)
        };
        Ok(Analysis {
            created_at: from_db_time(&self.created_at)?,
            id: self.id,
            project_id: self.project_id,
            owner: self.owner,
            sections: self.sections,
            security_score,
            risk_category,
            scoring_version,
        })
    }
}

impl Database {
    /// Persist a fully scored analysis in one statement.
    pub fn insert_analysis(&self, analysis: &Analysis) -> Result<(), PlanixError> {
        let conn = self.lock()?;
        let s = &analysis.sections;
        conn.execute(
            &format!(
                "INSERT INTO analyses ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                ANALYSIS_COLUMNS
            ),
            rusqlite::params![
                analysis.id,
                analysis.project_id,
                analysis.owner,
                s.executive_summary,
                s.architecture,
                s.threat_model,
                s.cost_estimation,
                s.sdls_recommendations,
                s.testing_plan,
                analysis.security_score.min(100) as i64,
                analysis.risk_category.as_str(),
                analysis.scoring_version as i64,
                to_db_time(&analysis.created_at),
            ],
        ).map_err(|e| PlanixError::Database(format!("Failed to insert analysis: {}", e)))?;
        Ok(())
    }

    /// An analysis owned by someone else is reported as absent.
    pub fn get_analysis(&self, owner: &str, id: &str) -> Result<Option<Analysis>, PlanixError> {
        let conn = self.lock()?;
        let row = conn.query_row(
            &format!("SELECT {} FROM analyses WHERE id = ?1 AND owner = ?2", ANALYSIS_COLUMNS),
            rusqlite::params![id, owner],
            AnalysisRow::from_row,
        ).optional()
            .map_err(|e| PlanixError::Database(format!("Query failed: {}", e)))?;

        row.map(AnalysisRow::into_analysis).transpose()
    }

    /// All analyses of one project, ordered by creation time.
    pub fn list_analyses(
        &self,
        owner: &str,
        project_id: &str,
        newest_first: bool,
    ) -> Result<Vec<Analysis>, PlanixError> {
        let order = if newest_first { "DESC" } else { "ASC" };
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM analyses WHERE project_id = ?1 AND owner = ?2 ORDER BY created_at {order}, rowid {order}",
            ANALYSIS_COLUMNS
        )).map_err(|e| PlanixError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map(rusqlite::params![project_id, owner], AnalysisRow::from_row)
            .map_err(|e| PlanixError::Database(format!("Query failed: {}", e)))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| PlanixError::Database(format!("Row read failed: {}", e)))?;

        rows.into_iter().map(AnalysisRow::into_analysis).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use crate::models::{Platform, Project, ProjectDraft, RiskLevel};

    fn setup() -> (Database, String, Project) {
        let db = Database::in_memory().unwrap();
        let user = db.create_user("alice").unwrap();
        let project = db.create_project(&user.id, ProjectDraft {
            name: "Fleet".to_string(),
            description: String::new(),
            platform: Platform::Iot,
            tech_stack: "MQTT".to_string(),
            scale: "large".to_string(),
            budget: 50000,
            risk_level: RiskLevel::High,
        }).unwrap();
        (db, user.id, project)
    }

    fn analysis(project: &Project, id: &str, score: u8, minutes_ago: i64) -> Analysis {
        Analysis {
            id: id.to_string(),
            project_id: project.id.clone(),
            owner: project.owner.clone(),
            sections: ReportSections {
                executive_summary: format!("Summary {}", id),
                ..Default::default()
            },
            security_score: score,
            risk_category: RiskCategory::from_score(score),
            scoring_version: SCORING_VERSION,
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn test_insert_and_get() {
        let (db, owner, project) = setup();
        let a = analysis(&project, "a-1", 72, 0);
        db.insert_analysis(&a).unwrap();

        let fetched = db.get_analysis(&owner, "a-1").unwrap().unwrap();
        assert_eq!(fetched.sections, a.sections);
        assert_eq!(fetched.security_score, 72);
        assert_eq!(fetched.risk_category, RiskCategory::High);
        assert_eq!(fetched.created_at, a.created_at);
    }

    #[test]
    fn test_foreign_owner_sees_nothing() {
        let (db, _owner, project) = setup();
        let bob = db.create_user("bob").unwrap();
        db.insert_analysis(&analysis(&project, "a-1", 50, 0)).unwrap();

        assert!(db.get_analysis(&bob.id, "a-1").unwrap().is_none());
        assert!(db.list_analyses(&bob.id, &project.id, true).unwrap().is_empty());
    }

    #[test]
    fn test_list_ordering() {
        let (db, owner, project) = setup();
        db.insert_analysis(&analysis(&project, "old", 40, 30)).unwrap();
        db.insert_analysis(&analysis(&project, "new", 60, 1)).unwrap();
        db.insert_analysis(&analysis(&project, "mid", 50, 10)).unwrap();

        let newest: Vec<String> = db.list_analyses(&owner, &project.id, true).unwrap()
            .into_iter().map(|a| a.id).collect();
        assert_eq!(newest, vec!["new", "mid", "old"]);

        let oldest: Vec<String> = db.list_analyses(&owner, &project.id, false).unwrap()
            .into_iter().map(|a| a.id).collect();
        assert_eq!(oldest, vec!["old", "mid", "new"]);
    }

    #[test]
    fn test_stale_category_is_recomputed() {
        let (db, owner, project) = setup();
        let mut a = analysis(&project, "legacy", 75, 0);
        a.risk_category = RiskCategory::Unknown;
        a.scoring_version = 0;
        db.insert_analysis(&a).unwrap();

        let fetched = db.get_analysis(&owner, "legacy").unwrap().unwrap();
        assert_eq!(fetched.risk_category, RiskCategory::High);
    }

    #[test]
    fn test_current_category_is_kept() {
        let (db, owner, project) = setup();
        let mut a = analysis(&project, "snap", 75, 0);
        a.risk_category = RiskCategory::Medium;
        db.insert_analysis(&a).unwrap();

        let fetched = db.get_analysis(&owner, "snap").unwrap().unwrap();
        assert_eq!(fetched.risk_category, RiskCategory::Medium);
    }

    #[test]
    fn test_unknown_project_rejected_by_foreign_key() {
        let (db, owner, project) = setup();
        let mut a = analysis(&project, "orphan", 10, 0);
        a.project_id = "missing".to_string();
        a.owner = owner;
        assert!(db.insert_analysis(&a).is_err());
    }
}
