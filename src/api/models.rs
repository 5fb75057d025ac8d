use serde::Deserialize;
use crate::errors::PlanixError;
use crate::models::{Platform, ProjectDraft, RiskLevel};

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub platform: String,
    #[serde(default)]
    pub tech_stack: String,
    #[serde(default)]
    pub scale: String,
    #[serde(default)]
    pub budget: i64,
    pub risk_level: String,
}

impl CreateProjectRequest {
    pub fn into_draft(self) -> Result<ProjectDraft, PlanixError> {
        if self.budget < 0 {
            return Err(PlanixError::Validation("budget must not be negative".into()));
        }
        let draft = ProjectDraft {
            platform: Platform::parse(&self.platform)?,
            risk_level: RiskLevel::parse(&self.risk_level)?,
            budget: self.budget as u64,
            name: self.name,
            description: self.description,
            tech_stack: self.tech_stack,
            scale: self.scale,
        };
        draft.validate()?;
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateProjectRequest {
        serde_json::from_value(serde_json::json!({
            "name": "Portal",
            "platform": "web",
            "risk_level": "medium",
            "budget": 1000
        })).unwrap()
    }

    #[test]
    fn test_defaults_fill_optional_fields() {
        let draft = request().into_draft().unwrap();
        assert_eq!(draft.description, "");
        assert_eq!(draft.budget, 1000);
        assert_eq!(draft.platform, Platform::Web);
    }

    #[test]
    fn test_negative_budget_rejected() {
        let mut req = request();
        req.budget = -1;
        assert!(matches!(req.into_draft(), Err(PlanixError::Validation(_))));
    }

    #[test]
    fn test_unknown_platform_rejected() {
        let mut req = request();
        req.platform = "desktop".to_string();
        assert!(req.into_draft().is_err());
    }
}
