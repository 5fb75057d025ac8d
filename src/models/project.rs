use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::errors::PlanixError;

const MAX_TEXT_FIELD: usize = 255;

/// Deployment platform of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Web,
    Mobile,
    Api,
    Iot,
    Cloud,
    Other,
    /// A stored value this build does not recognise.
    Unknown,
}

impl Platform {
    pub const ALL: [Platform; 6] = [
        Platform::Web,
        Platform::Mobile,
        Platform::Api,
        Platform::Iot,
        Platform::Cloud,
        Platform::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Web => "web",
            Platform::Mobile => "mobile",
            Platform::Api => "api",
            Platform::Iot => "iot",
            Platform::Cloud => "cloud",
            Platform::Other => "other",
            Platform::Unknown => "unknown",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Platform::Web => "Web Application",
            Platform::Mobile => "Mobile App",
            Platform::Api => "API Service",
            Platform::Iot => "IoT System",
            Platform::Cloud => "Cloud Infrastructure",
            Platform::Other => "Other",
            Platform::Unknown => "Unknown",
        }
    }

    /// Strict parse used for user input; unrecognised values are rejected.
    pub fn parse(value: &str) -> Result<Self, PlanixError> {
        match Self::from(value) {
            Platform::Unknown => Err(PlanixError::Validation(format!(
                "Unknown platform '{}', expected one of: web, mobile, api, iot, cloud, other",
                value
            ))),
            platform => Ok(platform),
        }
    }
}

impl From<&str> for Platform {
    fn from(value: &str) -> Self {
        match value {
            "web" => Platform::Web,
            "mobile" => Platform::Mobile,
            "api" => Platform::Api,
            "iot" => Platform::Iot,
            "cloud" => Platform::Cloud,
            "other" => Platform::Other,
            _ => Platform::Unknown,
        }
    }
}

/// Self-assessed risk level of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Unknown,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Unknown => "unknown",
        }
    }

    pub fn parse(value: &str) -> Result<Self, PlanixError> {
        match Self::from(value) {
            RiskLevel::Unknown => Err(PlanixError::Validation(format!(
                "Unknown risk level '{}', expected one of: low, medium, high",
                value
            ))),
            level => Ok(level),
        }
    }
}

impl From<&str> for RiskLevel {
    fn from(value: &str) -> Self {
        match value {
            "low" => RiskLevel::Low,
            "medium" => RiskLevel::Medium,
            "high" => RiskLevel::High,
            _ => RiskLevel::Unknown,
        }
    }
}

/// Project attributes as submitted by the owner, before they are stored.
#[derive(Debug, Clone)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub platform: Platform,
    pub tech_stack: String,
    pub scale: String,
    pub budget: u64,
    pub risk_level: RiskLevel,
}

impl ProjectDraft {
    /// Field-level validation mirroring the create-project form.
    pub fn validate(&self) -> Result<(), PlanixError> {
        if self.name.trim().is_empty() {
            return Err(PlanixError::Validation("name must not be empty".into()));
        }
        for (field, value) in [
            ("name", &self.name),
            ("tech_stack", &self.tech_stack),
            ("scale", &self.scale),
        ] {
            if value.chars().count() > MAX_TEXT_FIELD {
                return Err(PlanixError::Validation(format!(
                    "{} must be at most {} characters",
                    field, MAX_TEXT_FIELD
                )));
            }
        }
        if self.platform == Platform::Unknown {
            return Err(PlanixError::Validation("platform is required".into()));
        }
        if self.risk_level == RiskLevel::Unknown {
            return Err(PlanixError::Validation("risk_level is required".into()));
        }
        Ok(())
    }
}

/// A stored project owned by a single user.
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: String,
    pub owner: String,
    pub name: String,
    pub description: String,
    pub platform: Platform,
    pub tech_stack: String,
    pub scale: String,
    pub budget: u64,
    pub risk_level: RiskLevel,
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Build an unsaved project from a draft, e.g. for headless analysis.
    pub fn from_draft(id: &str, owner: &str, draft: ProjectDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.to_string(),
            owner: owner.to_string(),
            name: draft.name,
            description: draft.description,
            platform: draft.platform,
            tech_stack: draft.tech_stack,
            scale: draft.scale,
            budget: draft.budget,
            risk_level: draft.risk_level,
            created_at,
        }
    }
}
