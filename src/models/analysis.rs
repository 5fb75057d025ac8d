use chrono::{DateTime, Utc};
use serde::Serialize;

/// Coarse three-tier label derived from a security score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RiskCategory {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Medium Risk")]
    Medium,
    #[serde(rename = "High Risk")]
    High,
    /// Default for a record that has not been scored.
    #[serde(rename = "Unknown")]
    Unknown,
}

impl RiskCategory {
    pub fn from_score(score: u8) -> Self {
        if score >= 70 {
            RiskCategory::High
        } else if score >= 40 {
            RiskCategory::Medium
        } else {
            RiskCategory::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low Risk",
            RiskCategory::Medium => "Medium Risk",
            RiskCategory::High => "High Risk",
            RiskCategory::Unknown => "Unknown",
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label {
            "Low Risk" => RiskCategory::Low,
            "Medium Risk" => RiskCategory::Medium,
            "High Risk" => RiskCategory::High,
            _ => RiskCategory::Unknown,
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six named regions extracted from a generated report. Any of them
/// may be empty when the provider output lacked the matching header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportSections {
    pub executive_summary: String,
    pub architecture: String,
    pub threat_model: String,
    pub cost_estimation: String,
    pub sdls_recommendations: String,
    pub testing_plan: String,
}

impl ReportSections {
    pub fn is_empty(&self) -> bool {
        self.executive_summary.is_empty()
            && self.architecture.is_empty()
            && self.threat_model.is_empty()
            && self.cost_estimation.is_empty()
            && self.sdls_recommendations.is_empty()
            && self.testing_plan.is_empty()
    }
}

/// One stored, timestamped result of a report-generation run.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub id: String,
    pub project_id: String,
    pub owner: String,
    #[serde(flatten)]
    pub sections: ReportSections,
    pub security_score: u8,
    pub risk_category: RiskCategory,
    /// Version of the scoring rules that produced `risk_category`.
    pub scoring_version: u32,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_boundaries() {
        assert_eq!(RiskCategory::from_score(0), RiskCategory::Low);
        assert_eq!(RiskCategory::from_score(39), RiskCategory::Low);
        assert_eq!(RiskCategory::from_score(40), RiskCategory::Medium);
        assert_eq!(RiskCategory::from_score(69), RiskCategory::Medium);
        assert_eq!(RiskCategory::from_score(70), RiskCategory::High);
        assert_eq!(RiskCategory::from_score(100), RiskCategory::High);
    }

    #[test]
    fn test_category_label_roundtrip() {
        for category in [RiskCategory::Low, RiskCategory::Medium, RiskCategory::High, RiskCategory::Unknown] {
            assert_eq!(RiskCategory::from_label(category.as_str()), category);
        }
        assert_eq!(RiskCategory::from_label("Severe"), RiskCategory::Unknown);
    }

    #[test]
    fn test_category_serializes_as_label() {
        assert_eq!(serde_json::to_value(RiskCategory::Medium).unwrap(), "Medium Risk");
    }

    #[test]
    fn test_sections_flatten_into_analysis_json() {
        let analysis = Analysis {
            id: "a-1".to_string(),
            project_id: "p-1".to_string(),
            owner: "u-1".to_string(),
            sections: ReportSections {
                architecture: "Three tiers".to_string(),
                ..Default::default()
            },
            security_score: 55,
            risk_category: RiskCategory::Medium,
            scoring_version: 1,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["architecture"], "Three tiers");
        assert_eq!(json["threat_model"], "");
        assert_eq!(json["risk_category"], "Medium Risk");
    }
}
