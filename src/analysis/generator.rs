use std::time::Instant;
use chrono::{DateTime, Utc};
use crate::errors::RetryConfig;
use crate::llm::{self, LLMProvider};
use crate::models::{Analysis, Project, ReportSections};
use super::parser::parse_report;
use super::prompts::{PromptLoader, REPORT_PROMPT};
use super::scoring::{score_project, HybridScore, SCORING_VERSION};
use tracing::{info, warn};

pub const SYSTEM_PROMPT: &str =
    "You are a senior security architect. Answer with the requested section headers in order.";

/// Result of one generation run before it is stored.
#[derive(Debug, Clone)]
pub struct GeneratedAnalysis {
    pub analysis: Analysis,
    pub score: HybridScore,
    /// Raw provider text, empty when generation failed.
    pub raw_report: String,
}

/// Ask the provider for the report text. Failures degrade to an empty report.
pub async fn generate_report(
    llm: &dyn LLMProvider,
    prompts: &PromptLoader,
    project: &Project,
    retry: &RetryConfig,
) -> String {
    let prompt = match prompts.render(REPORT_PROMPT, project) {
        Ok(p) => p,
        Err(e) => {
            warn!(project_id = %project.id, error = %e, "Report prompt unavailable");
            return String::new();
        }
    };

    match llm::generate_text(llm, &prompt, Some(SYSTEM_PROMPT), retry).await {
        Ok(text) => text,
        Err(e) => {
            warn!(
                project_id = %project.id,
                provider = llm.provider_name(),
                error = %e,
                "Report generation failed, storing empty sections"
            );
            String::new()
        }
    }
}

/// Run the full flow for one project: report, parse, score. The returned
/// record is complete and ready for a single insert.
pub async fn generate_analysis(
    llm: &dyn LLMProvider,
    prompts: &PromptLoader,
    retry: &RetryConfig,
    project: &Project,
    id: &str,
    now: DateTime<Utc>,
) -> GeneratedAnalysis {
    let started = Instant::now();
    info!(project_id = %project.id, provider = llm.provider_name(), model = llm.model_name(), "Generating analysis");

    let raw_report = generate_report(llm, prompts, project, retry).await;
    let sections = if raw_report.is_empty() {
        ReportSections::default()
    } else {
        parse_report(&raw_report)
    };
    if sections.is_empty() && !raw_report.is_empty() {
        warn!(project_id = %project.id, "Provider output contained no recognised section headers");
    }

    let score = score_project(llm, prompts, project, retry).await;

    info!(
        project_id = %project.id,
        analysis_id = id,
        rule_score = score.rule_score,
        ai_adjustment = score.ai_adjustment,
        security_score = score.security_score,
        category = %score.risk_category,
        duration_ms = started.elapsed().as_millis() as u64,
        "Analysis generated"
    );

    let analysis = Analysis {
        id: id.to_string(),
        project_id: project.id.clone(),
        owner: project.owner.clone(),
        sections,
        security_score: score.security_score,
        risk_category: score.risk_category,
        scoring_version: SCORING_VERSION,
        created_at: now,
    };

    GeneratedAnalysis { analysis, score, raw_report }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PlanixError;
    use crate::llm::scripted::ScriptedProvider;
    use crate::models::{Platform, RiskCategory, RiskLevel};

    fn project() -> Project {
        Project {
            id: "p-1".to_string(),
            owner: "u-1".to_string(),
            name: "Ledger".to_string(),
            description: "Payments API".to_string(),
            platform: Platform::Api,
            tech_stack: "Rust, Postgres".to_string(),
            scale: "medium".to_string(),
            budget: 20000,
            risk_level: RiskLevel::Medium,
            created_at: Utc::now(),
        }
    }

    const REPORT: &str = "EXECUTIVE SUMMARY\nFine overall.\nSYSTEM ARCHITECTURE\nTwo tiers.\nTHREAT MODEL\nSpoofing.\n";

    #[tokio::test]
    async fn test_generate_analysis_parses_and_scores() {
        let llm = ScriptedProvider::new(vec![Ok(REPORT.to_string()), Ok("4".to_string())]);
        let generated = generate_analysis(
            &llm, &PromptLoader::default(), &RetryConfig::none(), &project(), "a-1", Utc::now(),
        ).await;

        let a = &generated.analysis;
        assert_eq!(a.sections.executive_summary, "Fine overall.");
        assert_eq!(a.sections.architecture, "Two tiers.");
        assert_eq!(a.sections.threat_model, "Spoofing.");
        assert_eq!(a.sections.testing_plan, "");
        assert_eq!(generated.score.ai_adjustment, 4);
        assert_eq!(a.security_score, generated.score.security_score);
        assert_eq!(a.risk_category, RiskCategory::from_score(a.security_score));
        assert_eq!(a.scoring_version, SCORING_VERSION);
        assert_eq!(a.owner, "u-1");
        assert_eq!(llm.prompts().len(), 2);
    }

    #[tokio::test]
    async fn test_provider_failure_degrades() {
        let llm = ScriptedProvider::new(vec![
            Err(PlanixError::Authentication("bad key".into())),
            Err(PlanixError::Authentication("bad key".into())),
        ]);
        let p = project();
        let generated = generate_analysis(
            &llm, &PromptLoader::default(), &RetryConfig::none(), &p, "a-2", Utc::now(),
        ).await;

        assert!(generated.analysis.sections.is_empty());
        assert!(generated.raw_report.is_empty());
        assert_eq!(generated.score.ai_adjustment, 0);
        assert_eq!(generated.analysis.security_score, crate::analysis::scoring::rule_score(&p));
    }

    #[tokio::test]
    async fn test_sentinel_text_is_not_parsed() {
        let llm = ScriptedProvider::new(vec![
            Ok("AI Error: quota exhausted".to_string()),
            Ok("ERROR: timeout".to_string()),
        ]);
        let generated = generate_analysis(
            &llm, &PromptLoader::default(), &RetryConfig::none(), &project(), "a-3", Utc::now(),
        ).await;
        assert!(generated.analysis.sections.is_empty());
        assert_eq!(generated.score.ai_adjustment, 0);
    }
}
