use serde::Serialize;
use crate::errors::RetryConfig;
use crate::llm::{self, LLMProvider};
use crate::models::{Platform, Project, RiskCategory, RiskLevel};
use super::prompts::{PromptLoader, SEVERITY_PROMPT};
use tracing::{debug, warn};

/// Bumped whenever the weights or category thresholds change, so stored
/// categories from older rules can be recognised as stale.
pub const SCORING_VERSION: u32 = 1;

/// System prompt sent with every severity request. Prompt overrides in
/// `prompts_dir` replace the user prompt only.
pub const SEVERITY_SYSTEM_PROMPT: &str =
    "You are a security risk assessor. Reply with a single integer from 1 to 10.";

const UNDERFUNDED_PENALTY: i32 = 20;
const FUNDED_BONUS: i32 = -10;
const MAX_AI_ADJUSTMENT: u8 = 10;

pub fn risk_level_weight(level: RiskLevel) -> i32 {
    match level {
        RiskLevel::Low => 10,
        RiskLevel::Medium => 40,
        RiskLevel::High => 70,
        RiskLevel::Unknown => 20,
    }
}

pub fn platform_weight(platform: Platform) -> i32 {
    match platform {
        Platform::Api | Platform::Cloud => 20,
        Platform::Iot => 25,
        Platform::Mobile | Platform::Web => 10,
        Platform::Other | Platform::Unknown => 5,
    }
}

/// Scale is free text; only small/medium/large (any case) carry a specific weight.
pub fn scale_weight(scale: &str) -> i32 {
    match scale.to_lowercase().as_str() {
        "small" => 5,
        "medium" => 10,
        "large" => 20,
        _ => 10,
    }
}

/// Minimum budget considered adequate for a scale tier.
pub fn expected_budget(scale: &str) -> u64 {
    match scale.to_lowercase().as_str() {
        "small" => 20_000,
        "medium" => 50_000,
        "large" => 120_000,
        _ => 0,
    }
}

fn clamp_score(score: i64) -> u8 {
    score.clamp(0, 100) as u8
}

/// Deterministic weighted score in [0, 100].
pub fn rule_score(project: &Project) -> u8 {
    let mut score = risk_level_weight(project.risk_level)
        + platform_weight(project.platform)
        + scale_weight(&project.scale);

    if project.budget < expected_budget(&project.scale) {
        score += UNDERFUNDED_PENALTY;
    } else {
        score += FUNDED_BONUS;
    }

    clamp_score(score as i64)
}

/// Read a 0–10 severity from free-form provider output by joining every
/// decimal digit it contains. Returns `None` when there are no digits.
pub fn parse_severity(response: &str) -> Option<u8> {
    let digits: String = response.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let significant = digits.trim_start_matches('0');
    if significant.len() > 2 {
        return Some(MAX_AI_ADJUSTMENT);
    }
    let value: u8 = if significant.is_empty() { 0 } else { significant.parse().ok()? };
    Some(value.min(MAX_AI_ADJUSTMENT))
}

/// Ask the provider to rate severity 1–10. Any failure yields 0.
pub async fn ai_adjustment(
    llm: &dyn LLMProvider,
    prompts: &PromptLoader,
    project: &Project,
    retry: &RetryConfig,
) -> u8 {
    let prompt = match prompts.render(SEVERITY_PROMPT, project) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "Severity prompt unavailable, using 0");
            return 0;
        }
    };
    match llm::generate_text(llm, &prompt, Some(SEVERITY_SYSTEM_PROMPT), retry).await {
        Ok(text) => match parse_severity(&text) {
            Some(value) => {
                debug!(project_id = %project.id, adjustment = value, "AI severity parsed");
                value
            }
            None => {
                warn!(project_id = %project.id, "AI severity response had no digits, using 0");
                0
            }
        },
        Err(e) => {
            warn!(project_id = %project.id, error = %e, "AI severity request failed, using 0");
            0
        }
    }
}

/// `rule + adjustment * 2`, clamped to [0, 100].
pub fn final_score(rule: u8, adjustment: u8) -> u8 {
    clamp_score(rule as i64 + adjustment as i64 * 2)
}

/// Breakdown of a hybrid score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HybridScore {
    pub rule_score: u8,
    pub ai_adjustment: u8,
    pub security_score: u8,
    pub risk_category: RiskCategory,
}

impl HybridScore {
    pub fn combine(rule_score: u8, ai_adjustment: u8) -> Self {
        let security_score = final_score(rule_score, ai_adjustment);
        Self {
            rule_score,
            ai_adjustment,
            security_score,
            risk_category: RiskCategory::from_score(security_score),
        }
    }
}

pub async fn score_project(
    llm: &dyn LLMProvider,
    prompts: &PromptLoader,
    project: &Project,
    retry: &RetryConfig,
) -> HybridScore {
    let rule = rule_score(project);
    let adjustment = ai_adjustment(llm, prompts, project, retry).await;
    HybridScore::combine(rule, adjustment)
}
