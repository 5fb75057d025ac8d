use std::path::PathBuf;
use crate::errors::PlanixError;
use crate::models::Project;
use tracing::debug;

pub const REPORT_PROMPT: &str = "report";
pub const SEVERITY_PROMPT: &str = "severity";

const REPORT_TEMPLATE: &str = "\
Generate a secure system analysis for:
Name: {{NAME}}
Description: {{DESCRIPTION}}
Platform: {{PLATFORM}}
Tech Stack: {{TECH_STACK}}
Scale: {{SCALE}}
Budget: {{BUDGET}}
Risk Level: {{RISK_LEVEL}}

Structure the answer into exactly these sections, each introduced by its
header in uppercase on a line of its own, in this order:

EXECUTIVE SUMMARY
SYSTEM ARCHITECTURE
THREAT MODEL
SECURE SDLC
COST ESTIMATION
SECURITY TESTING PLAN

Cover the system architecture, a threat model (STRIDE + OWASP relevance),
cost estimation guidance, recommended secure SDLC practices, and a security
testing plan with tool recommendations.
";

const SEVERITY_TEMPLATE: &str = "\
Rate the security risk severity of this system on a scale from 1 to 10.
Return ONLY a number, no words.

System Details:
Name: {{NAME}}
Description: {{DESCRIPTION}}
Platform: {{PLATFORM}}
Tech Stack: {{TECH_STACK}}
Risk Level: {{RISK_LEVEL}}
Scale: {{SCALE}}
Budget: {{BUDGET}}
";

/// Variables available for template interpolation in prompt files.
#[derive(Debug, Clone, Default)]
pub struct PromptVariables {
    pub name: String,
    pub description: String,
    pub platform: String,
    pub tech_stack: String,
    pub scale: String,
    pub budget: String,
    pub risk_level: String,
}

impl From<&Project> for PromptVariables {
    fn from(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            description: project.description.clone(),
            platform: project.platform.as_str().to_string(),
            tech_stack: project.tech_stack.clone(),
            scale: project.scale.clone(),
            budget: project.budget.to_string(),
            risk_level: project.risk_level.as_str().to_string(),
        }
    }
}

impl PromptVariables {
    fn get(&self, placeholder: &str) -> Option<&str> {
        let value = match placeholder {
            "NAME" => &self.name,
            "DESCRIPTION" => &self.description,
            "PLATFORM" => &self.platform,
            "TECH_STACK" => &self.tech_stack,
            "SCALE" => &self.scale,
            "BUDGET" => &self.budget,
            "RISK_LEVEL" => &self.risk_level,
            _ => return None,
        };
        Some(value.as_str())
    }
}

/// Loads prompt templates, preferring `<dir>/<name>.txt` overrides over the
/// built-in wording.
#[derive(Debug, Clone, Default)]
pub struct PromptLoader {
    prompts_dir: Option<PathBuf>,
}

impl PromptLoader {
    pub fn new(prompts_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = &prompts_dir {
            debug!(dir = %dir.display(), "PromptLoader initialized with overrides");
        }
        Self { prompts_dir }
    }

    /// Load a prompt template by name (without .txt extension).
    pub fn load(&self, prompt_name: &str) -> Result<String, PlanixError> {
        if let Some(dir) = &self.prompts_dir {
            let file_path = dir.join(format!("{}.txt", prompt_name));
            if file_path.exists() {
                return std::fs::read_to_string(&file_path).map_err(|e| {
                    PlanixError::Config(format!("Failed to read prompt {}: {}", file_path.display(), e))
                });
            }
        }
        match prompt_name {
            REPORT_PROMPT => Ok(REPORT_TEMPLATE.to_string()),
            SEVERITY_PROMPT => Ok(SEVERITY_TEMPLATE.to_string()),
            other => Err(PlanixError::Config(format!("Unknown prompt: {}", other))),
        }
    }

    /// Replace {{VARIABLE}} placeholders with values from PromptVariables.
    ///
    /// Single pass over the template: substituted values are never scanned
    /// again, and unknown placeholders are kept as written.
    pub fn interpolate(&self, template: &str, vars: &PromptVariables) -> String {
        let mut result = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(open) = rest.find("{{") {
            result.push_str(&rest[..open]);
            let after = &rest[open + 2..];
            let Some(close) = after.find("}}") else {
                rest = &rest[open..];
                break;
            };
            let name = &after[..close];
            match vars.get(name) {
                Some(value) => result.push_str(value),
                None => {
                    result.push_str("{{");
                    result.push_str(name);
                    result.push_str("}}");
                }
            }
            rest = &after[close + 2..];
        }
        result.push_str(rest);
        result
    }

    pub fn render(&self, prompt_name: &str, project: &Project) -> Result<String, PlanixError> {
        let template = self.load(prompt_name)?;
        Ok(self.interpolate(&template, &PromptVariables::from(project)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Platform, RiskLevel};
    use chrono::Utc;

    fn project() -> Project {
        Project {
            id: "p-1".to_string(),
            owner: "u-1".to_string(),
            name: "Clinic Portal".to_string(),
            description: "Patient bookings".to_string(),
            platform: Platform::Web,
            tech_stack: "Django, React".to_string(),
            scale: "medium".to_string(),
            budget: 45_000,
            risk_level: RiskLevel::Medium,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_report_prompt_lists_headers_and_fields() {
        let prompt = PromptLoader::default().render(REPORT_PROMPT, &project()).unwrap();
        assert!(prompt.contains("Name: Clinic Portal"));
        assert!(prompt.contains("Budget: 45000"));
        for header in crate::analysis::parser::SECTION_HEADERS {
            assert!(prompt.contains(header), "missing header {}", header);
        }
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn test_severity_prompt_asks_for_number() {
        let prompt = PromptLoader::default().render(SEVERITY_PROMPT, &project()).unwrap();
        assert!(prompt.contains("Return ONLY a number"));
        assert!(prompt.contains("Risk Level: medium"));
    }

    #[test]
    fn test_override_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("severity.txt"), "Score {{NAME}} 1-10").unwrap();
        let loader = PromptLoader::new(Some(dir.path().to_path_buf()));
        assert_eq!(loader.render(SEVERITY_PROMPT, &project()).unwrap(), "Score Clinic Portal 1-10");
        // no override for the report prompt, falls back to built-in
        assert!(loader.render(REPORT_PROMPT, &project()).unwrap().contains("EXECUTIVE SUMMARY"));
    }

    #[test]
    fn test_placeholders_in_values_are_left_alone() {
        let mut p = project();
        p.name = "My {{DESCRIPTION}} app".to_string();
        p.description = "SECRET".to_string();
        let prompt = PromptLoader::default().render(REPORT_PROMPT, &p).unwrap();
        assert!(prompt.contains("Name: My {{DESCRIPTION}} app"));
        assert!(prompt.contains("Description: SECRET"));
    }

    #[test]
    fn test_unknown_and_unclosed_placeholders_kept() {
        let vars = PromptVariables { name: "Portal".to_string(), ..Default::default() };
        let out = PromptLoader::default().interpolate("{{NAME}} {{OTHER}} {{NAME", &vars);
        assert_eq!(out, "Portal {{OTHER}} {{NAME");
    }

    #[test]
    fn test_unknown_prompt_is_error() {
        assert!(PromptLoader::default().load("nonexistent").is_err());
    }
}
