use async_trait::async_trait;
use crate::errors::PlanixError;
use crate::analysis::scoring::SEVERITY_SYSTEM_PROMPT;
use super::provider::LLMProvider;
use super::types::LLMResponse;

/// Offline provider answering with a fixed, well-formed report. Used when
/// running without network access or API keys.
pub struct DemoProvider;

const DEMO_SEVERITY: &str = "5";

const DEMO_REPORT: &str = "\
EXECUTIVE SUMMARY
Offline demonstration report. Replace the `demo` provider with a real one
to get an analysis tailored to this project.

SYSTEM ARCHITECTURE
- Multi-tier architecture with presentation, application, and data layers
- Secure API gateway enforcing authentication and rate limiting
- Encrypted data storage using industry-standard cryptography
- Logging and monitoring pipeline for audit and incident response

THREAT MODEL (STRIDE + OWASP)
- Spoofing: enforce MFA and token-based identity
- Tampering: input validation and integrity checks
- Repudiation: centralized immutable audit logs
- Information Disclosure: encryption in transit and at rest
- Denial of Service: WAF and throttling controls
- Elevation of Privilege: RBAC with least privilege principles

SECURE SDLC
- Threat modeling checkpoints during requirements
- Secure design reviews before implementation
- Static code analysis and dependency scanning in CI
- Pre-deployment penetration testing

COST ESTIMATION
- Development effort: medium complexity, three to five engineer months
- Hosting: scalable cloud deployment
- Optional managed security services

SECURITY TESTING PLAN
- SAST, DAST and SCA toolchain
- API fuzz testing and business logic abuse detection
- Automated regression security suite
";

#[async_trait]
impl LLMProvider for DemoProvider {
    async fn complete(&self, _prompt: &str, system: Option<&str>) -> Result<LLMResponse, PlanixError> {
        let content = if system == Some(SEVERITY_SYSTEM_PROMPT) {
            DEMO_SEVERITY
        } else {
            DEMO_REPORT
        };
        Ok(LLMResponse::text(content, "demo"))
    }

    fn provider_name(&self) -> &str { "demo" }
    fn model_name(&self) -> &str { "demo" }
}
