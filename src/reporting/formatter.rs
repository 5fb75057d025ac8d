use crate::models::Analysis;

pub const REPORT_TITLE: &str = "Security Analysis Report";

fn heading(out: &mut String, title: &str, underline: char) {
    out.push_str(title);
    out.push('\n');
    out.extend(std::iter::repeat(underline).take(title.chars().count()));
    out.push('\n');
}

/// Ordered (title, body) pairs as they appear in an export.
pub fn export_sections(analysis: &Analysis) -> [(&'static str, &str); 6] {
    let s = &analysis.sections;
    [
        ("Executive Summary", s.executive_summary.as_str()),
        ("System Architecture", s.architecture.as_str()),
        ("Threat Model", s.threat_model.as_str()),
        ("Secure SDLC Recommendations", s.sdls_recommendations.as_str()),
        ("Cost Estimation", s.cost_estimation.as_str()),
        ("Security Testing Plan", s.testing_plan.as_str()),
    ]
}

/// Plain-text rendering shared by the Markdown, text, PDF and zip exports.
pub fn render_text(analysis: &Analysis, project_name: &str) -> String {
    let mut out = String::new();
    heading(&mut out, REPORT_TITLE, '=');
    out.push('\n');
    out.push_str(&format!("Project: {}\n", project_name));
    out.push_str(&format!("Date: {}\n", analysis.created_at.format("%Y-%m-%d %H:%M:%S UTC")));
    out.push_str(&format!(
        "Security Score: {} ({})\n",
        analysis.security_score, analysis.risk_category
    ));

    for (title, body) in export_sections(analysis) {
        out.push('\n');
        heading(&mut out, title, '-');
        out.push_str(body.trim());
        out.push('\n');
    }

    out.trim().to_string()
}

/// ASCII slug for file names: lower-case, punctuation dropped, runs of
/// whitespace and hyphens collapsed to one hyphen.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;

    for c in value.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' {
            pending_dash = true;
        }
    }

    let slug = slug.trim_matches(|c| c == '-' || c == '_');
    if slug.is_empty() {
        "project".to_string()
    } else {
        slug.to_string()
    }
}
