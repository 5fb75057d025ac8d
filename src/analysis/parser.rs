use crate::models::ReportSections;

pub const EXECUTIVE_SUMMARY: &str = "EXECUTIVE SUMMARY";
pub const SYSTEM_ARCHITECTURE: &str = "SYSTEM ARCHITECTURE";
pub const THREAT_MODEL: &str = "THREAT MODEL";
pub const SECURE_SDLC: &str = "SECURE SDLC";
pub const COST_ESTIMATION: &str = "COST ESTIMATION";
pub const SECURITY_TESTING_PLAN: &str = "SECURITY TESTING PLAN";

/// Known section headers in declaration order.
pub const SECTION_HEADERS: [&str; 6] = [
    EXECUTIVE_SUMMARY,
    SYSTEM_ARCHITECTURE,
    THREAT_MODEL,
    SECURE_SDLC,
    COST_ESTIMATION,
    SECURITY_TESTING_PLAN,
];

/// Prefixes a provider uses to signal that no report is available.
pub const FAILURE_SENTINELS: [&str; 3] = ["ERROR:", "API Error:", "AI Error:"];

pub fn is_failure_sentinel(text: &str) -> bool {
    let trimmed = text.trim_start();
    FAILURE_SENTINELS.iter().any(|s| trimmed.starts_with(s))
}

/// Indentation and Markdown heading/emphasis marks.
fn is_heading_mark(c: char) -> bool {
    c.is_whitespace() || matches!(c, '#' | '*' | '_')
}

fn line_start(text: &str, pos: usize) -> usize {
    text[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

/// Whether `pos` begins its line once heading marks and at most one list
/// number (`2.` or `3)` followed by whitespace) are skipped. Bare digits do
/// not count, so "10 SECURITY TESTING PLAN reviews" stays body prose.
fn starts_line(text: &str, pos: usize) -> bool {
    let prefix = text[line_start(text, pos)..pos].trim_start_matches(is_heading_mark);
    if prefix.is_empty() {
        return true;
    }
    let after_digits = prefix.trim_start_matches(|c: char| c.is_ascii_digit());
    if after_digits.len() == prefix.len() {
        return false;
    }
    match after_digits.strip_prefix(['.', ')']) {
        Some(rest) => rest.starts_with(char::is_whitespace) && rest.chars().all(is_heading_mark),
        None => false,
    }
}

/// Byte offset of the first occurrence of `header` at or after `from` that
/// begins a line.
fn find_header(text: &str, header: &str, from: usize) -> Option<usize> {
    let mut search = from;
    while let Some(rel) = text[search..].find(header) {
        let pos = search + rel;
        if starts_line(text, pos) {
            return Some(pos);
        }
        search = pos + header.len();
    }
    None
}

/// Extract the text that follows `header` up to the next known header.
///
/// Returns an empty string when the header is missing. Headers are matched
/// case-sensitively and only where they begin a line, so a header mentioned
/// inside body prose never splits a section. Known headers equal to, or
/// contained in, `header` are never treated as terminators.
pub fn extract_section(full_text: &str, header: &str) -> String {
    if header.is_empty() {
        return String::new();
    }
    let Some(start) = find_header(full_text, header, 0) else {
        return String::new();
    };
    let body_start = start + header.len();

    let end = SECTION_HEADERS
        .iter()
        .filter(|other| **other != header && !header.contains(**other))
        .filter_map(|other| find_header(full_text, other, body_start))
        .min()
        // the next header's heading marks belong to it, not to this section
        .map(|pos| line_start(full_text, pos).max(body_start))
        .unwrap_or(full_text.len());

    full_text[body_start..end]
        .trim_start_matches(['*', '_', ':'])
        .trim()
        .to_string()
}

/// Split a generated report into its six named sections.
pub fn parse_report(text: &str) -> ReportSections {
    if is_failure_sentinel(text) {
        return ReportSections::default();
    }
    ReportSections {
        executive_summary: extract_section(text, EXECUTIVE_SUMMARY),
        architecture: extract_section(text, SYSTEM_ARCHITECTURE),
        threat_model: extract_section(text, THREAT_MODEL),
        cost_estimation: extract_section(text, COST_ESTIMATION),
        sdls_recommendations: extract_section(text, SECURE_SDLC),
        testing_plan: extract_section(text, SECURITY_TESTING_PLAN),
    }
}
