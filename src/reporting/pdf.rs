use printpdf::{BuiltinFont, Mm, PdfDocument};
use crate::errors::PlanixError;
use crate::models::Analysis;
use super::formatter::{render_text, REPORT_TITLE};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const LINE_HEIGHT: f32 = 5.0;
const FONT_SIZE: f32 = 10.0;
const WRAP_COLUMNS: usize = 90;

/// Greedy word wrap. Words longer than the width are split.
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    if line.trim().is_empty() {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let word: String = word.into_iter().collect();
        let needed = if current.is_empty() { word.chars().count() } else { current.chars().count() + 1 + word.chars().count() };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Built-in PDF fonts only cover Latin-1.
fn pdf_safe(line: &str) -> String {
    line.chars().map(|c| if (c as u32) < 0x100 && !c.is_control() { c } else { '?' }).collect()
}

/// Lay the text rendering out on A4 pages, adding pages as needed.
pub fn render_pdf(analysis: &Analysis, project_name: &str) -> Result<Vec<u8>, PlanixError> {
    let text = render_text(analysis, project_name);
    let lines: Vec<String> = text.lines().flat_map(|l| wrap_line(l, WRAP_COLUMNS)).collect();

    let (doc, first_page, first_layer) =
        PdfDocument::new(REPORT_TITLE, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let font = doc.add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| PlanixError::Export(format!("Failed to load PDF font: {}", e)))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = PAGE_HEIGHT - MARGIN;
    for line in lines {
        if y < MARGIN {
            let (page, page_layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            layer = doc.get_page(page).get_layer(page_layer);
            y = PAGE_HEIGHT - MARGIN;
        }
        if !line.is_empty() {
            layer.use_text(pdf_safe(&line), FONT_SIZE, Mm(MARGIN), Mm(y), &font);
        }
        y -= LINE_HEIGHT;
    }

    doc.save_to_bytes()
        .map_err(|e| PlanixError::Export(format!("Failed to write PDF: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::models::{ReportSections, RiskCategory};

    fn analysis(body: String) -> Analysis {
        Analysis {
            id: "a-1".to_string(),
            project_id: "p-1".to_string(),
            owner: "u-1".to_string(),
            sections: ReportSections { threat_model: body, ..Default::default() },
            security_score: 30,
            risk_category: RiskCategory::Low,
            scoring_version: 1,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_wrap_line() {
        assert_eq!(wrap_line("", 10), vec![""]);
        assert_eq!(wrap_line("alpha beta gamma", 10), vec!["alpha beta", "gamma"]);
        assert_eq!(wrap_line("abcdefghijkl", 5), vec!["abcde", "fghij", "kl"]);
    }

    #[test]
    fn test_wrapped_lines_fit() {
        let long = "word ".repeat(200);
        assert!(wrap_line(&long, WRAP_COLUMNS).iter().all(|l| l.chars().count() <= WRAP_COLUMNS));
    }

    #[test]
    fn test_pdf_header() {
        let bytes = render_pdf(&analysis("Spoofing of device identity.".to_string()), "Fleet").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_long_report_paginates() {
        let short = render_pdf(&analysis("One line.".to_string()), "Fleet").unwrap();
        let body = (0..300).map(|i| format!("Threat {}: replay of sensor frames", i)).collect::<Vec<_>>().join("\n");
        let long = render_pdf(&analysis(body), "Fleet").unwrap();
        assert!(long.starts_with(b"%PDF"));
        assert!(long.len() > short.len());
    }

    #[test]
    fn test_non_latin_text_is_replaced() {
        assert_eq!(pdf_safe("naïve → ok"), "naïve ? ok");
    }
}
