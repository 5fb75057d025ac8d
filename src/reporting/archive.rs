use std::collections::HashMap;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};
use crate::errors::PlanixError;
use crate::models::Analysis;
use super::formatter::{render_text, slugify};

pub const EMPTY_ARCHIVE_MESSAGE: &str = "No analyses available to export.";

pub fn archive_name(project_name: &str) -> String {
    format!("{}_analysis_history.zip", slugify(project_name))
}

/// Entry names `<slug>_<YYYY-MM-DD_HH-MM>.md`; analyses created in the same
/// minute get `_2`, `_3`, ... appended, which sorts after the unsuffixed
/// name.
pub fn entry_names(project_name: &str, analyses: &[Analysis]) -> Vec<String> {
    let slug = slugify(project_name);
    let mut seen: HashMap<String, usize> = HashMap::new();

    analyses.iter().map(|a| {
        let stem = format!("{}_{}", slug, a.created_at.format("%Y-%m-%d_%H-%M"));
        let count = seen.entry(stem.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            format!("{}.md", stem)
        } else {
            format!("{}_{}.md", stem, count)
        }
    }).collect()
}

/// Build an in-memory deflated zip with one Markdown entry per analysis, in
/// the order given.
pub fn build_archive(project_name: &str, analyses: &[Analysis]) -> Result<Vec<u8>, PlanixError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, analysis) in entry_names(project_name, analyses).into_iter().zip(analyses) {
        writer.start_file(name.as_str(), options)
            .map_err(|e| PlanixError::Export(format!("Failed to add {}: {}", name, e)))?;
        writer.write_all(render_text(analysis, project_name).as_bytes())?;
    }

    let cursor = writer.finish()
        .map_err(|e| PlanixError::Export(format!("Failed to finish archive: {}", e)))?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use chrono::{TimeZone, Utc};
    use crate::models::{ReportSections, RiskCategory};

    fn analysis(id: &str, hour: u32, minute: u32, second: u32) -> Analysis {
        Analysis {
            id: id.to_string(),
            project_id: "p-1".to_string(),
            owner: "u-1".to_string(),
            sections: ReportSections {
                executive_summary: format!("Run {}", id),
                ..Default::default()
            },
            security_score: 55,
            risk_category: RiskCategory::Medium,
            scoring_version: 1,
            created_at: Utc.with_ymd_and_hms(2024, 3, 9, hour, minute, second).unwrap(),
        }
    }

    #[test]
    fn test_archive_name() {
        assert_eq!(archive_name("Payments API"), "payments-api_analysis_history.zip");
    }

    #[test]
    fn test_same_minute_names_are_unique() {
        let analyses = vec![analysis("a", 8, 5, 1), analysis("b", 8, 5, 40), analysis("c", 9, 0, 0)];
        let names = entry_names("Portal", &analyses);
        assert_eq!(names, vec![
            "portal_2024-03-09_08-05.md",
            "portal_2024-03-09_08-05_2.md",
            "portal_2024-03-09_09-00.md",
        ]);
    }

    #[test]
    fn test_names_sort_in_creation_order() {
        let analyses = vec![
            analysis("a", 8, 5, 1),
            analysis("b", 8, 5, 20),
            analysis("c", 8, 5, 40),
            analysis("d", 8, 6, 0),
        ];
        let names = entry_names("Portal", &analyses);
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(sorted, names);
    }

    #[test]
    fn test_archive_contents() {
        let analyses = vec![analysis("a", 8, 0, 0), analysis("b", 9, 0, 0), analysis("c", 10, 0, 0)];
        let bytes = build_archive("Portal", &analyses).unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 3);
        for (i, id) in ["a", "b", "c"].iter().enumerate() {
            let mut entry = archive.by_index(i).unwrap();
            assert_eq!(entry.compression(), CompressionMethod::Deflated);
            let mut body = String::new();
            entry.read_to_string(&mut body).unwrap();
            assert!(body.contains("Security Analysis Report"));
            assert!(body.contains(&format!("Run {}", id)));
        }
    }
}
