//! Report compilation and PDF export.
//!
//! Compiles the profile and the analysis lists into a read-only document and
//! writes it as a multi-page A4 PDF with a file name derived from the
//! company name.

mod pdf;

use std::path::{Path, PathBuf};

use crate::model::Profile;
use crate::store::AnalysisStore;

/// File name used when the company name is blank.
const FALLBACK_STEM: &str = "Analisis_Konteks";

/// Export error types.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("there is nothing to export yet")]
    EmptyReport,

    #[error("PDF rendering failed: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One report section: a heading plus its bullets.
#[derive(Debug, Clone)]
pub struct ReportSection {
    pub heading: String,
    pub bullets: Vec<String>,
}

/// The compiled, read-only report.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub title: String,
    pub subtitle: String,
    /// Profile rows shown under the title: (label, value)
    pub meta: Vec<(String, String)>,
    pub sections: Vec<ReportSection>,
    /// Stem for the output file, derived from the company name
    pub file_stem: String,
}

impl ReportDocument {
    /// Compile the current session state into a report.
    ///
    /// TOWS strategies are ordered descending by priority; ties keep their
    /// generation order (stable sort).
    pub fn compile(profile: &Profile, store: &AnalysisStore) -> Self {
        let meta = vec![
            ("Company".to_string(), profile.company_name.clone()),
            ("Sector".to_string(), profile.sector.resolved_text().to_string()),
            ("Unit".to_string(), profile.unit_name.clone()),
            ("Date".to_string(), profile.analysis_date.clone()),
            (
                "Prepared by".to_string(),
                format!("{} ({})", profile.analyst_name, profile.analyst_title),
            ),
        ];

        let mut sections = Vec::new();
        for (block, categories) in [
            ("SWOT", crate::model::Category::SWOT.as_slice()),
            ("PESTLE", crate::model::Category::PESTLE.as_slice()),
        ] {
            for category in categories {
                let bullets = store
                    .list(*category)
                    .iter()
                    .map(|f| {
                        format!("{} [{} / P{}]", f.text, f.impact.label(), f.priority)
                    })
                    .collect();
                sections.push(ReportSection {
                    heading: format!("{block} - {}", category.title()),
                    bullets,
                });
            }
        }

        let tows_bullets = store
            .tows_by_priority()
            .iter()
            .map(|s| {
                format!(
                    "[{}] {} [{} / P{}]",
                    s.category.key().to_uppercase(),
                    s.text,
                    s.impact.label(),
                    s.priority
                )
            })
            .collect();
        sections.push(ReportSection {
            heading: "TOWS Strategies (by priority)".to_string(),
            bullets: tows_bullets,
        });

        Self {
            title: "Analisis Konteks Organisasi".to_string(),
            subtitle: "ISO 9001:2015 clause 4.1".to_string(),
            meta,
            sections,
            file_stem: file_stem(&profile.company_name),
        }
    }

    /// Whether any section has content.
    pub fn has_content(&self) -> bool {
        self.sections.iter().any(|s| !s.bullets.is_empty())
    }
}

/// Derive the file stem from the company name: whitespace runs collapse to a
/// single `_`; a blank name falls back to a fixed literal.
fn file_stem(company_name: &str) -> String {
    let joined = company_name.split_whitespace().collect::<Vec<_>>().join("_");
    if joined.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        joined
    }
}

/// Write the report as `<stem>.pdf` inside `dir`.
///
/// The PDF is rendered fully in memory first, so a failure never leaves a
/// partial file behind.
pub fn export_pdf(report: &ReportDocument, dir: &Path) -> Result<PathBuf, ExportError> {
    if !report.has_content() {
        return Err(ExportError::EmptyReport);
    }
    let bytes = pdf::render(report)?;
    let path = dir.join(format!("{}.pdf", report.file_stem));
    std::fs::write(&path, bytes)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Sector, TowsCategory};
    use crate::store::TowsUpdate;

    fn profile() -> Profile {
        Profile {
            analyst_name: "Rina".into(),
            analyst_title: "QMR".into(),
            analysis_date: "2026-08-28".into(),
            company_name: "PT Maju Sejahtera".into(),
            sector: Sector::Manufaktur,
            unit_name: "Produksi".into(),
        }
    }

    #[test]
    fn test_file_stem_collapses_whitespace_runs() {
        assert_eq!(file_stem("PT Maju   Sejahtera"), "PT_Maju_Sejahtera");
        assert_eq!(file_stem("  Single "), "Single");
        assert!(!file_stem("a \t b\nc").contains(' '));
    }

    #[test]
    fn test_file_stem_blank_falls_back() {
        assert_eq!(file_stem(""), FALLBACK_STEM);
        assert_eq!(file_stem("   "), FALLBACK_STEM);
    }

    #[test]
    fn test_compile_orders_tows_stably_by_priority() {
        let mut store = AnalysisStore::new();
        store.replace_tows(&[
            (TowsCategory::So, vec!["low".into(), "tie one".into()]),
            (TowsCategory::Wt, vec!["tie two".into()]),
        ]);
        store.update_tows_strategy(0, TowsUpdate::Priority(1));
        store.update_tows_strategy(1, TowsUpdate::Priority(4));
        store.update_tows_strategy(2, TowsUpdate::Priority(4));

        let report = ReportDocument::compile(&profile(), &store);
        let tows = &report.sections.last().unwrap().bullets;
        assert!(tows[0].contains("tie one"));
        assert!(tows[1].contains("tie two"), "equal priorities must keep generation order");
        assert!(tows[2].contains("low"));
    }

    #[test]
    fn test_export_empty_report_fails_without_file() {
        let store = AnalysisStore::new();
        let report = ReportDocument::compile(&profile(), &store);
        let dir = tempfile::tempdir().unwrap();

        let err = export_pdf(&report, dir.path()).unwrap_err();
        assert!(matches!(err, ExportError::EmptyReport));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0, "no partial file");
    }

    #[test]
    fn test_export_writes_named_pdf() {
        let mut store = AnalysisStore::new();
        store.add_factor(crate::model::Category::Strengths, "certified line");
        let report = ReportDocument::compile(&profile(), &store);
        let dir = tempfile::tempdir().unwrap();

        let path = export_pdf(&report, dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "PT_Maju_Sejahtera.pdf");
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"), "output is not a PDF");
    }
}
