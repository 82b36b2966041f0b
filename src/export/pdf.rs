//! A4 pagination and PDF rendering for the compiled report.

use std::io::BufWriter;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use super::{ExportError, ReportDocument};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;

const TITLE_PT: f32 = 18.0;
const HEADING_PT: f32 = 12.0;
const BODY_PT: f32 = 10.0;

/// Max characters per body line before wrapping. Conservative for Helvetica
/// at 10pt inside the margins.
const WRAP_COLUMNS: usize = 92;

/// One laid-out line, before pagination.
struct TextLine {
    text: String,
    size_pt: f32,
    bold: bool,
    /// Vertical advance after this line, in mm
    leading_mm: f32,
}

fn line(text: impl Into<String>, size_pt: f32, bold: bool, leading_mm: f32) -> TextLine {
    TextLine { text: text.into(), size_pt, bold, leading_mm }
}

/// Flatten the report into a line sequence.
fn layout(report: &ReportDocument) -> Vec<TextLine> {
    let mut lines = Vec::new();
    lines.push(line(&report.title, TITLE_PT, true, 9.0));
    lines.push(line(&report.subtitle, BODY_PT, false, 8.0));

    for (label, value) in &report.meta {
        lines.push(line(format!("{label}: {value}"), BODY_PT, false, 5.0));
    }
    lines.push(line("", BODY_PT, false, 4.0));

    for section in &report.sections {
        lines.push(line(&section.heading, HEADING_PT, true, 7.0));
        if section.bullets.is_empty() {
            lines.push(line("  (none)", BODY_PT, false, 5.0));
        }
        for bullet in &section.bullets {
            let mut first = true;
            for part in wrap(bullet, WRAP_COLUMNS) {
                let prefix = if first { "  - " } else { "    " };
                lines.push(line(format!("{prefix}{part}"), BODY_PT, false, 5.0));
                first = false;
            }
        }
        lines.push(line("", BODY_PT, false, 3.0));
    }
    lines
}

/// Greedy word wrap; a single over-long word stays on its own line.
fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > columns {
            out.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        out.push(current);
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

/// Render the report into PDF bytes.
pub fn render(report: &ReportDocument) -> Result<Vec<u8>, ExportError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        report.title.as_str(),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "content",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Render(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Render(e.to_string()))?;

    let mut layer: PdfLayerReference = doc.get_page(first_page).get_layer(first_layer);
    let mut cursor_mm = PAGE_HEIGHT_MM - MARGIN_MM;

    for text_line in layout(report) {
        // Page break before the line would cross the bottom margin
        if cursor_mm - text_line.leading_mm < MARGIN_MM {
            let (page, new_layer) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "content");
            layer = doc.get_page(page).get_layer(new_layer);
            cursor_mm = PAGE_HEIGHT_MM - MARGIN_MM;
        }
        if !text_line.text.is_empty() {
            let font: &IndirectFontRef = if text_line.bold { &bold } else { &regular };
            layer.use_text(
                text_line.text.as_str(),
                text_line.size_pt,
                Mm(MARGIN_MM),
                Mm(cursor_mm),
                font,
            );
        }
        cursor_mm -= text_line.leading_mm;
    }

    let mut bytes = Vec::new();
    doc.save(&mut BufWriter::new(&mut bytes)).map_err(|e| ExportError::Render(e.to_string()))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Profile;
    use crate::store::AnalysisStore;

    /// Number of A4 pages the given lines occupy, mirroring the break
    /// condition in `render`.
    fn page_count(lines: &[TextLine]) -> usize {
        let mut pages = 1;
        let mut cursor_mm = PAGE_HEIGHT_MM - MARGIN_MM;
        for text_line in lines {
            if cursor_mm - text_line.leading_mm < MARGIN_MM {
                pages += 1;
                cursor_mm = PAGE_HEIGHT_MM - MARGIN_MM;
            }
            cursor_mm -= text_line.leading_mm;
        }
        pages
    }

    #[test]
    fn test_wrap_splits_on_word_boundaries() {
        let wrapped = wrap("alpha beta gamma delta", 11);
        assert_eq!(wrapped, vec!["alpha beta", "gamma delta"]);
    }

    #[test]
    fn test_wrap_keeps_overlong_word_whole() {
        let wrapped = wrap("supercalifragilistic", 5);
        assert_eq!(wrapped, vec!["supercalifragilistic"]);
    }

    #[test]
    fn test_layout_wraps_long_bullets_with_hanging_indent() {
        let mut store = AnalysisStore::new();
        let long = "word ".repeat(40);
        store.add_factor(crate::model::Category::Strengths, &long);
        let report = crate::export::ReportDocument::compile(&Profile::default(), &store);

        let lines = layout(&report);
        let continuation =
            lines.iter().find(|l| l.text.starts_with("    ") && !l.text.trim().is_empty());
        assert!(continuation.is_some(), "long bullet did not wrap");
    }

    #[test]
    fn test_large_reports_span_multiple_pages() {
        let mut store = AnalysisStore::new();
        for i in 0..120 {
            store.add_factor(crate::model::Category::Strengths, &format!("factor {i}"));
        }
        let report = crate::export::ReportDocument::compile(&Profile::default(), &store);

        // 120 body lines at ~5mm each cannot fit one A4 page
        let lines = layout(&report);
        assert!(page_count(&lines) > 1);

        let bytes = render(&report).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
