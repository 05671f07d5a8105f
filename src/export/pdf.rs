use printpdf::{BuiltinFont, Mm, PdfDocument};

use super::Report;
use crate::error::AppError;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const LEADING: f32 = 5.0;
const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 10.0;
const LINES_PER_PAGE: usize = 50;
/// Characters of 10pt Helvetica that fit between the margins.
const WRAP_COLUMNS: usize = 95;
const CONTINUATION: &str = "    ";
const LAYER: &str = "Report";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Line {
    pub text: String,
    pub heading: bool,
}

impl Line {
    fn body(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            heading: false,
        }
    }
}

/// A4 PDF: title, user and date lines, then one wrapped line per record.
pub struct PdfExporter;

impl PdfExporter {
    pub fn export(report: &Report) -> Result<Vec<u8>, AppError> {
        let pages = layout(report);
        let (doc, first_page, first_layer) =
            PdfDocument::new(report.title.as_str(), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AppError::Export(format!("Failed to load PDF font: {}", e)))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AppError::Export(format!("Failed to load PDF font: {}", e)))?;

        for (index, lines) in pages.iter().enumerate() {
            let (page, layer) = if index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER)
            };
            let canvas = doc.get_page(page).get_layer(layer);

            let mut y = PAGE_HEIGHT - MARGIN;
            for line in lines {
                let (size, font) = if line.heading {
                    (TITLE_SIZE, &bold)
                } else {
                    (BODY_SIZE, &regular)
                };
                canvas.use_text(line.text.as_str(), size, Mm(MARGIN), Mm(y), font);
                y -= if line.heading { LEADING * 1.6 } else { LEADING };
            }
        }

        doc.save_to_bytes()
            .map_err(|e| AppError::Export(format!("Failed to write PDF: {}", e)))
    }
}

/// Splits the report into pages of wrapped lines.
pub(crate) fn layout(report: &Report) -> Vec<Vec<Line>> {
    let mut lines = vec![
        Line {
            text: report.title.clone(),
            heading: true,
        },
        Line::body(report.user_line()),
        Line::body(report.generated_line()),
        Line::body(""),
    ];
    for numbered in report.numbered_lines() {
        lines.extend(wrap(&numbered, WRAP_COLUMNS).into_iter().map(Line::body));
    }
    if report.rows.is_empty() {
        lines.push(Line::body("No records."));
    }

    lines.chunks(LINES_PER_PAGE).map(<[Line]>::to_vec).collect()
}

/// Greedy word wrap; words longer than a line are split, continuation
/// lines are indented.
pub(crate) fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split(' ') {
        let mut word: Vec<char> = word.chars().collect();
        loop {
            let used = current.chars().count();
            let gap = usize::from(used > 0 && !current.ends_with(' '));
            if used + gap + word.len() <= width {
                if gap == 1 {
                    current.push(' ');
                }
                current.extend(word.iter());
                break;
            }
            if !current.trim().is_empty() {
                out.push(std::mem::replace(&mut current, CONTINUATION.to_string()));
                continue;
            }
            // the word alone overflows an empty line
            let room = width.saturating_sub(used).max(1);
            let rest = word.split_off(room.min(word.len()));
            current.extend(word.iter());
            out.push(std::mem::replace(&mut current, CONTINUATION.to_string()));
            word = rest;
            if word.is_empty() {
                break;
            }
        }
    }
    if out.is_empty() || !current.trim().is_empty() {
        out.push(current);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tests::sample_report;

    #[test]
    fn test_pdf_document_bytes() {
        let data = PdfExporter::export(&sample_report()).unwrap();
        assert!(data.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_layout_header_then_numbered_rows() {
        let pages = layout(&sample_report());
        assert_eq!(pages.len(), 1);
        let texts: Vec<&str> = pages[0].iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts[0], "Course Categories Report");
        assert!(pages[0][0].heading);
        assert_eq!(texts[1], "User: Nadia Islam | Phone: 01712345678");
        assert_eq!(&texts[4..], &["1. 1 | Design", "2. 2 | Web, Mobile"]);
    }

    #[test]
    fn test_long_reports_span_pages() {
        let mut report = sample_report();
        report.rows = (0..120).map(|i| vec![i.to_string(), "row".to_string()]).collect();
        // 4 header lines + 120 rows at 50 per page
        assert_eq!(layout(&report).len(), 3);
    }

    #[test]
    fn test_wrap_breaks_on_words() {
        let lines = wrap("1. alpha beta gamma delta", 12);
        assert_eq!(lines, vec!["1. alpha", "    beta", "    gamma", "    delta"]);
        assert!(lines.iter().all(|l| l.chars().count() <= 12));
    }

    #[test]
    fn test_wrap_splits_overlong_words() {
        let lines = wrap("abcdefghijklmnop", 10);
        assert_eq!(lines, vec!["abcdefghij", "    klmnop"]);
    }

    #[test]
    fn test_wrap_keeps_latin1_text() {
        assert_eq!(wrap("Café Niño", 40), vec!["Café Niño"]);
    }
}
