use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};

use super::{Report, SERIAL_LABEL};
use crate::error::AppError;

// half-points
const TITLE_SIZE: usize = 32;

/// Word document: title, user and date paragraphs, then the report table.
pub struct WordExporter;

impl WordExporter {
    pub fn export(report: &Report) -> Result<Vec<u8>, AppError> {
        let mut header = vec![cell(SERIAL_LABEL, true)];
        header.extend(report.labels.iter().map(|label| cell(label, true)));

        let mut rows = vec![TableRow::new(header)];
        for (i, row) in report.rows.iter().enumerate() {
            let mut cells = vec![cell(&(i + 1).to_string(), false)];
            cells.extend(row.iter().map(|value| cell(value, false)));
            rows.push(TableRow::new(cells));
        }

        let doc = Docx::new()
            .add_paragraph(
                Paragraph::new().add_run(Run::new().add_text(report.title.as_str()).bold().size(TITLE_SIZE)),
            )
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text(report.user_line()).bold()))
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text(report.generated_line())))
            .add_table(Table::new(rows));

        let mut buf = Cursor::new(Vec::new());
        doc.build()
            .pack(&mut buf)
            .map_err(|e| AppError::Export(format!("Failed to write document: {}", e)))?;
        Ok(buf.into_inner())
    }
}

fn cell(text: &str, bold: bool) -> TableCell {
    let run = Run::new().add_text(text);
    let run = if bold { run.bold() } else { run };
    TableCell::new().add_paragraph(Paragraph::new().add_run(run))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tests::{contains, sample_report};

    #[test]
    fn test_document_is_ooxml_package() {
        let data = WordExporter::export(&sample_report()).unwrap();

        assert!(data.starts_with(b"PK"));
        assert!(contains(&data, b"word/document.xml"));
    }

    #[test]
    fn test_empty_report_keeps_header_table() {
        let mut report = sample_report();
        report.rows.clear();
        let data = WordExporter::export(&report).unwrap();
        assert!(contains(&data, b"word/document.xml"));
    }
}
