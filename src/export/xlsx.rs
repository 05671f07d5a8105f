use rust_xlsxwriter::{Format, Workbook, XlsxError};

use super::{Report, SERIAL_LABEL};
use crate::error::AppError;

const SHEET_NAME: &str = "Report";

/// Excel workbook with one sheet: a bold header row, then one row per record.
pub struct ExcelExporter;

impl ExcelExporter {
    pub fn export(report: &Report) -> Result<Vec<u8>, AppError> {
        Self::build(report).map_err(|e| AppError::Export(format!("Failed to write workbook: {}", e)))
    }

    fn build(report: &Report) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();

        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        sheet.write_string_with_format(0, 0, SERIAL_LABEL, &header)?;
        for (col, label) in report.labels.iter().enumerate() {
            sheet.write_string_with_format(0, column(col + 1), label, &header)?;
        }

        for (i, row) in report.rows.iter().enumerate() {
            let line = (i + 1) as u32;
            sheet.write_number(line, 0, (i + 1) as f64)?;
            for (col, cell) in row.iter().enumerate() {
                sheet.write_string(line, column(col + 1), cell)?;
            }
        }
        sheet.autofit();

        workbook.save_to_buffer()
    }
}

fn column(index: usize) -> u16 {
    u16::try_from(index).unwrap_or(u16::MAX)
}
