use csv::Writer;

use super::{Report, SERIAL_LABEL};
use crate::error::AppError;

/// RFC 4180 CSV with a serial column.
pub struct CsvExporter;

impl CsvExporter {
    pub fn export(report: &Report) -> Result<Vec<u8>, AppError> {
        let mut writer = Writer::from_writer(Vec::new());

        let mut header = vec![SERIAL_LABEL.to_string()];
        header.extend(report.labels.iter().cloned());
        writer
            .write_record(&header)
            .map_err(|e| AppError::Export(format!("Failed to write CSV headers: {}", e)))?;

        for (i, row) in report.rows.iter().enumerate() {
            let mut record = vec![(i + 1).to_string()];
            record.extend(row.iter().cloned());
            writer
                .write_record(&record)
                .map_err(|e| AppError::Export(format!("Failed to write CSV row: {}", e)))?;
        }

        writer
            .flush()
            .map_err(|e| AppError::Export(format!("Failed to flush CSV writer: {}", e)))?;
        writer
            .into_inner()
            .map_err(|e| AppError::Export(format!("Failed to get CSV output: {}", e)))
    }
}
