//! Report exports of a screen's filtered and sorted records.
//!
//! Every format renders the same [`Report`]: a title, the operator who
//! generated it, a timestamp and one row per record with a leading serial
//! number.

mod delimited;
mod docx;
mod html;
mod pdf;
mod xlsx;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::listing::ListView;
use crate::models::{Resource, UserProfile};

pub use delimited::CsvExporter;
pub use docx::WordExporter;
pub use html::PrintExporter;
pub use pdf::PdfExporter;
pub use xlsx::ExcelExporter;

pub const UNKNOWN_USER: &str = "Unknown User";
pub const SERIAL_LABEL: &str = "SL";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Printable HTML page
    Print,
    Pdf,
    /// Office Open XML document
    Word,
    /// Office Open XML workbook
    Excel,
    Csv,
    Json,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 6] = [
        ExportFormat::Print,
        ExportFormat::Pdf,
        ExportFormat::Word,
        ExportFormat::Excel,
        ExportFormat::Csv,
        ExportFormat::Json,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Print => "html",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Word => "docx",
            ExportFormat::Excel => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Print => "text/html",
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Word => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            ExportFormat::Excel => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Print => "print",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Word => "word",
            ExportFormat::Excel => "excel",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.name() == wanted)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown export format: {}", s)))
    }
}

/// Everything an exporter needs, already reduced to text.
#[derive(Debug, Clone)]
pub struct Report {
    pub title: String,
    pub slug: String,
    pub user_name: String,
    pub user_phone: String,
    pub generated_at: DateTime<Local>,
    /// Column labels, without the serial column.
    pub labels: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Report {
    /// Builds the report from every record of the view, not just the
    /// visible page.
    pub fn from_view<R: Resource>(
        view: &ListView<'_, R>,
        user: &UserProfile,
        generated_at: DateTime<Local>,
    ) -> Self {
        let columns = R::columns();
        let rows = view
            .matched()
            .iter()
            .map(|record| columns.iter().map(|c| record.cell(c.key)).collect())
            .collect();

        Self {
            title: format!("{} Report", R::TITLE),
            slug: R::SLUG.to_string(),
            user_name: user
                .full_name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_USER.to_string()),
            user_phone: user.phone_number.clone().unwrap_or_default(),
            generated_at,
            labels: columns.iter().map(|c| c.label.to_string()).collect(),
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn filename(&self, format: ExportFormat) -> String {
        format!("{}-report.{}", self.slug, format.extension())
    }

    /// `User: name | Phone: phone`, the phone part only when known.
    pub fn user_line(&self) -> String {
        if self.user_phone.is_empty() {
            format!("User: {}", self.user_name)
        } else {
            format!("User: {} | Phone: {}", self.user_name, self.user_phone)
        }
    }

    pub fn generated_line(&self) -> String {
        format!("Generated: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S"))
    }

    /// `n. v1 | v2 | ...` lines used by the PDF layout.
    pub fn numbered_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| format!("{}. {}", i + 1, row.join(" | ")))
    }
}

#[derive(Debug, Clone)]
pub struct ExportResult {
    pub data: Vec<u8>,
    pub mime_type: String,
    pub filename: String,
    pub row_count: usize,
}

pub struct JsonExporter;

impl JsonExporter {
    /// Pretty array of `{label: value}` objects in column order.
    pub fn export(report: &Report) -> Result<Vec<u8>, AppError> {
        let rows: Vec<Value> = report
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let mut object = Map::new();
                object.insert(SERIAL_LABEL.to_string(), Value::from(i + 1));
                for (label, cell) in report.labels.iter().zip(row) {
                    object.insert(label.clone(), Value::from(cell.as_str()));
                }
                Value::Object(object)
            })
            .collect();
        serde_json::to_vec_pretty(&rows).map_err(|e| AppError::Export(format!("JSON export failed: {}", e)))
    }
}

pub fn export(report: &Report, format: ExportFormat) -> Result<ExportResult, AppError> {
    let data = match format {
        ExportFormat::Print => PrintExporter::export(report),
        ExportFormat::Pdf => PdfExporter::export(report)?,
        ExportFormat::Word => WordExporter::export(report)?,
        ExportFormat::Excel => ExcelExporter::export(report)?,
        ExportFormat::Csv => CsvExporter::export(report)?,
        ExportFormat::Json => JsonExporter::export(report)?,
    };
    Ok(ExportResult {
        data,
        mime_type: format.mime_type().to_string(),
        filename: report.filename(format),
        row_count: report.row_count(),
    })
}
