use std::fmt::Write;

use super::{Report, SERIAL_LABEL};

const PRINT_STYLES: &str = r#"<style>
  @page { size: A4; margin: 12mm; }
  body { font-family: "Helvetica Neue", Arial, sans-serif; color: #222; }
  .report-title { font-size: 20px; font-weight: 700; margin-bottom: 6px; }
  .report-sub { font-size: 14px; margin-bottom: 12px; color: #333; }
  table { width: 100%; border-collapse: collapse; font-size: 12px; }
  thead th { background: #1976d2; color: white; padding: 8px; text-align: left; border: 1px solid #ddd; }
  tbody td { padding: 8px; border: 1px solid #eee; }
  .footer { display: flex; justify-content: space-between; margin-top: 8px; font-size: 12px; }
</style>"#;

/// Standalone printable page.
pub struct PrintExporter;

impl PrintExporter {
    pub fn export(report: &Report) -> Vec<u8> {
        let mut out = String::new();
        out.push_str("<!doctype html>\n<html><head><meta charset=\"utf-8\">");
        let _ = write!(out, "<title>{}</title>", escape_html(&report.title));
        out.push_str(PRINT_STYLES);
        out.push_str("</head><body>\n");

        let _ = writeln!(out, "<div class=\"report-title\">{}</div>", escape_html(&report.title));
        let _ = writeln!(out, "<div class=\"report-sub\">{}</div>", escape_html(&report.user_line()));

        out.push_str("<table>\n<thead><tr>");
        let _ = write!(out, "<th>{}</th>", SERIAL_LABEL);
        for label in &report.labels {
            let _ = write!(out, "<th>{}</th>", escape_html(label));
        }
        out.push_str("</tr></thead>\n<tbody>\n");

        for (i, row) in report.rows.iter().enumerate() {
            let _ = write!(out, "<tr><td>{}</td>", i + 1);
            for cell in row {
                let _ = write!(out, "<td>{}</td>", escape_html(cell));
            }
            out.push_str("</tr>\n");
        }
        out.push_str("</tbody>\n</table>\n");

        let _ = writeln!(
            out,
            "<div class=\"footer\"><div>{}</div><div>Rows: {}</div></div>",
            escape_html(&report.generated_line()),
            report.row_count()
        );
        out.push_str("</body></html>\n");
        out.into_bytes()
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
