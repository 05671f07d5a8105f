//! Plain-text rendering of a list view for the terminal.

use std::fmt::Write;

use crate::listing::ListView;
use crate::models::Resource;

const MAX_CELL_WIDTH: usize = 32;

pub fn render_table<R: Resource>(view: &ListView<'_, R>) -> String {
    let columns = R::columns();
    let mut header = vec!["SL".to_string()];
    header.extend(columns.iter().map(|c| c.label.to_string()));

    let rows: Vec<Vec<String>> = view
        .numbered_rows()
        .map(|(serial, record)| {
            let mut row = vec![serial.to_string()];
            row.extend(columns.iter().map(|c| truncate(&record.cell(c.key))));
            row
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);

    if rows.is_empty() {
        let _ = writeln!(out, "No {} found.", R::TITLE.to_lowercase());
    }
    for row in &rows {
        push_row(&mut out, row, &widths);
    }

    let _ = writeln!(out, "{}", footer(view));
    out
}

/// `Rows 6-10 of 12 | Page 2 of 3 | 5 per page`
pub fn footer<R>(view: &ListView<'_, R>) -> String {
    let shown = view.page_rows().len();
    let start = view.page() * view.per_page();
    let range = if shown == 0 {
        "Rows 0".to_string()
    } else {
        format!("Rows {}-{}", start + 1, start + shown)
    };
    format!(
        "{} of {} | Page {} of {} | {} per page",
        range,
        view.count(),
        view.page() + 1,
        view.page_count().max(1),
        view.per_page()
    )
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

fn truncate(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL_WIDTH {
        return cell.to_string();
    }
    let mut cut: String = cell.chars().take(MAX_CELL_WIDTH - 1).collect();
    cut.push('~');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::ListState;
    use crate::models::Category;

    fn categories(n: i64) -> Vec<Category> {
        (1..=n)
            .map(|id| Category {
                id,
                name: format!("Cat {}", id),
                description: "x".repeat(40),
                course_count: 0,
            })
            .collect()
    }

    #[test]
    fn test_second_page_table() {
        let records = categories(12);
        let mut state = ListState::new();
        state.set_page(1);
        let out = render_table(&state.apply(&records));
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].starts_with("SL  ID  Category Name"));
        assert!(lines[2].starts_with("6   6   Cat 6"));
        assert_eq!(lines.len(), 2 + 5 + 1);
        assert_eq!(lines[7], "Rows 6-10 of 12 | Page 2 of 3 | 5 per page");
        assert!(lines[2].contains(&format!("{}~", "x".repeat(31))));
    }

    #[test]
    fn test_empty_view() {
        let records: Vec<Category> = Vec::new();
        let out = render_table(&ListState::new().apply(&records));
        assert!(out.contains("No course categories found."));
        assert!(out.ends_with("Rows 0 of 0 | Page 1 of 1 | 5 per page\n"));
    }
}
