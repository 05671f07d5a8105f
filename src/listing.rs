//! Client-side list transform: search, then sort, then paginate.
//!
//! Every entity screen runs its working set through [`ListState::apply`]
//! to get the rows it renders. The transform is pure; it never reorders or
//! drops records beyond what the three inputs ask for.

use crate::error::AppError;
use crate::models::{FieldValue, Resource};

pub const PAGE_SIZES: [usize; 4] = [5, 10, 25, 50];
pub const DEFAULT_SORT_KEY: &str = "id";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// The three user inputs of a list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    search: String,
    sort: SortSpec,
    page: usize,
    per_page: usize,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: SortSpec::ascending(DEFAULT_SORT_KEY),
            page: 0,
            per_page: PAGE_SIZES[0],
        }
    }
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Changing the search term always returns to the first page.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 0;
    }

    /// Column-header click: the same ascending column flips to descending,
    /// anything else sorts ascending.
    pub fn request_sort(&mut self, key: &str) {
        let direction = if self.sort.key == key && self.sort.direction == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        self.sort = SortSpec {
            key: key.to_string(),
            direction,
        };
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn set_per_page(&mut self, per_page: usize) -> Result<(), AppError> {
        if !PAGE_SIZES.contains(&per_page) {
            return Err(AppError::BadRequest(format!(
                "page size must be one of {:?}, got {}",
                PAGE_SIZES, per_page
            )));
        }
        self.per_page = per_page;
        self.page = 0;
        Ok(())
    }

    pub fn apply<'a, R: Resource>(&self, records: &'a [R]) -> ListView<'a, R> {
        let mut matched = filter(records, &self.search);
        sort(&mut matched, &self.sort);
        ListView {
            matched,
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// Result of the transform: every matching record in display order plus
/// the page window over it.
#[derive(Debug)]
pub struct ListView<'a, R> {
    matched: Vec<&'a R>,
    page: usize,
    per_page: usize,
}

impl<'a, R> ListView<'a, R> {
    /// Number of records that passed the search; the screen's displayed count.
    pub fn count(&self) -> usize {
        self.matched.len()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn page_count(&self) -> usize {
        if self.per_page == 0 {
            return 0;
        }
        self.matched.len().div_ceil(self.per_page)
    }

    /// All matching records, sorted; what the exporters consume.
    pub fn matched(&self) -> &[&'a R] {
        &self.matched
    }

    pub fn page_rows(&self) -> &[&'a R] {
        paginate(&self.matched, self.page, self.per_page)
    }

    /// Visible rows with their 1-based serial number across pages.
    pub fn numbered_rows(&self) -> impl Iterator<Item = (usize, &'a R)> + '_ {
        let offset = self.page * self.per_page;
        self.page_rows()
            .iter()
            .enumerate()
            .map(move |(i, r)| (offset + i + 1, *r))
    }
}

/// Lowercased, space-joined text of every field.
pub fn flatten<R: Resource>(record: &R) -> String {
    record
        .fields()
        .iter()
        .map(|(_, v)| v.as_text())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub fn filter<'a, R: Resource>(records: &'a [R], term: &str) -> Vec<&'a R> {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|r| flatten(*r).contains(&needle))
        .collect()
}

/// Stable sort on one field; equal keys keep their incoming order in both
/// directions.
pub fn sort<R: Resource>(rows: &mut Vec<&R>, spec: &SortSpec) {
    let mut keyed: Vec<(FieldValue, &R)> = rows.iter().map(|r| (r.field(&spec.key), *r)).collect();
    keyed.sort_by(|(a, _), (b, _)| match spec.direction {
        SortDirection::Ascending => a.compare(b),
        SortDirection::Descending => b.compare(a),
    });
    *rows = keyed.into_iter().map(|(_, r)| r).collect();
}

pub fn paginate<T>(rows: &[T], page: usize, per_page: usize) -> &[T] {
    let start = page.saturating_mul(per_page).min(rows.len());
    let end = start.saturating_add(per_page).min(rows.len());
    &rows[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn category(id: i64, name: &str, course_count: i64) -> Category {
        Category {
            id,
            name: name.to_string(),
            description: format!("{} courses", name),
            course_count,
        }
    }

    #[test]
    fn test_request_sort_toggles_direction() {
        let mut state = ListState::new();
        assert_eq!(state.sort(), &SortSpec::ascending("id"));

        state.request_sort("id");
        assert_eq!(state.sort(), &SortSpec::descending("id"));

        state.request_sort("id");
        assert_eq!(state.sort(), &SortSpec::ascending("id"));

        state.request_sort("id");
        state.request_sort("name");
        assert_eq!(state.sort(), &SortSpec::ascending("name"));
    }

    #[test]
    fn test_search_and_page_size_reset_page() {
        let mut state = ListState::new();
        state.set_page(3);
        state.set_search("web");
        assert_eq!(state.page(), 0);

        state.set_page(2);
        state.set_per_page(25).unwrap();
        assert_eq!(state.page(), 0);
        assert!(state.set_per_page(7).is_err());
        assert_eq!(state.per_page(), 25);
    }

    #[test]
    fn test_search_matches_any_field_case_insensitively() {
        let records = vec![category(1, "Design", 4), category(2, "Web", 12), category(3, "Data", 1)];
        let hits = filter(&records, "WEB");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);

        // numeric fields are searchable too
        let hits = filter(&records, "12");
        assert_eq!(hits.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_descending_sort_keeps_ties_in_original_order() {
        let records = vec![
            category(1, "A", 2),
            category(2, "B", 5),
            category(3, "C", 2),
            category(4, "D", 5),
        ];
        let mut rows: Vec<&Category> = records.iter().collect();
        sort(&mut rows, &SortSpec::descending("courseCount"));
        assert_eq!(rows.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_unknown_sort_key_preserves_order() {
        let records = vec![category(3, "C", 0), category(1, "A", 0), category(2, "B", 0)];
        let mut rows: Vec<&Category> = records.iter().collect();
        sort(&mut rows, &SortSpec::ascending("actions"));
        assert_eq!(rows.iter().map(|c| c.id).collect::<Vec<_>>(), vec![3, 1, 2]);
    }

    #[test]
    fn test_paginate_clamps_past_end() {
        let rows = [1, 2, 3, 4, 5, 6, 7];
        assert_eq!(paginate(&rows, 1, 5), &[6, 7]);
        assert!(paginate(&rows, 4, 5).is_empty());
    }

    #[test]
    fn test_numbered_rows_continue_across_pages() {
        let records: Vec<Category> = (1..=7).map(|i| category(i, "X", 0)).collect();
        let mut state = ListState::new();
        state.set_page(1);
        let view = state.apply(&records);
        let serials: Vec<usize> = view.numbered_rows().map(|(n, _)| n).collect();
        assert_eq!(serials, vec![6, 7]);
        assert_eq!(view.page_count(), 2);
        assert_eq!(view.count(), 7);
    }
}
