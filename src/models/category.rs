use serde::{Deserialize, Serialize};

use super::resource::{FieldValue, ReportColumn, Resource};
use crate::error::AppError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub course_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

const COLUMNS: &[ReportColumn] = &[
    ReportColumn::new("id", "ID"),
    ReportColumn::new("name", "Category Name"),
    ReportColumn::new("description", "Description"),
    ReportColumn::new("courseCount", "Course Count"),
];

impl Resource for Category {
    type Draft = CategoryDraft;

    const PATH: &'static str = "CourseCategories";
    const TITLE: &'static str = "Course Categories";
    const SLUG: &'static str = "course-categories";
    const NOUN: &'static str = "category";

    fn id(&self) -> i64 {
        self.id
    }

    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("id", self.id.into()),
            ("name", (&self.name).into()),
            ("description", (&self.description).into()),
            ("courseCount", self.course_count.into()),
        ]
    }

    fn columns() -> &'static [ReportColumn] {
        COLUMNS
    }

    fn prepare_draft(draft: CategoryDraft, _creating: bool) -> Result<CategoryDraft, AppError> {
        if draft.name.trim().is_empty() {
            return Err(AppError::BadRequest("Category name is required".to_string()));
        }
        Ok(draft)
    }
}
