use serde::{Deserialize, Serialize};

use super::resource::{FieldValue, ReportColumn, Resource};
use crate::error::AppError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub discount_price: Option<f64>,
    pub category_id: i64,
    #[serde(default)]
    pub category_name: Option<String>,
    pub instructor_id: i64,
    #[serde(default)]
    pub instructor_name: Option<String>,
    #[serde(default)]
    pub date_created: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub discount_price: Option<f64>,
    pub instructor_id: i64,
    pub category_id: i64,
}

const COLUMNS: &[ReportColumn] = &[
    ReportColumn::new("id", "ID"),
    ReportColumn::new("categoryName", "Category Name"),
    ReportColumn::new("name", "Course Name"),
    ReportColumn::new("instructorName", "Instructor"),
    ReportColumn::new("price", "Price"),
    ReportColumn::new("discountPrice", "Discounted Price"),
    ReportColumn::new("dateCreated", "Date Created"),
];

impl Resource for Course {
    type Draft = CourseDraft;

    const PATH: &'static str = "Courses";
    const TITLE: &'static str = "Courses";
    const SLUG: &'static str = "courses";
    const NOUN: &'static str = "course";

    fn id(&self) -> i64 {
        self.id
    }

    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("id", self.id.into()),
            ("name", (&self.name).into()),
            ("description", (&self.description).into()),
            ("price", self.price.into()),
            ("discountPrice", self.discount_price.into()),
            ("categoryId", self.category_id.into()),
            ("categoryName", self.category_name.as_deref().into()),
            ("instructorId", self.instructor_id.into()),
            ("instructorName", self.instructor_name.as_deref().into()),
            ("dateCreated", self.date_created.as_deref().into()),
        ]
    }

    fn columns() -> &'static [ReportColumn] {
        COLUMNS
    }

    fn prepare_draft(draft: CourseDraft, _creating: bool) -> Result<CourseDraft, AppError> {
        if draft.name.trim().is_empty() {
            return Err(AppError::BadRequest("Course name is required".to_string()));
        }
        if draft.price < 0.0 {
            return Err(AppError::BadRequest("Price must not be negative".to_string()));
        }
        Ok(draft)
    }
}
