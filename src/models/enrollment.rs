use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::resource::{FieldValue, ReportColumn, Resource};
use crate::error::AppError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub user_name: Option<String>,
    pub course_id: i64,
    #[serde(default)]
    pub course_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub payment_amount: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub payment_total: f64,
    #[serde(default)]
    pub payment_date: Option<String>,
    #[serde(default)]
    pub enrollment_date: Option<String>,
    #[serde(default)]
    pub enrollment_status: i32,
    #[serde(default)]
    pub payment_status: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentDraft {
    pub course_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub description: String,
    pub payment_amount: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub payment_total: f64,
    #[serde(default)]
    pub payment_date: Option<String>,
    #[serde(default)]
    pub enrollment_status: i32,
    #[serde(default)]
    pub payment_status: i32,
}

pub fn enrollment_status_text(code: i32) -> &'static str {
    match code {
        0 => "Pending",
        1 => "Active",
        _ => "N/A",
    }
}

pub fn payment_status_text(code: i32) -> &'static str {
    match code {
        0 => "Pending",
        10 => "Failed",
        20 => "Refunded",
        30 => "Canceled",
        40 => "Completed",
        50 => "Partially Paid",
        _ => "N/A",
    }
}

impl Enrollment {
    pub fn status_text(&self) -> String {
        format!(
            "Enrollment: {}, Payment: {}",
            enrollment_status_text(self.enrollment_status),
            payment_status_text(self.payment_status)
        )
    }
}

const COLUMNS: &[ReportColumn] = &[
    ReportColumn::new("id", "ID"),
    ReportColumn::new("userName", "User"),
    ReportColumn::new("courseName", "Course"),
    ReportColumn::new("enrollmentDate", "Enrollment Date"),
    ReportColumn::new("paymentTotal", "Payment Total"),
    ReportColumn::new("status", "Status"),
];

impl Resource for Enrollment {
    type Draft = EnrollmentDraft;

    const PATH: &'static str = "Enrollments";
    const TITLE: &'static str = "Enrollments";
    const SLUG: &'static str = "enrollments";
    const NOUN: &'static str = "enrollment";

    fn id(&self) -> i64 {
        self.id
    }

    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("id", self.id.into()),
            ("userId", self.user_id.into()),
            ("userName", self.user_name.as_deref().into()),
            ("courseId", self.course_id.into()),
            ("courseName", self.course_name.as_deref().into()),
            ("description", self.description.as_deref().into()),
            ("paymentAmount", self.payment_amount.into()),
            ("discount", self.discount.into()),
            ("paymentTotal", self.payment_total.into()),
            ("paymentDate", self.payment_date.as_deref().into()),
            ("enrollmentDate", self.enrollment_date.as_deref().into()),
            ("enrollmentStatus", i64::from(self.enrollment_status).into()),
            ("paymentStatus", i64::from(self.payment_status).into()),
            ("status", self.status_text().into()),
        ]
    }

    fn columns() -> &'static [ReportColumn] {
        COLUMNS
    }

    /// The total is always derived from amount and discount; a missing
    /// payment date defaults to now.
    fn prepare_draft(mut draft: EnrollmentDraft, _creating: bool) -> Result<EnrollmentDraft, AppError> {
        if draft.payment_amount < 0.0 || draft.discount < 0.0 {
            return Err(AppError::BadRequest(
                "Payment amount and discount must not be negative".to_string(),
            ));
        }
        draft.payment_total = draft.payment_amount - draft.discount;
        if draft.payment_date.is_none() {
            draft.payment_date = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
        }
        Ok(draft)
    }
}
