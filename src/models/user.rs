use serde::{Deserialize, Serialize};

use super::resource::{FieldValue, ReportColumn, Resource};
use crate::error::AppError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "UserRecord")]
pub struct User {
    #[serde(rename = "userId")]
    pub id: i64,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub role_id: i64,
    #[serde(default)]
    pub role_name: Option<String>,
    #[serde(default)]
    pub date_created: Option<String>,
}

/// Users as the API sends them; some payloads carry `id`, some `userId`,
/// some both.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord {
    #[serde(default)]
    user_id: Option<i64>,
    #[serde(default)]
    id: Option<i64>,
    full_name: String,
    email: String,
    #[serde(default)]
    phone_number: Option<String>,
    #[serde(default)]
    role_id: i64,
    #[serde(default)]
    role_name: Option<String>,
    #[serde(default)]
    date_created: Option<String>,
}

impl TryFrom<UserRecord> for User {
    type Error = String;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        let id = record
            .user_id
            .or(record.id)
            .ok_or_else(|| "user record has neither userId nor id".to_string())?;
        Ok(User {
            id,
            full_name: record.full_name,
            email: record.email,
            phone_number: record.phone_number,
            role_id: record.role_id,
            role_name: record.role_name,
            date_created: record.date_created,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub full_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub role_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

const COLUMNS: &[ReportColumn] = &[
    ReportColumn::new("userId", "ID"),
    ReportColumn::new("fullName", "Full Name"),
    ReportColumn::new("email", "Email"),
    ReportColumn::new("phoneNumber", "Phone"),
    ReportColumn::new("roleId", "Role ID"),
    ReportColumn::new("roleName", "Role Name"),
    ReportColumn::new("dateCreated", "Date Created"),
];

impl Resource for User {
    type Draft = UserDraft;

    const PATH: &'static str = "Users";
    const TITLE: &'static str = "Users";
    const SLUG: &'static str = "users";
    const NOUN: &'static str = "user";
    const ID_FIELD: &'static str = "userId";

    fn id(&self) -> i64 {
        self.id
    }

    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("userId", self.id.into()),
            ("fullName", (&self.full_name).into()),
            ("email", (&self.email).into()),
            ("phoneNumber", self.phone_number.as_deref().into()),
            ("roleId", self.role_id.into()),
            ("roleName", self.role_name.as_deref().into()),
            ("dateCreated", self.date_created.as_deref().into()),
        ]
    }

    /// Sorting by `id` and `userId` are the same thing.
    fn field(&self, key: &str) -> FieldValue {
        let key = if key == "id" { "userId" } else { key };
        self.fields()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
            .unwrap_or(FieldValue::Null)
    }

    fn columns() -> &'static [ReportColumn] {
        COLUMNS
    }

    fn prepare_draft(draft: UserDraft, creating: bool) -> Result<UserDraft, AppError> {
        if draft.full_name.trim().is_empty() {
            return Err(AppError::BadRequest("Full Name is required".to_string()));
        }
        if creating && draft.password.as_deref().is_none_or(str::is_empty) {
            return Err(AppError::BadRequest(
                "Password is required to create a new user.".to_string(),
            ));
        }
        Ok(draft)
    }
}
