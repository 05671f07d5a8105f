use std::cmp::Ordering;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// A single field of a record, as seen by search, sort and export.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Int(i) => i.to_string(),
            FieldValue::Float(f) => {
                if f.is_finite() && f.fract() == 0.0 {
                    format!("{:.0}", f)
                } else {
                    f.to_string()
                }
            }
            FieldValue::Text(s) => s.clone(),
        }
    }

    /// Total order used by the list sort. Nulls sort first; mixed kinds
    /// fall back to their text form.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        use FieldValue::*;
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Null, _) => Ordering::Less,
            (_, Null) => Ordering::Greater,
            (Int(a), Int(b)) => a.cmp(b),
            (Int(a), Float(b)) => (*a as f64).partial_cmp(b).unwrap_or(Ordering::Equal),
            (Float(a), Int(b)) => a.partial_cmp(&(*b as f64)).unwrap_or(Ordering::Equal),
            (Float(a), Float(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Bool(a), Bool(b)) => a.cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            (a, b) => a.as_text().cmp(&b.as_text()),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        FieldValue::Text(value.clone())
    }
}

impl<T> From<Option<T>> for FieldValue
where
    T: Into<FieldValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportColumn {
    pub key: &'static str,
    pub label: &'static str,
}

impl ReportColumn {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// An entity served by the admin API under `/api/{PATH}`.
pub trait Resource: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Body sent on create/update.
    type Draft: Clone + Send + Sync + Serialize + DeserializeOwned + 'static;

    const PATH: &'static str;
    const TITLE: &'static str;
    const SLUG: &'static str;
    /// Singular noun used in messages.
    const NOUN: &'static str;
    /// Wire name of the id carried in PUT bodies.
    const ID_FIELD: &'static str = "id";

    fn id(&self) -> i64;

    /// Every field in wire order, keyed by its JSON name.
    fn fields(&self) -> Vec<(&'static str, FieldValue)>;

    fn columns() -> &'static [ReportColumn];

    fn field(&self, key: &str) -> FieldValue {
        self.fields()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
            .unwrap_or(FieldValue::Null)
    }

    /// Display text of a report column.
    fn cell(&self, key: &str) -> String {
        self.field(key).as_text()
    }

    /// Normalizes a draft before it goes on the wire.
    fn prepare_draft(draft: Self::Draft, _creating: bool) -> Result<Self::Draft, AppError> {
        Ok(draft)
    }
}
