use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub role_id: i64,
}

/// Profile returned by the auth endpoints and kept in the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(flatten)]
    pub user: UserProfile,
}

fn check_email(email: &str) -> Result<(), AppError> {
    if email.is_empty() {
        return Err(AppError::BadRequest("Email is required".to_string()));
    }
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !domain.contains('@')
        }
        None => false,
    };
    if !valid {
        return Err(AppError::BadRequest("Invalid email format".to_string()));
    }
    Ok(())
}

fn check_password(password: &str) -> Result<(), AppError> {
    if password.is_empty() {
        return Err(AppError::BadRequest("Password is required".to_string()));
    }
    if password.chars().count() < 6 {
        return Err(AppError::BadRequest(
            "Password must be at least 6 characters".to_string(),
        ));
    }
    Ok(())
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        check_email(&self.email)?;
        check_password(&self.password)
    }
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.full_name.trim().is_empty() {
            return Err(AppError::BadRequest("Full Name is required".to_string()));
        }
        check_email(&self.email)?;
        if self.phone_number.len() != 11 || !self.phone_number.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::BadRequest(
                "Phone number must be 11 digits".to_string(),
            ));
        }
        check_password(&self.password)
    }
}
