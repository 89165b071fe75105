use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Platform user, as returned by `/api/v1/auth/me` and `/api/v1/users/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub company_id: String,
    #[serde(default)]
    pub is_driver: bool,
    #[serde(default = "active_default")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

fn active_default() -> bool {
    true
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub fn validate_required(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} required")));
    }
    Ok(())
}
