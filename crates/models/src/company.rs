use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Company record from `/api/v1/companies/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub address: String,
    pub contact_email: String,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default = "active_default")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

fn active_default() -> bool {
    true
}
