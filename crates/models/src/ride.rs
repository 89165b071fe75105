use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ride lifecycle states the platform reports. Statuses added server-side
/// after this client shipped deserialize as `Unknown` instead of failing
/// the whole list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RideStatus {
    Pending,
    Matched,
    InProgress,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl RideStatus {
    /// Still on the road (or waiting to be): counts toward the "active
    /// rides" stat card.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, RideStatus::InProgress)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RideStatus::Pending => "pending",
            RideStatus::Matched => "matched",
            RideStatus::InProgress => "in_progress",
            RideStatus::Completed => "completed",
            RideStatus::Cancelled => "cancelled",
            RideStatus::Unknown => "unknown",
        }
    }
}

/// Ride record from `/api/v1/rides/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ride {
    pub id: String,
    pub company_id: String,
    pub rider_id: String,
    #[serde(default)]
    pub driver_id: Option<String>,
    pub pickup_location: String,
    pub destination: String,
    pub status: RideStatus,
    #[serde(default)]
    pub fare: Option<f64>,
    pub created_at: DateTime<Utc>,
}
