//! Session module: domain types and the controller that gates the UI on
//! authentication and orchestrates the refresh cycle.

pub mod controller;
pub mod domain;

pub use controller::{DashboardSnapshot, Resource, SessionController};
pub use domain::{LoginInput, LoginResponse, Session, SessionState};
