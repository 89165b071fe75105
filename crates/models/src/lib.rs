//! Data model for the ride-sharing platform API.
//! - Response shapes for the resources the console renders.
//! - Validation helpers shared by the session layer.

pub mod errors;
pub mod company;
pub mod user;
pub mod ride;
pub mod payment;

#[cfg(test)]
mod tests;

pub use company::Company;
pub use payment::PaymentSummary;
pub use ride::{Ride, RideStatus};
pub use user::User;
