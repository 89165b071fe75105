//! Platform API access: trait abstraction, HTTP implementation, errors.

pub mod client;
pub mod errors;
pub mod http;

pub use client::AdminApi;
pub use errors::ApiError;
pub use http::HttpAdminApi;
