use async_trait::async_trait;
use models::{Company, PaymentSummary, Ride, User};

use super::errors::ApiError;
use crate::session::domain::{LoginInput, LoginResponse};

/// Abstraction over the platform REST API so the session layer can be
/// exercised without a network.
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn login(&self, input: &LoginInput) -> Result<LoginResponse, ApiError>;
    async fn me(&self, token: &str) -> Result<User, ApiError>;

    async fn companies(&self, token: &str) -> Result<Vec<Company>, ApiError>;
    async fn users(&self, token: &str) -> Result<Vec<User>, ApiError>;
    async fn rides(&self, token: &str) -> Result<Vec<Ride>, ApiError>;
    async fn payment_summary(&self, token: &str) -> Result<PaymentSummary, ApiError>;
}

/// Simple in-memory mock API for tests and doc examples
pub mod mock {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Responses {
        login: Option<Result<LoginResponse, ApiError>>,
        me: Option<Result<User, ApiError>>,
        companies: Option<Result<Vec<Company>, ApiError>>,
        users: Option<Result<Vec<User>, ApiError>>,
        rides: Option<Result<Vec<Ride>, ApiError>>,
        payment_summary: Option<Result<PaymentSummary, ApiError>>,
    }

    /// Serves canned responses and records the bearer token presented on
    /// every call. Endpoints left unset answer with their empty value.
    #[derive(Default)]
    pub struct MockAdminApi {
        responses: Mutex<Responses>,
        calls: Mutex<Vec<(&'static str, Option<String>)>>,
    }

    impl MockAdminApi {
        pub fn set_login(&self, result: Result<LoginResponse, ApiError>) {
            self.responses.lock().unwrap().login = Some(result);
        }

        pub fn set_me(&self, result: Result<User, ApiError>) {
            self.responses.lock().unwrap().me = Some(result);
        }

        pub fn set_companies(&self, result: Result<Vec<Company>, ApiError>) {
            self.responses.lock().unwrap().companies = Some(result);
        }

        pub fn set_users(&self, result: Result<Vec<User>, ApiError>) {
            self.responses.lock().unwrap().users = Some(result);
        }

        pub fn set_rides(&self, result: Result<Vec<Ride>, ApiError>) {
            self.responses.lock().unwrap().rides = Some(result);
        }

        pub fn set_payment_summary(&self, result: Result<PaymentSummary, ApiError>) {
            self.responses.lock().unwrap().payment_summary = Some(result);
        }

        /// Every call made so far as `(endpoint, bearer token)`; login has
        /// no token.
        pub fn calls(&self) -> Vec<(&'static str, Option<String>)> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, endpoint: &'static str, token: Option<&str>) {
            self.calls.lock().unwrap().push((endpoint, token.map(str::to_string)));
        }
    }

    #[async_trait]
    impl AdminApi for MockAdminApi {
        async fn login(&self, _input: &LoginInput) -> Result<LoginResponse, ApiError> {
            self.record("login", None);
            self.responses
                .lock()
                .unwrap()
                .login
                .clone()
                .unwrap_or_else(|| Err(ApiError::Transport("mock: login not configured".into())))
        }

        async fn me(&self, token: &str) -> Result<User, ApiError> {
            self.record("me", Some(token));
            self.responses
                .lock()
                .unwrap()
                .me
                .clone()
                .unwrap_or_else(|| Err(ApiError::Transport("mock: me not configured".into())))
        }

        async fn companies(&self, token: &str) -> Result<Vec<Company>, ApiError> {
            self.record("companies", Some(token));
            self.responses.lock().unwrap().companies.clone().unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn users(&self, token: &str) -> Result<Vec<User>, ApiError> {
            self.record("users", Some(token));
            self.responses.lock().unwrap().users.clone().unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn rides(&self, token: &str) -> Result<Vec<Ride>, ApiError> {
            self.record("rides", Some(token));
            self.responses.lock().unwrap().rides.clone().unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn payment_summary(&self, token: &str) -> Result<PaymentSummary, ApiError> {
            self.record("payment_summary", Some(token));
            self.responses
                .lock()
                .unwrap()
                .payment_summary
                .clone()
                .unwrap_or_else(|| Ok(PaymentSummary::empty("")))
        }
    }
}
