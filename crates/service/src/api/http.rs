use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use models::{Company, PaymentSummary, Ride, User};

use super::client::AdminApi;
use super::errors::ApiError;
use crate::session::domain::{LoginInput, LoginResponse};

const LOGIN_PATH: &str = "/api/v1/auth/login";
const ME_PATH: &str = "/api/v1/auth/me";
const COMPANIES_PATH: &str = "/api/v1/companies/";
const USERS_PATH: &str = "/api/v1/users/";
const RIDES_PATH: &str = "/api/v1/rides/";
const PAYMENT_SUMMARY_PATH: &str = "/api/v1/payments/company/summary";

/// Error body the platform returns (`{"detail": "..."}`).
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// reqwest-backed `AdminApi` implementation.
pub struct HttpAdminApi {
    base_url: String,
    http: reqwest::Client,
}

impl HttpAdminApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self::with_client(base_url, http))
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_authed<T: DeserializeOwned>(&self, path: &str, token: &str) -> Result<T, ApiError> {
        let resp = self
            .http
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Expired);
        }
        if !status.is_success() {
            let detail = read_detail(resp, "request failed").await;
            return Err(ApiError::Fetch { status: status.as_u16(), detail });
        }
        resp.json::<T>().await.map_err(|e| ApiError::Fetch {
            status: status.as_u16(),
            detail: format!("invalid response body: {e}"),
        })
    }
}

async fn read_detail(resp: reqwest::Response, fallback: &str) -> String {
    match resp.json::<ErrorBody>().await {
        Ok(body) => body.detail.unwrap_or_else(|| fallback.to_string()),
        Err(_) => fallback.to_string(),
    }
}

#[async_trait]
impl AdminApi for HttpAdminApi {
    async fn login(&self, input: &LoginInput) -> Result<LoginResponse, ApiError> {
        let resp = self
            .http
            .post(self.url(LOGIN_PATH))
            .json(input)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let detail = read_detail(resp, "Login failed. Please try again.").await;
            return Err(ApiError::Rejected(detail));
        }
        resp.json::<LoginResponse>().await.map_err(|e| ApiError::Fetch {
            status: status.as_u16(),
            detail: format!("invalid response body: {e}"),
        })
    }

    async fn me(&self, token: &str) -> Result<User, ApiError> {
        self.get_authed(ME_PATH, token).await
    }

    async fn companies(&self, token: &str) -> Result<Vec<Company>, ApiError> {
        self.get_authed(COMPANIES_PATH, token).await
    }

    async fn users(&self, token: &str) -> Result<Vec<User>, ApiError> {
        self.get_authed(USERS_PATH, token).await
    }

    async fn rides(&self, token: &str) -> Result<Vec<Ride>, ApiError> {
        self.get_authed(RIDES_PATH, token).await
    }

    async fn payment_summary(&self, token: &str) -> Result<PaymentSummary, ApiError> {
        self.get_authed(PAYMENT_SUMMARY_PATH, token).await
    }
}
