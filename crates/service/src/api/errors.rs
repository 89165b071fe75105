use thiserror::Error;

/// Failures surfaced by the platform API client. All of them are recovered
/// inside the session layer; none abort the process.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The token was rejected on an authenticated call. Forces a logout.
    #[error("session expired, please log in again")]
    Expired,
    /// Login refused; carries the server-provided message or a generic
    /// fallback. The login state is left untouched.
    #[error("login failed: {0}")]
    Rejected(String),
    /// An authenticated fetch came back non-success.
    #[error("request failed with status {status}: {detail}")]
    Fetch { status: u16, detail: String },
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Transport(String),
}

impl ApiError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ApiError::Expired => 2001,
            ApiError::Rejected(_) => 2002,
            ApiError::Fetch { .. } => 2101,
            ApiError::Transport(_) => 2102,
        }
    }
}
