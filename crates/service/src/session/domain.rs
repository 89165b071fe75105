use models::User;
use serde::{Deserialize, Serialize};

/// Login form input, posted verbatim to `/api/v1/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
    pub company_id: String,
}

/// Body of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    pub user: User,
}

/// The authenticated identity and token held for the duration of a login.
/// Empty at startup; populated by `login` or a successful restore; cleared
/// on logout or a failed identity check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    pub fn state(&self) -> SessionState {
        if self.token.is_some() {
            SessionState::LoggedIn
        } else {
            SessionState::LoggedOut
        }
    }

    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }
}

/// The only two states the console knows. The dashboard renders in
/// `LoggedIn`, the login screen in `LoggedOut`, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn,
}
