use anyhow::Result;
use anyhow::anyhow;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: "http://127.0.0.1:8000".into(), timeout_secs: default_timeout() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_token_path")]
    pub token_path: String,
    #[serde(default = "default_refresh")]
    pub refresh_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { token_path: default_token_path(), refresh_secs: default_refresh() }
    }
}

fn default_timeout() -> u64 { 10 }
fn default_token_path() -> String { "data/session.json".into() }
fn default_refresh() -> u64 { 30 }

/// Admin credentials for non-interactive login. Environment-only; never
/// read from the config file.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
    pub company_id: String,
}

impl AdminCredentials {
    pub fn from_env() -> Option<Self> {
        let email = std::env::var("ADMIN_EMAIL").ok()?;
        let password = std::env::var("ADMIN_PASSWORD").ok()?;
        let company_id = std::env::var("ADMIN_COMPANY_ID").ok()?;
        Some(Self { email, password, company_id })
    }
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load from `CONFIG_PATH` (a missing file is fine, defaults apply),
    /// then normalize and validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_default();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.api.normalize_from_env();
        self.api.validate()?;
        self.session.validate()?;
        Ok(())
    }
}

impl ApiConfig {
    pub fn normalize_from_env(&mut self) {
        // Environment wins over the config file for the API endpoint.
        if let Ok(url) = std::env::var("ADMIN_API_URL") {
            if !url.trim().is_empty() {
                self.base_url = url;
            }
        }
        self.base_url = self.base_url.trim_end_matches('/').to_string();
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(anyhow!("api.base_url is empty; set it in config.toml or ADMIN_API_URL"));
        }
        let lower = self.base_url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("api.base_url must start with http:// or https://"));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("api.timeout_secs must be a positive number of seconds"));
        }
        Ok(())
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.token_path.trim().is_empty() {
            return Err(anyhow!("session.token_path is empty"));
        }
        if self.refresh_secs == 0 {
            return Err(anyhow!("session.refresh_secs must be a positive number of seconds"));
        }
        Ok(())
    }
}
