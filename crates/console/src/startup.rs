use std::sync::Arc;
use std::time::Duration;

use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tokio::sync::mpsc;
use tracing::info;

use configs::{AdminCredentials, AppConfig};
use service::api::HttpAdminApi;
use service::notify::Notifier;
use service::session::{LoginInput, SessionController, SessionState};
use service::storage::JsonTokenStore;

use crate::notify::TerminalNotifier;
use crate::view::{self, Screen};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

/// Public entry: wire config, stores and controller, then drive the render
/// loop until the session or the refresh stream ends.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = AppConfig::load_and_validate()?;
    if let Some(parent) = std::path::Path::new(&cfg.session.token_path).parent() {
        if !parent.as_os_str().is_empty() {
            common::env::ensure_data_dir(&parent.to_string_lossy()).await?;
        }
    }

    let api = Arc::new(HttpAdminApi::new(
        cfg.api.base_url.as_str(),
        Duration::from_secs(cfg.api.timeout_secs),
    )?);
    let store = JsonTokenStore::new(&cfg.session.token_path).await?;
    let notifier: Arc<dyn Notifier> = Arc::new(TerminalNotifier);
    let controller = Arc::new(SessionController::new(api, store, notifier));

    // Session gate: a persisted token first, configured credentials second.
    if controller.restore().await == SessionState::LoggedOut {
        let Some(creds) = AdminCredentials::from_env() else {
            print!("{}", view::render(&Screen::Login { error: None }));
            return Ok(());
        };
        let input = LoginInput {
            email: creds.email,
            password: creds.password,
            company_id: creds.company_id,
        };
        if let Err(e) = controller.login(input).await {
            print!("{}", view::render(&Screen::Login { error: Some(e.to_string()) }));
            return Ok(());
        }
    }

    let operator = controller
        .current_user()
        .map(|u| u.name)
        .unwrap_or_else(|| "admin".to_string());
    info!(%operator, api = %cfg.api.base_url, "dashboard session established");

    // Initial load, then the periodic cycle.
    match controller.refresh().await {
        Ok(snapshot) => {
            print!(
                "{}",
                view::render(&Screen::Dashboard(view::dashboard_view(&operator, &snapshot)))
            );
        }
        Err(e) => {
            // the token died between login and the first load
            print!("{}", view::render(&Screen::Login { error: Some(e.to_string()) }));
            return Ok(());
        }
    }

    let (tx, mut rx) = mpsc::channel(4);
    let refresh_task =
        controller.spawn_auto_refresh(Duration::from_secs(cfg.session.refresh_secs), tx);

    while let Some(snapshot) = rx.recv().await {
        print!(
            "{}",
            view::render(&Screen::Dashboard(view::dashboard_view(&operator, &snapshot)))
        );
    }

    // channel closed: the session ended or the receiver side shut down
    refresh_task.await.ok();
    info!("dashboard stream ended");
    print!("{}", view::render(&Screen::Login { error: None }));
    Ok(())
}
