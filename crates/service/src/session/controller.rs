use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument, warn};

use models::{user, Company, PaymentSummary, Ride, User};

use crate::api::{AdminApi, ApiError};
use crate::notify::{Notice, Notifier};
use crate::session::domain::{LoginInput, Session, SessionState};
use crate::storage::TokenStore;

/// One dashboard resource kind. Renders are keyed by resource; every
/// refresh fully overwrites each one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Companies,
    Users,
    Rides,
    Payments,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Companies => "companies",
            Resource::Users => "users",
            Resource::Rides => "rides",
            Resource::Payments => "payments",
        }
    }
}

/// One settled refresh cycle: full replacement snapshots for every
/// resource, plus the resources that fell back to their empty value.
#[derive(Debug, Clone, Default)]
pub struct DashboardSnapshot {
    pub companies: Vec<Company>,
    pub users: Vec<User>,
    pub rides: Vec<Ride>,
    pub payments: Option<PaymentSummary>,
    pub failures: Vec<Resource>,
}

/// Gates the UI on authentication and orchestrates the dashboard refresh
/// cycle. Owns the `Session` outright; nothing else mutates it.
///
/// The controller keeps a session epoch, bumped on every transition into or
/// out of `LoggedIn`. A refresh records the epoch it started under and its
/// results are discarded if the epoch moved before the join completed, so a
/// logout mid-flight can never render into the login screen.
pub struct SessionController<A, S> {
    api: Arc<A>,
    store: Arc<S>,
    notifier: Arc<dyn Notifier>,
    session: RwLock<Session>,
    epoch: AtomicU64,
}

impl<A: AdminApi + 'static, S: TokenStore + 'static> SessionController<A, S> {
    pub fn new(api: Arc<A>, store: Arc<S>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            store,
            notifier,
            session: RwLock::new(Session::default()),
            epoch: AtomicU64::new(0),
        }
    }

    pub fn state(&self) -> SessionState {
        self.session.read().unwrap().state()
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.read().unwrap().user.clone()
    }

    fn token(&self) -> Option<String> {
        self.session.read().unwrap().token.clone()
    }

    fn epoch_now(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    fn install(&self, token: String, user: User) {
        let mut session = self.session.write().unwrap();
        session.token = Some(token);
        session.user = Some(user);
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }

    /// Clears the in-memory session; returns whether one was present.
    fn drop_session(&self) -> bool {
        let mut session = self.session.write().unwrap();
        let had_session = session.token.is_some();
        session.clear();
        if had_session {
            self.epoch.fetch_add(1, Ordering::SeqCst);
        }
        had_session
    }

    /// Restore a previous session from the persisted token. A single
    /// identity check per startup, no retry; any failure discards the
    /// token and leaves the console logged out.
    #[instrument(skip(self))]
    pub async fn restore(&self) -> SessionState {
        let token = match self.store.load().await {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "token store unreadable, starting logged out");
                None
            }
        };
        let Some(token) = token else {
            debug!("no persisted token");
            return SessionState::LoggedOut;
        };

        match self.api.me(&token).await {
            Ok(identity) => {
                info!(user_id = %identity.id, "session restored");
                self.install(token, identity);
                SessionState::LoggedIn
            }
            Err(e) => {
                warn!(error = %e, "persisted token rejected, clearing it");
                if let Err(e) = self.store.clear().await {
                    warn!(error = %e, "failed to erase persisted token");
                }
                self.notifier.notify(Notice::warning("Session expired, please log in again"));
                SessionState::LoggedOut
            }
        }
    }

    /// Authenticate against the platform. On failure the session is left
    /// untouched so the caller can retry with corrected input; the error
    /// carries the server-provided message when there is one.
    #[instrument(skip(self, input), fields(email = %input.email, company_id = %input.company_id))]
    pub async fn login(&self, input: LoginInput) -> Result<User, ApiError> {
        user::validate_email(&input.email).map_err(|e| ApiError::Rejected(e.to_string()))?;
        user::validate_required("password", &input.password)
            .map_err(|e| ApiError::Rejected(e.to_string()))?;
        user::validate_required("company_id", &input.company_id)
            .map_err(|e| ApiError::Rejected(e.to_string()))?;

        let resp = self.api.login(&input).await?;
        if let Err(e) = self.store.save(&resp.access_token).await {
            warn!(error = %e, "token not persisted; session will not survive a restart");
        }
        info!(user_id = %resp.user.id, "logged in");
        self.install(resp.access_token, resp.user.clone());
        Ok(resp.user)
    }

    /// Drop the session and erase the persisted token. No network call;
    /// safe to call when already logged out.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        let had_session = self.drop_session();
        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "failed to erase persisted token");
        }
        if had_session {
            info!("logged out");
        }
    }

    /// One refresh cycle: fan out the four resource fetches, join, and
    /// produce a full-overwrite snapshot.
    ///
    /// Per-resource failures degrade that resource to its empty value so
    /// the rest of the dashboard still renders. A rejected token forces a
    /// logout and fails the cycle. A cycle that settles after the session
    /// changed is discarded.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<DashboardSnapshot, ApiError> {
        let token = self.token().ok_or(ApiError::Expired)?;
        let started_at = self.epoch_now();

        let (companies, users, rides, payments) = tokio::join!(
            self.api.companies(&token),
            self.api.users(&token),
            self.api.rides(&token),
            self.api.payment_summary(&token),
        );

        if self.epoch_now() != started_at {
            debug!("session changed mid-refresh, discarding results");
            return Err(ApiError::Expired);
        }

        let mut failures = Vec::new();
        let mut expired = false;
        let companies = self.settle(Resource::Companies, companies, &mut failures, &mut expired);
        let users = self.settle(Resource::Users, users, &mut failures, &mut expired);
        let rides = self.settle(Resource::Rides, rides, &mut failures, &mut expired);
        let payments =
            self.settle(Resource::Payments, payments.map(Some), &mut failures, &mut expired);

        if expired {
            warn!("token no longer valid, forcing logout");
            self.logout().await;
            self.notifier.notify(Notice::error("Session expired, please log in again"));
            return Err(ApiError::Expired);
        }

        Ok(DashboardSnapshot { companies, users, rides, payments, failures })
    }

    fn settle<T: Default>(
        &self,
        resource: Resource,
        result: Result<T, ApiError>,
        failures: &mut Vec<Resource>,
        expired: &mut bool,
    ) -> T {
        match result {
            Ok(value) => value,
            Err(ApiError::Expired) => {
                *expired = true;
                T::default()
            }
            Err(e) => {
                warn!(resource = resource.as_str(), error = %e, "resource fetch failed, rendering empty");
                self.notifier
                    .notify(Notice::warning(format!("Could not load {}", resource.as_str())));
                failures.push(resource);
                T::default()
            }
        }
    }

    /// Periodic refresh while the dashboard is active. The timer is not
    /// tied to request completion; overlapping cycles are tolerated because
    /// every snapshot is a full overwrite. Stops when the session leaves
    /// `LoggedIn` or the receiver hangs up.
    pub fn spawn_auto_refresh(
        self: &Arc<Self>,
        every: Duration,
        sink: mpsc::Sender<DashboardSnapshot>,
    ) -> JoinHandle<()> {
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick completes immediately; the initial load
            // already happened
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if controller.state() != SessionState::LoggedIn {
                    debug!("auto-refresh stopping: logged out");
                    break;
                }
                match controller.refresh().await {
                    Ok(snapshot) => {
                        if sink.send(snapshot).await.is_err() {
                            debug!("auto-refresh stopping: receiver dropped");
                            break;
                        }
                    }
                    // expired or replaced mid-cycle
                    Err(_) => break,
                }
            }
        })
    }
}
