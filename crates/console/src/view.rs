use std::fmt::Write as _;

use models::{PaymentSummary, Ride, RideStatus};
use service::session::DashboardSnapshot;

/// What the console shows. Exactly one of the two: the dashboard requires a
/// session, the login screen the lack of one.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Login { error: Option<String> },
    Dashboard(DashboardView),
}

/// Everything the dashboard screen needs, precomputed from a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub operator: String,
    pub stats: DashboardStats,
    pub recent: Vec<ActivityRow>,
    pub payments: Option<PaymentSummary>,
    pub degraded: Vec<&'static str>,
}

/// The four stat cards of the dashboard header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub companies: usize,
    pub active_users: usize,
    pub rides_in_progress: usize,
    pub total_rides: usize,
}

impl DashboardStats {
    pub fn compute(snapshot: &DashboardSnapshot) -> Self {
        Self {
            companies: snapshot.companies.len(),
            active_users: snapshot.users.iter().filter(|u| u.is_active).count(),
            rides_in_progress: snapshot
                .rides
                .iter()
                .filter(|r| r.status.is_in_progress())
                .count(),
            total_rides: snapshot.rides.len(),
        }
    }
}

/// One row of the recent-activity table.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRow {
    pub at: String,
    pub event: &'static str,
    pub rider: String,
    pub company: String,
    pub status: &'static str,
}

const RECENT_LIMIT: usize = 10;

/// Assemble the dashboard screen from a settled snapshot. Pure: all I/O
/// stays with the caller.
pub fn dashboard_view(operator: &str, snapshot: &DashboardSnapshot) -> DashboardView {
    DashboardView {
        operator: operator.to_string(),
        stats: DashboardStats::compute(snapshot),
        recent: snapshot.rides.iter().take(RECENT_LIMIT).map(activity_row).collect(),
        payments: snapshot.payments.clone(),
        degraded: snapshot.failures.iter().map(|r| r.as_str()).collect(),
    }
}

fn activity_row(ride: &Ride) -> ActivityRow {
    ActivityRow {
        at: ride.created_at.format("%Y-%m-%d %H:%M").to_string(),
        event: if ride.status == RideStatus::Completed {
            "Ride completed"
        } else {
            "Ride created"
        },
        rider: ride.rider_id.clone(),
        company: ride.company_id.clone(),
        status: ride.status.label(),
    }
}

/// Render step: screen in, text out.
pub fn render(screen: &Screen) -> String {
    match screen {
        Screen::Login { error } => render_login(error.as_deref()),
        Screen::Dashboard(view) => render_dashboard(view),
    }
}

fn render_login(error: Option<&str>) -> String {
    let mut out = String::new();
    out.push_str("== Admin Login ==\n");
    if let Some(err) = error {
        let _ = writeln!(out, "login failed: {err}");
    }
    out.push_str("Set ADMIN_EMAIL, ADMIN_PASSWORD and ADMIN_COMPANY_ID, then restart.\n");
    out
}

fn render_dashboard(view: &DashboardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== Dashboard ({}) ==", view.operator);
    let _ = writeln!(
        out,
        "companies: {}  active users: {}  rides in progress: {}  total rides: {}",
        view.stats.companies,
        view.stats.active_users,
        view.stats.rides_in_progress,
        view.stats.total_rides,
    );
    if let Some(payments) = &view.payments {
        let _ = writeln!(
            out,
            "payments: {:.2} {} across {} payments ({} refunds)",
            payments.total_amount, payments.currency, payments.total_payments, payments.total_refunds,
        );
    }
    if !view.degraded.is_empty() {
        let _ = writeln!(out, "unavailable this cycle: {}", view.degraded.join(", "));
    }

    out.push_str("\nRecent activity\n");
    if view.recent.is_empty() {
        out.push_str("  (no recent activity)\n");
    } else {
        for row in &view.recent {
            let _ = writeln!(
                out,
                "  {}  {:<14}  rider={}  company={}  [{}]",
                row.at, row.event, row.rider, row.company, row.status,
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use models::{Company, Ride, RideStatus, User};
    use service::session::{DashboardSnapshot, Resource};

    use super::*;

    fn user(id: &str, active: bool) -> User {
        User {
            id: id.into(),
            name: "Ada Admin".into(),
            email: "ada@corp.example".into(),
            role: "admin".into(),
            company_id: "company-1".into(),
            is_driver: false,
            is_active: active,
            created_at: Utc::now(),
        }
    }

    fn company(id: &str) -> Company {
        Company {
            id: id.into(),
            name: "Acme Corp".into(),
            address: "1 Main St".into(),
            contact_email: "ops@acme.example".into(),
            contact_phone: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn ride(id: &str, status: RideStatus) -> Ride {
        Ride {
            id: id.into(),
            company_id: "company-1".into(),
            rider_id: "user-2".into(),
            driver_id: None,
            pickup_location: "HQ".into(),
            destination: "Airport".into(),
            status,
            fare: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn stats_count_active_users_and_open_rides() {
        let snapshot = DashboardSnapshot {
            companies: vec![company("company-1")],
            users: vec![user("u1", true), user("u2", false), user("u3", true)],
            rides: vec![
                ride("r1", RideStatus::InProgress),
                ride("r2", RideStatus::Completed),
                ride("r3", RideStatus::Pending),
            ],
            payments: None,
            failures: Vec::new(),
        };
        let stats = DashboardStats::compute(&snapshot);
        assert_eq!(stats.companies, 1);
        assert_eq!(stats.active_users, 2);
        assert_eq!(stats.rides_in_progress, 1);
        assert_eq!(stats.total_rides, 3);
    }

    #[test]
    fn recent_activity_caps_at_ten_rows() {
        let rides: Vec<Ride> = (0..15)
            .map(|i| ride(&format!("r{i}"), RideStatus::Completed))
            .collect();
        let snapshot = DashboardSnapshot { rides, ..Default::default() };
        let view = dashboard_view("Ada", &snapshot);
        assert_eq!(view.recent.len(), 10);
        assert!(view.recent.iter().all(|row| row.event == "Ride completed"));
    }

    #[test]
    fn dashboard_render_mentions_degraded_resources() {
        let snapshot = DashboardSnapshot {
            companies: vec![company("company-1")],
            failures: vec![Resource::Rides],
            ..Default::default()
        };
        let text = render(&Screen::Dashboard(dashboard_view("Ada", &snapshot)));
        assert!(text.contains("== Dashboard (Ada) =="));
        assert!(text.contains("unavailable this cycle: rides"));
        assert!(text.contains("(no recent activity)"));
    }

    #[test]
    fn login_render_carries_the_failure_message() {
        let text = render(&Screen::Login { error: Some("bad creds".into()) });
        assert!(text.contains("Admin Login"));
        assert!(text.contains("bad creds"));
        // no dashboard leakage on the login screen
        assert!(!text.contains("Recent activity"));
    }
}
