use crate::{company::Company, payment::PaymentSummary, ride::{Ride, RideStatus}, user};

#[test]
fn user_fixture_parses_with_defaults() {
    // `is_driver`/`is_active` are omitted by older API versions.
    let json = r#"{
        "id": "user-7",
        "name": "Ada Admin",
        "email": "ada@corp.example",
        "role": "admin",
        "company_id": "company-1",
        "created_at": "2024-03-01T09:30:00Z"
    }"#;
    let u: user::User = serde_json::from_str(json).expect("user json");
    assert_eq!(u.id, "user-7");
    assert!(u.is_active);
    assert!(!u.is_driver);
}

#[test]
fn company_fixture_parses() {
    let json = r#"{
        "id": "company-1",
        "name": "Acme Corp",
        "address": "1 Main St",
        "contact_email": "ops@acme.example",
        "contact_phone": "+1-555-0100",
        "is_active": false,
        "created_at": "2023-11-20T00:00:00Z"
    }"#;
    let c: Company = serde_json::from_str(json).expect("company json");
    assert_eq!(c.name, "Acme Corp");
    assert!(!c.is_active);
}

#[test]
fn ride_status_round_trips_snake_case() {
    let r: Ride = serde_json::from_str(
        r#"{
            "id": "ride-1",
            "company_id": "company-1",
            "rider_id": "user-2",
            "pickup_location": "HQ",
            "destination": "Airport",
            "status": "in_progress",
            "fare": 23.5,
            "created_at": "2024-03-01T10:00:00Z"
        }"#,
    )
    .expect("ride json");
    assert_eq!(r.status, RideStatus::InProgress);
    assert!(r.status.is_in_progress());
    assert_eq!(serde_json::to_value(r.status).unwrap(), "in_progress");
}

#[test]
fn unknown_ride_status_does_not_fail_the_list() {
    let r: Ride = serde_json::from_str(
        r#"{
            "id": "ride-2",
            "company_id": "company-1",
            "rider_id": "user-3",
            "pickup_location": "HQ",
            "destination": "Depot",
            "status": "teleporting",
            "created_at": "2024-03-01T11:00:00Z"
        }"#,
    )
    .expect("ride json");
    assert_eq!(r.status, RideStatus::Unknown);
    assert_eq!(r.status.label(), "unknown");
    assert_eq!(r.fare, None);
}

#[test]
fn payment_summary_fixture_parses() {
    let json = r#"{
        "company_id": "company-1",
        "total_amount": 1250.75,
        "total_payments": 42,
        "total_refunds": 3,
        "currency": "USD"
    }"#;
    let p: PaymentSummary = serde_json::from_str(json).expect("summary json");
    assert_eq!(p.total_payments, 42);
    let empty = PaymentSummary::empty("company-1");
    assert_eq!(empty.total_amount, 0.0);
    assert_eq!(empty.currency, "USD");
}

#[test]
fn email_and_required_validation() {
    assert!(user::validate_email("a@b.com").is_ok());
    assert!(user::validate_email("not-an-email").is_err());
    assert!(user::validate_email("  ").is_err());
    assert!(user::validate_required("password", "pw").is_ok());
    let err = user::validate_required("password", "").unwrap_err();
    assert!(err.to_string().contains("password required"));
}
