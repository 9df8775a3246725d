//! Payload parsing against captured backend responses. No network involved.

use opsdash::models::{ClientSummary, Overview, Project, RevenueReport, TimeTrackingReport};

#[test]
fn overview_payload_parses() {
    let json = r#"{
        "active_projects": 4,
        "active_clients": 3,
        "total_clients": 9,
        "total_revenue": 48250.0,
        "pending_revenue": 6200.0,
        "paid_invoices": 17,
        "pending_invoices": 3,
        "overdue_invoices": 1,
        "hours_this_month": 112.5,
        "billable_hours_month": 89.0,
        "utilization_rate": 79.1
    }"#;
    let overview: Overview = serde_json::from_str(json).unwrap();
    assert_eq!(overview.active_projects, 4);
    assert_eq!(overview.overdue_invoices, 1);
    assert!((overview.utilization_rate - 79.1).abs() < 1e-9);
}

#[test]
fn revenue_payload_keeps_month_order() {
    let json = r#"{
        "monthly": {"2026-03": 3200.0, "2026-01": 5100.0, "2026-02": 0},
        "total": 8300.0,
        "average": 2766.67
    }"#;
    let report: RevenueReport = serde_json::from_str(json).unwrap();
    let months: Vec<&str> = report.monthly.labels().collect();
    // JSON object order is display order, not sorted order.
    assert_eq!(months, vec!["2026-03", "2026-01", "2026-02"]);
    assert_eq!(report.monthly.get("2026-02"), Some(0.0));
    assert_eq!(report.total, 8300.0);
}

#[test]
fn time_tracking_payload_parses_both_groupings() {
    let json = r#"{
        "total_hours": 120.0,
        "billable_hours": 90.0,
        "non_billable_hours": 30.0,
        "utilization_rate": 75.0,
        "by_client": {
            "Acme GmbH": {"billable": 60.0, "non_billable": 10.0},
            "Beta Labs": {"billable": 30.0, "non_billable": 20.0}
        },
        "by_date": {"2026-08-27": 7.5, "2026-08-28": 8.0}
    }"#;
    let report: TimeTrackingReport = serde_json::from_str(json).unwrap();
    assert_eq!(report.by_client.len(), 2);
    assert_eq!(report.by_client["Acme GmbH"].billable, 60.0);
    assert_eq!(report.by_date.len(), 2);
    assert_eq!(report.by_date.scale_max(), 8.0);
}

#[test]
fn project_and_client_rows_parse() {
    let project: Project = serde_json::from_str(
        r#"{
            "id": "p-17",
            "title": "Website relaunch",
            "client": "Acme GmbH",
            "status": "active",
            "priority": "high",
            "billable": true,
            "estimated_hours": 80.0,
            "hours_logged": 42.5,
            "created_at": "2026-06-01",
            "due_date": "2026-09-15"
        }"#,
    )
    .unwrap();
    assert_eq!(project.status, "active");
    assert!(project.billable);

    let client: ClientSummary = serde_json::from_str(
        r#"{
            "id": "c-3",
            "name": "Dana Fuchs",
            "email": "dana@acme.example",
            "company": "Acme GmbH",
            "status": "active",
            "health_score": 86.0,
            "health_status": "good",
            "created_at": "2025-11-20"
        }"#,
    )
    .unwrap();
    assert_eq!(client.health_status, "good");
}

#[test]
fn fetch_error_names_the_endpoint() {
    // A refused connection must surface as FetchFailed, not a panic. Port 9
    // (discard) is reserved and never runs an HTTP server.
    let client = opsdash::Client::new("http://127.0.0.1:9/api");
    let err = client.fetch_overview().unwrap_err();
    match err {
        opsdash::DashError::FetchFailed { endpoint, .. } => {
            assert_eq!(endpoint, "/overview");
        }
        other => panic!("expected FetchFailed, got {other:?}"),
    }
}

#[test]
fn fetch_error_returns_without_a_trailing_backoff() {
    // Retries back off between attempts only. Refused connections fail
    // near-instantly, so three attempts with 100 ms + 300 ms pauses must come
    // back well under a second; a sleep after the final attempt would not.
    let client = opsdash::Client::new("http://127.0.0.1:9/api");
    let started = std::time::Instant::now();
    let _ = client.fetch_overview().unwrap_err();
    assert!(
        started.elapsed() < std::time::Duration::from_secs(1),
        "error path slept after the last attempt: {:?}",
        started.elapsed()
    );
}
