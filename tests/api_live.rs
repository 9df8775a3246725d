//! Live backend tests. Run with a dashboard backend on 127.0.0.1:8100:
//! `cargo test --features online`
#![cfg(feature = "online")]

use opsdash::Client;

#[test]
fn overview_has_consistent_counts() {
    let client = Client::default();
    let overview = client.fetch_overview().unwrap();
    assert!(overview.active_clients <= overview.total_clients);
    assert!(overview.utilization_rate >= 0.0);
}

#[test]
fn revenue_matches_requested_window() {
    let client = Client::default();
    let report = client.fetch_revenue(6).unwrap();
    assert!(report.monthly.len() <= 6);
    assert!(report.total >= 0.0);
}

#[test]
fn projects_filter_by_status() {
    let client = Client::default();
    let active = client.fetch_projects(Some("active")).unwrap();
    assert!(active.iter().all(|p| p.status == "active"));
}
