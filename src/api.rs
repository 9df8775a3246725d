//! Synchronous client for the dashboard backend API.
//!
//! Thin wrapper over the JSON endpoints the dashboard exposes
//! (`/api/overview`, `/api/revenue`, `/api/time-tracking`, ...). Transient
//! failures (5xx, network hiccups) are retried with a short backoff; anything
//! else surfaces as [`DashError::FetchFailed`] so callers can tell "fetch
//! failed" apart from "no data yet". There is no automatic retry beyond that:
//! retry cadence belongs to the caller's refresh scheduling.
//!
//! ```no_run
//! use opsdash::api::Client;
//!
//! let client = Client::default();
//! let revenue = client.fetch_revenue(12)?;
//! println!("12-month total: {:.2}", revenue.total);
//! # Ok::<(), opsdash::DashError>(())
//! ```

use crate::error::DashError;
use crate::models::{ClientSummary, Overview, Project, RevenueReport, TimeTrackingReport};
use log::debug;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Default backend address for a locally hosted dashboard.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8100/api";

// Allow path separators and the usual id characters unescaped in endpoints.
const SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.');

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("opsdash/", env!("CARGO_PKG_VERSION"))) // set user agent
            .build()
            .expect("reqwest client build");
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Fetch one endpoint as raw JSON.
    ///
    /// `endpoint` is the path below the base url, e.g. `/overview` or
    /// `/revenue?months=6`. 5xx responses and network errors are retried
    /// with a small backoff before giving up.
    pub fn get_json(&self, endpoint: &str) -> Result<Value, DashError> {
        let (path, query) = match endpoint.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (endpoint, None),
        };
        let encoded =
            percent_encoding::utf8_percent_encode(path.trim_start_matches('/'), SAFE).to_string();
        let mut url = format!("{}/{}", self.base_url, encoded);
        if let Some(q) = query {
            url.push('?');
            url.push_str(q);
        }
        debug!("GET {url}");

        // Small retry for transient failures (5xx / network errors). The
        // backoff only runs between attempts, never after the last one.
        let backoffs = [100u64, 300];
        let mut last_err: Option<String> = None;
        for attempt in 0..=backoffs.len() {
            match self.http.get(&url).send() {
                Ok(r) if r.status().is_success() => {
                    return r
                        .json()
                        .map_err(|e| DashError::fetch(endpoint, format!("decode json: {e}")));
                }
                Ok(r) if r.status().is_server_error() => {
                    last_err = Some(format!("HTTP {}", r.status()));
                }
                Ok(r) => {
                    return Err(DashError::fetch(endpoint, format!("HTTP {}", r.status())));
                }
                Err(e) => last_err = Some(e.to_string()),
            }
            if let Some(&backoff_ms) = backoffs.get(attempt) {
                std::thread::sleep(Duration::from_millis(backoff_ms));
            }
        }
        Err(DashError::fetch(
            endpoint,
            last_err.unwrap_or_else(|| "exhausted retries".to_string()),
        ))
    }

    fn get_typed<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, DashError> {
        let value = self.get_json(endpoint)?;
        serde_json::from_value(value)
            .map_err(|e| DashError::fetch(endpoint, format!("parse payload: {e}")))
    }

    /// Overview stats for the dashboard home.
    pub fn fetch_overview(&self) -> Result<Overview, DashError> {
        self.get_typed("/overview")
    }

    /// Monthly revenue for the last `months` months.
    pub fn fetch_revenue(&self, months: u32) -> Result<RevenueReport, DashError> {
        self.get_typed(&format!("/revenue?months={months}"))
    }

    /// Hours logged over the last `days` days.
    pub fn fetch_time_tracking(&self, days: u32) -> Result<TimeTrackingReport, DashError> {
        self.get_typed(&format!("/time-tracking?days={days}"))
    }

    /// Project rows, optionally filtered by status (`active`, `done`, ...).
    pub fn fetch_projects(&self, status: Option<&str>) -> Result<Vec<Project>, DashError> {
        match status {
            Some(s) => self.get_typed(&format!("/projects?status={s}")),
            None => self.get_typed("/projects"),
        }
    }

    /// Client rows with health scores.
    pub fn fetch_clients(&self) -> Result<Vec<ClientSummary>, DashError> {
        self.get_typed("/clients")
    }
}
