use thiserror::Error;

/// Recoverable failures surfaced to callers.
///
/// Neither variant is fatal to a hosting application: an unresolved surface
/// leaves the chart renderer inert, and a failed fetch simply means "no new
/// data this cycle". Retry cadence belongs to the caller's refresh scheduling,
/// not to the error site.
#[derive(Debug, Error)]
pub enum DashError {
    /// The surface id passed at renderer construction does not resolve to a
    /// registered drawing surface.
    #[error("draw surface `{0}` not found")]
    SurfaceNotFound(String),

    /// A backend API request failed after transient-error retries.
    #[error("fetch from `{endpoint}` failed: {reason}")]
    FetchFailed { endpoint: String, reason: String },
}

impl DashError {
    pub(crate) fn fetch(endpoint: &str, reason: impl std::fmt::Display) -> Self {
        DashError::FetchFailed {
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
        }
    }
}
