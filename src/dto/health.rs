use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: &'static str,
}

impl HealthResponse {
    /// Health response for an operational bracket store.
    pub fn ok() -> Self {
        Self { status: "ok" }
    }

    /// Health response when the bracket store is unreachable.
    pub fn degraded() -> Self {
        Self { status: "degraded" }
    }
}
