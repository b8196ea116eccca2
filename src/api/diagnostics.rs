//! Diagnostics API handlers
//!
//! Raw connectivity information for operators.

use super::SharedState;
use crate::diagnostics::{self, ConnectionReport, ServicesProbe};
use axum::{extract::State, response::Json};

/// GET /api/diagnostics/connection - Connection status and per-table counts
pub async fn connection(State(state): State<SharedState>) -> Json<ConnectionReport> {
    let backend = state.provider.backend();
    Json(diagnostics::connection_report(&state.backend_config, backend.as_deref()).await)
}

/// GET /api/diagnostics/services - Raw `select *` on services
pub async fn services(State(state): State<SharedState>) -> Json<ServicesProbe> {
    let backend = state.provider.backend();
    let probe = diagnostics::services_probe(backend.as_deref()).await;
    tracing::info!(
        rows = ?probe.data.as_ref().map(Vec::len),
        error = ?probe.error,
        "Services probe output"
    );
    Json(probe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AppState;
    use crate::config::BackendConfig;
    use crate::diagnostics::ConnectionStatus;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_connection_without_backend() {
        let state = Arc::new(AppState::new(BackendConfig::default()));
        let report = connection(State(state)).await;
        assert_eq!(report.status, ConnectionStatus::Disconnected);
        assert!(report.tables.is_empty());
    }

    #[tokio::test]
    async fn test_services_probe_without_backend() {
        let state = Arc::new(AppState::new(BackendConfig::default()));
        let probe = services(State(state)).await;
        assert!(probe.data.is_none());
        assert!(probe.error.is_some());
    }
}
