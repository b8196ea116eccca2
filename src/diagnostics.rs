//! Backend connectivity diagnostics
//!
//! Operator-facing checks. Unlike the content provider these surface raw
//! backend error messages.

use crate::backend::{Collection, ContentBackend, Row, SelectQuery};
use crate::config::BackendConfig;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Connection status shown on the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConnectionStatus {
    /// The initial services read succeeded
    Connected,
    /// No backend, or the initial services read failed
    Disconnected,
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionStatus::Connected => f.write_str("Connected"),
            ConnectionStatus::Disconnected => f.write_str("Disconnected"),
        }
    }
}

/// Result of reading one collection
#[derive(Debug, Clone, Serialize)]
pub struct TableInfo {
    /// Collection name
    pub name: Collection,
    /// Rows returned (0 when the read failed)
    pub record_count: usize,
    /// Backend error message, if the read failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TableInfo {
    /// Whether the collection could be read
    pub fn accessible(&self) -> bool {
        self.error.is_none()
    }
}

/// Environment facts shown alongside the report
#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentInfo {
    /// Configured backend URL
    pub backend_url: Option<String>,
    /// Whether an anon key is configured
    pub anon_key_set: bool,
}

/// Full connection report
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionReport {
    /// Connected iff the initial services read succeeded
    pub status: ConnectionStatus,
    /// Error that made the check fail, verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Per-collection results (empty when disconnected)
    pub tables: Vec<TableInfo>,
    /// True when tables were checked and all of them are empty
    pub all_tables_empty: bool,
    /// Backend settings in effect
    pub environment: EnvironmentInfo,
    /// When the check ran
    pub checked_at: DateTime<Utc>,
}

/// Raw result of `select *` on services
#[derive(Debug, Clone, Serialize)]
pub struct ServicesProbe {
    /// Rows returned, if the read succeeded
    pub data: Option<Vec<Row>>,
    /// Error message, if the read failed
    pub error: Option<String>,
}

/// Read every service and return the rows or the error as-is
pub async fn services_probe(backend: Option<&dyn ContentBackend>) -> ServicesProbe {
    let Some(backend) = backend else {
        return ServicesProbe {
            data: None,
            error: Some("Backend client not initialized".to_string()),
        };
    };

    match backend
        .select(Collection::Services, &SelectQuery::all())
        .await
    {
        Ok(rows) => {
            tracing::info!(rows = rows.len(), "Services probe succeeded");
            ServicesProbe {
                data: Some(rows),
                error: None,
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Services probe failed");
            ServicesProbe {
                data: None,
                error: Some(e.to_string()),
            }
        }
    }
}

/// Check connectivity, then count the rows in each collection
pub async fn connection_report(
    config: &BackendConfig,
    backend: Option<&dyn ContentBackend>,
) -> ConnectionReport {
    let environment = EnvironmentInfo {
        backend_url: config.url.clone(),
        anon_key_set: config.anon_key_set(),
    };
    tracing::info!(
        backend_url = ?environment.backend_url,
        anon_key_set = environment.anon_key_set,
        "Testing backend connection"
    );

    let disconnected = |error: String| ConnectionReport {
        status: ConnectionStatus::Disconnected,
        error: Some(error),
        tables: Vec::new(),
        all_tables_empty: false,
        environment: environment.clone(),
        checked_at: Utc::now(),
    };

    let Some(backend) = backend else {
        return disconnected("Backend client not initialized".to_string());
    };

    if let Err(e) = backend
        .select(Collection::Services, &SelectQuery::all().limit(1))
        .await
    {
        tracing::error!(error = %e, "Connection test failed");
        return disconnected(e.to_string());
    }

    let mut tables = Vec::with_capacity(Collection::ALL.len());
    for collection in Collection::ALL {
        let info = match backend.select(collection, &SelectQuery::all()).await {
            Ok(rows) => {
                tracing::info!(table = %collection, rows = rows.len(), "Table is accessible");
                TableInfo {
                    name: collection,
                    record_count: rows.len(),
                    error: None,
                }
            }
            Err(e) => {
                tracing::error!(table = %collection, error = %e, "Table check failed");
                TableInfo {
                    name: collection,
                    record_count: 0,
                    error: Some(e.to_string()),
                }
            }
        };
        tables.push(info);
    }

    let all_tables_empty = !tables.is_empty() && tables.iter().all(|t| t.record_count == 0);

    ConnectionReport {
        status: ConnectionStatus::Connected,
        error: None,
        tables,
        all_tables_empty,
        environment,
        checked_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fake::{FakeBackend, Op};
    use serde_json::json;

    fn configured() -> BackendConfig {
        BackendConfig {
            url: Some("https://example.supabase.co".to_string()),
            anon_key: Some("anon".to_string()),
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn test_no_backend_is_disconnected() {
        let report = connection_report(&BackendConfig::default(), None).await;
        assert_eq!(report.status, ConnectionStatus::Disconnected);
        assert_eq!(
            report.error.as_deref(),
            Some("Backend client not initialized")
        );
        assert!(report.tables.is_empty());
        assert!(!report.environment.anon_key_set);
    }

    #[tokio::test]
    async fn test_services_failure_is_disconnected() {
        let backend = FakeBackend::new().failing(Collection::Services, Op::Select);
        let report = connection_report(&configured(), Some(&backend as &dyn ContentBackend)).await;

        assert_eq!(report.status, ConnectionStatus::Disconnected);
        assert!(report.error.unwrap().contains("services unavailable"));
        assert!(report.tables.is_empty());
        // Only the initial read was attempted
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_connected_counts_each_table() {
        let backend = FakeBackend::new()
            .with_rows(
                Collection::Services,
                vec![json!({"id": 1, "title": "A"}), json!({"id": 2, "title": "B"})],
            )
            .failing(Collection::TeamMembers, Op::Select);
        let report = connection_report(&configured(), Some(&backend as &dyn ContentBackend)).await;

        assert_eq!(report.status, ConnectionStatus::Connected);
        assert!(report.error.is_none());
        assert_eq!(report.tables.len(), 6);
        assert_eq!(report.tables[0].record_count, 2);

        let team = report
            .tables
            .iter()
            .find(|t| t.name == Collection::TeamMembers)
            .unwrap();
        assert!(!team.accessible());
        assert_eq!(team.record_count, 0);
        assert!(!report.all_tables_empty);
    }

    #[tokio::test]
    async fn test_connected_with_empty_tables() {
        let backend = FakeBackend::new();
        let report = connection_report(&configured(), Some(&backend as &dyn ContentBackend)).await;

        assert_eq!(report.status, ConnectionStatus::Connected);
        assert!(report.all_tables_empty);
        assert!(report.tables.iter().all(TableInfo::accessible));
    }

    #[tokio::test]
    async fn test_services_probe_reports_rows_and_errors() {
        let backend = FakeBackend::new().with_rows(
            Collection::Services,
            vec![json!({"id": 1, "title": "A"})],
        );
        let probe = services_probe(Some(&backend as &dyn ContentBackend)).await;
        assert_eq!(probe.data.unwrap().len(), 1);
        assert!(probe.error.is_none());

        let failing = FakeBackend::new().failing(Collection::Services, Op::Select);
        let probe = services_probe(Some(&failing as &dyn ContentBackend)).await;
        assert!(probe.data.is_none());
        assert!(probe.error.is_some());
    }
}
