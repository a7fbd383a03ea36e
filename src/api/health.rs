//! Health check endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use super::state::AppState;

/// Health response body
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<IndexHealth>,
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Vector index reachability details
#[derive(Serialize)]
pub struct IndexHealth {
    pub name: String,
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Simple liveness check - 200 when the process is running
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Health check with vector index reachability
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let name = state.index.index_name().to_string();

    let (status, index) = match state.index.describe().await {
        Ok(stats) => (
            HealthStatus::Healthy,
            IndexHealth {
                name,
                reachable: true,
                vector_count: Some(stats.vector_count),
                message: None,
            },
        ),
        Err(e) => (
            HealthStatus::Degraded,
            IndexHealth {
                name,
                reachable: false,
                vector_count: None,
                message: Some(e.to_string()),
            },
        ),
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        index: Some(index),
    };

    // Degraded still accepts requests; queries may recover if the index does
    (StatusCode::OK, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_serialization() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Healthy).unwrap(),
            "\"healthy\""
        );
        assert_eq!(
            serde_json::to_string(&HealthStatus::Degraded).unwrap(),
            "\"degraded\""
        );
    }

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: HealthStatus::Healthy,
            version: "0.1.0".to_string(),
            index: Some(IndexHealth {
                name: "medicalbot".to_string(),
                reachable: true,
                vector_count: Some(42),
                message: None,
            }),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"healthy\""));
        assert!(json.contains("\"vector_count\":42"));
        assert!(!json.contains("message"));
    }
}
