use axum::{extract::State, http::StatusCode, response::Json};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Instant;
use utoipa::ToSchema;

const SERVICE_NAME: &str = "jobly";

/// Basic health check response
#[derive(serde::Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    /// RFC 3339 time the check ran
    pub timestamp: String,
}

/// Database readiness response
#[derive(serde::Serialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: String,
    pub service: String,
    pub database: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Round trip of the database ping, absent when no ping was made
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
}

impl ReadinessResponse {
    fn new(status: &str, database: &str) -> Self {
        Self {
            status: status.to_string(),
            service: SERVICE_NAME.to_string(),
            database: database.to_string(),
            error: None,
            response_time_ms: None,
        }
    }

    fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    fn with_response_time(mut self, elapsed: std::time::Duration) -> Self {
        self.response_time_ms = Some(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX));
        self
    }
}

/// Map database errors to messages without connection details
pub(crate) fn sanitize_db_error(error: &sqlx::Error) -> &'static str {
    match error {
        sqlx::Error::Configuration(_) => "Database configuration error",
        sqlx::Error::Io(_) => "Database connection error",
        sqlx::Error::Tls(_) => "Database TLS error",
        sqlx::Error::PoolTimedOut => "Database pool timeout",
        sqlx::Error::PoolClosed => "Database pool closed",
        sqlx::Error::Protocol(_) => "Database protocol error",
        _ => "Database error",
    }
}

/// GET /health
/// Basic health check endpoint (no database check)
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_handler() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }),
    )
}

/// GET /health/ready
/// Readiness probe with database connectivity check
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessResponse),
        (status = 503, description = "Service is not ready", body = ReadinessResponse)
    )
)]
pub async fn readiness_handler(
    State(pool): State<Option<Arc<PgPool>>>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let Some(pool) = pool else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadinessResponse::new("not_ready", "not_configured")),
        );
    };

    let start_time = Instant::now();

    let db_check = tokio::time::timeout(
        std::time::Duration::from_secs(2),
        sqlx::query("SELECT 1 as health_check").fetch_one(pool.as_ref()),
    )
    .await;

    let response_time = start_time.elapsed();

    match db_check {
        Ok(Ok(_)) => (
            StatusCode::OK,
            Json(ReadinessResponse::new("ready", "connected").with_response_time(response_time)),
        ),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(
                    ReadinessResponse::new("not_ready", "disconnected")
                        .with_error(sanitize_db_error(&e))
                        .with_response_time(response_time),
                ),
            )
        }
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(
                ReadinessResponse::new("not_ready", "timeout")
                    .with_error("Database query timed out after 2 seconds")
                    .with_response_time(response_time),
            ),
        ),
    }
}
