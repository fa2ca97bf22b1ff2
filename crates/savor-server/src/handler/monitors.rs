//! Service health check handler.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use savor_core::Storage;

use crate::extract::Json;
use crate::handler::Result;
use crate::handler::response::HealthStatus;
use crate::service::ServiceState;

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "savor_server::handler::monitors";

/// Pings the storage backend and reports whether it answered.
#[tracing::instrument(skip_all)]
async fn health_status(
    State(storage): State<Storage>,
) -> Result<(StatusCode, Json<HealthStatus>)> {
    let is_healthy = match storage.health.ping().await {
        Ok(()) => true,
        Err(error) => {
            tracing::error!(
                target: TRACING_TARGET,
                error = %error,
                "Storage health check failed",
            );
            false
        }
    };

    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    tracing::debug!(
        target: TRACING_TARGET,
        is_healthy,
        status_code = status_code.as_u16(),
        "Health status response prepared",
    );

    Ok((status_code, Json(HealthStatus::new(is_healthy))))
}

fn health_status_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Health check")
        .description("Reports whether the storage backend is reachable.")
        .response::<200, Json<HealthStatus>>()
        .response::<503, Json<HealthStatus>>()
}

/// Returns a [`Router`] with all health monitoring routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/health", get_with(health_status, health_status_docs))
        .with_path_items(|item| item.tag("Health"))
}
