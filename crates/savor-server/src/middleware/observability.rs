//! Observability middleware for request tracing and timing.

use std::time::Instant;

use axum::Router;
use axum::extract::Request;
use axum::http::{Uri, header};
use axum::middleware::{Next, from_fn};
use axum::response::Response;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

/// Tracing target for request metrics.
const TRACING_TARGET_METRICS: &str = "savor_server::middleware::metrics";

/// Header carrying the request identifier.
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Extension trait for `axum::`[`Router`] to apply observability middleware.
pub trait RouterObservabilityExt<S> {
    /// Layers request tracing, request IDs and sensitive header redaction.
    ///
    /// Each request gets a UUID in `x-request-id` unless the client sent
    /// one, and the same value is echoed on the response.
    fn with_observability(self) -> Self;

    /// Layers per-request timing logs grouped by [`RouteCategory`].
    fn with_metrics(self) -> Self;
}

impl<S> RouterObservabilityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_observability(self) -> Self {
        self.layer(PropagateRequestIdLayer::new(
            header::HeaderName::from_static(REQUEST_ID_HEADER),
        ))
        .layer(SetSensitiveRequestHeadersLayer::new([
            header::AUTHORIZATION,
            header::COOKIE,
        ]))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            header::HeaderName::from_static(REQUEST_ID_HEADER),
            MakeRequestUuid,
        ))
    }

    fn with_metrics(self) -> Self {
        self.layer(ServiceBuilder::new().layer(from_fn(track_categorized_metrics)))
    }
}

/// Coarse grouping of routes for request logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteCategory {
    Comments,
    Reviews,
    Authentication,
    Users,
    SavedRestaurants,
    Health,
    Documentation,
    Other,
}

impl RouteCategory {
    /// Categorizes a request by its path.
    pub fn from_uri(uri: &Uri) -> Self {
        let path = uri.path();
        let first = path.trim_start_matches('/').split('/').next().unwrap_or_default();

        if path.ends_with("/comments") || path.ends_with("/replies") {
            return Self::Comments;
        }

        match first {
            "reviews" => Self::Reviews,
            "signup" | "login" => Self::Authentication,
            "users" => Self::Users,
            "saveRestaurant" | "getSavedRestaurants" | "deleteRestaurant" => {
                Self::SavedRestaurants
            }
            "health" => Self::Health,
            "api" => Self::Documentation,
            _ => Self::Other,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Comments => "comments",
            Self::Reviews => "reviews",
            Self::Authentication => "authentication",
            Self::Users => "users",
            Self::SavedRestaurants => "saved_restaurants",
            Self::Health => "health",
            Self::Documentation => "documentation",
            Self::Other => "other",
        }
    }
}

/// Logs the category, status and duration of every request.
pub async fn track_categorized_metrics(request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let category = RouteCategory::from_uri(&uri);

    tracing::trace!(
        target: TRACING_TARGET_METRICS,
        method = %method,
        uri = %uri,
        category = category.as_str(),
        "request started"
    );

    let response = next.run(request).await;
    let duration = start_time.elapsed();

    tracing::debug!(
        target: TRACING_TARGET_METRICS,
        method = %method,
        uri = %uri,
        category = category.as_str(),
        status = %response.status(),
        duration_ms = duration.as_millis() as u64,
        "request completed"
    );

    response
}
