//! Middleware for `axum::Router` and HTTP request processing.
//!
//! - Recovery (panics, timeouts, service errors)
//! - Observability (tracing, request IDs, request timing)
//! - Security (CORS, body limit, response headers)
//! - OpenAPI documentation with Scalar UI
//!
//! ```rust,no_run
//! use axum::Router;
//! use savor_server::middleware::{
//!     RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt,
//! };
//!
//! let app: Router<()> = Router::new()
//!     .with_default_security()
//!     .with_observability()
//!     .with_default_recovery();
//! ```

mod observability;
mod recovery;
mod security;
mod specification;

pub use observability::{RouteCategory, RouterObservabilityExt, track_categorized_metrics};
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{CorsConfig, DEFAULT_MAX_BODY_SIZE, RouterSecurityExt};
pub use specification::{OpenApiConfig, RouterOpenApiExt};
