//! OpenAPI specification middleware with Scalar UI integration.
//!
//! The specification is generated from the [`ApiRouter`] routes and their
//! docs functions, then served as JSON next to an interactive Scalar UI.
//!
//! ```rust
//! use aide::axum::ApiRouter;
//! use axum::Router;
//! use savor_server::middleware::{OpenApiConfig, RouterOpenApiExt};
//!
//! let app: Router<()> = ApiRouter::new()
//!     .with_open_api(OpenApiConfig::default());
//! ```
//!
//! [`ApiRouter`]: aide::axum::ApiRouter

use aide::axum::ApiRouter;
use aide::openapi::{Info, OpenApi};
use aide::scalar::Scalar;
use axum::routing::{Router, get};
use axum::{Extension, Json};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Paths where the OpenAPI JSON and the Scalar UI are served.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct OpenApiConfig {
    /// Path which exposes the OpenAPI JSON specification.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "OPENAPI_JSON_PATH", default_value = "/api/openapi.json")
    )]
    pub open_api_json: String,

    /// Path which exposes the Scalar API reference UI.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "OPENAPI_SCALAR_PATH", default_value = "/api/scalar")
    )]
    pub scalar_ui: String,
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            open_api_json: "/api/openapi.json".to_owned(),
            scalar_ui: "/api/scalar".to_owned(),
        }
    }
}

/// Extension trait for [`ApiRouter`] to add OpenAPI documentation with Scalar UI.
///
/// [`ApiRouter`]: aide::axum::ApiRouter
pub trait RouterOpenApiExt<S> {
    /// Adds OpenAPI documentation routes with the default API info.
    fn with_open_api(self, config: OpenApiConfig) -> Router<S>;

    /// Adds OpenAPI documentation routes with custom OpenAPI info.
    fn with_open_api_info(self, config: OpenApiConfig, info: Info) -> Router<S>;
}

impl<S> RouterOpenApiExt<S> for ApiRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_open_api(self, config: OpenApiConfig) -> Router<S> {
        let info = Info {
            title: "Savor API".to_owned(),
            summary: Some("Restaurant reviews, comments and saved lists".to_owned()),
            description: Some(
                "Savor lets diners review restaurants, discuss reviews and restaurants \
                in comment threads with replies, and keep a list of saved restaurants."
                    .to_owned(),
            ),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            ..Info::default()
        };

        self.with_open_api_info(config, info)
    }

    fn with_open_api_info(self, config: OpenApiConfig, info: Info) -> Router<S> {
        async fn serve_openapi(Extension(api): Extension<OpenApi>) -> Json<OpenApi> {
            Json(api)
        }

        let mut api = OpenApi {
            info,
            ..OpenApi::default()
        };

        let scalar = Scalar::new(&config.open_api_json);
        let router = self
            .route(&config.scalar_ui, scalar.axum_route())
            .route(&config.open_api_json, get(serve_openapi));

        router.finish_api(&mut api).layer(Extension(api))
    }
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use savor_test::MemoryStore;

    use super::*;
    use crate::handler::routes;
    use crate::service::{ServiceConfig, ServiceState};

    #[tokio::test]
    async fn openapi_json_lists_every_route() -> anyhow::Result<()> {
        let state = ServiceState::with_storage(
            &ServiceConfig::default(),
            MemoryStore::new().storage(),
        )?;
        let app = routes()
            .with_open_api(OpenApiConfig::default())
            .with_state(state);
        let server = TestServer::new(app)?;

        let response = server.get("/api/openapi.json").await;
        response.assert_status_ok();
        let spec = response.json::<serde_json::Value>();
        assert_eq!(spec["info"]["title"], "Savor API");

        for path in [
            "/reviews/{reviewId}/comments",
            "/restaurants/{restaurantId}/comments",
            "/comments/{commentId}/replies",
            "/reviews",
            "/signup",
            "/users/{userId}",
            "/saveRestaurant",
            "/health",
        ] {
            assert!(spec["paths"].get(path).is_some(), "missing {path}");
        }

        server.get("/api/scalar").await.assert_status_ok();
        Ok(())
    }
}
