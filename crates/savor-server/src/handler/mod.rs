//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use savor_server::handler::routes;
//! use savor_server::middleware::{OpenApiConfig, RouterOpenApiExt};
//! use savor_server::service::{ServiceConfig, ServiceState};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServiceConfig::default();
//! let state = ServiceState::from_config(&config).await?;
//!
//! let router: axum::Router = routes()
//!     .with_open_api(OpenApiConfig::default())
//!     .with_state(state);
//! # Ok(())
//! # }
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod accounts;
mod authentication;
mod comments;
mod error;
mod monitors;
pub mod request;
pub mod response;
mod reviews;
mod saved_restaurants;

use aide::axum::ApiRouter;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
use crate::service::ServiceState;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns an [`ApiRouter`] with every route of the API.
///
/// No route requires a session token; authentication only issues them.
pub fn routes() -> ApiRouter<ServiceState> {
    ApiRouter::new()
        .merge(comments::routes())
        .merge(reviews::routes())
        .merge(authentication::routes())
        .merge(accounts::routes())
        .merge(saved_restaurants::routes())
        .merge(monitors::routes())
        .fallback(handler)
}

#[cfg(test)]
pub(crate) mod test {
    use aide::axum::ApiRouter;
    use aide::openapi::OpenApi;
    use axum_test::TestServer;
    use savor_test::MemoryStore;

    use crate::handler::routes;
    use crate::service::{ServiceConfig, ServiceState};

    /// Returns a new [`TestServer`] with the given router over an empty store.
    pub async fn create_test_server_with_router(
        router: impl Fn(ServiceState) -> ApiRouter<ServiceState>,
    ) -> anyhow::Result<TestServer> {
        let (server, _) = create_test_server_with_store(router, ServiceConfig::default()).await?;
        Ok(server)
    }

    /// Returns a new [`TestServer`] together with the store behind it.
    pub async fn create_test_server_with_store(
        router: impl Fn(ServiceState) -> ApiRouter<ServiceState>,
        config: ServiceConfig,
    ) -> anyhow::Result<(TestServer, MemoryStore)> {
        let store = MemoryStore::new();
        let state = ServiceState::with_storage(&config, store.storage())?;
        let router = router(state.clone());
        let server = create_test_server_with_state(router, state).await?;
        Ok((server, store))
    }

    /// Returns a new [`TestServer`] with the given router and state.
    pub async fn create_test_server_with_state(
        router: ApiRouter<ServiceState>,
        state: ServiceState,
    ) -> anyhow::Result<TestServer> {
        let app = router.finish_api(&mut OpenApi::default()).with_state(state);
        let server = TestServer::new(app)?;
        Ok(server)
    }

    /// Returns a new [`TestServer`] with every route.
    pub async fn create_test_server() -> anyhow::Result<TestServer> {
        create_test_server_with_router(|_| routes()).await
    }

    #[tokio::test]
    async fn handlers() -> anyhow::Result<()> {
        let server = create_test_server().await?;
        assert!(server.is_running());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server.get("/menus").await;
        response.assert_status_not_found();
        response.assert_json(&serde_json::json!({ "error": "Resource not found" }));
        Ok(())
    }
}
