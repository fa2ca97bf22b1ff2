//! Account handlers for listing, reading and renaming users.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use savor_core::{Storage, display_name};
use uuid::Uuid;

use crate::extract::{Json, Path, Query};
use crate::handler::request::{ListParams, UpdateUser, UserPathParams};
use crate::handler::response::{ErrorResponse, User, Users};
use crate::handler::{Error, ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for account operations.
const TRACING_TARGET: &str = "savor_server::handler::accounts";

fn user_not_found() -> Error<'static> {
    ErrorKind::NotFound
        .with_message("User not found")
        .with_resource("user")
}

/// Parses a user id; ids that are not UUIDs cannot name a stored user.
fn parse_user_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| user_not_found())
}

/// Lists every user, oldest first.
#[tracing::instrument(skip_all)]
async fn list_users(
    State(storage): State<Storage>,
    Query(params): Query<ListParams>,
) -> Result<(StatusCode, Json<Users>)> {
    let limit = params.resolve_limit()?;
    let accounts = storage.accounts.list_accounts(limit).await?;

    tracing::debug!(
        target: TRACING_TARGET,
        user_count = accounts.len(),
        "Users listed",
    );

    let users = accounts.into_iter().map(User::from).collect();
    Ok((StatusCode::OK, Json(users)))
}

fn list_users_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List users")
        .description("Returns every registered user. Password hashes are never included.")
        .response::<200, Json<Users>>()
        .response::<400, Json<ErrorResponse>>()
}

/// Returns a single user.
#[tracing::instrument(skip_all, fields(user_id = %path_params.user_id))]
async fn read_user(
    State(storage): State<Storage>,
    Path(path_params): Path<UserPathParams>,
) -> Result<(StatusCode, Json<User>)> {
    let user_id = parse_user_id(&path_params.user_id)?;
    let account = storage
        .accounts
        .find_account(user_id)
        .await?
        .ok_or_else(user_not_found)?;

    Ok((StatusCode::OK, Json(account.into())))
}

fn read_user_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get user")
        .description("Returns a single user by identifier.")
        .response::<200, Json<User>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Sets the display name of a user.
#[tracing::instrument(skip_all, fields(user_id = %path_params.user_id))]
async fn update_user(
    State(storage): State<Storage>,
    Path(path_params): Path<UserPathParams>,
    Json(request): Json<UpdateUser>,
) -> Result<(StatusCode, Json<User>)> {
    tracing::debug!(target: TRACING_TARGET, "Updating user");

    let user_id = parse_user_id(&path_params.user_id)?;
    let name = display_name(&request.name)?;

    let account = storage
        .accounts
        .update_account_name(user_id, name)
        .await?
        .ok_or_else(user_not_found)?;

    tracing::info!(
        target: TRACING_TARGET,
        account_id = %account.id,
        "User updated",
    );

    Ok((StatusCode::OK, Json(account.into())))
}

fn update_user_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Update user")
        .description("Sets the display name of a user.")
        .response::<200, Json<User>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with all account routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/users", get_with(list_users, list_users_docs))
        .api_route(
            "/users/{userId}",
            get_with(read_user, read_user_docs).put_with(update_user, update_user_docs),
        )
        .with_path_items(|item| item.tag("Users"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::handler::response::AuthToken;
    use crate::handler::test::create_test_server;

    async fn signup(server: &axum_test::TestServer, email: &str) -> AuthToken {
        server
            .post("/signup")
            .json(&json!({ "email": email, "password": "password123" }))
            .await
            .json::<AuthToken>()
    }

    #[tokio::test]
    async fn users_are_listed_without_secrets() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        signup(&server, "alice@example.com").await;
        signup(&server, "bob@example.com").await;

        let response = server.get("/users").await;
        response.assert_status_ok();
        let users = response.json::<serde_json::Value>();
        assert_eq!(users.as_array().map(Vec::len), Some(2));
        assert_eq!(users[0]["email"], "alice@example.com");
        assert_eq!(users[0]["name"], serde_json::Value::Null);
        assert!(users[0].get("password").is_none());
        assert!(users[0].get("passwordHash").is_none());
        assert!(users[0].get("password_hash").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn read_and_rename_user() -> anyhow::Result<()> {
        let server = create_test_server().await?;
        let token = signup(&server, "carol@example.com").await;
        let path = format!("/users/{}", token.user_id);

        let user = server.get(&path).await.json::<User>();
        assert_eq!(user.id, token.user_id);
        assert_eq!(user.name, None);

        let response = server.put(&path).json(&json!({ "name": "  Carol " })).await;
        response.assert_status_ok();
        assert_eq!(response.json::<User>().name.as_deref(), Some("Carol"));

        let user = server.get(&path).await.json::<User>();
        assert_eq!(user.name.as_deref(), Some("Carol"));
        Ok(())
    }

    #[tokio::test]
    async fn blank_name_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server().await?;
        let token = signup(&server, "dan@example.com").await;

        let response = server
            .put(&format!("/users/{}", token.user_id))
            .json(&json!({ "name": "   " }))
            .await;
        response.assert_status_bad_request();
        response.assert_json(&json!({ "error": "name is required" }));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        for user_id in [Uuid::now_v7().to_string(), "alice".to_owned()] {
            let path = format!("/users/{user_id}");
            server.get(&path).await.assert_status_not_found();
            server
                .put(&path)
                .json(&json!({ "name": "Alice" }))
                .await
                .assert_status_not_found();
        }
        Ok(())
    }
}
