//! Authentication handlers for user registration and login.
//!
//! Both endpoints return a signed session token. Tokens are issued only;
//! no route requires one.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use savor_core::{ErrorKind as CoreErrorKind, NewAccount, Storage, check_password};

use crate::extract::{Json, ValidateJson};
use crate::handler::request::{Login, Signup};
use crate::handler::response::{AuthToken, ErrorResponse};
use crate::handler::{Error, ErrorKind, Result};
use crate::service::{PasswordHasher, ServiceState, SessionKeys};

/// Tracing target for authentication operations.
const TRACING_TARGET: &str = "savor_server::handler::authentication";

/// Creates a new account and signs the user in.
#[tracing::instrument(skip_all)]
async fn signup(
    State(storage): State<Storage>,
    State(password_hasher): State<PasswordHasher>,
    State(session_keys): State<SessionKeys>,
    ValidateJson(request): ValidateJson<Signup>,
) -> Result<(StatusCode, Json<AuthToken>)> {
    tracing::trace!(target: TRACING_TARGET, "Signup attempt");

    check_password(&request.password)?;
    let password_hash = password_hasher.hash_password(&request.password)?;
    let new_account = NewAccount::new(&request.email, password_hash)?;

    let account = storage
        .accounts
        .insert_account(new_account.into_account())
        .await
        .map_err(|e| match e.kind() {
            CoreErrorKind::Conflict => {
                tracing::warn!(target: TRACING_TARGET, "Signup with a registered email");
                ErrorKind::BadRequest.with_message(e.message().to_owned())
            }
            _ => Error::from(e),
        })?;

    let token = session_keys.issue_token(account.id)?;

    tracing::info!(
        target: TRACING_TARGET,
        account_id = %account.id,
        "Account created",
    );

    let response = AuthToken {
        token,
        user_id: account.id,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

fn signup_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Sign up")
        .description("Registers a new account and returns a session token.")
        .response::<201, Json<AuthToken>>()
        .response::<400, Json<ErrorResponse>>()
}

/// Verifies credentials and signs the user in.
#[tracing::instrument(skip_all)]
async fn login(
    State(storage): State<Storage>,
    State(password_hasher): State<PasswordHasher>,
    State(session_keys): State<SessionKeys>,
    ValidateJson(request): ValidateJson<Login>,
) -> Result<(StatusCode, Json<AuthToken>)> {
    tracing::trace!(target: TRACING_TARGET, "Login attempt");

    let normalized_email = savor_core::normalize_email(&request.email)?;
    let account = storage
        .accounts
        .find_account_by_email(&normalized_email)
        .await?;

    // Unknown emails still pay for a hash so both failures take equal time.
    let Some(account) = account else {
        password_hasher.verify_dummy_password(&request.password);
        tracing::warn!(
            target: TRACING_TARGET,
            account_exists = false,
            "Login failed",
        );
        return Err(ErrorKind::Unauthorized.into_error());
    };

    password_hasher
        .verify_password(&request.password, &account.password_hash)
        .inspect_err(|_| {
            tracing::warn!(
                target: TRACING_TARGET,
                account_id = %account.id,
                account_exists = true,
                "Login failed",
            );
        })?;

    let token = session_keys.issue_token(account.id)?;

    tracing::info!(
        target: TRACING_TARGET,
        account_id = %account.id,
        "Login successful",
    );

    let response = AuthToken {
        token,
        user_id: account.id,
    };
    Ok((StatusCode::OK, Json(response)))
}

fn login_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Log in")
        .description("Verifies an email and password and returns a session token.")
        .response::<200, Json<AuthToken>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with all authentication routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/signup", post_with(signup, signup_docs))
        .api_route("/login", post_with(login, login_docs))
        .with_path_items(|item| item.tag("Authentication"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::handler::test::create_test_server_with_state;
    use crate::handler::test::create_test_server_with_router;
    use crate::service::ServiceConfig;

    #[tokio::test]
    async fn signup_then_login() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let response = server
            .post("/signup")
            .json(&json!({ "email": "alice@example.com", "password": "correct horse" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let signed_up = response.json::<AuthToken>();
        assert!(!signed_up.token.is_empty());

        let response = server
            .post("/login")
            .json(&json!({ "email": "ALICE@example.com", "password": "correct horse" }))
            .await;
        response.assert_status_ok();
        let logged_in = response.json::<AuthToken>();
        assert_eq!(logged_in.user_id, signed_up.user_id);
        Ok(())
    }

    #[tokio::test]
    async fn issued_token_names_the_account() -> anyhow::Result<()> {
        let state = ServiceState::with_storage(
            &ServiceConfig::default(),
            savor_test::MemoryStore::new().storage(),
        )?;
        let session_keys = state.session_keys.clone();
        let server = create_test_server_with_state(routes(), state).await?;

        let signed_up = server
            .post("/signup")
            .json(&json!({ "email": "bob@example.com", "password": "hunter2hunter2" }))
            .await
            .json::<AuthToken>();

        let claims = session_keys.verify_token(&signed_up.token)?;
        assert_eq!(claims.sub, signed_up.user_id);
        assert!(claims.exp > claims.iat);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_is_bad_request() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;
        let body = json!({ "email": "carol@example.com", "password": "password123" });

        server
            .post("/signup")
            .json(&body)
            .await
            .assert_status(StatusCode::CREATED);

        let response = server.post("/signup").json(&body).await;
        response.assert_status_bad_request();
        response.assert_json(&json!({ "error": "User with this email already exists" }));
        Ok(())
    }

    #[tokio::test]
    async fn invalid_signup_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        server
            .post("/signup")
            .json(&json!({ "email": "not-an-email", "password": "password123" }))
            .await
            .assert_status_bad_request();

        server
            .post("/signup")
            .json(&json!({ "email": "dan@example.com", "password": "short" }))
            .await
            .assert_status_bad_request();
        Ok(())
    }

    #[tokio::test]
    async fn bad_credentials_are_unauthorized() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        server
            .post("/signup")
            .json(&json!({ "email": "erin@example.com", "password": "password123" }))
            .await
            .assert_status(StatusCode::CREATED);

        for body in [
            json!({ "email": "erin@example.com", "password": "wrong-password" }),
            json!({ "email": "nobody@example.com", "password": "password123" }),
        ] {
            let response = server.post("/login").json(&body).await;
            response.assert_status_unauthorized();
            response.assert_json(&json!({ "error": "Invalid credentials" }));
        }
        Ok(())
    }
}
