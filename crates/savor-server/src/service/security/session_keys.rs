//! Signing keys for session tokens.
//!
//! Tokens are HS256 JWTs whose subject is the account id. They are issued on
//! signup and login.

use std::fmt;
use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::handler::{ErrorKind, Result as HandlerResult};
use crate::{Error, Result};

/// Tracing target for session key management.
const TRACING_TARGET: &str = "savor_server::service::session_keys";

/// Length of the secret generated when none is configured.
const GENERATED_SECRET_LEN: usize = 64;

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Account id.
    pub sub: Uuid,
    /// Issued at, in seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, in seconds since the Unix epoch.
    pub exp: i64,
}

/// Keys used to sign and verify session tokens.
///
/// Cloning is cheap; clones share the keys.
#[derive(Clone)]
pub struct SessionKeys {
    inner: Arc<SessionKeysInner>,
}

struct SessionKeysInner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: SignedDuration,
}

impl SessionKeys {
    /// Creates keys from a shared secret.
    ///
    /// An empty secret is replaced by a random one, so tokens stop verifying
    /// after a restart.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a non-positive lifetime and an auth
    /// error if a test token cannot be signed and verified.
    pub fn from_secret(secret: &str, lifetime: SignedDuration) -> Result<Self> {
        if lifetime <= SignedDuration::ZERO {
            return Err(Error::config("Token lifetime must be positive"));
        }

        let secret = if secret.is_empty() {
            tracing::warn!(
                target: TRACING_TARGET,
                "No JWT secret configured, generating a random one"
            );
            generate_secret()
        } else {
            secret.to_owned()
        };

        let inner = SessionKeysInner {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            lifetime,
        };

        let keys = Self {
            inner: Arc::new(inner),
        };
        keys.validate_keys()?;

        tracing::debug!(
            target: TRACING_TARGET,
            lifetime_hours = lifetime.as_hours(),
            "Session keys loaded"
        );

        Ok(keys)
    }

    /// Returns how long issued tokens stay valid.
    #[inline]
    pub fn lifetime(&self) -> SignedDuration {
        self.inner.lifetime
    }

    /// Issues a token for the given account.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::InternalServerError` if signing fails.
    pub fn issue_token(&self, account_id: Uuid) -> HandlerResult<String> {
        let now = Timestamp::now();
        let expires_at = now.checked_add(self.inner.lifetime).map_err(|e| {
            tracing::error!(target: TRACING_TARGET, error = %e, "token expiry overflow");
            ErrorKind::InternalServerError.with_context("Token expiry overflow")
        })?;

        let claims = SessionClaims {
            sub: account_id,
            iat: now.as_second(),
            exp: expires_at.as_second(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.inner.encoding_key).map_err(|e| {
            tracing::error!(target: TRACING_TARGET, error = %e, "failed to sign session token");
            ErrorKind::InternalServerError
                .with_context("Token signing error")
                .with_resource("authentication")
        })
    }

    /// Verifies a token's signature and expiry and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::Unauthorized` for an invalid or expired token.
    pub fn verify_token(&self, token: &str) -> HandlerResult<SessionClaims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<SessionClaims>(token, &self.inner.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(target: TRACING_TARGET, error = %e, "session token rejected");
                ErrorKind::Unauthorized.with_message("Invalid token")
            })
    }

    /// Signs and verifies a throwaway token.
    fn validate_keys(&self) -> Result<()> {
        let token = self
            .issue_token(Uuid::nil())
            .map_err(|e| Error::auth("key validation encoding failed").with_source(e))?;
        self.verify_token(&token)
            .map_err(|e| Error::auth("key validation decoding failed").with_source(e))?;
        Ok(())
    }
}

impl fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeys")
            .field("algorithm", &Algorithm::HS256)
            .field("lifetime", &self.inner.lifetime)
            .finish_non_exhaustive()
    }
}

fn generate_secret() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    (0..GENERATED_SECRET_LEN)
        .map(|_| rng.sample(rand::distr::Alphanumeric) as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: SignedDuration = SignedDuration::from_hours(24);

    #[test]
    fn issued_token_verifies_with_subject() -> anyhow::Result<()> {
        let keys = SessionKeys::from_secret("test-secret", DAY)?;
        let account_id = Uuid::now_v7();

        let token = keys.issue_token(account_id)?;
        let claims = keys.verify_token(&token)?;

        assert_eq!(claims.sub, account_id);
        assert_eq!(claims.exp - claims.iat, DAY.as_secs());
        Ok(())
    }

    #[test]
    fn token_from_other_secret_is_rejected() -> anyhow::Result<()> {
        let keys = SessionKeys::from_secret("first-secret", DAY)?;
        let other = SessionKeys::from_secret("second-secret", DAY)?;

        let token = other.issue_token(Uuid::now_v7())?;
        let error = keys.verify_token(&token).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unauthorized);
        Ok(())
    }

    #[test]
    fn empty_secret_is_replaced() -> anyhow::Result<()> {
        let keys = SessionKeys::from_secret("", DAY)?;
        let token = keys.issue_token(Uuid::now_v7())?;
        keys.verify_token(&token)?;
        Ok(())
    }

    #[test]
    fn non_positive_lifetime_is_rejected() {
        assert!(SessionKeys::from_secret("secret", SignedDuration::ZERO).is_err());
    }
}
