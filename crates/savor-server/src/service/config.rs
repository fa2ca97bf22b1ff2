use std::fmt;

#[cfg(feature = "config")]
use clap::{Args, ValueEnum};
use derive_builder::Builder;
use jiff::SignedDuration;
use savor_core::{CommentPolicy, MAX_LIST_LIMIT, Storage};
use savor_postgres::{PgClient, PgClientMigrationExt, PgConfig};
use savor_test::MemoryStore;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::service::SessionKeys;
use crate::{Error, Result};

/// Tracing target for service configuration.
const TRACING_TARGET: &str = "savor_server::service::config";

/// Default values for configuration options.
mod defaults {
    /// Default number of comments returned by a listing.
    pub const COMMENT_LIST_LIMIT: u32 = 100;

    /// Default session token lifetime in days.
    pub const TOKEN_LIFETIME_DAYS: u32 = 30;

    /// Longest accepted session token lifetime in days.
    pub const MAX_TOKEN_LIFETIME_DAYS: u32 = 365;
}

/// Where comments, reviews, accounts and saved restaurants are kept.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[derive(Serialize, Deserialize, Display, EnumString)]
#[cfg_attr(feature = "config", derive(ValueEnum))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local storage, lost on restart.
    #[default]
    Memory,
    /// PostgreSQL, with migrations applied on startup.
    Postgres,
}

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Clone, Serialize, Deserialize, Builder)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
#[builder(
    pattern = "owned",
    setter(into, strip_option, prefix = "with"),
    build_fn(validate = "Self::validate")
)]
pub struct ServiceConfig {
    /// Storage backend.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "STORAGE", value_enum, default_value_t = StorageBackend::Memory)
    )]
    #[builder(default)]
    pub storage: StorageBackend,

    /// Postgres connection settings, used with the `postgres` backend.
    #[cfg_attr(feature = "config", command(flatten))]
    #[builder(default = "PgConfig::new(String::new())")]
    pub postgres: PgConfig,

    /// Number of comments returned when a listing does not ask for a limit.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "COMMENT_LIST_LIMIT", default_value_t = defaults::COMMENT_LIST_LIMIT)
    )]
    #[builder(default = "defaults::COMMENT_LIST_LIMIT")]
    pub comment_list_limit: u32,

    /// Reject comments on reviews that do not exist.
    #[cfg_attr(feature = "config", arg(long, env = "REQUIRE_EXISTING_REVIEW"))]
    #[builder(default)]
    pub require_existing_review: bool,

    /// Secret used to sign session tokens. A random one is generated if empty.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "JWT_SECRET", default_value = "", hide_env_values = true)
    )]
    #[serde(skip_serializing)]
    #[builder(default)]
    pub jwt_secret: String,

    /// Session token lifetime in days.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "TOKEN_LIFETIME_DAYS", default_value_t = defaults::TOKEN_LIFETIME_DAYS)
    )]
    #[builder(default = "defaults::TOKEN_LIFETIME_DAYS")]
    pub token_lifetime_days: u32,
}

impl ServiceConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Returns the comment policy described by this configuration.
    pub fn comment_policy(&self) -> CommentPolicy {
        CommentPolicy {
            default_limit: self.comment_list_limit,
            require_existing_review: self.require_existing_review,
        }
    }

    /// Returns the session token lifetime.
    pub fn token_lifetime(&self) -> SignedDuration {
        SignedDuration::from_hours(i64::from(self.token_lifetime_days) * 24)
    }

    /// Checks values that clap cannot express.
    ///
    /// # Errors
    ///
    /// Returns a configuration error describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        check_comment_list_limit(self.comment_list_limit).map_err(Error::config)?;
        check_token_lifetime(self.token_lifetime_days).map_err(Error::config)?;

        if self.storage == StorageBackend::Postgres {
            self.postgres
                .validate()
                .map_err(|e| Error::config("Invalid Postgres configuration").with_source(e))?;
        }

        Ok(())
    }

    /// Opens the configured storage backend.
    pub async fn connect_storage(&self) -> Result<Storage> {
        tracing::info!(
            target: TRACING_TARGET,
            backend = %self.storage,
            "Opening storage backend"
        );

        match self.storage {
            StorageBackend::Memory => Ok(MemoryStore::new().storage()),
            StorageBackend::Postgres => Ok(Storage::new(self.connect_postgres().await?)),
        }
    }

    /// Connects to Postgres and runs pending migrations.
    pub async fn connect_postgres(&self) -> Result<PgClient> {
        let pg_client = PgClient::new(self.postgres.clone()).map_err(|e| {
            Error::internal("postgres", "Failed to create database client").with_source(e)
        })?;

        pg_client.run_pending_migrations().await.map_err(|e| {
            Error::internal("postgres", "Failed to apply database migrations").with_source(e)
        })?;

        Ok(pg_client)
    }

    /// Creates the session token signing keys.
    pub fn load_session_keys(&self) -> Result<SessionKeys> {
        SessionKeys::from_secret(&self.jwt_secret, self.token_lifetime())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::default(),
            postgres: PgConfig::new(String::new()),
            comment_list_limit: defaults::COMMENT_LIST_LIMIT,
            require_existing_review: false,
            jwt_secret: String::new(),
            token_lifetime_days: defaults::TOKEN_LIFETIME_DAYS,
        }
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("storage", &self.storage)
            .field("postgres", &self.postgres)
            .field("comment_list_limit", &self.comment_list_limit)
            .field("require_existing_review", &self.require_existing_review)
            .field("jwt_secret", &"***")
            .field("token_lifetime_days", &self.token_lifetime_days)
            .finish()
    }
}

impl ServiceConfigBuilder {
    /// Wrapper for builder validation that returns String errors.
    fn validate(builder: &ServiceConfigBuilder) -> Result<(), String> {
        if let Some(limit) = builder.comment_list_limit {
            check_comment_list_limit(limit)?;
        }

        if let Some(days) = builder.token_lifetime_days {
            check_token_lifetime(days)?;
        }

        if builder.storage == Some(StorageBackend::Postgres) {
            match &builder.postgres {
                Some(postgres) => postgres.validate().map_err(|e| e.to_string())?,
                None => return Err("Postgres backend requires a connection URL".to_string()),
            }
        }

        Ok(())
    }
}

fn check_comment_list_limit(limit: u32) -> Result<(), String> {
    if limit == 0 || limit > MAX_LIST_LIMIT {
        return Err(format!(
            "Comment list limit must be between 1 and {MAX_LIST_LIMIT}"
        ));
    }
    Ok(())
}

fn check_token_lifetime(days: u32) -> Result<(), String> {
    if days == 0 || days > defaults::MAX_TOKEN_LIFETIME_DAYS {
        return Err(format!(
            "Token lifetime must be between 1 and {} days",
            defaults::MAX_TOKEN_LIFETIME_DAYS
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use savor_core::store::StoreHealth as _;

    use super::*;

    #[test]
    fn builder_applies_defaults() -> anyhow::Result<()> {
        let config = ServiceConfig::builder().build()?;

        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.comment_policy(), CommentPolicy::default());
        assert_eq!(config.token_lifetime(), SignedDuration::from_hours(30 * 24));
        Ok(())
    }

    #[test]
    fn builder_rejects_out_of_range_values() {
        assert!(ServiceConfig::builder().with_comment_list_limit(0u32).build().is_err());
        assert!(ServiceConfig::builder().with_comment_list_limit(1001u32).build().is_err());
        assert!(ServiceConfig::builder().with_token_lifetime_days(0u32).build().is_err());
    }

    #[test]
    fn postgres_backend_requires_valid_url() {
        let result = ServiceConfig::builder()
            .with_storage(StorageBackend::Postgres)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn storage_backend_parses_lowercase() -> anyhow::Result<()> {
        assert_eq!("postgres".parse::<StorageBackend>()?, StorageBackend::Postgres);
        assert_eq!(StorageBackend::Memory.to_string(), "memory");
        Ok(())
    }

    #[test]
    fn debug_hides_jwt_secret() {
        let config = ServiceConfig {
            jwt_secret: "super-secret".to_owned(),
            ..ServiceConfig::default()
        };
        assert!(!format!("{config:?}").contains("super-secret"));
    }

    #[tokio::test]
    async fn memory_backend_connects() -> anyhow::Result<()> {
        let storage = ServiceConfig::default().connect_storage().await?;
        storage.health.ping().await?;
        Ok(())
    }
}
