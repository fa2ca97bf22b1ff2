//! Application state and dependency injection.

mod config;
mod security;

use savor_core::{CommentService, Storage};

pub use crate::service::config::{ServiceConfig, ServiceConfigBuilder, StorageBackend};
pub use crate::service::security::{PasswordHasher, SessionClaims, SessionKeys};
pub use crate::{Error, Result};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    // Storage:
    pub storage: Storage,
    pub comments: CommentService,

    // Internal services:
    pub password_hasher: PasswordHasher,
    pub session_keys: SessionKeys,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Opens the storage backend and loads the session keys.
    pub async fn from_config(service_config: &ServiceConfig) -> Result<Self> {
        service_config.validate()?;
        let storage = service_config.connect_storage().await?;
        Self::with_storage(service_config, storage)
    }

    /// Builds the state around an already opened storage backend.
    pub fn with_storage(service_config: &ServiceConfig, storage: Storage) -> Result<Self> {
        let service_state = Self {
            comments: CommentService::new(&storage, service_config.comment_policy()),
            storage,

            password_hasher: PasswordHasher::new(),
            session_keys: service_config.load_session_keys()?,
        };

        Ok(service_state)
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

// Storage:
impl_di!(storage: Storage);
impl_di!(comments: CommentService);

// Internal services:
impl_di!(password_hasher: PasswordHasher);
impl_di!(session_keys: SessionKeys);
