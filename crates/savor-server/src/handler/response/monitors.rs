//! Monitor response types.

use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Service health response.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    /// Whether the storage backend answered.
    pub is_healthy: bool,
    /// Timestamp when this status was generated.
    pub checked_at: Timestamp,
}

impl HealthStatus {
    /// Creates a status checked now.
    pub fn new(is_healthy: bool) -> Self {
        Self {
            is_healthy,
            checked_at: Timestamp::now(),
        }
    }
}
