//! Authentication response types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response returned after successful signup or login.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthToken {
    /// Signed session token.
    pub token: String,
    /// ID of the authenticated user.
    pub user_id: Uuid,
}
