use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Request payload for updating a user's display name.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct UpdateUser {
    /// New display name.
    pub name: String,
}
