//! Comment and reply request types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Request payload for creating a comment.
///
/// Missing fields deserialize as empty strings and are rejected with a
/// message naming the field.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CreateComment {
    /// Display name of the author.
    pub name: String,
    /// Comment body.
    pub text: String,
}

/// Request payload for replying to a comment.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CreateReply {
    /// Display name of the author.
    pub name: String,
    /// Reply body.
    pub text: String,
}

