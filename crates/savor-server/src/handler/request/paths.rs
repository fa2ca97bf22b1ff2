//! Path parameter types for HTTP handlers.
//!
//! Identifiers are taken as strings: restaurant ids come from a third-party
//! search provider, and stored ids that fail to parse are reported as not found.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Path parameters for review operations.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPathParams {
    /// Unique identifier of the review.
    pub review_id: String,
}

/// Path parameters for restaurant operations.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantPathParams {
    /// Third-party identifier of the restaurant.
    pub restaurant_id: String,
}

/// Path parameters for comment operations.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentPathParams {
    /// Unique identifier of the comment.
    pub comment_id: String,
}

/// Path parameters for user operations.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPathParams {
    /// Unique identifier of the user.
    pub user_id: String,
}
