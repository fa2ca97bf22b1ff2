use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Request payload for creating a review.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CreateReview {
    /// Name of the reviewed place.
    pub name: String,
    /// Review body.
    pub body: String,
    /// Whole-star rating from 1 to 5.
    pub rating: i64,
}
