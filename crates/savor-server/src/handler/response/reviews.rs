use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A review as returned to clients.
#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Unique identifier of the review.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Name of the reviewed place.
    pub name: String,
    /// Review body.
    pub body: String,
    /// Whole-star rating from 1 to 5.
    pub rating: u8,
    /// Timestamp when the review was created.
    pub created_at: Timestamp,
}

/// Reviews, newest first.
pub type Reviews = Vec<Review>;

impl From<savor_core::Review> for Review {
    fn from(review: savor_core::Review) -> Self {
        Self {
            id: review.id,
            name: review.name,
            body: review.body,
            rating: review.rating,
            created_at: review.created_at,
        }
    }
}
