//! Reviews, the in-service parents of review comments.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::text::{self, MAX_NAME_CHARS, MAX_REVIEW_BODY_CHARS};
use crate::{Error, Result};

/// Lowest accepted star rating.
pub const MIN_RATING: u8 = 1;

/// Highest accepted star rating.
pub const MAX_RATING: u8 = 5;

/// A restaurant review written by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    /// Name of the reviewed restaurant.
    pub name: String,
    pub body: String,
    pub rating: u8,
    pub created_at: Timestamp,
}

/// Validated input for a new review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    name: String,
    body: String,
    rating: u8,
}

impl NewReview {
    /// Trims and validates the review fields.
    ///
    /// # Errors
    ///
    /// Returns a validation error for blank text or a rating outside 1..=5.
    pub fn new(name: &str, body: &str, rating: i64) -> Result<Self> {
        let rating = u8::try_from(rating)
            .ok()
            .filter(|rating| (MIN_RATING..=MAX_RATING).contains(rating))
            .ok_or_else(|| {
                Error::validation(format!(
                    "rating must be between {MIN_RATING} and {MAX_RATING}"
                ))
            })?;

        Ok(Self {
            name: text::required("name", name, MAX_NAME_CHARS)?,
            body: text::required("body", body, MAX_REVIEW_BODY_CHARS)?,
            rating,
        })
    }

    /// Assigns an identifier and creation time.
    pub fn into_review(self) -> Review {
        Review {
            id: Uuid::now_v7(),
            name: self.name,
            body: self.body,
            rating: self.rating,
            created_at: Timestamp::now(),
        }
    }
}
