//! Review rows.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::reviews;
use crate::{PgError, PgResult};

/// Review model.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Review {
    /// Unique review identifier.
    pub id: Uuid,
    /// Name of the reviewed restaurant.
    pub name: String,
    /// Review text.
    pub body: String,
    /// Star rating between 1 and 5.
    pub rating: i16,
    /// Timestamp when the review was created.
    pub created_at: Timestamp,
}

/// Data for creating a new review.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewReview {
    pub id: Uuid,
    pub name: String,
    pub body: String,
    pub rating: i16,
    pub created_at: Timestamp,
}

impl From<savor_core::Review> for NewReview {
    fn from(review: savor_core::Review) -> Self {
        Self {
            id: review.id,
            name: review.name,
            body: review.body,
            rating: i16::from(review.rating),
            created_at: review.created_at.into(),
        }
    }
}

impl TryFrom<Review> for savor_core::Review {
    type Error = PgError;

    fn try_from(row: Review) -> PgResult<Self> {
        let rating = u8::try_from(row.rating).map_err(|_| {
            PgError::Unexpected(format!("Review {} has rating {}", row.id, row.rating).into())
        })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            body: row.body,
            rating,
            created_at: row.created_at.into(),
        })
    }
}
