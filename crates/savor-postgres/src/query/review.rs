//! Review repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{NewReview, Review};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for review database operations.
pub trait ReviewRepository {
    /// Inserts a review.
    fn create_review(
        &mut self,
        new_review: NewReview,
    ) -> impl Future<Output = PgResult<Review>> + Send;

    /// Finds a review by its identifier.
    fn find_review_by_id(
        &mut self,
        review_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Review>>> + Send;

    /// Lists reviews, newest first.
    fn list_reviews(&mut self, limit: i64) -> impl Future<Output = PgResult<Vec<Review>>> + Send;
}

impl ReviewRepository for PgConnection {
    async fn create_review(&mut self, new_review: NewReview) -> PgResult<Review> {
        use schema::reviews;

        diesel::insert_into(reviews::table)
            .values(&new_review)
            .returning(Review::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_review_by_id(&mut self, review_id: Uuid) -> PgResult<Option<Review>> {
        use schema::reviews::{self, dsl};

        reviews::table
            .filter(dsl::id.eq(review_id))
            .select(Review::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn list_reviews(&mut self, limit: i64) -> PgResult<Vec<Review>> {
        use schema::reviews::{self, dsl};

        reviews::table
            .order((dsl::created_at.desc(), dsl::id.desc()))
            .limit(limit)
            .select(Review::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }
}
