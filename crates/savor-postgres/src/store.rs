//! Storage trait implementations backed by [`PgClient`].
//!
//! Each call checks out one pooled connection and issues one statement.

use savor_core::store::{
    AccountStore, CommentStore, ReviewStore, SavedRestaurantStore, StoreHealth,
};
use savor_core::{Account, Comment, ParentKind, Reply, Result, Review, SavedRestaurant};
use uuid::Uuid;

use crate::model::{self, StoredReply, UpdateAccount};
use crate::query::{
    AccountRepository, CommentRepository, ReviewRepository, SavedRestaurantRepository,
};
use crate::{PgClient, PgError, TRACING_TARGET_QUERY};

impl From<PgError> for savor_core::Error {
    fn from(error: PgError) -> Self {
        if let Some(violation) = error.constraint_violation() {
            tracing::debug!(
                target: TRACING_TARGET_QUERY,
                constraint = %violation,
                "Query rejected by constraint"
            );

            return if violation.is_uniqueness() {
                Self::conflict(violation.message())
            } else {
                Self::validation(violation.message())
            };
        }

        if error.is_unique_violation() {
            return Self::conflict("Record already exists");
        }

        tracing::error!(
            target: TRACING_TARGET_QUERY,
            error = %error,
            transient = error.is_transient(),
            "Database operation failed"
        );
        Self::storage("Database operation failed").with_source(error)
    }
}

#[async_trait::async_trait]
impl CommentStore for PgClient {
    async fn insert_comment(&self, comment: Comment) -> Result<Comment> {
        let mut conn = self.get_connection().await?;
        let row = conn
            .create_comment(model::NewComment::try_from(comment)?)
            .await?;
        Ok(row.try_into()?)
    }

    async fn list_comments(
        &self,
        parent_kind: ParentKind,
        parent_id: &str,
        limit: u32,
    ) -> Result<Vec<Comment>> {
        let mut conn = self.get_connection().await?;
        let rows = conn
            .list_comments_by_parent(parent_kind.into(), parent_id, i64::from(limit))
            .await?;

        let comments = rows
            .into_iter()
            .map(Comment::try_from)
            .collect::<Result<Vec<_>, PgError>>()?;
        Ok(comments)
    }

    async fn find_comment(&self, comment_id: Uuid) -> Result<Option<Comment>> {
        let mut conn = self.get_connection().await?;
        let row = conn.find_comment_by_id(comment_id).await?;
        Ok(row.map(Comment::try_from).transpose()?)
    }

    async fn append_reply(&self, comment_id: Uuid, reply: Reply) -> Result<Option<Comment>> {
        let mut conn = self.get_connection().await?;
        let row = conn
            .append_reply(comment_id, StoredReply::from(reply))
            .await?;
        Ok(row.map(Comment::try_from).transpose()?)
    }
}

#[async_trait::async_trait]
impl ReviewStore for PgClient {
    async fn insert_review(&self, review: Review) -> Result<Review> {
        let mut conn = self.get_connection().await?;
        let row = conn.create_review(review.into()).await?;
        Ok(row.try_into()?)
    }

    async fn list_reviews(&self, limit: u32) -> Result<Vec<Review>> {
        let mut conn = self.get_connection().await?;
        let rows = conn.list_reviews(i64::from(limit)).await?;

        let reviews = rows
            .into_iter()
            .map(Review::try_from)
            .collect::<Result<Vec<_>, PgError>>()?;
        Ok(reviews)
    }

    async fn find_review(&self, review_id: Uuid) -> Result<Option<Review>> {
        let mut conn = self.get_connection().await?;
        let row = conn.find_review_by_id(review_id).await?;
        Ok(row.map(Review::try_from).transpose()?)
    }
}

#[async_trait::async_trait]
impl AccountStore for PgClient {
    async fn insert_account(&self, account: Account) -> Result<Account> {
        let mut conn = self.get_connection().await?;
        let row = conn.create_account(account.into()).await?;
        Ok(row.into())
    }

    async fn find_account(&self, account_id: Uuid) -> Result<Option<Account>> {
        let mut conn = self.get_connection().await?;
        let row = conn.find_account_by_id(account_id).await?;
        Ok(row.map(Account::from))
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        let mut conn = self.get_connection().await?;
        let row = conn.find_account_by_email(email).await?;
        Ok(row.map(Account::from))
    }

    async fn list_accounts(&self, limit: u32) -> Result<Vec<Account>> {
        let mut conn = self.get_connection().await?;
        let rows = conn.list_accounts(i64::from(limit)).await?;
        Ok(rows.into_iter().map(Account::from).collect())
    }

    async fn update_account_name(
        &self,
        account_id: Uuid,
        name: String,
    ) -> Result<Option<Account>> {
        let updates = UpdateAccount {
            display_name: Some(name),
        };

        let mut conn = self.get_connection().await?;
        let row = conn.update_account(account_id, updates).await?;
        Ok(row.map(Account::from))
    }
}

#[async_trait::async_trait]
impl SavedRestaurantStore for PgClient {
    async fn save_restaurant(&self, restaurant: SavedRestaurant) -> Result<SavedRestaurant> {
        let mut conn = self.get_connection().await?;
        let row = conn
            .save_restaurant(model::NewSavedRestaurant::from(restaurant))
            .await?;
        Ok(row.into())
    }

    async fn list_saved_restaurants(&self, user_id: Uuid) -> Result<Vec<SavedRestaurant>> {
        let mut conn = self.get_connection().await?;
        let rows = conn.list_saved_restaurants(user_id).await?;
        Ok(rows.into_iter().map(SavedRestaurant::from).collect())
    }

    async fn delete_saved_restaurant(&self, user_id: Uuid, restaurant_id: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        Ok(conn.delete_saved_restaurant(user_id, restaurant_id).await?)
    }
}

#[async_trait::async_trait]
impl StoreHealth for PgClient {
    async fn ping(&self) -> Result<()> {
        Ok(PgClient::ping(self).await?)
    }
}

#[cfg(test)]
mod tests {
    use savor_core::ErrorKind;

    use super::*;
    use crate::tests::unique_violation;

    #[test]
    fn duplicate_email_is_a_conflict() {
        let error = savor_core::Error::from(unique_violation("accounts_email_address_unique"));
        assert_eq!(error.kind(), ErrorKind::Conflict);
        assert_eq!(error.message(), "User with this email already exists");
    }

    #[test]
    fn unknown_unique_constraint_is_still_a_conflict() {
        let error = savor_core::Error::from(unique_violation("some_other_unique"));
        assert_eq!(error.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn other_failures_are_storage_errors() {
        let error = savor_core::Error::from(PgError::Config("bad".into()));
        assert_eq!(error.kind(), ErrorKind::Storage);
        assert!(std::error::Error::source(&error).is_some());
    }
}
