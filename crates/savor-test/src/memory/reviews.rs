use std::cmp::Reverse;

use savor_core::store::ReviewStore;
use savor_core::{Result, Review};
use uuid::Uuid;

use super::MemoryStore;

#[async_trait::async_trait]
impl ReviewStore for MemoryStore {
    async fn insert_review(&self, review: Review) -> Result<Review> {
        self.write(|tables| {
            tables.reviews.push(review.clone());
            (review, true)
        })
        .await
    }

    async fn list_reviews(&self, limit: u32) -> Result<Vec<Review>> {
        self.read(|tables| {
            let mut reviews = tables.reviews.clone();
            reviews.sort_by_key(|r| Reverse((r.created_at, r.id)));
            reviews.truncate(limit as usize);
            reviews
        })
        .await
    }

    async fn find_review(&self, review_id: Uuid) -> Result<Option<Review>> {
        self.read(|tables| tables.reviews.iter().find(|r| r.id == review_id).cloned())
            .await
    }
}

#[cfg(test)]
mod tests {
    use savor_core::NewReview;

    use super::*;

    #[tokio::test]
    async fn reviews_are_listed_newest_first() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let older = store
            .insert_review(NewReview::new("Noodle Bar", "Fresh", 4)?.into_review())
            .await?;
        let newer = store
            .insert_review(NewReview::new("Taqueria", "Spicy", 5)?.into_review())
            .await?;

        let listed = store.list_reviews(10).await?;
        assert_eq!(listed, vec![newer, older.clone()]);
        assert_eq!(store.find_review(older.id).await?, Some(older));
        Ok(())
    }
}
