//! Storage traits implemented by every persistence backend.
//!
//! Each method is a single storage round trip. Backends report failures as
//! [`ErrorKind::Storage`], except uniqueness collisions, which surface as
//! [`ErrorKind::Conflict`].
//!
//! [`ErrorKind::Storage`]: crate::ErrorKind::Storage
//! [`ErrorKind::Conflict`]: crate::ErrorKind::Conflict

use std::sync::Arc;

use uuid::Uuid;

use crate::{Account, Comment, ParentKind, Reply, Result, Review, SavedRestaurant};

/// Type alias for a shared comment store.
pub type BoxedCommentStore = Arc<dyn CommentStore>;

/// Type alias for a shared review store.
pub type BoxedReviewStore = Arc<dyn ReviewStore>;

/// Type alias for a shared account store.
pub type BoxedAccountStore = Arc<dyn AccountStore>;

/// Type alias for a shared saved-restaurant store.
pub type BoxedSavedRestaurantStore = Arc<dyn SavedRestaurantStore>;

/// Type alias for a shared health probe.
pub type BoxedStoreHealth = Arc<dyn StoreHealth>;

/// Persistence for comments and their embedded replies.
#[async_trait::async_trait]
pub trait CommentStore: Send + Sync {
    /// Persists a fully formed comment.
    async fn insert_comment(&self, comment: Comment) -> Result<Comment>;

    /// Returns up to `limit` comments of a parent, newest first, replies included.
    async fn list_comments(
        &self,
        parent_kind: ParentKind,
        parent_id: &str,
        limit: u32,
    ) -> Result<Vec<Comment>>;

    /// Looks up a single comment.
    async fn find_comment(&self, comment_id: Uuid) -> Result<Option<Comment>>;

    /// Appends a reply to a comment in one atomic write.
    ///
    /// Returns the updated comment, or `None` when no comment has this id,
    /// in which case nothing is written. Concurrent appends to the same
    /// comment must all be retained.
    async fn append_reply(&self, comment_id: Uuid, reply: Reply) -> Result<Option<Comment>>;
}

/// Persistence for reviews.
#[async_trait::async_trait]
pub trait ReviewStore: Send + Sync {
    async fn insert_review(&self, review: Review) -> Result<Review>;

    /// Returns up to `limit` reviews, newest first.
    async fn list_reviews(&self, limit: u32) -> Result<Vec<Review>>;

    async fn find_review(&self, review_id: Uuid) -> Result<Option<Review>>;
}

/// Persistence for user accounts.
#[async_trait::async_trait]
pub trait AccountStore: Send + Sync {
    /// Persists a new account, failing with a conflict if the email is taken.
    async fn insert_account(&self, account: Account) -> Result<Account>;

    async fn find_account(&self, account_id: Uuid) -> Result<Option<Account>>;

    /// Looks up an account by its normalized email address.
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>>;

    /// Returns up to `limit` accounts, oldest first.
    async fn list_accounts(&self, limit: u32) -> Result<Vec<Account>>;

    /// Sets the display name, returning `None` when the account does not exist.
    async fn update_account_name(&self, account_id: Uuid, name: String)
    -> Result<Option<Account>>;
}

/// Persistence for saved restaurants.
#[async_trait::async_trait]
pub trait SavedRestaurantStore: Send + Sync {
    /// Saves a restaurant for a user.
    ///
    /// Saving a restaurant the user already saved returns the existing record
    /// unchanged.
    async fn save_restaurant(&self, restaurant: SavedRestaurant) -> Result<SavedRestaurant>;

    /// Returns every restaurant a user saved, oldest first.
    async fn list_saved_restaurants(&self, user_id: Uuid) -> Result<Vec<SavedRestaurant>>;

    /// Removes a saved restaurant, returning whether a record was deleted.
    async fn delete_saved_restaurant(&self, user_id: Uuid, restaurant_id: &str) -> Result<bool>;
}

/// Liveness probe for a storage backend.
#[async_trait::async_trait]
pub trait StoreHealth: Send + Sync {
    /// Performs a trivial round trip to the backend.
    async fn ping(&self) -> Result<()>;
}

/// Every storage handle the application needs, sharing one backend.
#[derive(Clone)]
pub struct Storage {
    pub comments: BoxedCommentStore,
    pub reviews: BoxedReviewStore,
    pub accounts: BoxedAccountStore,
    pub saved_restaurants: BoxedSavedRestaurantStore,
    pub health: BoxedStoreHealth,
}

impl Storage {
    /// Builds the container from a backend implementing every store trait.
    pub fn new<B>(backend: B) -> Self
    where
        B: CommentStore
            + ReviewStore
            + AccountStore
            + SavedRestaurantStore
            + StoreHealth
            + 'static,
    {
        let backend = Arc::new(backend);
        Self {
            comments: backend.clone(),
            reviews: backend.clone(),
            accounts: backend.clone(),
            saved_restaurants: backend.clone(),
            health: backend,
        }
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}
