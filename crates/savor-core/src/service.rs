//! Comment aggregation rules shared by every transport.

use uuid::Uuid;

use crate::comment::parse_comment_id;
use crate::store::{BoxedCommentStore, BoxedReviewStore, Storage};
use crate::{
    Comment, Error, NewComment, NewReply, ParentKind, Reply, Result, TRACING_TARGET_COMMENTS,
};

/// Largest number of items a single listing may return.
pub const MAX_LIST_LIMIT: u32 = 1000;

/// Resolves a requested listing limit, using `default_limit` when absent.
///
/// # Errors
///
/// Returns a validation error when `limit` is outside `1..=MAX_LIST_LIMIT`.
pub fn resolve_limit(limit: Option<u32>, default_limit: u32) -> Result<u32> {
    match limit {
        None => Ok(default_limit.clamp(1, MAX_LIST_LIMIT)),
        Some(limit @ 1..=MAX_LIST_LIMIT) => Ok(limit),
        Some(_) => Err(Error::validation(format!(
            "limit must be between 1 and {MAX_LIST_LIMIT}"
        ))),
    }
}

/// Tunable behaviour of [`CommentService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentPolicy {
    /// Number of comments returned when the caller does not ask for a limit.
    pub default_limit: u32,
    /// Reject comments on reviews that do not exist.
    ///
    /// Restaurant parents come from a third-party search provider and are
    /// never checked.
    pub require_existing_review: bool,
}

impl Default for CommentPolicy {
    fn default() -> Self {
        Self {
            default_limit: 100,
            require_existing_review: false,
        }
    }
}

/// Creates and lists comments and replies for any parent kind.
///
/// Input is validated before any storage call, so a rejected request never
/// writes.
#[derive(Clone)]
pub struct CommentService {
    comments: BoxedCommentStore,
    reviews: BoxedReviewStore,
    policy: CommentPolicy,
}

impl CommentService {
    /// Creates a service over the comment and review stores of `storage`.
    pub fn new(storage: &Storage, policy: CommentPolicy) -> Self {
        Self {
            comments: storage.comments.clone(),
            reviews: storage.reviews.clone(),
            policy,
        }
    }

    /// Returns the policy this service enforces.
    #[inline]
    pub fn policy(&self) -> CommentPolicy {
        self.policy
    }

    /// Creates a comment with an empty reply thread.
    ///
    /// # Errors
    ///
    /// - validation error for a blank or oversized field
    /// - not found when the parent review is required to exist and does not
    /// - storage error when the write fails
    pub async fn create_comment(
        &self,
        parent_kind: ParentKind,
        parent_id: &str,
        author_name: &str,
        text: &str,
    ) -> Result<Comment> {
        let mut new_comment = NewComment::new(parent_kind, parent_id, author_name, text)?;

        if self.policy.require_existing_review && parent_kind == ParentKind::Review {
            let review_id = self.ensure_review_exists(new_comment.parent_id()).await?;
            new_comment = new_comment.with_parent_id(review_id.to_string());
        }

        let comment = self.comments.insert_comment(new_comment.into_comment()).await?;

        tracing::info!(
            target: TRACING_TARGET_COMMENTS,
            comment_id = %comment.id,
            parent_kind = %comment.parent_kind,
            parent_id = %comment.parent_id,
            "Comment created"
        );

        Ok(comment)
    }

    /// Lists a parent's comments newest first, each with its replies oldest first.
    ///
    /// `limit` falls back to the configured default when absent.
    pub async fn list_comments(
        &self,
        parent_kind: ParentKind,
        parent_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Comment>> {
        let parent_id = parent_id.trim();
        if parent_id.is_empty() {
            return Err(Error::validation("parentId is required"));
        }

        let limit = resolve_limit(limit, self.policy.default_limit)?;
        let comments = self
            .comments
            .list_comments(parent_kind, parent_id, limit)
            .await?;

        tracing::debug!(
            target: TRACING_TARGET_COMMENTS,
            parent_kind = %parent_kind,
            parent_id = %parent_id,
            limit,
            count = comments.len(),
            "Comments listed"
        );

        Ok(comments)
    }

    /// Appends a reply and returns the whole updated comment.
    ///
    /// # Errors
    ///
    /// - validation error for a blank or oversized field
    /// - not found when `comment_id` does not name a stored comment
    pub async fn create_reply(
        &self,
        comment_id: &str,
        author_name: &str,
        text: &str,
    ) -> Result<Comment> {
        let comment_id = parse_comment_id(comment_id)?;
        let new_reply = NewReply::new(author_name, text)?;

        let comment = self
            .comments
            .append_reply(comment_id, new_reply.into_reply())
            .await?
            .ok_or_else(|| Error::not_found("Comment not found"))?;

        tracing::info!(
            target: TRACING_TARGET_COMMENTS,
            comment_id = %comment.id,
            reply_count = comment.replies.len(),
            "Reply created"
        );

        Ok(comment)
    }

    /// Returns the replies of a comment in insertion order.
    pub async fn list_replies(&self, comment_id: &str) -> Result<Vec<Reply>> {
        let comment_id = parse_comment_id(comment_id)?;
        let comment = self
            .comments
            .find_comment(comment_id)
            .await?
            .ok_or_else(|| Error::not_found("Comment not found"))?;

        tracing::debug!(
            target: TRACING_TARGET_COMMENTS,
            comment_id = %comment.id,
            count = comment.replies.len(),
            "Replies listed"
        );

        Ok(comment.replies)
    }

    /// Returns the canonical id of the review named by `review_id`.
    async fn ensure_review_exists(&self, review_id: &str) -> Result<Uuid> {
        let not_found = || Error::not_found("Review not found");
        let review_id: Uuid = review_id.parse().map_err(|_| not_found())?;

        match self.reviews.find_review(review_id).await? {
            Some(review) => Ok(review.id),
            None => Err(not_found()),
        }
    }
}

impl std::fmt::Debug for CommentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommentService")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
