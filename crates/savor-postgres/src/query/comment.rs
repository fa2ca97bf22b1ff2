//! Comment repository.

use std::future::Future;

use diesel::dsl;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{Comment, NewComment, StoredReply};
use crate::schema::comments;
use crate::types::CommentParent;
use crate::{PgConnection, PgError, PgResult};

/// `UPDATE comments SET replies = replies || $1 WHERE id = $2`.
type AppendReply = dsl::Update<
    dsl::Filter<comments::table, dsl::Eq<comments::id, Uuid>>,
    dsl::Eq<comments::replies, dsl::Concat<comments::replies, serde_json::Value>>,
>;

/// Builds the single-statement append of `appended` onto a comment's replies.
fn append_reply_statement(comment_id: Uuid, appended: serde_json::Value) -> AppendReply {
    diesel::update(comments::table.filter(comments::id.eq(comment_id)))
        .set(comments::replies.eq(comments::replies.concat(appended)))
}

/// Repository for comment database operations.
///
/// Replies live in the `replies` JSONB column of their comment, so a comment
/// and its whole thread are always read and written together.
pub trait CommentRepository {
    /// Inserts a comment.
    fn create_comment(
        &mut self,
        new_comment: NewComment,
    ) -> impl Future<Output = PgResult<Comment>> + Send;

    /// Finds a comment by its identifier.
    fn find_comment_by_id(
        &mut self,
        comment_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Comment>>> + Send;

    /// Lists the comments of a parent, newest first.
    fn list_comments_by_parent(
        &mut self,
        parent_kind: CommentParent,
        parent_id: &str,
        limit: i64,
    ) -> impl Future<Output = PgResult<Vec<Comment>>> + Send;

    /// Appends a reply to the end of a comment's thread.
    ///
    /// The append is a single `UPDATE`, so concurrent replies to the same
    /// comment never overwrite each other. Returns `None` when the comment
    /// does not exist.
    fn append_reply(
        &mut self,
        comment_id: Uuid,
        reply: StoredReply,
    ) -> impl Future<Output = PgResult<Option<Comment>>> + Send;
}

impl CommentRepository for PgConnection {
    async fn create_comment(&mut self, new_comment: NewComment) -> PgResult<Comment> {
        diesel::insert_into(comments::table)
            .values(&new_comment)
            .returning(Comment::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_comment_by_id(&mut self, comment_id: Uuid) -> PgResult<Option<Comment>> {
        comments::table
            .filter(comments::id.eq(comment_id))
            .select(Comment::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn list_comments_by_parent(
        &mut self,
        parent_kind: CommentParent,
        parent_id: &str,
        limit: i64,
    ) -> PgResult<Vec<Comment>> {
        comments::table
            .filter(comments::parent_kind.eq(parent_kind))
            .filter(comments::parent_id.eq(parent_id))
            .order((comments::created_at.desc(), comments::id.desc()))
            .limit(limit)
            .select(Comment::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn append_reply(
        &mut self,
        comment_id: Uuid,
        reply: StoredReply,
    ) -> PgResult<Option<Comment>> {
        let appended = reply.to_json_array()?;

        append_reply_statement(comment_id, appended)
            .returning(Comment::as_returning())
            .get_result(self)
            .await
            .optional()
            .map_err(PgError::from)
    }
}

#[cfg(test)]
mod tests {
    use diesel::pg::Pg;

    use super::*;

    #[test]
    fn reply_append_is_one_update_statement() {
        let statement = append_reply_statement(Uuid::nil(), serde_json::json!([]));
        let sql = diesel::debug_query::<Pg, _>(&statement).to_string();

        assert!(
            sql.starts_with(
                r#"UPDATE "comments" SET "replies" = (("comments"."replies" || $1)) WHERE ("comments"."id" = $2)"#
            ),
            "unexpected statement: {sql}"
        );
        assert!(!sql.contains("SELECT"));
    }
}
