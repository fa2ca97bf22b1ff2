use std::cmp::Reverse;

use savor_core::store::CommentStore;
use savor_core::{Comment, ParentKind, Reply, Result};
use uuid::Uuid;

use super::MemoryStore;

#[async_trait::async_trait]
impl CommentStore for MemoryStore {
    async fn insert_comment(&self, comment: Comment) -> Result<Comment> {
        self.write(|tables| {
            tables.comments.push(comment.clone());
            (comment, true)
        })
        .await
    }

    async fn list_comments(
        &self,
        parent_kind: ParentKind,
        parent_id: &str,
        limit: u32,
    ) -> Result<Vec<Comment>> {
        self.read(|tables| {
            let mut comments: Vec<_> = tables
                .comments
                .iter()
                .filter(|c| c.parent_kind == parent_kind && c.parent_id == parent_id)
                .cloned()
                .collect();

            comments.sort_by_key(|c| Reverse((c.created_at, c.id)));
            comments.truncate(limit as usize);
            comments
        })
        .await
    }

    async fn find_comment(&self, comment_id: Uuid) -> Result<Option<Comment>> {
        self.read(|tables| tables.comments.iter().find(|c| c.id == comment_id).cloned())
            .await
    }

    async fn append_reply(&self, comment_id: Uuid, reply: Reply) -> Result<Option<Comment>> {
        self.write(|tables| {
            match tables.comments.iter_mut().find(|c| c.id == comment_id) {
                Some(comment) => {
                    comment.replies.push(reply);
                    (Some(comment.clone()), true)
                }
                None => (None, false),
            }
        })
        .await
    }
}
