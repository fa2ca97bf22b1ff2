//! Comment and reply response types.

use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reply as returned to clients.
#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    /// Unique identifier of the reply.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Display name of the author.
    pub name: String,
    /// Reply body.
    pub text: String,
    /// Timestamp when the reply was created.
    pub created_at: Timestamp,
}

/// A comment with its replies, oldest reply first.
///
/// The shape is the same for review and restaurant comments.
#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique identifier of the comment.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Display name of the author.
    pub name: String,
    /// Comment body.
    pub text: String,
    /// Timestamp when the comment was created.
    pub created_at: Timestamp,
    /// Replies in insertion order.
    pub replies: Vec<Reply>,
}

/// Comments of one parent, newest first.
pub type Comments = Vec<Comment>;

/// Replies of one comment, oldest first.
pub type Replies = Vec<Reply>;

impl From<savor_core::Reply> for Reply {
    fn from(reply: savor_core::Reply) -> Self {
        Self {
            id: reply.id,
            name: reply.author_name,
            text: reply.text,
            created_at: reply.created_at,
        }
    }
}

impl From<savor_core::Comment> for Comment {
    fn from(comment: savor_core::Comment) -> Self {
        Self {
            id: comment.id,
            name: comment.author_name,
            text: comment.text,
            created_at: comment.created_at,
            replies: comment.replies.into_iter().map(Reply::from).collect(),
        }
    }
}
