//! Comment rows and the JSON documents embedded in their `replies` column.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::comments;
use crate::types::CommentParent;
use crate::{PgError, PgResult};

/// A stored comment with its replies as a JSONB array.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Comment {
    /// Unique comment identifier (UUIDv7).
    pub id: Uuid,
    /// Kind of entity the comment is attached to.
    pub parent_kind: CommentParent,
    /// Identifier of the review or restaurant.
    pub parent_id: String,
    /// Denormalized display name of the author.
    pub author_name: String,
    /// Comment text.
    pub content: String,
    /// JSON array of [`StoredReply`] documents in insertion order.
    pub replies: serde_json::Value,
    /// Timestamp when the comment was created.
    pub created_at: Timestamp,
}

/// Data for creating a new comment.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewComment {
    pub id: Uuid,
    pub parent_kind: CommentParent,
    pub parent_id: String,
    pub author_name: String,
    pub content: String,
    pub replies: serde_json::Value,
    pub created_at: Timestamp,
}

/// A reply as stored inside [`Comment::replies`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredReply {
    pub id: Uuid,
    pub author_name: String,
    pub text: String,
    pub created_at: jiff::Timestamp,
}

impl StoredReply {
    /// Encodes the reply as a JSON document.
    pub fn to_json(&self) -> PgResult<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| {
            PgError::Unexpected(format!("Failed to encode reply {}: {e}", self.id).into())
        })
    }

    /// Encodes the reply as a one-element JSON array, ready to be concatenated
    /// onto an existing `replies` column.
    pub fn to_json_array(&self) -> PgResult<serde_json::Value> {
        Ok(serde_json::Value::Array(vec![self.to_json()?]))
    }
}

impl Comment {
    /// Decodes the embedded replies.
    pub fn decode_replies(&self) -> PgResult<Vec<StoredReply>> {
        serde_json::from_value(self.replies.clone()).map_err(|e| {
            PgError::Unexpected(format!("Malformed replies on comment {}: {e}", self.id).into())
        })
    }

    /// Returns the number of embedded replies without decoding them.
    pub fn reply_count(&self) -> usize {
        self.replies.as_array().map_or(0, Vec::len)
    }
}

impl From<savor_core::Reply> for StoredReply {
    fn from(reply: savor_core::Reply) -> Self {
        Self {
            id: reply.id,
            author_name: reply.author_name,
            text: reply.text,
            created_at: reply.created_at,
        }
    }
}

impl From<StoredReply> for savor_core::Reply {
    fn from(reply: StoredReply) -> Self {
        Self {
            id: reply.id,
            author_name: reply.author_name,
            text: reply.text,
            created_at: reply.created_at,
        }
    }
}

impl TryFrom<savor_core::Comment> for NewComment {
    type Error = PgError;

    fn try_from(comment: savor_core::Comment) -> PgResult<Self> {
        let replies = comment
            .replies
            .into_iter()
            .map(|reply| StoredReply::from(reply).to_json())
            .collect::<PgResult<Vec<_>>>()?;

        Ok(Self {
            id: comment.id,
            parent_kind: comment.parent_kind.into(),
            parent_id: comment.parent_id,
            author_name: comment.author_name,
            content: comment.text,
            replies: serde_json::Value::Array(replies),
            created_at: comment.created_at.into(),
        })
    }
}

impl TryFrom<Comment> for savor_core::Comment {
    type Error = PgError;

    fn try_from(row: Comment) -> PgResult<Self> {
        let replies = row
            .decode_replies()?
            .into_iter()
            .map(savor_core::Reply::from)
            .collect();

        Ok(Self {
            id: row.id,
            parent_kind: row.parent_kind.into(),
            parent_id: row.parent_id,
            author_name: row.author_name,
            text: row.content,
            created_at: row.created_at.into(),
            replies,
        })
    }
}

#[cfg(test)]
mod tests {
    use savor_core::{NewComment as DomainComment, NewReply, ParentKind};

    use super::*;

    fn stored(new: NewComment) -> Comment {
        Comment {
            id: new.id,
            parent_kind: new.parent_kind,
            parent_id: new.parent_id,
            author_name: new.author_name,
            content: new.content,
            replies: new.replies,
            created_at: new.created_at,
        }
    }

    #[test]
    fn comment_survives_row_conversion() -> anyhow::Result<()> {
        let mut comment =
            DomainComment::new(ParentKind::Review, "r1", "Alice", "Great spot")?.into_comment();
        for text in ["one", "two", "three"] {
            comment.replies.push(NewReply::new("Bob", text)?.into_reply());
        }

        let row = stored(NewComment::try_from(comment.clone())?);
        assert_eq!(row.reply_count(), 3);
        assert_eq!(row.replies[2]["text"], "three");
        assert_eq!(savor_core::Comment::try_from(row)?, comment);
        Ok(())
    }

    #[test]
    fn appended_reply_is_a_single_element_array() -> anyhow::Result<()> {
        let reply = StoredReply::from(NewReply::new("Bob", "Agreed!")?.into_reply());
        let json = reply.to_json_array()?;
        assert_eq!(json.as_array().map(Vec::len), Some(1));
        assert_eq!(json[0]["author_name"], "Bob");
        Ok(())
    }

    #[test]
    fn malformed_replies_are_reported() -> anyhow::Result<()> {
        let comment = DomainComment::new(ParentKind::Restaurant, "y1", "Alice", "Hi")?;
        let mut row = stored(NewComment::try_from(comment.into_comment())?);
        row.replies = serde_json::json!({ "not": "an array" });
        assert!(savor_core::Comment::try_from(row).is_err());
        Ok(())
    }
}
