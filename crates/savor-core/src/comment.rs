//! Comments, their replies, and the validated inputs that create them.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;

use crate::text::{self, MAX_NAME_CHARS, MAX_PARENT_ID_CHARS, MAX_TEXT_CHARS};
use crate::{Error, Result};

/// The kind of entity a comment is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ParentKind {
    /// A review written in this service.
    Review,
    /// A restaurant known by its third-party search identifier.
    Restaurant,
}

/// A top-level remark on a review or restaurant.
///
/// Replies are embedded and kept in insertion order, so a single read
/// returns the whole thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub parent_kind: ParentKind,
    pub parent_id: String,
    pub author_name: String,
    pub text: String,
    pub created_at: Timestamp,
    pub replies: Vec<Reply>,
}

/// A remark attached to exactly one [`Comment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub id: Uuid,
    pub author_name: String,
    pub text: String,
    pub created_at: Timestamp,
}

/// Validated input for a new comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    parent_kind: ParentKind,
    parent_id: String,
    author_name: String,
    text: String,
}

impl NewComment {
    /// Trims and validates the user-supplied fields.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `parent_id`, `author_name` or `text`
    /// is blank or too long.
    pub fn new(
        parent_kind: ParentKind,
        parent_id: &str,
        author_name: &str,
        text: &str,
    ) -> Result<Self> {
        Ok(Self {
            parent_kind,
            parent_id: text::required("parentId", parent_id, MAX_PARENT_ID_CHARS)?,
            author_name: text::required("name", author_name, MAX_NAME_CHARS)?,
            text: text::required("text", text, MAX_TEXT_CHARS)?,
        })
    }

    #[inline]
    pub fn parent_kind(&self) -> ParentKind {
        self.parent_kind
    }

    #[inline]
    pub fn parent_id(&self) -> &str {
        &self.parent_id
    }

    /// Replaces the parent id with its canonical form.
    pub(crate) fn with_parent_id(self, parent_id: String) -> Self {
        Self { parent_id, ..self }
    }

    /// Assigns an identifier and creation time, producing a comment with no replies.
    pub fn into_comment(self) -> Comment {
        Comment {
            id: Uuid::now_v7(),
            parent_kind: self.parent_kind,
            parent_id: self.parent_id,
            author_name: self.author_name,
            text: self.text,
            created_at: Timestamp::now(),
            replies: Vec::new(),
        }
    }
}

/// Validated input for a new reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReply {
    author_name: String,
    text: String,
}

impl NewReply {
    /// Trims and validates the user-supplied fields.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `author_name` or `text` is blank or too long.
    pub fn new(author_name: &str, text: &str) -> Result<Self> {
        Ok(Self {
            author_name: text::required("name", author_name, MAX_NAME_CHARS)?,
            text: text::required("text", text, MAX_TEXT_CHARS)?,
        })
    }

    /// Assigns an identifier and creation time.
    pub fn into_reply(self) -> Reply {
        Reply {
            id: Uuid::now_v7(),
            author_name: self.author_name,
            text: self.text,
            created_at: Timestamp::now(),
        }
    }
}

/// Parses a comment identifier taken from a request path.
///
/// An identifier that is not a UUID cannot name a stored comment, so it is
/// reported as not found rather than as malformed input.
pub fn parse_comment_id(raw: &str) -> Result<Uuid> {
    raw.trim()
        .parse()
        .map_err(|_| Error::not_found("Comment not found"))
}
