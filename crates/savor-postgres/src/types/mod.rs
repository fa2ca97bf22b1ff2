//! Database enumerations and constraint names.

mod comment_parent;
mod constraint;

pub use comment_parent::CommentParent;
pub use constraint::ConstraintViolation;
