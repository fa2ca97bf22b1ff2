//! Comment parent enumeration.

use diesel_derive_enum::DbEnum;
use savor_core::ParentKind;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Defines which kind of entity owns a comment.
///
/// This enumeration corresponds to the `COMMENT_PARENT` PostgreSQL enum.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::CommentParent"]
pub enum CommentParent {
    /// Comment on a review stored in this database.
    #[db_rename = "review"]
    #[serde(rename = "review")]
    #[strum(serialize = "review")]
    Review,

    /// Comment on a restaurant identified by its search provider id.
    #[db_rename = "restaurant"]
    #[serde(rename = "restaurant")]
    #[strum(serialize = "restaurant")]
    Restaurant,
}

impl From<ParentKind> for CommentParent {
    fn from(kind: ParentKind) -> Self {
        match kind {
            ParentKind::Review => Self::Review,
            ParentKind::Restaurant => Self::Restaurant,
        }
    }
}

impl From<CommentParent> for ParentKind {
    fn from(parent: CommentParent) -> Self {
        match parent {
            CommentParent::Review => Self::Review,
            CommentParent::Restaurant => Self::Restaurant,
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn names_match_domain_kind() {
        for parent in CommentParent::iter() {
            let kind = ParentKind::from(parent);
            assert_eq!(parent.to_string(), kind.to_string());
            assert_eq!(CommentParent::from(kind), parent);
        }
    }
}
