//! Named database constraints that map to client-facing errors.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Constraint violations the storage layer knows how to explain.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum ConstraintViolation {
    // Account constraints
    #[strum(serialize = "accounts_email_address_unique")]
    AccountEmailUnique,
    #[strum(serialize = "accounts_email_address_not_empty")]
    AccountEmailNotEmpty,
    #[strum(serialize = "accounts_display_name_length")]
    AccountDisplayNameLength,

    // Review constraints
    #[strum(serialize = "reviews_name_not_empty")]
    ReviewNameNotEmpty,
    #[strum(serialize = "reviews_body_not_empty")]
    ReviewBodyNotEmpty,
    #[strum(serialize = "reviews_rating_range")]
    ReviewRatingRange,

    // Comment constraints
    #[strum(serialize = "comments_parent_id_not_empty")]
    CommentParentIdNotEmpty,
    #[strum(serialize = "comments_author_name_not_empty")]
    CommentAuthorNameNotEmpty,
    #[strum(serialize = "comments_content_not_empty")]
    CommentContentNotEmpty,
    #[strum(serialize = "comments_replies_is_array")]
    CommentRepliesIsArray,

    // Saved restaurant constraints
    #[strum(serialize = "saved_restaurants_account_restaurant_unique")]
    SavedRestaurantUnique,
    #[strum(serialize = "saved_restaurants_restaurant_id_not_empty")]
    SavedRestaurantIdNotEmpty,
    #[strum(serialize = "saved_restaurants_name_not_empty")]
    SavedRestaurantNameNotEmpty,
    #[strum(serialize = "saved_restaurants_review_count_min")]
    SavedRestaurantReviewCountMin,
}

impl ConstraintViolation {
    /// Creates a new [`ConstraintViolation`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns whether the constraint guards uniqueness.
    pub fn is_uniqueness(self) -> bool {
        matches!(self, Self::AccountEmailUnique | Self::SavedRestaurantUnique)
    }

    /// Returns a message suitable for API clients.
    pub fn message(self) -> &'static str {
        match self {
            Self::AccountEmailUnique => "User with this email already exists",
            Self::AccountEmailNotEmpty => "email is required",
            Self::AccountDisplayNameLength => "name must be between 1 and 100 characters",
            Self::ReviewNameNotEmpty => "name is required",
            Self::ReviewBodyNotEmpty => "body is required",
            Self::ReviewRatingRange => "rating must be between 1 and 5",
            Self::CommentParentIdNotEmpty => "parentId is required",
            Self::CommentAuthorNameNotEmpty => "name is required",
            Self::CommentContentNotEmpty => "text is required",
            Self::CommentRepliesIsArray => "replies must be an array",
            Self::SavedRestaurantUnique => "Restaurant is already saved",
            Self::SavedRestaurantIdNotEmpty => "id is required",
            Self::SavedRestaurantNameNotEmpty => "name is required",
            Self::SavedRestaurantReviewCountMin => "review_count must not be negative",
        }
    }
}

impl From<ConstraintViolation> for String {
    #[inline]
    fn from(val: ConstraintViolation) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for ConstraintViolation {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn every_constraint_round_trips() {
        for constraint in ConstraintViolation::iter() {
            let name = constraint.to_string();
            assert_eq!(ConstraintViolation::new(&name), Some(constraint));
        }
        assert_eq!(ConstraintViolation::new("unknown_constraint"), None);
    }

    #[test]
    fn only_unique_constraints_are_uniqueness() {
        let unique: Vec<_> = ConstraintViolation::iter()
            .filter(|c| c.is_uniqueness())
            .collect();
        assert_eq!(
            unique,
            [
                ConstraintViolation::AccountEmailUnique,
                ConstraintViolation::SavedRestaurantUnique
            ]
        );
    }
}
