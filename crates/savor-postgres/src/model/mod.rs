//! Diesel models for every table.
//!
//! Each module pairs a `Queryable` row type with an `Insertable` input type
//! and conversions to and from the `savor-core` domain types.

mod account;
mod comment;
mod review;
mod saved_restaurant;

pub use account::{Account, NewAccount, UpdateAccount};
pub use comment::{Comment, NewComment, StoredReply};
pub use review::{NewReview, Review};
pub use saved_restaurant::{NewSavedRestaurant, SavedRestaurant};
