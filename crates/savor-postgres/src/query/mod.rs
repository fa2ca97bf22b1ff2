//! Repository traits implemented for [`PgConnection`].
//!
//! Every method issues exactly one statement, so callers can reason about
//! round trips by counting calls.
//!
//! [`PgConnection`]: crate::PgConnection

mod account;
mod comment;
mod review;
mod saved_restaurant;

pub use account::AccountRepository;
pub use comment::CommentRepository;
pub use review::ReviewRepository;
pub use saved_restaurant::SavedRestaurantRepository;
