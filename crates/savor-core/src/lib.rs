#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for comment and reply operations.
pub const TRACING_TARGET_COMMENTS: &str = "savor_core::comments";

mod account;
mod comment;
mod error;
mod review;
mod saved_restaurant;
mod service;

pub mod store;
pub mod text;

pub use account::{Account, NewAccount, check_password, display_name, normalize_email};
pub use comment::{Comment, NewComment, NewReply, ParentKind, Reply, parse_comment_id};
pub use error::{BoxedError, Error, ErrorKind, Result};
pub use review::{MAX_RATING, MIN_RATING, NewReview, Review};
pub use saved_restaurant::{Location, NewSavedRestaurant, RestaurantSnapshot, SavedRestaurant};
pub use service::{CommentPolicy, CommentService, MAX_LIST_LIMIT, resolve_limit};
pub use store::Storage;
