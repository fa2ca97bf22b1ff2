//! Request types for HTTP handlers.

mod accounts;
mod authentications;
mod comments;
mod listings;
mod paths;
mod reviews;
mod saved_restaurants;

pub use accounts::*;
pub use authentications::*;
pub use comments::*;
pub use listings::*;
pub use paths::*;
pub use reviews::*;
pub use saved_restaurants::*;
