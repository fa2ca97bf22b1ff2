//! Response types for HTTP handlers.

mod accounts;
mod authentications;
mod comments;
mod errors;
mod monitors;
mod reviews;
mod saved_restaurants;

pub use accounts::*;
pub use authentications::*;
pub use comments::*;
pub use errors::*;
pub use monitors::*;
pub use reviews::*;
pub use saved_restaurants::*;
