//! Authentication request types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request payload for signup.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate, JsonSchema)]
pub struct Signup {
    /// Email address of the account.
    #[validate(email)]
    pub email: String,

    /// Password of the account.
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Request payload for login.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate, JsonSchema)]
pub struct Login {
    /// Email address of the account.
    #[validate(email)]
    pub email: String,

    /// Password of the account.
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}
