use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public view of an account. The password hash is never included.
#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct User {
    /// Unique identifier of the user.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Display name, unset until the user chooses one.
    pub name: Option<String>,
    /// Email address of the user.
    pub email: String,
}

/// Users, oldest first.
pub type Users = Vec<User>;

impl From<savor_core::Account> for User {
    fn from(account: savor_core::Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
        }
    }
}
