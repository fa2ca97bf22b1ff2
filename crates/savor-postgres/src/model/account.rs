//! Account rows.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::accounts;

/// Account model representing a registered user.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Account {
    /// Unique account identifier.
    pub id: Uuid,
    /// Normalized email address, unique across accounts.
    pub email_address: String,
    /// Display name, unset until the user picks one.
    pub display_name: Option<String>,
    /// Argon2id PHC string.
    pub password_hash: String,
    /// Timestamp when the account was created.
    pub created_at: Timestamp,
}

/// Data for creating a new account.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewAccount {
    pub id: Uuid,
    pub email_address: String,
    pub display_name: Option<String>,
    pub password_hash: String,
    pub created_at: Timestamp,
}

/// Data for updating an account.
#[derive(Debug, Default, Clone, AsChangeset)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateAccount {
    pub display_name: Option<String>,
}

impl From<savor_core::Account> for NewAccount {
    fn from(account: savor_core::Account) -> Self {
        Self {
            id: account.id,
            email_address: account.email,
            display_name: account.name,
            password_hash: account.password_hash,
            created_at: account.created_at.into(),
        }
    }
}

impl From<Account> for savor_core::Account {
    fn from(row: Account) -> Self {
        Self {
            id: row.id,
            email: row.email_address,
            name: row.display_name,
            password_hash: row.password_hash,
            created_at: row.created_at.into(),
        }
    }
}
