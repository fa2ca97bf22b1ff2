//! User accounts.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::text::{self, MAX_NAME_CHARS, MAX_PASSWORD_CHARS, MIN_PASSWORD_CHARS};
use crate::{Error, Result};

/// Maximum length of an email address, in characters.
pub const MAX_EMAIL_CHARS: usize = 254;

/// A registered user.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    /// Normalized (trimmed, lower-cased) email address, unique across accounts.
    pub email: String,
    /// Display name, unset until the user picks one.
    pub name: Option<String>,
    /// Argon2id PHC string.
    pub password_hash: String,
    pub created_at: Timestamp,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("name", &self.name)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

/// Input for a new account whose password has already been hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    email: String,
    password_hash: String,
}

impl NewAccount {
    /// Normalizes the email address and pairs it with the password hash.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the email is blank or too long.
    pub fn new(email: &str, password_hash: String) -> Result<Self> {
        Ok(Self {
            email: normalize_email(email)?,
            password_hash,
        })
    }

    #[inline]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Assigns an identifier and creation time.
    pub fn into_account(self) -> Account {
        Account {
            id: Uuid::now_v7(),
            email: self.email,
            name: None,
            password_hash: self.password_hash,
            created_at: Timestamp::now(),
        }
    }
}

/// Trims and lower-cases an email address.
///
/// Format checks belong to the request layer; this only guarantees the
/// value used for lookups and uniqueness is canonical.
pub fn normalize_email(email: &str) -> Result<String> {
    text::required("email", email, MAX_EMAIL_CHARS).map(|email| email.to_lowercase())
}

/// Checks a plaintext password against the length policy.
pub fn check_password(password: &str) -> Result<()> {
    let length = password.chars().count();

    if length < MIN_PASSWORD_CHARS {
        return Err(Error::validation(format!(
            "password must be at least {MIN_PASSWORD_CHARS} characters"
        )));
    }

    if length > MAX_PASSWORD_CHARS {
        return Err(Error::validation(format!(
            "password must be at most {MAX_PASSWORD_CHARS} characters"
        )));
    }

    Ok(())
}

/// Trims and validates a new display name.
pub fn display_name(name: &str) -> Result<String> {
    text::required("name", name, MAX_NAME_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_normalized() -> anyhow::Result<()> {
        let account = NewAccount::new("  Alice@Example.COM ", "hash".into())?.into_account();
        assert_eq!(account.email, "alice@example.com");
        assert_eq!(account.name, None);
        Ok(())
    }

    #[test]
    fn password_policy() {
        assert!(check_password("short").is_err());
        assert!(check_password("long enough").is_ok());
        assert!(check_password(&"x".repeat(MAX_PASSWORD_CHARS + 1)).is_err());
    }

    #[test]
    fn debug_omits_password_hash() -> anyhow::Result<()> {
        let account = NewAccount::new("a@b.co", "$argon2id$secret".into())?.into_account();
        assert!(!format!("{account:?}").contains("argon2id"));
        Ok(())
    }
}
