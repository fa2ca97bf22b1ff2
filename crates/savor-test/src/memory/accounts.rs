use savor_core::store::AccountStore;
use savor_core::{Account, Error, Result};
use uuid::Uuid;

use super::MemoryStore;

#[async_trait::async_trait]
impl AccountStore for MemoryStore {
    async fn insert_account(&self, account: Account) -> Result<Account> {
        self.write(|tables| {
            if tables.accounts.iter().any(|a| a.email == account.email) {
                return (Err(Error::conflict("User with this email already exists")), false);
            }

            tables.accounts.push(account.clone());
            (Ok(account), true)
        })
        .await?
    }

    async fn find_account(&self, account_id: Uuid) -> Result<Option<Account>> {
        self.read(|tables| tables.accounts.iter().find(|a| a.id == account_id).cloned())
            .await
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        self.read(|tables| tables.accounts.iter().find(|a| a.email == email).cloned())
            .await
    }

    async fn list_accounts(&self, limit: u32) -> Result<Vec<Account>> {
        self.read(|tables| {
            tables
                .accounts
                .iter()
                .take(limit as usize)
                .cloned()
                .collect()
        })
        .await
    }

    async fn update_account_name(
        &self,
        account_id: Uuid,
        name: String,
    ) -> Result<Option<Account>> {
        self.write(|tables| {
            match tables.accounts.iter_mut().find(|a| a.id == account_id) {
                Some(account) => {
                    account.name = Some(name);
                    (Some(account.clone()), true)
                }
                None => (None, false),
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use savor_core::{ErrorKind, NewAccount};

    use super::*;

    #[tokio::test]
    async fn duplicate_email_conflicts() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        store
            .insert_account(NewAccount::new("a@b.co", "h1".into())?.into_account())
            .await?;

        let error = store
            .insert_account(NewAccount::new("A@B.co ", "h2".into())?.into_account())
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Conflict);
        assert_eq!(store.list_accounts(10).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn rename_missing_account_is_none() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let renamed = store
            .update_account_name(Uuid::now_v7(), "Alice".into())
            .await?;
        assert!(renamed.is_none());
        assert_eq!(store.metrics().writes(), 0);
        Ok(())
    }
}
