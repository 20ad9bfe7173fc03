//! Account service — use-cases for managing accounts.

use accounts_domain::account::{Account, AccountFields, AccountPatch};
use accounts_domain::error::{AccountsError, NotFoundError};
use accounts_domain::id::AccountId;

use crate::ports::AccountRepository;

/// Application service for account CRUD operations.
pub struct AccountService<R> {
    repo: R,
}

impl<R: AccountRepository> AccountService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new account after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AccountsError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, fields), fields(account_name = %fields.name))]
    pub async fn create_account(&self, fields: AccountFields) -> Result<Account, AccountsError> {
        fields.validate()?;
        let account = self.repo.create(fields).await?;
        tracing::info!(account_id = %account.id, "account created");
        Ok(account)
    }

    /// Look up an account by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`AccountsError::NotFound`] when no account with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_account(&self, id: AccountId) -> Result<Account, AccountsError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id).into())
    }

    /// List all accounts.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_accounts(&self) -> Result<Vec<Account>, AccountsError> {
        self.repo.get_all().await
    }

    /// Apply the fields present in a JSON `body` to an existing account and
    /// persist it.
    ///
    /// The body is only parsed once the account is known to exist, so an
    /// unknown id is reported before a malformed body.
    ///
    /// # Errors
    ///
    /// Returns [`AccountsError::NotFound`] when no account with `id` exists,
    /// [`AccountsError::Validation`] if the body is not a valid patch or the
    /// patched account is invalid, or a storage error from the repository.
    #[tracing::instrument(skip(self, body))]
    pub async fn update_account(
        &self,
        id: AccountId,
        body: &[u8],
    ) -> Result<Account, AccountsError> {
        let mut account = self.get_account(id).await?;
        account.apply(AccountPatch::from_json(body)?)?;
        self.repo.update(account).await
    }

    /// Delete an existing account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountsError::NotFound`] when no account with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_account(&self, id: AccountId) -> Result<(), AccountsError> {
        let account = self.get_account(id).await?;
        self.repo.delete(account.id).await?;
        tracing::info!(account_id = %id, "account deleted");
        Ok(())
    }
}

fn not_found(id: AccountId) -> NotFoundError {
    NotFoundError {
        entity: "Account",
        id: id.to_string(),
    }
}
