//! Storage port — repository trait for account persistence.

use std::future::Future;

use accounts_domain::account::{Account, AccountFields};
use accounts_domain::error::AccountsError;
use accounts_domain::id::AccountId;

/// Repository for persisting and querying [`Account`]s.
///
/// Every method is a single atomic operation against the store.
pub trait AccountRepository {
    /// Persist a new account and return it with its store-assigned id.
    fn create(
        &self,
        fields: AccountFields,
    ) -> impl Future<Output = Result<Account, AccountsError>> + Send;

    /// Get an account by id, `None` when it does not exist.
    fn get_by_id(
        &self,
        id: AccountId,
    ) -> impl Future<Output = Result<Option<Account>, AccountsError>> + Send;

    /// Get every stored account, ordered by id.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Account>, AccountsError>> + Send;

    /// Overwrite the stored fields of an existing account.
    ///
    /// Fails with [`AccountsError::NotFound`] if the id is unknown.
    fn update(&self, account: Account)
    -> impl Future<Output = Result<Account, AccountsError>> + Send;

    /// Remove an account. Unknown ids are not an error.
    fn delete(&self, id: AccountId) -> impl Future<Output = Result<(), AccountsError>> + Send;
}
