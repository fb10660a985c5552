//! Defines the transaction store trait.

use crate::{
    Error,
    auth::UserId,
    transaction::{NewTransaction, Transaction, TransactionId, TransactionUpdate},
};

/// Handles the creation, retrieval and modification of transactions.
pub trait TransactionStore {
    /// Get all of the user's transactions, sorted by date with the most recent first.
    ///
    /// Transactions on the same date are returned in the order they were created.
    fn get_all_transactions(&self, user_id: UserId) -> Result<Vec<Transaction>, Error>;

    /// Get a transaction by its ID, or `None` if the user has no such transaction.
    fn get_transaction(
        &self,
        user_id: UserId,
        id: TransactionId,
    ) -> Result<Option<Transaction>, Error>;

    /// Create a new transaction and add it to the store.
    fn create_transaction(
        &self,
        user_id: UserId,
        transaction: NewTransaction,
    ) -> Result<Transaction, Error>;

    /// Create many transactions at once, either all of them are stored or none are.
    fn create_transactions(
        &self,
        user_id: UserId,
        transactions: Vec<NewTransaction>,
    ) -> Result<Vec<Transaction>, Error>;

    /// Apply `update` to the transaction with `id`.
    ///
    /// Returns `None` if the user has no such transaction.
    ///
    /// # Errors
    /// Returns [Error::Validation] if the updated transaction would break the
    /// installment rules.
    fn update_transaction(
        &self,
        user_id: UserId,
        id: TransactionId,
        update: &TransactionUpdate,
    ) -> Result<Option<Transaction>, Error>;

    /// Delete a transaction, returns whether a transaction was deleted.
    fn delete_transaction(&self, user_id: UserId, id: TransactionId) -> Result<bool, Error>;
}
