//! Contains traits and implementations for objects that store the domain models.
//!
//! Every operation is scoped to the user account that owns the data. Updating
//! or deleting an ID that does not exist for that user is not an error: the
//! stores return `None` or `false` instead.

mod card;
mod category;
mod family_member;
mod memory;
mod transaction;

pub mod sqlite;

pub use card::CardStore;
pub use category::CategoryStore;
pub use family_member::FamilyMemberStore;
pub use memory::MemStorage;
pub use sqlite::{SQLiteStore, initialize};
pub use transaction::TransactionStore;

/// A store for every domain model, shared between request handlers.
pub trait Storage:
    TransactionStore + CategoryStore + CardStore + FamilyMemberStore + Send + Sync
{
}

impl<T> Storage for T where
    T: TransactionStore + CategoryStore + CardStore + FamilyMemberStore + Send + Sync
{
}
