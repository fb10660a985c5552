//! Implements an in-memory store for demos and tests.

use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use crate::{
    Error,
    auth::UserId,
    card::{CardId, CardUpdate, CreditCard, NewCard},
    category::{Category, CategoryId, CategoryUpdate, NewCategory},
    family_member::{FamilyMember, FamilyMemberId, FamilyMemberUpdate, NewFamilyMember},
    stores::{CardStore, CategoryStore, FamilyMemberStore, TransactionStore},
    transaction::{NewTransaction, Transaction, TransactionId, TransactionUpdate},
};

/// Keeps every model in memory, data is lost when the process exits.
///
/// Lookups are linear scans, which is fine for the handful of records a demo holds.
#[derive(Debug, Default)]
pub struct MemStorage {
    tables: Mutex<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
    cards: Vec<CreditCard>,
    family_members: Vec<FamilyMember>,
}

/// A row that belongs to a user.
trait Owned {
    fn id(&self) -> Uuid;
    fn user_id(&self) -> UserId;
}

macro_rules! impl_owned {
    ($($model:ty),*) => {
        $(
            impl Owned for $model {
                fn id(&self) -> Uuid {
                    self.id
                }

                fn user_id(&self) -> UserId {
                    self.user_id
                }
            }
        )*
    };
}

impl_owned!(Transaction, Category, CreditCard, FamilyMember);

fn find<T: Owned + Clone>(rows: &[T], user_id: UserId, id: Uuid) -> Option<T> {
    rows.iter()
        .find(|row| row.id() == id && row.user_id() == user_id)
        .cloned()
}

fn owned_by<T: Owned + Clone>(rows: &[T], user_id: UserId) -> Vec<T> {
    rows.iter()
        .filter(|row| row.user_id() == user_id)
        .cloned()
        .collect()
}

/// Replace the row with `id` by the result of `update`, returns the new row.
fn replace<T, E>(
    rows: &mut [T],
    user_id: UserId,
    id: Uuid,
    update: impl FnOnce(&T) -> Result<T, E>,
) -> Result<Option<T>, E>
where
    T: Owned + Clone,
{
    let Some(row) = rows
        .iter_mut()
        .find(|row| row.id() == id && row.user_id() == user_id)
    else {
        return Ok(None);
    };

    *row = update(row)?;

    Ok(Some(row.clone()))
}

fn remove<T: Owned>(rows: &mut Vec<T>, user_id: UserId, id: Uuid) -> bool {
    let count = rows.len();
    rows.retain(|row| !(row.id() == id && row.user_id() == user_id));

    rows.len() != count
}

impl MemStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, Error> {
        self.tables.lock().map_err(|error| {
            tracing::error!("could not acquire the in-memory store lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl TransactionStore for MemStorage {
    fn get_all_transactions(&self, user_id: UserId) -> Result<Vec<Transaction>, Error> {
        let mut transactions = owned_by(&self.tables()?.transactions, user_id);
        // Stable sort, same-day transactions stay in insertion order.
        transactions.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(transactions)
    }

    fn get_transaction(
        &self,
        user_id: UserId,
        id: TransactionId,
    ) -> Result<Option<Transaction>, Error> {
        Ok(find(&self.tables()?.transactions, user_id, id))
    }

    fn create_transaction(
        &self,
        user_id: UserId,
        transaction: NewTransaction,
    ) -> Result<Transaction, Error> {
        let transaction = Transaction::from_new(Uuid::new_v4(), user_id, transaction);
        self.tables()?.transactions.push(transaction.clone());

        Ok(transaction)
    }

    fn create_transactions(
        &self,
        user_id: UserId,
        transactions: Vec<NewTransaction>,
    ) -> Result<Vec<Transaction>, Error> {
        let transactions: Vec<Transaction> = transactions
            .into_iter()
            .map(|transaction| Transaction::from_new(Uuid::new_v4(), user_id, transaction))
            .collect();
        self.tables()?
            .transactions
            .extend(transactions.iter().cloned());

        Ok(transactions)
    }

    fn update_transaction(
        &self,
        user_id: UserId,
        id: TransactionId,
        update: &TransactionUpdate,
    ) -> Result<Option<Transaction>, Error> {
        replace(&mut self.tables()?.transactions, user_id, id, |row| {
            row.apply_update(update)
        })
        .map_err(Error::from)
    }

    fn delete_transaction(&self, user_id: UserId, id: TransactionId) -> Result<bool, Error> {
        Ok(remove(&mut self.tables()?.transactions, user_id, id))
    }
}

impl CategoryStore for MemStorage {
    fn get_all_categories(&self, user_id: UserId) -> Result<Vec<Category>, Error> {
        let mut categories = owned_by(&self.tables()?.categories, user_id);
        categories.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(categories)
    }

    fn get_category(&self, user_id: UserId, id: CategoryId) -> Result<Option<Category>, Error> {
        Ok(find(&self.tables()?.categories, user_id, id))
    }

    fn create_category(&self, user_id: UserId, category: NewCategory) -> Result<Category, Error> {
        let category = Category::from_new(Uuid::new_v4(), user_id, category);
        self.tables()?.categories.push(category.clone());

        Ok(category)
    }

    fn update_category(
        &self,
        user_id: UserId,
        id: CategoryId,
        update: &CategoryUpdate,
    ) -> Result<Option<Category>, Error> {
        replace(&mut self.tables()?.categories, user_id, id, |row| {
            Ok(row.apply_update(update))
        })
    }

    fn delete_category(&self, user_id: UserId, id: CategoryId) -> Result<bool, Error> {
        Ok(remove(&mut self.tables()?.categories, user_id, id))
    }
}

impl CardStore for MemStorage {
    fn get_all_cards(&self, user_id: UserId) -> Result<Vec<CreditCard>, Error> {
        let mut cards = owned_by(&self.tables()?.cards, user_id);
        cards.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(cards)
    }

    fn get_card(&self, user_id: UserId, id: CardId) -> Result<Option<CreditCard>, Error> {
        Ok(find(&self.tables()?.cards, user_id, id))
    }

    fn create_card(&self, user_id: UserId, card: NewCard) -> Result<CreditCard, Error> {
        let card = CreditCard::from_new(Uuid::new_v4(), user_id, card);
        self.tables()?.cards.push(card.clone());

        Ok(card)
    }

    fn update_card(
        &self,
        user_id: UserId,
        id: CardId,
        update: &CardUpdate,
    ) -> Result<Option<CreditCard>, Error> {
        replace(&mut self.tables()?.cards, user_id, id, |row| {
            Ok(row.apply_update(update))
        })
    }

    fn delete_card(&self, user_id: UserId, id: CardId) -> Result<bool, Error> {
        Ok(remove(&mut self.tables()?.cards, user_id, id))
    }
}

impl FamilyMemberStore for MemStorage {
    fn get_all_family_members(&self, user_id: UserId) -> Result<Vec<FamilyMember>, Error> {
        let mut members = owned_by(&self.tables()?.family_members, user_id);
        members.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(members)
    }

    fn get_family_member(
        &self,
        user_id: UserId,
        id: FamilyMemberId,
    ) -> Result<Option<FamilyMember>, Error> {
        Ok(find(&self.tables()?.family_members, user_id, id))
    }

    fn create_family_member(
        &self,
        user_id: UserId,
        member: NewFamilyMember,
    ) -> Result<FamilyMember, Error> {
        let member = FamilyMember::from_new(Uuid::new_v4(), user_id, member);
        self.tables()?.family_members.push(member.clone());

        Ok(member)
    }

    fn update_family_member(
        &self,
        user_id: UserId,
        id: FamilyMemberId,
        update: &FamilyMemberUpdate,
    ) -> Result<Option<FamilyMember>, Error> {
        replace(&mut self.tables()?.family_members, user_id, id, |row| {
            Ok(row.apply_update(update))
        })
    }

    fn delete_family_member(&self, user_id: UserId, id: FamilyMemberId) -> Result<bool, Error> {
        Ok(remove(&mut self.tables()?.family_members, user_id, id))
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;
    use uuid::Uuid;

    use crate::{
        Error,
        category::{CategoryUpdate, NewCategory},
        stores::{CategoryStore, MemStorage, TransactionStore},
        transaction::{NewTransaction, TransactionMode, TransactionType, TransactionUpdate},
    };

    fn new_transaction(date: time::Date, description: &str) -> NewTransaction {
        NewTransaction::simple(
            date,
            10.0,
            TransactionType::Expense,
            Uuid::new_v4(),
            description,
        )
    }

    #[test]
    fn get_all_transactions_sorts_by_date_descending() {
        let store = MemStorage::new();
        let user_id = Uuid::new_v4();
        for (date, description) in [
            (date!(2024 - 01 - 10), "first"),
            (date!(2024 - 03 - 01), "latest"),
            (date!(2024 - 01 - 10), "second"),
            (date!(2023 - 12 - 31), "oldest"),
        ] {
            store
                .create_transaction(user_id, new_transaction(date, description))
                .unwrap();
        }

        let descriptions: Vec<String> = store
            .get_all_transactions(user_id)
            .unwrap()
            .into_iter()
            .map(|transaction| transaction.description)
            .collect();

        assert_eq!(descriptions, ["latest", "first", "second", "oldest"]);
    }

    #[test]
    fn users_only_see_their_own_data() {
        let store = MemStorage::new();
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        let transaction = store
            .create_transaction(owner, new_transaction(date!(2024 - 01 - 01), "mine"))
            .unwrap();

        assert!(store.get_all_transactions(other).unwrap().is_empty());
        assert_eq!(store.get_transaction(other, transaction.id).unwrap(), None);
        assert!(!store.delete_transaction(other, transaction.id).unwrap());
        assert_eq!(
            store.get_transaction(owner, transaction.id).unwrap(),
            Some(transaction)
        );
    }

    #[test]
    fn update_and_delete_missing_ids_return_nothing() {
        let store = MemStorage::new();
        let user_id = Uuid::new_v4();

        let updated = store
            .update_transaction(user_id, Uuid::new_v4(), &TransactionUpdate::default())
            .unwrap();
        let deleted = store.delete_transaction(user_id, Uuid::new_v4()).unwrap();

        assert_eq!(updated, None);
        assert!(!deleted);
    }

    #[test]
    fn update_transaction_checks_installments() {
        let store = MemStorage::new();
        let user_id = Uuid::new_v4();
        let transaction = store
            .create_transaction(user_id, new_transaction(date!(2024 - 01 - 01), "tv"))
            .unwrap();

        let result = store.update_transaction(
            user_id,
            transaction.id,
            &TransactionUpdate {
                mode: Some(TransactionMode::Parcelada),
                ..Default::default()
            },
        );

        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(
            store.get_transaction(user_id, transaction.id).unwrap(),
            Some(transaction)
        );
    }

    #[test]
    fn update_category_changes_stored_value() {
        let store = MemStorage::new();
        let user_id = Uuid::new_v4();
        let category = store
            .create_category(
                user_id,
                NewCategory {
                    name: "Lazer".to_owned(),
                    category_type: TransactionType::Expense,
                    color: "#F97316".to_owned(),
                    icon: None,
                },
            )
            .unwrap();

        let updated = store
            .update_category(
                user_id,
                category.id,
                &CategoryUpdate {
                    color: Some("#000000".to_owned()),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.color, "#000000");
        assert_eq!(store.get_category(user_id, category.id).unwrap(), Some(updated));
    }
}
