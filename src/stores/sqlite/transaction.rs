//! Implements the SQLite backed transaction store.

use rusqlite::{Connection, OptionalExtension, Row, params};
use uuid::Uuid;

use crate::{
    Error,
    auth::UserId,
    stores::{
        TransactionStore,
        sqlite::{SQLiteStore, parse_column},
    },
    transaction::{NewTransaction, Transaction, TransactionId, TransactionUpdate},
};

const SELECT_COLUMNS: &str = "SELECT id, user_id, date, amount, type, category_id, description, \
    mode, installment_number, installments_total, card_id, family_member_id, due_date, is_paid, \
    is_recurring FROM \"transaction\"";

pub(super) fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id BLOB PRIMARY KEY,
            user_id BLOB NOT NULL,
            date TEXT NOT NULL,
            amount REAL NOT NULL CHECK (amount > 0),
            type TEXT NOT NULL,
            category_id BLOB NOT NULL,
            description TEXT NOT NULL,
            mode TEXT NOT NULL,
            installment_number INTEGER,
            installments_total INTEGER,
            card_id BLOB,
            family_member_id BLOB,
            due_date TEXT,
            is_paid INTEGER NOT NULL,
            is_recurring INTEGER NOT NULL,
            CHECK (mode != 'parcelada'
                OR (installment_number IS NOT NULL AND installments_total IS NOT NULL))
        )",
        (),
    )?;

    // Improves performance of the date ordered listing of a user's transactions.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_user_date ON \"transaction\"(user_id, date)",
        (),
    )?;

    Ok(())
}

fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        user_id: row.get(1)?,
        date: row.get(2)?,
        amount: row.get(3)?,
        transaction_type: parse_column(row, 4)?,
        category_id: row.get(5)?,
        description: row.get(6)?,
        mode: parse_column(row, 7)?,
        installment_number: row.get(8)?,
        installments_total: row.get(9)?,
        card_id: row.get(10)?,
        family_member_id: row.get(11)?,
        due_date: row.get(12)?,
        is_paid: row.get(13)?,
        is_recurring: row.get(14)?,
    })
}

fn insert_transaction(connection: &Connection, transaction: &Transaction) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO \"transaction\" (id, user_id, date, amount, type, category_id, description,
            mode, installment_number, installments_total, card_id, family_member_id, due_date,
            is_paid, is_recurring)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        params![
            transaction.id,
            transaction.user_id,
            transaction.date,
            transaction.amount,
            transaction.transaction_type.as_str(),
            transaction.category_id,
            transaction.description,
            transaction.mode.as_str(),
            transaction.installment_number,
            transaction.installments_total,
            transaction.card_id,
            transaction.family_member_id,
            transaction.due_date,
            transaction.is_paid,
            transaction.is_recurring,
        ],
    )?;

    Ok(())
}

fn select_transaction(
    connection: &Connection,
    user_id: UserId,
    id: TransactionId,
) -> Result<Option<Transaction>, Error> {
    connection
        .query_row(
            &format!("{SELECT_COLUMNS} WHERE id = ?1 AND user_id = ?2"),
            params![id, user_id],
            map_transaction_row,
        )
        .optional()
        .map_err(Error::from)
}

impl TransactionStore for SQLiteStore {
    fn get_all_transactions(&self, user_id: UserId) -> Result<Vec<Transaction>, Error> {
        self.connection()?
            .prepare(&format!(
                "{SELECT_COLUMNS} WHERE user_id = ?1 ORDER BY date DESC, rowid ASC"
            ))?
            .query_map(params![user_id], map_transaction_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
            .collect()
    }

    fn get_transaction(
        &self,
        user_id: UserId,
        id: TransactionId,
    ) -> Result<Option<Transaction>, Error> {
        select_transaction(&*self.connection()?, user_id, id)
    }

    fn create_transaction(
        &self,
        user_id: UserId,
        transaction: NewTransaction,
    ) -> Result<Transaction, Error> {
        let transaction = Transaction::from_new(Uuid::new_v4(), user_id, transaction);
        insert_transaction(&*self.connection()?, &transaction)?;

        Ok(transaction)
    }

    fn create_transactions(
        &self,
        user_id: UserId,
        transactions: Vec<NewTransaction>,
    ) -> Result<Vec<Transaction>, Error> {
        let connection = self.connection()?;
        let sql_transaction = connection.unchecked_transaction()?;

        let transactions: Vec<Transaction> = transactions
            .into_iter()
            .map(|transaction| Transaction::from_new(Uuid::new_v4(), user_id, transaction))
            .collect();

        for transaction in &transactions {
            insert_transaction(&sql_transaction, transaction)?;
        }

        sql_transaction.commit()?;

        Ok(transactions)
    }

    fn update_transaction(
        &self,
        user_id: UserId,
        id: TransactionId,
        update: &TransactionUpdate,
    ) -> Result<Option<Transaction>, Error> {
        let connection = self.connection()?;

        let Some(existing) = select_transaction(&connection, user_id, id)? else {
            return Ok(None);
        };
        let updated = existing.apply_update(update)?;

        connection.execute(
            "UPDATE \"transaction\"
             SET date = ?1, amount = ?2, type = ?3, category_id = ?4, description = ?5,
                 mode = ?6, installment_number = ?7, installments_total = ?8, card_id = ?9,
                 family_member_id = ?10, due_date = ?11, is_paid = ?12, is_recurring = ?13
             WHERE id = ?14 AND user_id = ?15",
            params![
                updated.date,
                updated.amount,
                updated.transaction_type.as_str(),
                updated.category_id,
                updated.description,
                updated.mode.as_str(),
                updated.installment_number,
                updated.installments_total,
                updated.card_id,
                updated.family_member_id,
                updated.due_date,
                updated.is_paid,
                updated.is_recurring,
                id,
                user_id,
            ],
        )?;

        Ok(Some(updated))
    }

    fn delete_transaction(&self, user_id: UserId, id: TransactionId) -> Result<bool, Error> {
        let rows_affected = self.connection()?.execute(
            "DELETE FROM \"transaction\" WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;

        Ok(rows_affected != 0)
    }
}
