//! Implements the stores on top of a SQLite database.

mod card;
mod category;
mod family_member;
mod transaction;

use std::{
    str::FromStr,
    sync::{Arc, Mutex, MutexGuard},
};

use rusqlite::{Connection, Row, Transaction as SqlTransaction, types::Type};

use crate::Error;

/// Stores every domain model in a SQLite database.
///
/// Enumerations are stored as their lowercase names, IDs as UUID blobs and
/// dates as `YYYY-MM-DD` text.
#[derive(Debug, Clone)]
pub struct SQLiteStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteStore {
    /// Create a new store for the SQLite `connection`.
    ///
    /// The tables must already exist, see [initialize].
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire the database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

/// Create the tables for the domain models if they do not exist yet.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    transaction::create_transaction_table(&transaction)?;
    category::create_category_table(&transaction)?;
    card::create_card_table(&transaction)?;
    family_member::create_family_member_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Read the text column at `index` and parse it with [FromStr].
fn parse_column<T>(row: &Row, index: usize) -> Result<T, rusqlite::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let text: String = row.get(index)?;

    text.parse()
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(error)))
}

#[cfg(test)]
pub(crate) fn get_test_store() -> SQLiteStore {
    let connection = Connection::open_in_memory().unwrap();
    initialize(&connection).unwrap();

    SQLiteStore::new(Arc::new(Mutex::new(connection)))
}

#[cfg(test)]
mod initialize_tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn sql_is_valid() {
        let connection =
            Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");

        assert_eq!(Ok(()), initialize(&connection));
    }

    #[test]
    fn can_initialize_twice() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).unwrap();

        assert_eq!(Ok(()), initialize(&connection));
    }
}
