//! Implements the SQLite backed credit card store.

use rusqlite::{Connection, OptionalExtension, Row, params};
use uuid::Uuid;

use crate::{
    Error,
    auth::UserId,
    card::{CardId, CardUpdate, CreditCard, NewCard},
    stores::{
        CardStore,
        sqlite::{SQLiteStore, parse_column},
    },
};

const SELECT_COLUMNS: &str = "SELECT id, user_id, name, last_four_digits, type, holder, purpose, \
    color, credit_limit, closing_day, due_day FROM card";

pub(super) fn create_card_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS card (
            id BLOB PRIMARY KEY,
            user_id BLOB NOT NULL,
            name TEXT NOT NULL,
            last_four_digits TEXT NOT NULL,
            type TEXT NOT NULL,
            holder TEXT NOT NULL,
            purpose TEXT NOT NULL,
            color TEXT NOT NULL,
            credit_limit REAL,
            closing_day INTEGER CHECK (closing_day BETWEEN 1 AND 31),
            due_day INTEGER CHECK (due_day BETWEEN 1 AND 31)
        )",
        (),
    )?;

    Ok(())
}

fn map_card_row(row: &Row) -> Result<CreditCard, rusqlite::Error> {
    Ok(CreditCard {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        last_four_digits: row.get(3)?,
        card_type: parse_column(row, 4)?,
        holder: row.get(5)?,
        purpose: row.get(6)?,
        color: row.get(7)?,
        limit: row.get(8)?,
        closing_day: row.get(9)?,
        due_day: row.get(10)?,
    })
}

fn select_card(
    connection: &Connection,
    user_id: UserId,
    id: CardId,
) -> Result<Option<CreditCard>, Error> {
    connection
        .query_row(
            &format!("{SELECT_COLUMNS} WHERE id = ?1 AND user_id = ?2"),
            params![id, user_id],
            map_card_row,
        )
        .optional()
        .map_err(Error::from)
}

impl CardStore for SQLiteStore {
    fn get_all_cards(&self, user_id: UserId) -> Result<Vec<CreditCard>, Error> {
        self.connection()?
            .prepare(&format!("{SELECT_COLUMNS} WHERE user_id = ?1 ORDER BY name ASC"))?
            .query_map(params![user_id], map_card_row)?
            .map(|maybe_card| maybe_card.map_err(Error::from))
            .collect()
    }

    fn get_card(&self, user_id: UserId, id: CardId) -> Result<Option<CreditCard>, Error> {
        select_card(&*self.connection()?, user_id, id)
    }

    fn create_card(&self, user_id: UserId, card: NewCard) -> Result<CreditCard, Error> {
        let card = CreditCard::from_new(Uuid::new_v4(), user_id, card);

        self.connection()?.execute(
            "INSERT INTO card (id, user_id, name, last_four_digits, type, holder, purpose, color,
                credit_limit, closing_day, due_day)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                card.id,
                card.user_id,
                card.name,
                card.last_four_digits,
                card.card_type.as_str(),
                card.holder,
                card.purpose,
                card.color,
                card.limit,
                card.closing_day,
                card.due_day,
            ],
        )?;

        Ok(card)
    }

    fn update_card(
        &self,
        user_id: UserId,
        id: CardId,
        update: &CardUpdate,
    ) -> Result<Option<CreditCard>, Error> {
        let connection = self.connection()?;

        let Some(existing) = select_card(&connection, user_id, id)? else {
            return Ok(None);
        };
        let updated = existing.apply_update(update);

        connection.execute(
            "UPDATE card
             SET name = ?1, last_four_digits = ?2, type = ?3, holder = ?4, purpose = ?5,
                 color = ?6, credit_limit = ?7, closing_day = ?8, due_day = ?9
             WHERE id = ?10 AND user_id = ?11",
            params![
                updated.name,
                updated.last_four_digits,
                updated.card_type.as_str(),
                updated.holder,
                updated.purpose,
                updated.color,
                updated.limit,
                updated.closing_day,
                updated.due_day,
                id,
                user_id,
            ],
        )?;

        Ok(Some(updated))
    }

    fn delete_card(&self, user_id: UserId, id: CardId) -> Result<bool, Error> {
        let rows_affected = self.connection()?.execute(
            "DELETE FROM card WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;

        Ok(rows_affected != 0)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::{
        card::{CardType, CardUpdate, NewCard},
        stores::{CardStore, sqlite::get_test_store},
    };

    fn new_card() -> NewCard {
        NewCard {
            name: "Inter".to_owned(),
            last_four_digits: "0001".to_owned(),
            card_type: CardType::Virtual,
            holder: "Maria".to_owned(),
            purpose: "Assinaturas".to_owned(),
            color: "#FF7A00".to_owned(),
            limit: Some(1500.0),
            closing_day: Some(25),
            due_day: Some(5),
        }
    }

    #[test]
    fn create_and_get_card() {
        let store = get_test_store();
        let user_id = Uuid::new_v4();

        let card = store.create_card(user_id, new_card()).unwrap();

        assert_eq!(store.get_card(user_id, card.id), Ok(Some(card.clone())));
        assert_eq!(store.get_all_cards(user_id), Ok(vec![card]));
    }

    #[test]
    fn update_card_changes_limit() {
        let store = get_test_store();
        let user_id = Uuid::new_v4();
        let card = store.create_card(user_id, new_card()).unwrap();

        let updated = store
            .update_card(
                user_id,
                card.id,
                &CardUpdate {
                    limit: Some(3000.0),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.limit, Some(3000.0));
        assert_eq!(updated.due_day, Some(5));
    }

    #[test]
    fn delete_card_only_deletes_own_card() {
        let store = get_test_store();
        let user_id = Uuid::new_v4();
        let card = store.create_card(user_id, new_card()).unwrap();

        assert_eq!(store.delete_card(Uuid::new_v4(), card.id), Ok(false));
        assert_eq!(store.delete_card(user_id, card.id), Ok(true));
        assert_eq!(store.get_card(user_id, card.id), Ok(None));
    }
}
