//! Implements the SQLite backed category store.

use rusqlite::{Connection, OptionalExtension, Row, params};
use uuid::Uuid;

use crate::{
    Error,
    auth::UserId,
    category::{Category, CategoryId, CategoryUpdate, NewCategory},
    stores::{
        CategoryStore,
        sqlite::{SQLiteStore, parse_column},
    },
};

pub(super) fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS category (
            id BLOB PRIMARY KEY,
            user_id BLOB NOT NULL,
            name TEXT NOT NULL,
            type TEXT NOT NULL,
            color TEXT NOT NULL,
            icon TEXT
        )",
        (),
    )?;

    Ok(())
}

fn map_category_row(row: &Row) -> Result<Category, rusqlite::Error> {
    Ok(Category {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        category_type: parse_column(row, 3)?,
        color: row.get(4)?,
        icon: row.get(5)?,
    })
}

fn select_category(
    connection: &Connection,
    user_id: UserId,
    id: CategoryId,
) -> Result<Option<Category>, Error> {
    connection
        .query_row(
            "SELECT id, user_id, name, type, color, icon FROM category
             WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
            map_category_row,
        )
        .optional()
        .map_err(Error::from)
}

impl CategoryStore for SQLiteStore {
    fn get_all_categories(&self, user_id: UserId) -> Result<Vec<Category>, Error> {
        self.connection()?
            .prepare(
                "SELECT id, user_id, name, type, color, icon FROM category
                 WHERE user_id = ?1 ORDER BY name ASC",
            )?
            .query_map(params![user_id], map_category_row)?
            .map(|maybe_category| maybe_category.map_err(Error::from))
            .collect()
    }

    fn get_category(&self, user_id: UserId, id: CategoryId) -> Result<Option<Category>, Error> {
        select_category(&*self.connection()?, user_id, id)
    }

    fn create_category(&self, user_id: UserId, category: NewCategory) -> Result<Category, Error> {
        let category = Category::from_new(Uuid::new_v4(), user_id, category);

        self.connection()?.execute(
            "INSERT INTO category (id, user_id, name, type, color, icon)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                category.id,
                category.user_id,
                category.name,
                category.category_type.as_str(),
                category.color,
                category.icon,
            ],
        )?;

        Ok(category)
    }

    fn update_category(
        &self,
        user_id: UserId,
        id: CategoryId,
        update: &CategoryUpdate,
    ) -> Result<Option<Category>, Error> {
        let connection = self.connection()?;

        let Some(existing) = select_category(&connection, user_id, id)? else {
            return Ok(None);
        };
        let updated = existing.apply_update(update);

        connection.execute(
            "UPDATE category SET name = ?1, type = ?2, color = ?3, icon = ?4
             WHERE id = ?5 AND user_id = ?6",
            params![
                updated.name,
                updated.category_type.as_str(),
                updated.color,
                updated.icon,
                id,
                user_id,
            ],
        )?;

        Ok(Some(updated))
    }

    fn delete_category(&self, user_id: UserId, id: CategoryId) -> Result<bool, Error> {
        let rows_affected = self.connection()?.execute(
            "DELETE FROM category WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;

        Ok(rows_affected != 0)
    }
}
