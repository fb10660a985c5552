//! Implements the SQLite backed family member store.

use rusqlite::{Connection, OptionalExtension, Row, params};
use uuid::Uuid;

use crate::{
    Error,
    auth::UserId,
    family_member::{FamilyMember, FamilyMemberId, FamilyMemberUpdate, NewFamilyMember},
    stores::{
        FamilyMemberStore,
        sqlite::{SQLiteStore, parse_column},
    },
};

pub(super) fn create_family_member_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS family_member (
            id BLOB PRIMARY KEY,
            user_id BLOB NOT NULL,
            name TEXT NOT NULL,
            relationship TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

fn map_family_member_row(row: &Row) -> Result<FamilyMember, rusqlite::Error> {
    Ok(FamilyMember {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        relationship: parse_column(row, 3)?,
    })
}

fn select_family_member(
    connection: &Connection,
    user_id: UserId,
    id: FamilyMemberId,
) -> Result<Option<FamilyMember>, Error> {
    connection
        .query_row(
            "SELECT id, user_id, name, relationship FROM family_member
             WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
            map_family_member_row,
        )
        .optional()
        .map_err(Error::from)
}

impl FamilyMemberStore for SQLiteStore {
    fn get_all_family_members(&self, user_id: UserId) -> Result<Vec<FamilyMember>, Error> {
        self.connection()?
            .prepare(
                "SELECT id, user_id, name, relationship FROM family_member
                 WHERE user_id = ?1 ORDER BY name ASC",
            )?
            .query_map(params![user_id], map_family_member_row)?
            .map(|maybe_member| maybe_member.map_err(Error::from))
            .collect()
    }

    fn get_family_member(
        &self,
        user_id: UserId,
        id: FamilyMemberId,
    ) -> Result<Option<FamilyMember>, Error> {
        select_family_member(&*self.connection()?, user_id, id)
    }

    fn create_family_member(
        &self,
        user_id: UserId,
        member: NewFamilyMember,
    ) -> Result<FamilyMember, Error> {
        let member = FamilyMember::from_new(Uuid::new_v4(), user_id, member);

        self.connection()?.execute(
            "INSERT INTO family_member (id, user_id, name, relationship) VALUES (?1, ?2, ?3, ?4)",
            params![
                member.id,
                member.user_id,
                member.name,
                member.relationship.as_str()
            ],
        )?;

        Ok(member)
    }

    fn update_family_member(
        &self,
        user_id: UserId,
        id: FamilyMemberId,
        update: &FamilyMemberUpdate,
    ) -> Result<Option<FamilyMember>, Error> {
        let connection = self.connection()?;

        let Some(existing) = select_family_member(&connection, user_id, id)? else {
            return Ok(None);
        };
        let updated = existing.apply_update(update);

        connection.execute(
            "UPDATE family_member SET name = ?1, relationship = ?2 WHERE id = ?3 AND user_id = ?4",
            params![updated.name, updated.relationship.as_str(), id, user_id],
        )?;

        Ok(Some(updated))
    }

    fn delete_family_member(&self, user_id: UserId, id: FamilyMemberId) -> Result<bool, Error> {
        let rows_affected = self.connection()?.execute(
            "DELETE FROM family_member WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;

        Ok(rows_affected != 0)
    }
}
