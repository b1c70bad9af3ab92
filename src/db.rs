/*! This module defines the database schema and the row-mapping helpers shared
by the SQLite-backed store. */

use rusqlite::{Connection, Row, Transaction as SqlTransaction, types::Type};
use uuid::Uuid;

use crate::Error;

/// Create the application's tables if they do not already exist.
///
/// The schema is applied additively, so initializing an existing database is
/// safe and brings it up to date.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    transaction.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                password TEXT NOT NULL
                )",
        (),
    )?;

    transaction.execute(
        "CREATE TABLE IF NOT EXISTS category (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                user_id TEXT NOT NULL,
                FOREIGN KEY(user_id) REFERENCES user(id)
                )",
        (),
    )?;

    transaction.execute(
        "CREATE TABLE IF NOT EXISTS priority (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                level INTEGER NOT NULL,
                user_id TEXT NOT NULL,
                FOREIGN KEY(user_id) REFERENCES user(id)
                )",
        (),
    )?;

    transaction.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                amount INTEGER NOT NULL,
                negative INTEGER NOT NULL,
                category_id TEXT NOT NULL,
                priority_id TEXT NOT NULL,
                user_id TEXT NOT NULL,
                created_at TEXT NOT NULL,
                FOREIGN KEY(category_id) REFERENCES category(id),
                FOREIGN KEY(priority_id) REFERENCES priority(id),
                FOREIGN KEY(user_id) REFERENCES user(id)
                )",
        (),
    )?;

    transaction.commit()?;

    Ok(())
}

/// A trait for mapping from a `rusqlite::Row` from a SQLite database to a concrete rust type.
pub(crate) trait MapRow {
    type ReturnType;

    /// Convert a row into a concrete type.
    ///
    /// **Note:** This function expects that the row object contains all the table columns in the
    /// order they were defined.
    fn map_row(row: &Row) -> Result<Self::ReturnType, rusqlite::Error> {
        Self::map_row_with_offset(row, 0)
    }

    /// Convert a row into a concrete type.
    ///
    /// The `offset` indicates which column the row should be read from.
    /// This is useful in cases where tables have been joined and you want to construct two
    /// different types from the one query.
    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error>;
}

/// Read a UUID stored as text from `row` at `index`.
pub(crate) fn get_uuid(row: &Row, index: usize) -> Result<Uuid, rusqlite::Error> {
    let raw: String = row.get(index)?;

    Uuid::parse_str(&raw).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(error))
    })
}

#[cfg(test)]
mod db_tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn initialize_creates_tables() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).unwrap();

        let table_count: i64 = connection
            .query_row(
                "SELECT COUNT(name) FROM sqlite_master
                 WHERE type = 'table' AND name IN ('user', 'category', 'priority', 'transaction')",
                [],
                |row| row.get(0),
            )
            .unwrap();

        assert_eq!(table_count, 4);
    }

    #[test]
    fn initialize_is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).unwrap();
        initialize(&connection).unwrap();
    }
}
