//! Code for creating the user table and fetching users from the database.

use std::fmt::Display;

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{Error, PasswordHash};

/// A newtype wrapper for integer user IDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A user who can log in to the application.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The name the user logs in with.
    pub username: String,
    /// The user's password hash.
    pub password_hash: PasswordHash,
}

/// Create the user table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Create and insert a new user into the database.
///
/// # Errors
///
/// Returns a:
/// - [Error::DuplicateUsername] if `username` is already taken,
/// - or [Error::SqlError] if some other SQL error occurred.
pub fn create_user(
    username: &str,
    password_hash: PasswordHash,
    connection: &Connection,
) -> Result<User, Error> {
    connection
        .execute(
            "INSERT INTO user (username, password) VALUES (?1, ?2)",
            (username, password_hash.as_ref()),
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
                },
                _,
            ) => Error::DuplicateUsername(username.to_owned()),
            error => error.into(),
        })?;

    Ok(User {
        id: UserID::new(connection.last_insert_rowid()),
        username: username.to_owned(),
        password_hash,
    })
}

/// Get the user who logs in with `username`.
///
/// # Errors
///
/// Returns a:
/// - [Error::NotFound] if no user has that username,
/// - or [Error::SqlError] if some other SQL error occurred.
pub fn get_user_by_username(username: &str, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare("SELECT id, username, password FROM user WHERE username = :username")?
        .query_row(&[(":username", username)], map_user_row)
        .map_err(|error| error.into())
}

/// Get the number of users in the database.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
#[cfg(test)]
pub fn count_users(connection: &Connection) -> Result<i64, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM user;", [], |row| row.get::<_, i64>(0))
        .map_err(|error| error.into())
}

fn map_user_row(row: &Row) -> Result<User, rusqlite::Error> {
    let id = UserID::new(row.get(0)?);
    let username = row.get(1)?;
    let raw_password_hash: String = row.get(2)?;

    Ok(User {
        id,
        username,
        password_hash: PasswordHash::new_unchecked(&raw_password_hash),
    })
}

#[cfg(test)]
mod user_tests {
    use rusqlite::Connection;

    use crate::{
        Error, PasswordHash,
        user::{count_users, create_user, create_user_table, get_user_by_username},
    };

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_user_table(&connection).unwrap();
        connection
    }

    #[test]
    fn create_user_succeeds() {
        let connection = get_test_connection();
        let password_hash = PasswordHash::new_unchecked("hunter2");

        let user = create_user("budi", password_hash.clone(), &connection).unwrap();

        assert!(user.id.as_i64() > 0);
        assert_eq!(user.username, "budi");
        assert_eq!(user.password_hash, password_hash);
    }

    #[test]
    fn create_user_fails_on_duplicate_username() {
        let connection = get_test_connection();
        create_user("budi", PasswordHash::new_unchecked("hunter2"), &connection).unwrap();

        let result = create_user("budi", PasswordHash::new_unchecked("hunter3"), &connection);

        assert_eq!(result, Err(Error::DuplicateUsername("budi".to_owned())));
    }

    #[test]
    fn get_user_by_username_returns_inserted_user() {
        let connection = get_test_connection();
        let want =
            create_user("budi", PasswordHash::new_unchecked("hunter2"), &connection).unwrap();

        let got = get_user_by_username("budi", &connection).unwrap();

        assert_eq!(want, got);
    }

    #[test]
    fn get_user_by_username_fails_for_unknown_user() {
        let connection = get_test_connection();

        assert_eq!(
            get_user_by_username("siti", &connection),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn count_users_counts_every_user() {
        let connection = get_test_connection();
        create_user("budi", PasswordHash::new_unchecked("a"), &connection).unwrap();
        create_user("siti", PasswordHash::new_unchecked("b"), &connection).unwrap();

        assert_eq!(count_users(&connection), Ok(2));
    }
}
