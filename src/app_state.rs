//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use time::Duration;

use crate::{Error, auth::JwtKeys, db::initialize, timezone::get_local_offset};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The keys used to sign and verify bearer tokens.
    pub jwt_keys: JwtKeys,

    /// The duration for which bearer tokens are valid.
    pub token_duration: Duration,

    /// The local timezone as a canonical timezone name, e.g. "Asia/Jakarta".
    pub local_timezone: String,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Asia/Jakarta".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized or if
    /// `local_timezone` is not a known timezone.
    pub fn new(
        db_connection: Connection,
        token_secret: &str,
        local_timezone: &str,
        token_duration: Duration,
    ) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        initialize(&db_connection)?;

        Ok(Self {
            jwt_keys: JwtKeys::new(token_secret),
            token_duration,
            local_timezone: local_timezone.to_owned(),
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{AppState, Error, auth::DEFAULT_TOKEN_DURATION};

    #[test]
    fn new_initializes_database() {
        let state = AppState::new(
            Connection::open_in_memory().unwrap(),
            "foobar",
            "Asia/Jakarta",
            DEFAULT_TOKEN_DURATION,
        )
        .unwrap();

        let connection = state.db_connection.lock().unwrap();
        let table_count: i64 = connection
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'transaction'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(table_count, 1);
    }

    #[test]
    fn new_rejects_unknown_timezone() {
        let result = AppState::new(
            Connection::open_in_memory().unwrap(),
            "foobar",
            "Atlantis/Capital",
            DEFAULT_TOKEN_DURATION,
        );

        assert_eq!(
            result.err(),
            Some(Error::InvalidTimezoneError("Atlantis/Capital".to_owned()))
        );
    }
}
