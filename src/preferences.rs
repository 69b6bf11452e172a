//! Client preferences
//!
//! The defaults the client uses when it opens the entry form and the report
//! view. They are stored in the database and read and written through the
//! API rather than kept in the browser.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::{Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, report::ReportMode, transaction::Category};

/// The defaults for new transactions and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// The category selected when the transaction form is opened.
    pub default_category: Category,
    /// The report mode shown when no mode is requested.
    pub default_report_mode: ReportMode,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            default_category: Category::Income,
            default_report_mode: ReportMode::Daily,
        }
    }
}

/// Create the preferences table in the database.
///
/// The table holds at most one row.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_preferences_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS preferences (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            default_category TEXT NOT NULL,
            default_report_mode TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

/// Gets the saved preferences, or the defaults if none have been saved.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails or the stored values are invalid.
pub fn get_preferences(connection: &Connection) -> Result<Preferences, Error> {
    let preferences = connection
        .query_row(
            "SELECT default_category, default_report_mode FROM preferences WHERE id = 1",
            [],
            |row| {
                Ok(Preferences {
                    default_category: row.get(0)?,
                    default_report_mode: row.get(1)?,
                })
            },
        )
        .optional()?;

    Ok(preferences.unwrap_or_default())
}

/// Saves `preferences`, replacing any previously saved preferences.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn save_preferences(preferences: &Preferences, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO preferences (id, default_category, default_report_mode)
         VALUES (1, ?1, ?2)
         ON CONFLICT(id) DO UPDATE SET
            default_category = excluded.default_category,
            default_report_mode = excluded.default_report_mode",
        (preferences.default_category, preferences.default_report_mode),
    )?;

    Ok(())
}

/// The state needed to read and write preferences.
#[derive(Debug, Clone)]
pub struct PreferencesState {
    /// The database connection for managing preferences.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for PreferencesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that responds with the saved preferences.
pub async fn get_preferences_endpoint(
    State(state): State<PreferencesState>,
) -> Result<Json<Preferences>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_preferences(&connection).map(Json)
}

/// A route handler that saves new preferences and responds with them.
pub async fn put_preferences_endpoint(
    State(state): State<PreferencesState>,
    Json(preferences): Json<Preferences>,
) -> Result<Json<Preferences>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    save_preferences(&preferences, &connection)
        .inspect_err(|error| tracing::error!("could not save preferences: {error}"))?;

    Ok(Json(preferences))
}
