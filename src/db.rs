//! Sets up the application database.

use rusqlite::{Connection, TransactionBehavior};

use crate::{
    Error, preferences::create_preferences_table, transaction::create_transaction_table,
    user::create_user_table,
};

/// Create the application tables if they do not already exist.
///
/// All tables are created inside a single exclusive SQL transaction, so either
/// every table is created or none are.
///
/// # Errors
/// Returns an [Error::SqlError] if a table could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        rusqlite::Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_user_table(&transaction)?;
    create_transaction_table(&transaction)?;
    create_preferences_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
