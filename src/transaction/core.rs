//! Defines the core data models and database queries for transactions.

use rusqlite::{Connection, Row, params, types::Type};
use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::{
    Error,
    database_id::TransactionId,
    report::DateWindow,
    transaction::{
        Amount, Category,
        date_time::{format_date_time, parse_date_time},
    },
};

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned in this transaction.
    pub amount: Amount,
    /// Whether the money was earned or spent.
    pub category: Category,
    /// When the transaction happened.
    #[serde(with = "crate::transaction::date_time")]
    pub date: PrimitiveDateTime,
}

/// The data needed to create a transaction or replace an existing one.
///
/// Call [NewTransaction::validate] before handing one to the database
/// functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned.
    pub amount: Amount,
    /// Whether the money was earned or spent.
    pub category: Category,
    /// When the transaction happened.
    #[serde(with = "crate::transaction::date_time")]
    pub date: PrimitiveDateTime,
}

impl NewTransaction {
    /// Trim the description and check that there is something left.
    ///
    /// # Errors
    /// Returns [Error::EmptyDescription] if the description is blank.
    pub fn validate(self) -> Result<Self, Error> {
        let description = self.description.trim();

        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }

        Ok(Self {
            description: description.to_owned(),
            ..self
        })
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the transaction table in the database.
///
/// Dates are stored as "YYYY-MM-DD HH:MM:SS" text so that sorting and range
/// comparisons on the text match chronological order.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL,
                amount TEXT NOT NULL,
                category TEXT NOT NULL CHECK (category IN ('Income', 'Expense')),
                date TEXT NOT NULL
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
        (),
    )?;

    Ok(())
}

/// Create a new transaction in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let date = format_date_column(&transaction.date)?;

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (description, amount, category, date)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, description, amount, category, date",
        )?
        .query_row(
            params![
                transaction.description,
                transaction.amount,
                transaction.category,
                date
            ],
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, description, amount, category, date FROM \"transaction\" WHERE id = :id",
        )?
        .query_one(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Get every transaction, newest first.
///
/// Transactions on the same date-time are ordered by descending ID so the
/// most recently entered one comes first.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, description, amount, category, date FROM \"transaction\"
             ORDER BY date DESC, id DESC",
        )?
        .query_map([], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Get the transactions that happened on any day of `window`, newest first.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn get_transactions_in_window(
    window: &DateWindow,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let start = format!("{} 00:00:00", window.start);
    let end = format!("{} 23:59:59", window.end);

    connection
        .prepare(
            "SELECT id, description, amount, category, date FROM \"transaction\"
             WHERE date BETWEEN :start AND :end
             ORDER BY date DESC, id DESC",
        )?
        .query_map(&[(":start", &start), (":end", &end)], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Replace the transaction `id` with `transaction`.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingTransaction] if `id` does not refer to a transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let date = format_date_column(&transaction.date)?;

    connection
        .prepare(
            "UPDATE \"transaction\"
             SET description = ?1, amount = ?2, category = ?3, date = ?4
             WHERE id = ?5
             RETURNING id, description, amount, category, date",
        )?
        .query_row(
            params![
                transaction.description,
                transaction.amount,
                transaction.category,
                date,
                id
            ],
            map_transaction_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::UpdateMissingTransaction,
            error => error.into(),
        })
}

/// Delete the transaction `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingTransaction] if `id` does not refer to a transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM \"transaction\" WHERE id = :id",
        &[(":id", &id)],
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingTransaction);
    }

    Ok(())
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

fn format_date_column(date: &PrimitiveDateTime) -> Result<String, Error> {
    format_date_time(date)
        .map_err(|error| rusqlite::Error::ToSqlConversionFailure(Box::new(error)).into())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let description = row.get(1)?;
    let amount = row.get(2)?;
    let category = row.get(3)?;
    let raw_date: String = row.get(4)?;
    let date = parse_date_time(&raw_date).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(error))
    })?;

    Ok(Transaction {
        id,
        description,
        amount,
        category,
        date,
    })
}

// ============================================================================
// TESTS
// ============================================================================
