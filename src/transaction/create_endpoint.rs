//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    transaction::{NewTransaction, Transaction, core::create_transaction},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a new transaction, responds with the stored
/// transaction and its new ID.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Json(new_transaction): Json<NewTransaction>,
) -> Result<(StatusCode, Json<Transaction>), Error> {
    let new_transaction = new_transaction.validate()?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transaction = create_transaction(new_transaction, &connection)
        .inspect_err(|error| tracing::error!("could not create transaction: {error}"))?;

    tracing::debug!("created transaction {}", transaction.id);

    Ok((StatusCode::CREATED, Json(transaction)))
}
