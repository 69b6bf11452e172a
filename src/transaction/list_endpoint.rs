//! Endpoints for reading stored transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, Query, State},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    database_id::TransactionId,
    transaction::{
        CategoryFilter, Transaction,
        core::{get_all_transactions, get_transaction},
    },
};

/// The state needed to read transactions.
#[derive(Debug, Clone)]
pub struct TransactionsState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Query parameters for the transaction listing.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionsQuery {
    /// Only include transactions in this category.
    #[serde(default)]
    pub category: CategoryFilter,
}

/// A route handler that lists every transaction, newest first.
pub async fn get_transactions_endpoint(
    State(state): State<TransactionsState>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let transactions = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_all_transactions(&connection)?
    };

    let transactions = transactions
        .into_iter()
        .filter(|transaction| query.category.matches(transaction.category))
        .collect();

    Ok(Json(transactions))
}

/// A route handler for getting a transaction by its database ID.
///
/// Responds with 404 if the transaction does not exist.
pub async fn get_transaction_endpoint(
    State(state): State<TransactionsState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<Transaction>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_transaction(transaction_id, &connection).map(Json)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json,
        extract::{Path, Query, State},
    };
    use rust_decimal_macros::dec;
    use time::macros::datetime;

    use crate::{
        Error,
        test_utils::{get_test_connection, must_create_transaction},
        transaction::{
            Category, CategoryFilter, get_transaction_endpoint, get_transactions_endpoint,
            list_endpoint::{TransactionsQuery, TransactionsState},
        },
    };

    #[tokio::test]
    async fn lists_newest_first() {
        let conn = get_test_connection();
        let older = must_create_transaction(
            "Gaji",
            dec!(5000000),
            Category::Income,
            datetime!(2025-10-01 09:00:00),
            &conn,
        );
        let newer = must_create_transaction(
            "Bensin",
            dec!(20000),
            Category::Expense,
            datetime!(2025-10-02 17:30:00),
            &conn,
        );
        let state = TransactionsState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        let Json(got) = get_transactions_endpoint(State(state), Query(TransactionsQuery::default()))
            .await
            .unwrap();

        assert_eq!(got, vec![newer, older]);
    }

    #[tokio::test]
    async fn filters_by_category() {
        let conn = get_test_connection();
        let income = must_create_transaction(
            "Gaji",
            dec!(5000000),
            Category::Income,
            datetime!(2025-10-01 09:00:00),
            &conn,
        );
        must_create_transaction(
            "Bensin",
            dec!(20000),
            Category::Expense,
            datetime!(2025-10-02 17:30:00),
            &conn,
        );
        let state = TransactionsState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        let Json(got) = get_transactions_endpoint(
            State(state),
            Query(TransactionsQuery {
                category: CategoryFilter::IncomeOnly,
            }),
        )
        .await
        .unwrap();

        assert_eq!(got, vec![income]);
    }

    #[tokio::test]
    async fn gets_transaction_by_id() {
        let conn = get_test_connection();
        let want = must_create_transaction(
            "Gaji",
            dec!(5000000),
            Category::Income,
            datetime!(2025-10-01 09:00:00),
            &conn,
        );
        let state = TransactionsState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        let Json(got) = get_transaction_endpoint(State(state), Path(want.id))
            .await
            .unwrap();

        assert_eq!(want, got);
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let state = TransactionsState {
            db_connection: Arc::new(Mutex::new(get_test_connection())),
        };

        let result = get_transaction_endpoint(State(state), Path(1)).await;

        assert_eq!(result.err(), Some(Error::NotFound));
    }
}
