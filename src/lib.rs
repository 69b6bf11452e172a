//! A REST API for tracking personal income and expenses.
//!
//! Transactions are stored in a SQLite database and served as JSON. The
//! [report] module buckets transactions into daily, weekly, monthly or yearly
//! periods and produces the totals and profit/loss series that a client needs
//! to draw its tables and charts.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use rust_decimal::Decimal;
use serde_json::json;
use tokio::signal;

mod app_state;
pub mod auth;
mod database_id;
mod db;
pub mod endpoints;
mod logging;
mod password;
mod preferences;
pub mod report;
mod routing;
#[cfg(test)]
mod test_utils;
mod timezone;
pub mod transaction;
mod user;

pub use app_state::AppState;
pub use auth::DEFAULT_TOKEN_DURATION;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use password::{PasswordHash, ValidatedPassword};
pub use routing::build_router;
pub use user::{User, UserID, create_user, get_user_by_username};

use crate::report::ReportError;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The username and password combination does not match a registered user.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The request did not carry a bearer token.
    #[error("missing bearer token")]
    MissingToken,

    /// The bearer token could not be decoded, has a bad signature or has expired.
    #[error("invalid bearer token: {0}")]
    InvalidToken(String),

    /// A token could not be created for a user who logged in.
    ///
    /// The error string should only be logged on the server.
    #[error("could not create token: {0}")]
    TokenCreationError(String),

    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The username is already taken by another user.
    #[error("the username \"{0}\" already exists")]
    DuplicateUsername(String),

    /// A transaction was submitted without a description.
    #[error("the transaction description cannot be empty")]
    EmptyDescription,

    /// A transaction amount was negative.
    ///
    /// Whether money came in or went out is recorded by the category, so
    /// amounts are always zero or more.
    #[error("{0} is a negative amount, which is not allowed")]
    NegativeAmount(Decimal),

    /// A transaction amount was larger than [transaction::MAX_AMOUNT].
    #[error("{0} is larger than the maximum amount of {max}", max = transaction::MAX_AMOUNT)]
    AmountTooLarge(Decimal),

    /// A string could not be parsed as an amount of money.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// The report parameters were invalid.
    #[error(transparent)]
    InvalidReport(#[from] ReportError),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::InvalidCredentials | Error::MissingToken | Error::InvalidToken(_) => {
                StatusCode::UNAUTHORIZED
            }
            Error::TooWeak(_)
            | Error::EmptyDescription
            | Error::NegativeAmount(_)
            | Error::AmountTooLarge(_)
            | Error::InvalidAmount(_)
            | Error::InvalidReport(_) => StatusCode::BAD_REQUEST,
            Error::DuplicateUsername(_) => StatusCode::CONFLICT,
            Error::NotFound | Error::UpdateMissingTransaction | Error::DeleteMissingTransaction => {
                StatusCode::NOT_FOUND
            }
            Error::TokenCreationError(_)
            | Error::HashingError(_)
            | Error::SqlError(_)
            | Error::DatabaseLockError
            | Error::InvalidTimezoneError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            // Internal details are only meant for the server logs.
            tracing::error!("An unexpected error occurred: {}", self);
            "An unexpected error occurred, check the server logs for more details.".to_owned()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
