//! The HTTP endpoints that serve reports and the daily listing.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    preferences::get_preferences,
    report::{
        DailyListing, DateWindow, Report, ReportMode, ReportRequest, build_report, daily_listing,
    },
    timezone::get_local_date,
    transaction::{CategoryFilter, Transaction, get_transactions_in_window},
};

/// The state needed to build reports.
#[derive(Debug, Clone)]
pub struct ReportState {
    /// The database connection for reading transactions and preferences.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Jakarta".
    pub local_timezone: String,
}

impl FromRef<AppState> for ReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Query parameters for a report.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    /// The report mode, e.g. "monthly". Falls back to the saved preference.
    ///
    /// Kept as a string so that unknown modes are reported as such.
    pub mode: Option<String>,
    /// The anchor date the window is derived from.
    pub start: Option<Date>,
    /// The end of the selected range, required for weekly reports.
    pub end: Option<Date>,
    /// Which categories to count.
    #[serde(default)]
    pub category: CategoryFilter,
}

/// Query parameters for the daily listing.
#[derive(Debug, Default, Deserialize)]
pub struct DailyListingQuery {
    /// The day to list, defaults to today in the server's timezone.
    pub date: Option<Date>,
    /// Which categories to list.
    #[serde(default)]
    pub category: CategoryFilter,
}

/// A route handler that buckets the transactions in the requested window.
///
/// Invalid modes and windows are rejected with 400 Bad Request.
pub async fn get_report_endpoint(
    State(state): State<ReportState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Report>, Error> {
    let mode = match query.mode {
        Some(mode) => mode.parse::<ReportMode>()?,
        None => default_report_mode(&state)?,
    };

    let request = ReportRequest {
        mode,
        anchor_start: query.start,
        anchor_end: query.end,
        category_filter: query.category,
    };
    let window = request.window()?;
    let transactions = load_transactions(&state, &window)?;

    tracing::debug!(
        "building {mode} report for {} to {} from {} transactions",
        window.start,
        window.end,
        transactions.len()
    );

    Ok(Json(build_report(&transactions, &request)?))
}

/// A route handler that lists the transactions on one day with their totals.
pub async fn get_daily_report_endpoint(
    State(state): State<ReportState>,
    Query(query): Query<DailyListingQuery>,
) -> Result<Json<DailyListing>, Error> {
    let date = match query.date {
        Some(date) => date,
        None => get_local_date(&state.local_timezone)?,
    };
    let window = DateWindow {
        start: date,
        end: date,
    };
    let transactions = load_transactions(&state, &window)?;

    Ok(Json(daily_listing(&transactions, date, query.category)))
}

fn default_report_mode(state: &ReportState) -> Result<ReportMode, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_preferences(&connection).map(|preferences| preferences.default_report_mode)
}

fn load_transactions(state: &ReportState, window: &DateWindow) -> Result<Vec<Transaction>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_transactions_in_window(window, &connection)
}
