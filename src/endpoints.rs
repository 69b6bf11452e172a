//! The API endpoints URIs.
//!
//! Endpoints that take a parameter use the axum path syntax, e.g.
//! '/api/transactions/{transaction_id}'.
//! Use [format_endpoint] to fill in the parameter.

/// The route for logging in a user and receiving a bearer token.
pub const LOG_IN_API: &str = "/api/login";
/// The route to list and create transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to list the transactions made today.
pub const TODAY_TRANSACTIONS_API: &str = "/api/transactions/today";
/// The route to get, update or delete a single transaction.
pub const TRANSACTION_API: &str = "/api/transactions/{transaction_id}";
/// The route for period reports (daily, weekly, monthly and yearly).
pub const REPORTS_API: &str = "/api/reports";
/// The route for the transactions and totals of a single day.
pub const DAILY_REPORT_API: &str = "/api/reports/daily";
/// The route to read and save the client's preferences.
pub const PREFERENCES_API: &str = "/api/preferences";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// Only the first parameter, a segment wrapped in curly braces, is replaced.
/// Paths without a parameter are returned unchanged.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let (Some(start), Some(end)) = (endpoint_path.find('{'), endpoint_path.find('}')) else {
        return endpoint_path.to_owned();
    };

    format!("{}{id}{}", &endpoint_path[..start], &endpoint_path[end + 1..])
}
