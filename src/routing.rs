//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::{
    AppState, Error,
    auth::{auth_guard, post_log_in},
    endpoints,
    preferences::{get_preferences_endpoint, put_preferences_endpoint},
    report::{get_daily_report_endpoint, get_report_endpoint},
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_transaction_endpoint, get_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new().route(endpoints::LOG_IN_API, post(post_log_in));

    let protected_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            get(get_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TODAY_TRANSACTIONS_API,
            get(get_daily_report_endpoint),
        )
        .route(
            endpoints::TRANSACTION_API,
            get(get_transaction_endpoint)
                .put(edit_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .route(endpoints::REPORTS_API, get(get_report_endpoint))
        .route(endpoints::DAILY_REPORT_API, get(get_daily_report_endpoint))
        .route(
            endpoints::PREFERENCES_API,
            get(get_preferences_endpoint).put(put_preferences_endpoint),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected_routes
        .merge(unprotected_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_404_not_found() -> Error {
    Error::NotFound
}
