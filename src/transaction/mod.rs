//! Transactions for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model, its `Category` and fixed-point `Amount`
//! - Database functions for storing, querying, and managing transactions
//! - The JSON endpoints for creating, listing, editing and deleting transactions

mod amount;
mod category;
mod core;
mod create_endpoint;
mod date_time;
mod delete_endpoint;
mod edit_endpoint;
mod list_endpoint;

pub use amount::{AMOUNT_DECIMAL_PLACES, Amount, MAX_AMOUNT};
pub use category::{Category, CategoryFilter, UnknownCategory};
pub use core::{
    NewTransaction, Transaction, create_transaction, create_transaction_table, delete_transaction,
    get_all_transactions, get_transaction, get_transactions_in_window, map_transaction_row,
    update_transaction,
};
pub use create_endpoint::create_transaction_endpoint;
pub use date_time::{DATE_TIME_FORMAT, format_date_time, parse_date_time};
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use list_endpoint::{get_transaction_endpoint, get_transactions_endpoint};

#[cfg(test)]
pub use core::count_transactions;
