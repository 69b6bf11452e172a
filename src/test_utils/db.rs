use rusqlite::Connection;
use rust_decimal::Decimal;
use time::PrimitiveDateTime;

use crate::{
    db::initialize,
    transaction::{Amount, Category, NewTransaction, Transaction, create_transaction},
};

/// An in-memory database with every table created.
pub(crate) fn get_test_connection() -> Connection {
    let connection = Connection::open_in_memory().expect("Could not open in-memory database");
    initialize(&connection).expect("Could not initialize database");
    connection
}

#[track_caller]
pub(crate) fn must_create_transaction(
    description: &str,
    amount: Decimal,
    category: Category,
    date: PrimitiveDateTime,
    connection: &Connection,
) -> Transaction {
    create_transaction(
        NewTransaction {
            description: description.to_owned(),
            amount: Amount::new(amount).expect("Invalid test amount"),
            category,
            date,
        },
        connection,
    )
    .expect("Could not create test transaction")
}
