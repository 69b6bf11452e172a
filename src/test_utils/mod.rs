#![allow(missing_docs)]

pub(crate) mod db;

pub(crate) use db::{get_test_connection, must_create_transaction};
