//! Fixed-point money amounts.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

/// The number of decimal places amounts are rounded to.
pub const AMOUNT_DECIMAL_PLACES: u32 = 2;

/// The largest amount a single transaction may have, one quadrillion.
///
/// Sums of amounts over any realistic number of transactions stay far below
/// the range of [Decimal], so report totals cannot overflow.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// A non-negative amount of money with two decimal places.
///
/// Amounts are serialized as JSON numbers and stored in the database as
/// decimal strings so that sums never pick up floating point error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// Zero dollars.
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Create an amount from `value`, rounding half-cents away from zero.
    ///
    /// # Errors
    /// Returns [Error::NegativeAmount] if `value` is less than zero or
    /// [Error::AmountTooLarge] if it is more than [MAX_AMOUNT].
    pub fn new(value: Decimal) -> Result<Self, Error> {
        if value < Decimal::ZERO {
            return Err(Error::NegativeAmount(value));
        }

        if value > MAX_AMOUNT {
            return Err(Error::AmountTooLarge(value));
        }

        Ok(Self(value.round_dp_with_strategy(
            AMOUNT_DECIMAL_PLACES,
            RoundingStrategy::MidpointAwayFromZero,
        )))
    }

    /// The amount as a decimal number.
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Amount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s).map_err(|_| Error::InvalidAmount(s.to_owned()))?;
        Amount::new(value)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = rust_decimal::serde::float::deserialize(deserializer)?;
        Amount::new(value).map_err(serde::de::Error::custom)
    }
}

impl ToSql for Amount {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.to_string()))
    }
}

impl FromSql for Amount {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}
