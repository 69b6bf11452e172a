//! Whether a transaction brought money in or sent it out.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

/// The category of a transaction.
///
/// Besides the English names, the Indonesian labels "Pemasukan" (income) and
/// "Pengeluaran" (expense) are accepted as input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Money that was earned or received.
    #[serde(alias = "income", alias = "Pemasukan", alias = "pemasukan")]
    Income,
    /// Money that was spent.
    #[serde(alias = "expense", alias = "Pengeluaran", alias = "pengeluaran")]
    Expense,
}

impl Category {
    /// The name used for the category in the database and in JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Income => "Income",
            Category::Expense => "Expense",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category label that is neither income nor expense.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("\"{0}\" is not a valid category, expected Income or Expense")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Income" | "income" | "Pemasukan" | "pemasukan" => Ok(Category::Income),
            "Expense" | "expense" | "Pengeluaran" | "pengeluaran" => Ok(Category::Expense),
            other => Err(UnknownCategory(other.to_owned())),
        }
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// Which categories of transactions to include in a listing or report.
///
/// A single tri-state value so that "income only" and "expense only" can
/// never be selected at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    /// Include both income and expenses.
    #[default]
    #[serde(rename = "all")]
    All,
    /// Include income only.
    #[serde(rename = "income", alias = "pemasukan")]
    IncomeOnly,
    /// Include expenses only.
    #[serde(rename = "expense", alias = "pengeluaran")]
    ExpenseOnly,
}

impl CategoryFilter {
    /// Whether a transaction in `category` passes the filter.
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::IncomeOnly => category == Category::Income,
            CategoryFilter::ExpenseOnly => category == Category::Expense,
        }
    }
}
