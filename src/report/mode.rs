use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::report::ReportError;

/// The length of time a report covers and how it is divided into buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ReportMode {
    /// A single day in one bucket.
    #[default]
    Daily,
    /// The Sunday to Saturday week with one bucket per day.
    Weekly,
    /// A calendar month with one bucket per day.
    Monthly,
    /// A calendar year with one bucket per month.
    Yearly,
}

impl ReportMode {
    /// The name used for the mode in the database and in JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            ReportMode::Daily => "Daily",
            ReportMode::Weekly => "Weekly",
            ReportMode::Monthly => "Monthly",
            ReportMode::Yearly => "Yearly",
        }
    }
}

impl Display for ReportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportMode {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(ReportMode::Daily),
            "weekly" => Ok(ReportMode::Weekly),
            "monthly" => Ok(ReportMode::Monthly),
            "yearly" => Ok(ReportMode::Yearly),
            _ => Err(ReportError::InvalidMode(s.to_owned())),
        }
    }
}

impl<'de> Deserialize<'de> for ReportMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl ToSql for ReportMode {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ReportMode {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}
