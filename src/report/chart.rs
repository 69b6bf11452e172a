//! The profit/loss series a client draws as a bar chart.

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use time::Month;

use crate::report::{BucketKey, BucketResult};

/// One label and two bar heights per bucket.
///
/// The net of each bucket is split into a profit and a loss series. Both are
/// non-negative and at most one of them is non-zero for any bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfitLossChart {
    /// "DD/MM/YYYY" for day buckets and "Jan" to "Dec" for month buckets.
    pub labels: Vec<String>,
    /// The net of each bucket, or zero if the net is negative.
    #[serde(serialize_with = "serialize_floats")]
    pub profit: Vec<Decimal>,
    /// The magnitude of each negative net, or zero.
    #[serde(serialize_with = "serialize_floats")]
    pub loss: Vec<Decimal>,
}

impl ProfitLossChart {
    /// Build the chart series for `buckets`, keeping their order.
    pub fn from_buckets(buckets: &[BucketResult]) -> Self {
        let labels = buckets
            .iter()
            .map(|bucket| chart_label(bucket.bucket_key))
            .collect();
        let profit = buckets
            .iter()
            .map(|bucket| bucket.net.max(Decimal::ZERO))
            .collect();
        let loss = buckets
            .iter()
            .map(|bucket| (-bucket.net).max(Decimal::ZERO))
            .collect();

        Self {
            labels,
            profit,
            loss,
        }
    }
}

fn chart_label(bucket_key: BucketKey) -> String {
    match bucket_key {
        BucketKey::Day(date) => format!(
            "{:02}/{:02}/{}",
            date.day(),
            u8::from(date.month()),
            date.year()
        ),
        BucketKey::Month { month, .. } => month_abbrev(month).to_owned(),
    }
}

fn month_abbrev(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

fn serialize_floats<S>(values: &[Decimal], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    struct Float<'a>(&'a Decimal);

    impl Serialize for Float<'_> {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            rust_decimal::serde::float::serialize(self.0, serializer)
        }
    }

    serializer.collect_seq(values.iter().map(Float))
}
