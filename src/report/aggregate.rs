//! Bucketing transactions into the days or months of a report window.

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use time::{Date, Month};

use crate::{
    report::{DateWindow, ReportError, ReportMode, ReportRequest},
    transaction::{Amount, Category, Transaction},
};

/// The time unit a bucket covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketKey {
    /// A calendar day, used by daily, weekly and monthly reports.
    Day(Date),
    /// A calendar month, used by yearly reports.
    Month {
        /// The year the month belongs to.
        year: i32,
        /// The month of the year.
        month: Month,
    },
}

/// Days serialize as "2024-03-05" and months as their English name.
impl Serialize for BucketKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            BucketKey::Day(date) => serializer.collect_str(date),
            BucketKey::Month { month, .. } => serializer.collect_str(month),
        }
    }
}

/// The income and expense totals for one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketResult {
    /// The day or month the totals are for.
    pub bucket_key: BucketKey,
    /// The sum of the income in the bucket.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
    /// The sum of the expenses in the bucket.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_expense: Decimal,
    /// Income minus expenses.
    #[serde(with = "rust_decimal::serde::float")]
    pub net: Decimal,
}

impl BucketResult {
    /// A bucket with nothing in it.
    pub fn empty(bucket_key: BucketKey) -> Self {
        Self {
            bucket_key,
            total_income: Decimal::ZERO,
            total_expense: Decimal::ZERO,
            net: Decimal::ZERO,
        }
    }

    /// Add `amount` to the side of the bucket given by `category`.
    pub fn add(&mut self, category: Category, amount: Amount) {
        match category {
            Category::Income => self.total_income += amount.value(),
            Category::Expense => self.total_expense += amount.value(),
        }

        self.net = self.total_income - self.total_expense;
    }
}

/// Sum `transactions` into one bucket per day or month of the requested window.
///
/// Every unit of the window gets a bucket, in ascending order, whether or not
/// any transaction falls in it. Transactions outside the window or excluded
/// by the category filter are skipped. The time of day is ignored.
///
/// # Errors
/// Returns [ReportError::InvalidWindow] if the anchor dates are missing or
/// inverted, see [ReportRequest::window].
pub fn aggregate(
    transactions: &[Transaction],
    request: &ReportRequest,
) -> Result<Vec<BucketResult>, ReportError> {
    let window = request.window()?;
    let mut buckets = empty_buckets(request.mode, window);

    for transaction in transactions {
        let date = transaction.date.date();

        if !window.contains(date) || !request.category_filter.matches(transaction.category) {
            continue;
        }

        let index = match request.mode {
            ReportMode::Daily | ReportMode::Weekly | ReportMode::Monthly => {
                (date - window.start).whole_days() as usize
            }
            ReportMode::Yearly => u8::from(date.month()) as usize - 1,
        };

        buckets[index].add(transaction.category, transaction.amount);
    }

    Ok(buckets)
}

fn empty_buckets(mode: ReportMode, window: DateWindow) -> Vec<BucketResult> {
    match mode {
        ReportMode::Daily | ReportMode::Weekly | ReportMode::Monthly => window
            .days()
            .map(|date| BucketResult::empty(BucketKey::Day(date)))
            .collect(),
        ReportMode::Yearly => {
            let year = window.start.year();

            std::iter::successors(Some(Month::January), |month| {
                (*month != Month::December).then(|| month.next())
            })
            .map(|month| BucketResult::empty(BucketKey::Month { year, month }))
            .collect()
        }
    }
}
