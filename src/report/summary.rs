//! Whole reports and the daily transaction listing built on top of [aggregate].

use std::cmp::Reverse;

use rust_decimal::Decimal;
use serde::Serialize;
use time::Date;

use crate::{
    report::{
        BucketKey, BucketResult, DateWindow, ProfitLossChart, ReportError, ReportMode,
        ReportRequest, aggregate,
    },
    transaction::{CategoryFilter, Transaction},
};

/// Income, expense and net summed over a whole window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    /// The sum of the income.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
    /// The sum of the expenses.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_expense: Decimal,
    /// Income minus expenses.
    #[serde(with = "rust_decimal::serde::float")]
    pub net: Decimal,
}

impl Totals {
    /// Sum the totals of `buckets`.
    pub fn from_buckets(buckets: &[BucketResult]) -> Self {
        let total_income = buckets.iter().map(|bucket| bucket.total_income).sum();
        let total_expense = buckets.iter().map(|bucket| bucket.total_expense).sum();

        Self {
            total_income,
            total_expense,
            net: total_income - total_expense,
        }
    }
}

/// Everything a client needs to draw the table and chart for one report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// The mode the report was built for.
    pub mode: ReportMode,
    /// The days the report covers.
    pub window: DateWindow,
    /// One bucket per day or month of the window.
    pub buckets: Vec<BucketResult>,
    /// The sums over the whole window.
    pub totals: Totals,
    /// The profit/loss bar chart series.
    pub chart: ProfitLossChart,
}

/// Aggregate `transactions` and add the window totals and chart series.
///
/// # Errors
/// Returns [ReportError::InvalidWindow] if the anchor dates are invalid.
pub fn build_report(
    transactions: &[Transaction],
    request: &ReportRequest,
) -> Result<Report, ReportError> {
    let window = request.window()?;
    let buckets = aggregate(transactions, request)?;
    let totals = Totals::from_buckets(&buckets);
    let chart = ProfitLossChart::from_buckets(&buckets);

    Ok(Report {
        mode: request.mode,
        window,
        buckets,
        totals,
        chart,
    })
}

/// The transactions on a single day together with their totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyListing {
    /// The day being listed.
    pub date: Date,
    /// The matching transactions, newest first.
    pub transactions: Vec<Transaction>,
    /// The sums over the listed transactions.
    pub totals: BucketResult,
}

/// List the transactions on `date` that pass `filter`, newest first.
pub fn daily_listing(
    transactions: &[Transaction],
    date: Date,
    filter: CategoryFilter,
) -> DailyListing {
    let mut totals = BucketResult::empty(BucketKey::Day(date));
    let mut listed: Vec<Transaction> = transactions
        .iter()
        .filter(|transaction| {
            transaction.date.date() == date && filter.matches(transaction.category)
        })
        .cloned()
        .collect();

    listed.sort_by_key(|transaction| Reverse((transaction.date, transaction.id)));

    for transaction in &listed {
        totals.add(transaction.category, transaction.amount);
    }

    DailyListing {
        date,
        transactions: listed,
        totals,
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use time::{
        PrimitiveDateTime,
        macros::{date, datetime},
    };

    use crate::{
        report::{
            BucketKey, InvalidWindow, ReportError, ReportMode, ReportRequest, build_report,
            daily_listing,
        },
        transaction::{Amount, Category, CategoryFilter, Transaction},
    };

    fn transaction(
        id: i64,
        amount: Decimal,
        category: Category,
        date: PrimitiveDateTime,
    ) -> Transaction {
        Transaction {
            id,
            description: format!("transaction {id}"),
            amount: Amount::new(amount).unwrap(),
            category,
            date,
        }
    }

    #[test]
    fn report_totals_match_buckets() {
        let transactions = [
            transaction(1, dec!(500), Category::Income, datetime!(2024-06-03 09:00:00)),
            transaction(2, dec!(120), Category::Expense, datetime!(2024-06-05 12:00:00)),
            transaction(3, dec!(450), Category::Expense, datetime!(2024-06-09 18:00:00)),
            transaction(4, dec!(999), Category::Income, datetime!(2024-06-10 08:00:00)),
        ];
        let request = ReportRequest {
            mode: ReportMode::Weekly,
            anchor_start: Some(date!(2024 - 06 - 05)),
            anchor_end: Some(date!(2024 - 06 - 06)),
            category_filter: CategoryFilter::All,
        };

        let report = build_report(&transactions, &request).unwrap();

        assert_eq!(report.mode, ReportMode::Weekly);
        assert_eq!(report.window.start, date!(2024 - 06 - 03));
        assert_eq!(report.window.end, date!(2024 - 06 - 09));
        assert_eq!(report.buckets.len(), 7);
        assert_eq!(report.totals.total_income, dec!(500));
        assert_eq!(report.totals.total_expense, dec!(570));
        assert_eq!(report.totals.net, dec!(-70));
        assert_eq!(report.chart.labels.len(), 7);
        assert_eq!(report.chart.profit[0], dec!(500));
        assert_eq!(report.chart.loss[6], dec!(450));
    }

    #[test]
    fn report_rejects_invalid_window() {
        let request = ReportRequest {
            mode: ReportMode::Weekly,
            anchor_start: Some(date!(2024 - 06 - 05)),
            anchor_end: None,
            category_filter: CategoryFilter::All,
        };

        assert_eq!(
            build_report(&[], &request),
            Err(ReportError::InvalidWindow(InvalidWindow::MissingEnd))
        );
    }

    #[test]
    fn daily_listing_is_newest_first_with_totals() {
        let breakfast = transaction(
            1,
            dec!(15000),
            Category::Expense,
            datetime!(2024-03-05 07:30:00),
        );
        let salary = transaction(
            2,
            dec!(5000000),
            Category::Income,
            datetime!(2024-03-05 09:00:00),
        );
        let dinner = transaction(3, dec!(45000), Category::Expense, datetime!(2024-03-05 19:15:00));
        let yesterday = transaction(4, dec!(10), Category::Expense, datetime!(2024-03-04 19:15:00));
        let transactions = [
            breakfast.clone(),
            dinner.clone(),
            yesterday,
            salary.clone(),
        ];

        let listing = daily_listing(&transactions, date!(2024 - 03 - 05), CategoryFilter::All);

        assert_eq!(listing.transactions, vec![dinner, salary, breakfast]);
        assert_eq!(listing.totals.bucket_key, BucketKey::Day(date!(2024 - 03 - 05)));
        assert_eq!(listing.totals.total_income, dec!(5000000));
        assert_eq!(listing.totals.total_expense, dec!(60000));
        assert_eq!(listing.totals.net, dec!(4940000));
    }

    #[test]
    fn daily_listing_filters_by_category() {
        let transactions = [
            transaction(1, dec!(100), Category::Income, datetime!(2024-03-05 09:00:00)),
            transaction(2, dec!(40), Category::Expense, datetime!(2024-03-05 18:00:00)),
        ];

        let listing =
            daily_listing(&transactions, date!(2024 - 03 - 05), CategoryFilter::ExpenseOnly);

        assert_eq!(listing.transactions.len(), 1);
        assert_eq!(listing.transactions[0].category, Category::Expense);
        assert_eq!(listing.totals.total_income, Decimal::ZERO);
        assert_eq!(listing.totals.net, dec!(-40));
    }

    #[test]
    fn daily_listing_orders_same_time_by_newest_id() {
        let date_time = datetime!(2024-03-05 12:00:00);
        let first = transaction(1, dec!(1), Category::Income, date_time);
        let second = transaction(2, dec!(2), Category::Income, date_time);

        let listing = daily_listing(
            &[first.clone(), second.clone()],
            date!(2024 - 03 - 05),
            CategoryFilter::All,
        );

        assert_eq!(listing.transactions, vec![second, first]);
    }
}
