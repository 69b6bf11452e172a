//! Period reports over transactions.
//!
//! A [ReportRequest] picks a [ReportMode] and anchor dates. From these a
//! [DateWindow] of days is derived, and [aggregate] sums the transactions in
//! that window into one [BucketResult] per day (daily, weekly and monthly
//! reports) or per month (yearly reports). Empty days and months are kept as
//! zero buckets so that tables and charts always have a fixed shape.
//!
//! Aggregation is pure: it reads the transactions it is given and nothing
//! else, so it can run on any thread without locking.

mod aggregate;
mod chart;
mod endpoint;
mod error;
mod mode;
mod summary;
mod window;

pub use aggregate::{BucketKey, BucketResult, aggregate};
pub use chart::ProfitLossChart;
pub use endpoint::{get_daily_report_endpoint, get_report_endpoint};
pub use error::{InvalidWindow, ReportError};
pub use mode::ReportMode;
pub use summary::{DailyListing, Report, Totals, build_report, daily_listing};
pub use window::{DateWindow, ReportRequest};
