//! Deriving the date window a report covers from its anchor dates.

use serde::Serialize;
use time::{Date, Duration, Month};

use crate::{
    report::{InvalidWindow, ReportError, ReportMode},
    transaction::CategoryFilter,
};

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    /// The first day in the window.
    pub start: Date,
    /// The last day in the window.
    pub end: Date,
}

impl DateWindow {
    /// Whether `date` falls on or between the first and last day.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every day in the window in ascending order.
    pub fn days(self) -> impl Iterator<Item = Date> {
        std::iter::successors(Some(self.start), |date| date.next_day())
            .take_while(move |date| *date <= self.end)
    }
}

/// The parameters of a single report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    /// How long the report is and how it is bucketed.
    pub mode: ReportMode,
    /// The date the window is derived from.
    pub anchor_start: Option<Date>,
    /// The end of the range picked by the user, only checked for weekly reports.
    pub anchor_end: Option<Date>,
    /// Which categories of transactions are counted.
    pub category_filter: CategoryFilter,
}

impl ReportRequest {
    /// Check the anchor dates and derive the window of days the report covers.
    ///
    /// Weekly reports cover the Sunday to Saturday week containing
    /// `anchor_start`. `anchor_end` must still be given and must not come
    /// before `anchor_start`, but it does not move the window.
    ///
    /// # Errors
    /// Returns [ReportError::InvalidWindow] if a required anchor is missing or
    /// the anchors are in the wrong order.
    pub fn window(&self) -> Result<DateWindow, ReportError> {
        let start = self.anchor_start.ok_or(InvalidWindow::MissingStart)?;

        let window = match self.mode {
            ReportMode::Daily => DateWindow { start, end: start },
            ReportMode::Weekly => {
                let end = self.anchor_end.ok_or(InvalidWindow::MissingEnd)?;

                if start > end {
                    return Err(InvalidWindow::Inverted { start, end }.into());
                }

                week_bounds(start)
            }
            ReportMode::Monthly => month_bounds(start),
            ReportMode::Yearly => year_bounds(start),
        };

        Ok(window)
    }
}

fn week_bounds(anchor_date: Date) -> DateWindow {
    let days_since_sunday = anchor_date.weekday().number_days_from_sunday() as i64;
    let start = anchor_date.saturating_sub(Duration::days(days_since_sunday));
    let end = start.saturating_add(Duration::days(6));

    DateWindow { start, end }
}

fn month_bounds(anchor_date: Date) -> DateWindow {
    let start = anchor_date - Duration::days(anchor_date.day() as i64 - 1);
    let length = last_day_of_month(anchor_date.year(), anchor_date.month());
    let end = start + Duration::days(length as i64 - 1);

    DateWindow { start, end }
}

fn year_bounds(anchor_date: Date) -> DateWindow {
    let start = anchor_date - Duration::days(anchor_date.ordinal() as i64 - 1);
    let length = if is_leap_year(anchor_date.year()) {
        366
    } else {
        365
    };
    let end = start + Duration::days(length - 1);

    DateWindow { start, end }
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
