use time::Date;

/// The ways a report request can be rejected.
///
/// Both are caller errors: the request has to be corrected and sent again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    /// The report mode is not one of daily, weekly, monthly or yearly.
    #[error("\"{0}\" is not a report mode, expected Daily, Weekly, Monthly or Yearly")]
    InvalidMode(String),

    /// The anchor dates do not describe a valid window.
    #[error(transparent)]
    InvalidWindow(#[from] InvalidWindow),
}

/// What is wrong with the anchor dates of a report request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidWindow {
    /// No start date was given.
    #[error("a start date is required")]
    MissingStart,

    /// A weekly report was requested without an end date.
    #[error("an end date is required for weekly reports")]
    MissingEnd,

    /// The start date is after the end date.
    #[error("the start date {start} is after the end date {end}")]
    Inverted {
        /// The requested start date.
        start: Date,
        /// The requested end date.
        end: Date,
    },
}
