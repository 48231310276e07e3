use std::fmt;

/// Which filter a validation error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Date,
    Revenue,
    NetIncome,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKind::Date => write!(f, "date"),
            FilterKind::Revenue => write!(f, "revenue"),
            FilterKind::NetIncome => write!(f, "net income"),
        }
    }
}

/// User-input errors raised by the filter pipeline.
///
/// These are shown to the user as a blocking notice; the working dataset is
/// never modified when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("Please enter at least one bound for the {filter} filter.")]
    NoBounds { filter: FilterKind },

    #[error("Invalid {bound} date '{value}'. Please enter a date as YYYY-MM-DD.")]
    InvalidDate { bound: &'static str, value: String },
}
