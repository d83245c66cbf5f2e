//! Due-date labels shown on task cards.

use std::fmt;

use chrono::NaiveDate;

/// How a due date relates to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    /// Past due by this many days (at least 1).
    Overdue(i64),
    /// Due today.
    Today,
    /// Due in this many days (at least 1).
    Upcoming(i64),
}

impl DueStatus {
    /// Classifies `due` relative to `today`.
    #[must_use]
    pub fn from_dates(due: NaiveDate, today: NaiveDate) -> Self {
        let days = (due - today).num_days();
        match days {
            d if d < 0 => Self::Overdue(-d),
            0 => Self::Today,
            d => Self::Upcoming(d),
        }
    }
}

impl fmt::Display for DueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = |n: i64| if n == 1 { "day" } else { "days" };
        match *self {
            Self::Overdue(n) => write!(f, "Overdue by {n} {}", plural(n)),
            Self::Today => f.write_str("Due Today"),
            Self::Upcoming(n) => write!(f, "Due in {n} {}", plural(n)),
        }
    }
}
