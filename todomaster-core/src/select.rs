//! List policy: which tasks a view shows and in what order.
//!
//! Open tasks come before completed ones, sooner due dates before later
//! ones (undated tasks last), and higher priority before lower. The sort is
//! stable, so tasks with identical keys keep their insertion order.

use chrono::NaiveDate;

use crate::task::{CategoryFilter, Task};

/// Stand-in due date for undated tasks.
pub const FAR_FUTURE: NaiveDate = match NaiveDate::from_ymd_opt(9999, 12, 31) {
    Some(d) => d,
    None => NaiveDate::MAX,
};

/// Composite sort key of a task: `(completed, due date, priority rank)`.
#[must_use]
pub fn sort_key(task: &Task) -> (bool, NaiveDate, u8) {
    (
        task.completed,
        task.due_date.unwrap_or(FAR_FUTURE),
        task.priority.rank(),
    )
}

/// Filters `records` by `filter` and returns them in display order.
///
/// The input is left untouched; the result borrows from it.
#[must_use]
pub fn select(records: &[Task], filter: CategoryFilter) -> Vec<&Task> {
    let mut view: Vec<&Task> = records
        .iter()
        .filter(|t| filter.matches(t.category))
        .collect();
    view.sort_by_key(|t| sort_key(t));
    view
}

/// Number of open tasks behind each sidebar entry, in sidebar order.
#[must_use]
pub fn open_counts(records: &[Task]) -> Vec<(CategoryFilter, usize)> {
    CategoryFilter::SIDEBAR
        .into_iter()
        .map(|filter| {
            let open = records
                .iter()
                .filter(|t| !t.completed && filter.matches(t.category))
                .count();
            (filter, open)
        })
        .collect()
}
