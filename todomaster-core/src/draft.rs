//! User input for creating or editing a task, and its validation.

use chrono::NaiveDate;
use thiserror::Error;

use crate::task::{Category, Priority, Task};

/// Reasons a draft is rejected before it reaches the store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Description is empty once surrounding whitespace is removed.
    #[error("task description cannot be empty")]
    EmptyDescription,
    /// Due date is not a real calendar date in `YYYY-MM-DD` form.
    #[error("invalid date {0:?}, use YYYY-MM-DD")]
    BadDate(String),
    /// Category label outside the fixed set.
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    /// Priority label other than High, Medium or Low.
    #[error("unknown priority: {0}")]
    UnknownPriority(String),
}

/// Raw values as entered in the add/edit dialog.
///
/// `due_date` is free text; an empty (or whitespace-only) string means the
/// task has no due date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Task description, untrimmed.
    pub text: String,
    /// Selected category.
    pub category: Category,
    /// Selected priority.
    pub priority: Priority,
    /// Due date text, possibly empty.
    pub due_date: String,
}

impl TaskDraft {
    /// Creates a draft with the given text and no due date.
    #[must_use]
    pub fn new(text: impl Into<String>, category: Category, priority: Priority) -> Self {
        Self {
            text: text.into(),
            category,
            priority,
            due_date: String::new(),
        }
    }

    /// Sets the due date text.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = due_date.into();
        self
    }

    /// Pre-fills a draft from an existing task, for editing.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            text: task.text.clone(),
            category: task.category,
            priority: task.priority,
            due_date: task
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }

    /// Checks the draft and produces the fields a task is built from.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyDescription`] if the text is blank,
    /// or [`ValidationError::BadDate`] if a due date was given but is not a
    /// valid `YYYY-MM-DD` calendar date.
    pub fn validate(&self) -> Result<TaskFields, ValidationError> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }

        let due = self.due_date.trim();
        let due_date = if due.is_empty() {
            None
        } else {
            Some(parse_due_date(due)?)
        };

        Ok(TaskFields {
            text: text.to_string(),
            category: self.category,
            priority: self.priority,
            due_date,
        })
    }
}

/// Validated user-editable fields of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    /// Trimmed, non-empty description.
    pub text: String,
    /// Category.
    pub category: Category,
    /// Priority.
    pub priority: Priority,
    /// Parsed due date.
    pub due_date: Option<NaiveDate>,
}

/// Parses a strict `YYYY-MM-DD` date.
///
/// Exactly four year digits, two month digits and two day digits separated
/// by dashes; the result must exist on the calendar (`2025-02-30` fails).
///
/// # Errors
///
/// Returns [`ValidationError::BadDate`] carrying the rejected input.
pub fn parse_due_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let bad = || ValidationError::BadDate(raw.to_string());

    let bytes = raw.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return Err(bad());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| bad())
}
