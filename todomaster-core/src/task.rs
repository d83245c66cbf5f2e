//! Task record and its closed enumerations.
//!
//! A [`Task`] is one to-do item. Its shape matches one object of the
//! persisted JSON array, so the same type is used in memory and on disk.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::draft::{TaskFields, ValidationError, parse_due_date};
use crate::timestamp;

/// Stable identity of a task within a store.
///
/// Ids are integers derived from the creation time (Unix seconds) and are
/// never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Wraps a raw integer id.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Fixed set of labels a task can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Personal errands and reminders.
    Personal,
    /// Work items.
    Work,
    /// Things to buy.
    Shopping,
    /// Health and fitness.
    Health,
    /// Learning and courses.
    Education,
}

impl Category {
    /// Every category, in sidebar order.
    pub const ALL: [Self; 5] = [
        Self::Personal,
        Self::Work,
        Self::Shopping,
        Self::Health,
        Self::Education,
    ];

    /// Label used in the UI and in the persisted file.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Personal => "Personal",
            Self::Work => "Work",
            Self::Shopping => "Shopping",
            Self::Health => "Health",
            Self::Education => "Education",
        }
    }

    /// The category after this one, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Personal => Self::Work,
            Self::Work => Self::Shopping,
            Self::Shopping => Self::Health,
            Self::Health => Self::Education,
            Self::Education => Self::Personal,
        }
    }

    /// The category before this one, wrapping around.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Personal => Self::Education,
            Self::Work => Self::Personal,
            Self::Shopping => Self::Work,
            Self::Health => Self::Shopping,
            Self::Education => Self::Health,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| ValidationError::UnknownCategory(s.to_string()))
    }
}

/// Urgency tier. The derived ordering is `High < Medium < Low`, which is the
/// order tasks are listed in when everything else is equal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Priority {
    /// Most urgent.
    High,
    /// Default for new tasks.
    #[default]
    Medium,
    /// Least urgent.
    Low,
}

impl Priority {
    /// Every priority, most urgent first.
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// Sort rank: High=0, Medium=1, Low=2.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    /// Label used in the UI and in the persisted file.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// The next priority in `High -> Medium -> Low -> High` order.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::High => Self::Medium,
            Self::Medium => Self::Low,
            Self::Low => Self::High,
        }
    }

    /// The previous priority, wrapping around.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::High => Self::Low,
            Self::Medium => Self::High,
            Self::Low => Self::Medium,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.label() == s)
            .ok_or_else(|| ValidationError::UnknownPriority(s.to_string()))
    }
}

/// Which tasks a list view shows: everything, or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    /// No filtering.
    #[default]
    All,
    /// Only tasks in the given category.
    Only(Category),
}

impl CategoryFilter {
    /// Sidebar entries: `All` first, then each category.
    pub const SIDEBAR: [Self; 6] = [
        Self::All,
        Self::Only(Category::Personal),
        Self::Only(Category::Work),
        Self::Only(Category::Shopping),
        Self::Only(Category::Health),
        Self::Only(Category::Education),
    ];

    /// Returns `true` if a task in `category` passes this filter.
    #[must_use]
    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(c) => c == category,
        }
    }

    /// Category preselected for a new task created under this filter.
    #[must_use]
    pub const fn preferred_category(self) -> Category {
        match self {
            Self::All => Category::Personal,
            Self::Only(c) => c,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(c) => f.write_str(c.label()),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "All" {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        Self::Only(category)
    }
}

/// One to-do item.
///
/// Field order follows the persisted object layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique, never reused identifier.
    pub id: TaskId,
    /// Trimmed, non-empty description.
    pub text: String,
    /// Whether the task has been checked off.
    pub completed: bool,
    /// Sidebar category.
    pub category: Category,
    /// Urgency tier.
    pub priority: Priority,
    /// Optional target date; `null` in the file when absent.
    #[serde(default, deserialize_with = "strict_due_date")]
    pub due_date: Option<NaiveDate>,
    /// When the task was created. Never changes.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// When the task was last checked off; cleared when unchecked.
    #[serde(default, with = "timestamp::option")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Builds a fresh, open task from validated fields.
    #[must_use]
    pub fn new(id: TaskId, fields: TaskFields, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text: fields.text,
            completed: false,
            category: fields.category,
            priority: fields.priority,
            due_date: fields.due_date,
            created_at,
            completed_at: None,
        }
    }

    /// Replaces the user-editable fields. Completion state and timestamps
    /// are left alone.
    pub fn apply(&mut self, fields: TaskFields) {
        self.text = fields.text;
        self.category = fields.category;
        self.priority = fields.priority;
        self.due_date = fields.due_date;
    }

    /// Flips completion, stamping `completed_at` on false->true and clearing
    /// it on true->false.
    pub fn toggle(&mut self, now: DateTime<Utc>) {
        self.completed = !self.completed;
        self.completed_at = self.completed.then_some(now);
    }
}

/// Reads a due date under the same `YYYY-MM-DD` rule the dialog enforces.
fn strict_due_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse_due_date(&raw).map_err(serde::de::Error::custom))
        .transpose()
}
