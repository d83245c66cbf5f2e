//! Task model and list policy for `TodoMaster`.
//!
//! Everything here is pure: no I/O, no global state. The application crate
//! owns storage and presentation.

pub mod clock;
pub mod draft;
pub mod due;
pub mod select;
pub mod task;
pub mod timestamp;

pub use clock::{Clock, FixedClock, SystemClock};
pub use draft::{TaskDraft, TaskFields, ValidationError, parse_due_date};
pub use due::DueStatus;
pub use select::{open_counts, select, sort_key};
pub use task::{Category, CategoryFilter, Priority, Task, TaskId};
