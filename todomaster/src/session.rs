//! Control flow between the UI, the task store and persistence.
//!
//! Every mutating call runs validate -> mutate -> save. The in-memory store
//! is authoritative: if a save fails the change is kept, the session is
//! marked dirty and a [`Notice`] is queued for the status bar. A later
//! successful save (any mutation, or [`Session::retry_save`]) clears it.

use std::collections::VecDeque;
use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;
use todomaster_core::{CategoryFilter, Clock, SystemClock, Task, TaskDraft, TaskId, open_counts};

use crate::storage::{StorageError, TaskPersistence};
use crate::store::{TaskError, TaskStore};

/// Maximum number of notices kept for the status bar.
const MAX_NOTICES: usize = 8;

/// User-facing messages produced by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A change was kept in memory but could not be written.
    SaveFailed {
        /// Description of the error.
        reason: String,
    },
    /// Pending changes were written after an earlier failure.
    Saved,
    /// The data file could not be read; the session started empty.
    LoadFailed {
        /// Description of the error.
        reason: String,
    },
    /// The data file was unreadable and has been moved aside.
    Quarantined {
        /// Where the old file now lives.
        path: PathBuf,
    },
}

impl Notice {
    /// Returns `true` for notices that report a problem.
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        !matches!(self, Self::Saved)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SaveFailed { reason } => {
                write!(f, "Could not save tasks ({reason}); press s to retry")
            }
            Self::Saved => f.write_str("Tasks saved"),
            Self::LoadFailed { reason } => {
                write!(f, "Could not load tasks ({reason}); starting empty")
            }
            Self::Quarantined { path } => write!(
                f,
                "Data file was unreadable; moved to {}",
                path.display()
            ),
        }
    }
}

/// One running session of the to-do list.
#[derive(Debug)]
pub struct Session<P, C = SystemClock> {
    store: TaskStore<C>,
    persistence: P,
    filter: CategoryFilter,
    dirty: bool,
    notices: VecDeque<Notice>,
}

impl<P: TaskPersistence, C: Clock> Session<P, C> {
    /// Loads the saved list and starts a session on it.
    ///
    /// Never fails: an unreadable file leaves the session empty with a
    /// [`Notice`] explaining why.
    pub fn open(persistence: P, clock: C) -> Self {
        let mut notices = VecDeque::new();
        let tasks = match persistence.load() {
            Ok(loaded) => {
                if let Some(path) = loaded.quarantined {
                    notices.push_back(Notice::Quarantined { path });
                }
                loaded.tasks
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load tasks, starting empty");
                notices.push_back(Notice::LoadFailed {
                    reason: err.to_string(),
                });
                Vec::new()
            }
        };

        Self {
            store: TaskStore::from_tasks(tasks, clock),
            persistence,
            filter: CategoryFilter::All,
            dirty: false,
            notices,
        }
    }

    /// Sets the initial category filter.
    #[must_use]
    pub fn with_filter(mut self, filter: CategoryFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Adds a task from `draft` and saves.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Validation`] if the draft is rejected, or
    /// [`TaskError::IdsExhausted`] if no id is left. Save failures are not
    /// errors; see the module docs.
    pub fn add(&mut self, draft: &TaskDraft) -> Result<TaskId, TaskError> {
        let id = self.store.add(draft)?.id;
        tracing::info!(task_id = %id, "task added");
        self.persist();
        Ok(id)
    }

    /// Replaces the editable fields of task `id` and saves.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Validation`] for a rejected draft or
    /// [`TaskError::NotFound`] for an unknown id.
    pub fn edit(&mut self, id: TaskId, draft: &TaskDraft) -> Result<(), TaskError> {
        self.store.update(id, draft).map_err(not_found_is_quiet)?;
        tracing::info!(task_id = %id, "task updated");
        self.persist();
        Ok(())
    }

    /// Flips completion of task `id` and saves. Returns the new state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::NotFound`] for an unknown id.
    pub fn toggle(&mut self, id: TaskId) -> Result<bool, TaskError> {
        let completed = self.store.toggle(id).map_err(not_found_is_quiet)?.completed;
        tracing::info!(task_id = %id, completed, "task toggled");
        self.persist();
        Ok(completed)
    }

    /// Removes task `id` and saves.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::NotFound`] for an unknown id.
    pub fn delete(&mut self, id: TaskId) -> Result<Task, TaskError> {
        let removed = self.store.delete(id).map_err(not_found_is_quiet)?;
        tracing::info!(task_id = %id, "task deleted");
        self.persist();
        Ok(removed)
    }

    /// Writes the current list again. Returns `true` on success.
    pub fn retry_save(&mut self) -> bool {
        self.persist();
        !self.dirty
    }

    /// Current category filter.
    #[must_use]
    pub const fn filter(&self) -> CategoryFilter {
        self.filter
    }

    /// Changes the category filter.
    pub fn set_filter(&mut self, filter: CategoryFilter) {
        if filter != self.filter {
            tracing::debug!(%filter, "filter changed");
            self.filter = filter;
        }
    }

    /// Tasks to display under the current filter, in display order.
    #[must_use]
    pub fn visible(&self) -> Vec<&Task> {
        self.store.view(self.filter)
    }

    /// Open-task count per sidebar entry.
    #[must_use]
    pub fn counts(&self) -> Vec<(CategoryFilter, usize)> {
        open_counts(self.store.all())
    }

    /// Total and completed task counts.
    #[must_use]
    pub fn totals(&self) -> (usize, usize) {
        let done = self.store.all().iter().filter(|t| t.completed).count();
        (self.store.len(), done)
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.store.get(id)
    }

    /// The underlying task store.
    #[must_use]
    pub const fn store(&self) -> &TaskStore<C> {
        &self.store
    }

    /// The persistence backend.
    #[must_use]
    pub const fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Today's date according to the session clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.store.clock().today()
    }

    /// Returns `true` if the latest change has not been written.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Most recent notice, if any.
    #[must_use]
    pub fn latest_notice(&self) -> Option<&Notice> {
        self.notices.back()
    }

    /// Removes and returns all queued notices, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    fn persist(&mut self) {
        match self.persistence.save(self.store.all()) {
            Ok(()) => {
                if self.dirty {
                    tracing::info!(count = self.store.len(), "pending changes saved");
                    self.push_notice(Notice::Saved);
                }
                self.dirty = false;
            }
            Err(err) => self.save_failed(&err),
        }
    }

    fn save_failed(&mut self, err: &StorageError) {
        tracing::warn!(error = %err, "save failed, keeping changes in memory");
        self.dirty = true;
        self.push_notice(Notice::SaveFailed {
            reason: err.to_string(),
        });
    }

    fn push_notice(&mut self, notice: Notice) {
        if self.notices.len() == MAX_NOTICES {
            self.notices.pop_front();
        }
        self.notices.push_back(notice);
    }
}

fn not_found_is_quiet(err: TaskError) -> TaskError {
    if let TaskError::NotFound(id) = &err {
        tracing::debug!(task_id = %id, "task no longer exists, ignoring");
    }
    err
}
