//! In-memory task collection for the current session.
//!
//! `TaskStore` is the authoritative copy of the list while the program runs.
//! It validates drafts, assigns ids and applies identity-based mutations;
//! it never touches the disk.

use std::collections::HashSet;

use thiserror::Error;
use todomaster_core::{
    CategoryFilter, Clock, SystemClock, Task, TaskDraft, TaskId, ValidationError, select,
};

/// Errors returned by store operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskError {
    /// The draft failed validation; nothing was changed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// No task has the given id.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Every id above the largest one in use has been handed out.
    #[error("no task ids left above {0}")]
    IdsExhausted(TaskId),
}

/// Ordered collection of tasks with identity-based mutation.
///
/// Tasks are kept in insertion order. Ids come from the clock (Unix seconds)
/// and are bumped past the last issued id when the clock has not moved on,
/// so they are strictly increasing and never handed out twice.
#[derive(Debug)]
pub struct TaskStore<C = SystemClock> {
    tasks: Vec<Task>,
    last_id: Option<i64>,
    clock: C,
}

impl TaskStore<SystemClock> {
    /// Creates an empty store on the system clock.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for TaskStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TaskStore<C> {
    /// Creates an empty store on the given clock.
    #[must_use]
    pub const fn with_clock(clock: C) -> Self {
        Self {
            tasks: Vec::new(),
            last_id: None,
            clock,
        }
    }

    /// Builds a store from previously saved tasks.
    ///
    /// New ids will be greater than every loaded id. Duplicate ids are kept
    /// (lookups find the first) but logged.
    #[must_use]
    pub fn from_tasks(tasks: Vec<Task>, clock: C) -> Self {
        let mut seen = HashSet::with_capacity(tasks.len());
        for task in &tasks {
            if !seen.insert(task.id) {
                tracing::warn!(task_id = %task.id, "duplicate task id in loaded data");
            }
        }

        let last_id = tasks.iter().map(|t| t.id.get()).max();
        Self {
            tasks,
            last_id,
            clock,
        }
    }

    /// Validates `draft` and appends a new open task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Validation`] if the draft is rejected, or
    /// [`TaskError::IdsExhausted`] when the largest id in use is `i64::MAX`;
    /// either way the store is left unchanged.
    pub fn add(&mut self, draft: &TaskDraft) -> Result<&Task, TaskError> {
        let fields = draft.validate()?;
        let id = self.allocate_id()?;
        let task = Task::new(id, fields, self.clock.now());
        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Replaces the text, category, priority and due date of a task.
    ///
    /// The draft is validated before the lookup, so an invalid draft never
    /// modifies anything. Completion state and timestamps are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Validation`] for a rejected draft, or
    /// [`TaskError::NotFound`] if no task has `id`.
    pub fn update(&mut self, id: TaskId, draft: &TaskDraft) -> Result<&Task, TaskError> {
        let fields = draft.validate()?;
        let idx = self.position(id)?;
        self.tasks[idx].apply(fields);
        Ok(&self.tasks[idx])
    }

    /// Flips completion of a task, stamping or clearing `completed_at`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::NotFound`] if no task has `id`.
    pub fn toggle(&mut self, id: TaskId) -> Result<&Task, TaskError> {
        let idx = self.position(id)?;
        let now = self.clock.now();
        self.tasks[idx].toggle(now);
        Ok(&self.tasks[idx])
    }

    /// Removes a task and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::NotFound`] if no task has `id`, including when
    /// it was already deleted.
    pub fn delete(&mut self, id: TaskId) -> Result<Task, TaskError> {
        let idx = self.position(id)?;
        Ok(self.tasks.remove(idx))
    }

    /// All tasks in insertion order.
    #[must_use]
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks passing `filter`, in display order.
    #[must_use]
    pub fn view(&self, filter: CategoryFilter) -> Vec<&Task> {
        select(&self.tasks, filter)
    }

    /// Number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if the store holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The clock this store stamps tasks with.
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    fn position(&self, id: TaskId) -> Result<usize, TaskError> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))
    }

    fn allocate_id(&mut self) -> Result<TaskId, TaskError> {
        let stamp = self.clock.now().timestamp();
        let id = match self.last_id {
            Some(last) if stamp <= last => last
                .checked_add(1)
                .ok_or(TaskError::IdsExhausted(TaskId::new(last)))?,
            _ => stamp,
        };
        self.last_id = Some(id);
        Ok(TaskId::new(id))
    }
}
