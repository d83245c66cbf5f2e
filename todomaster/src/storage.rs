//! Persistence of the full task list.
//!
//! Defines the [`TaskPersistence`] trait, the JSON file implementation used
//! by the application, and an in-memory implementation for tests.
//!
//! The whole collection is the unit of persistence: every save rewrites the
//! file, every load reads all of it.
//!
//! # Load policy
//!
//! - Missing file: first run, empty list.
//! - Unparseable content: the file is renamed aside
//!   (`<file>.corrupt-<timestamp>`) so nothing is lost, and the list starts
//!   empty. The caller learns the new path through [`Loaded::quarantined`].
//! - Any other read failure is returned as [`StorageError::Read`].

use std::cell::{Cell, RefCell};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use todomaster_core::Task;

/// Errors that can occur while reading or writing the task list.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The data file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The data file could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// File that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The task list could not be encoded as JSON.
    #[error("failed to encode tasks: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result of a successful load.
#[derive(Debug, Default)]
pub struct Loaded {
    /// Tasks in saved order.
    pub tasks: Vec<Task>,
    /// Where an unreadable data file was moved, if that happened.
    pub quarantined: Option<PathBuf>,
}

impl Loaded {
    fn empty() -> Self {
        Self::default()
    }
}

/// Loads and saves the complete task list.
pub trait TaskPersistence {
    /// Reads the saved list.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] for I/O failures other than a missing
    /// file. Malformed content is not an error (see the module docs).
    fn load(&self) -> Result<Loaded, StorageError>;

    /// Replaces the saved list with `tasks`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the list cannot be encoded or written.
    fn save(&self, tasks: &[Task]) -> Result<(), StorageError>;
}

/// Task list stored as a pretty-printed JSON array in one file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by `path`. Nothing is touched until the first
    /// load or save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Moves the current data file out of the way. Returns the new path, or
    /// `None` if the rename failed.
    fn quarantine(&self) -> Option<PathBuf> {
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let target = with_suffix(&self.path, &format!(".corrupt-{stamp}"));
        match fs::rename(&self.path, &target) {
            Ok(()) => {
                tracing::warn!(
                    path = %self.path.display(),
                    moved_to = %target.display(),
                    "unreadable data file moved aside"
                );
                Some(target)
            }
            Err(e) => {
                tracing::error!(
                    path = %self.path.display(),
                    error = %e,
                    "could not move unreadable data file aside"
                );
                None
            }
        }
    }
}

impl TaskPersistence for JsonFileStore {
    fn load(&self) -> Result<Loaded, StorageError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no data file yet");
                return Ok(Loaded::empty());
            }
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Loaded::empty());
        }

        match serde_json::from_slice::<Vec<Task>>(&bytes) {
            Ok(tasks) => {
                tracing::info!(path = %self.path.display(), count = tasks.len(), "tasks loaded");
                Ok(Loaded {
                    tasks,
                    quarantined: None,
                })
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "data file is not a valid task list, starting empty"
                );
                Ok(Loaded {
                    tasks: Vec::new(),
                    quarantined: self.quarantine(),
                })
            }
        }
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StorageError> {
        let bytes = encode(tasks)?;
        let write_err = |source| StorageError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        write_atomic(&self.path, &bytes).map_err(write_err)?;
        tracing::debug!(path = %self.path.display(), count = tasks.len(), "tasks saved");
        Ok(())
    }
}

/// Serializes tasks as a JSON array indented with four spaces.
///
/// # Errors
///
/// Returns the encoder error.
pub fn encode(tasks: &[Task]) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    tasks.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Writes `bytes` to a sibling temp file, then renames it over `path`.
fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp = with_suffix(path, ".tmp");
    fs::write(&tmp, bytes)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}

/// `path` with `suffix` appended to its final component.
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Keeps the list in memory. Used in tests and as a stand-in when no data
/// file should be written.
#[derive(Debug, Default)]
pub struct InMemoryPersistence {
    tasks: RefCell<Vec<Task>>,
    saves: Cell<usize>,
    should_fail: Cell<bool>,
}

impl InMemoryPersistence {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `tasks`.
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: RefCell::new(tasks),
            ..Self::default()
        }
    }

    /// Makes subsequent saves fail (or succeed again).
    pub fn set_failing(&self, fail: bool) {
        self.should_fail.set(fail);
    }

    /// Snapshot of the last saved list.
    #[must_use]
    pub fn saved(&self) -> Vec<Task> {
        self.tasks.borrow().clone()
    }

    /// Number of successful saves.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl TaskPersistence for InMemoryPersistence {
    fn load(&self) -> Result<Loaded, StorageError> {
        Ok(Loaded {
            tasks: self.saved(),
            quarantined: None,
        })
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StorageError> {
        if self.should_fail.get() {
            return Err(StorageError::Write {
                path: PathBuf::from("<memory>"),
                source: io::Error::other("simulated write failure"),
            });
        }
        *self.tasks.borrow_mut() = tasks.to_vec();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
