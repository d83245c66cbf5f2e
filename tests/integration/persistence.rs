//! Integration tests for the JSON persistence gateway.
//!
//! Every test works in its own temporary directory.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::fs;
use std::path::Path;

use chrono::{NaiveDate, TimeZone, Utc};
use todomaster::storage::{JsonFileStore, StorageError, TaskPersistence};
use todomaster_core::{Category, Priority, Task, TaskId};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn sample_tasks() -> Vec<Task> {
    vec![
        Task {
            id: TaskId::new(1_735_725_600),
            text: "Buy groceries".to_string(),
            completed: false,
            category: Category::Shopping,
            priority: Priority::High,
            due_date: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap(),
            completed_at: None,
        },
        Task {
            id: TaskId::new(1_735_725_601),
            text: "Send invoice".to_string(),
            completed: true,
            category: Category::Work,
            priority: Priority::Medium,
            due_date: NaiveDate::from_ymd_opt(2025, 1, 3),
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 1).unwrap(),
            completed_at: Some(
                Utc.with_ymd_and_hms(2025, 1, 2, 9, 30, 0).unwrap()
                    + chrono::Duration::microseconds(250_000),
            ),
        },
    ]
}

fn files_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// ---------------------------------------------------------------------------
// Save / load
// ---------------------------------------------------------------------------

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("todo_data.json"));
    let tasks = sample_tasks();

    store.save(&tasks).unwrap();
    let loaded = store.load().unwrap();

    assert_eq!(loaded.tasks, tasks);
    assert!(loaded.quarantined.is_none());
}

#[test]
fn load_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("does-not-exist.json"));

    let loaded = store.load().unwrap();
    assert!(loaded.tasks.is_empty());
    assert!(loaded.quarantined.is_none());
    assert!(files_in(dir.path()).is_empty());
}

#[test]
fn saved_file_has_expected_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo_data.json");
    JsonFileStore::new(&path).save(&sample_tasks()).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let first = &value[0];
    assert_eq!(first["id"], 1_735_725_600);
    assert_eq!(first["text"], "Buy groceries");
    assert_eq!(first["completed"], false);
    assert_eq!(first["category"], "Shopping");
    assert_eq!(first["priority"], "High");
    assert!(first["due_date"].is_null());
    assert_eq!(first["created_at"], "2025-01-01T10:00:00Z");
    assert!(first["completed_at"].is_null());

    let second = &value[1];
    assert_eq!(second["due_date"], "2025-01-03");
    assert_eq!(second["completed_at"], "2025-01-02T09:30:00.250Z");
}

#[test]
fn save_creates_parent_directories_and_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    let store = JsonFileStore::new(nested.join("todo_data.json"));

    store.save(&sample_tasks()).unwrap();
    store.save(&[]).unwrap();

    assert_eq!(files_in(&nested), ["todo_data.json"]);
    assert!(store.load().unwrap().tasks.is_empty());
}

#[test]
fn save_into_a_directory_path_fails_with_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());

    let err = store.save(&sample_tasks()).unwrap_err();
    assert!(matches!(err, StorageError::Write { .. }));
}

#[test]
fn loads_files_written_by_older_versions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo_data.json");
    fs::write(
        &path,
        r#"[
    {
        "id": 1700000000,
        "text": "Water plants",
        "completed": true,
        "category": "Personal",
        "priority": "Low",
        "due_date": "2023-11-20",
        "created_at": "2023-11-14T22:13:20.123456",
        "completed_at": "2023-11-15T08:00:00.000001"
    }
]"#,
    )
    .unwrap();

    let loaded = JsonFileStore::new(&path).load().unwrap();
    assert_eq!(loaded.tasks.len(), 1);
    let task = &loaded.tasks[0];
    assert_eq!(task.id, TaskId::new(1_700_000_000));
    assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2023, 11, 20));
    assert!(task.completed_at.is_some());
}

#[test]
fn missing_optional_fields_default_to_absent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo_data.json");
    fs::write(
        &path,
        r#"[{"id": 5, "text": "x", "completed": false, "category": "Work",
             "priority": "Medium", "created_at": "2025-01-01T00:00:00Z"}]"#,
    )
    .unwrap();

    let task = &JsonFileStore::new(&path).load().unwrap().tasks[0];
    assert_eq!(task.due_date, None);
    assert_eq!(task.completed_at, None);
}

// ---------------------------------------------------------------------------
// Unreadable content
// ---------------------------------------------------------------------------

#[test]
fn corrupt_file_is_moved_aside_and_load_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo_data.json");
    fs::write(&path, "{ not json").unwrap();

    let loaded = JsonFileStore::new(&path).load().unwrap();
    assert!(loaded.tasks.is_empty());

    let moved = loaded.quarantined.expect("corrupt file should be moved aside");
    assert!(!path.exists());
    assert_eq!(fs::read_to_string(&moved).unwrap(), "{ not json");
    let name = moved.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("todo_data.json.corrupt-"), "{name}");
}

#[test]
fn wrong_shape_is_treated_as_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo_data.json");
    fs::write(&path, r#"[{"id": 1, "text": "x", "category": "Chores"}]"#).unwrap();

    let loaded = JsonFileStore::new(&path).load().unwrap();
    assert!(loaded.tasks.is_empty());
    assert!(loaded.quarantined.is_some());
}

#[test]
fn blank_file_is_empty_without_quarantine() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo_data.json");
    fs::write(&path, "\n  \n").unwrap();

    let loaded = JsonFileStore::new(&path).load().unwrap();
    assert!(loaded.tasks.is_empty());
    assert!(loaded.quarantined.is_none());
    assert!(path.exists());
}

#[test]
fn unreadable_path_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());

    let err = store.load().unwrap_err();
    assert!(matches!(err, StorageError::Read { .. }));
}

#[test]
fn loosely_written_due_date_is_treated_as_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo_data.json");
    fs::write(
        &path,
        r#"[{"id": 5, "text": "x", "completed": false, "category": "Work",
             "priority": "Medium", "due_date": "2025-1-5",
             "created_at": "2025-01-01T00:00:00Z", "completed_at": null}]"#,
    )
    .unwrap();

    let loaded = JsonFileStore::new(&path).load().unwrap();
    assert!(loaded.tasks.is_empty());
    assert!(loaded.quarantined.is_some());
}
