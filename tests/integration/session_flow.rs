//! Integration tests for the session: store mutations persisted to a real
//! data file, reloads, and recovery from storage failures.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::fs;

use chrono::{Duration, TimeZone, Utc};
use todomaster::session::{Notice, Session};
use todomaster::storage::{InMemoryPersistence, JsonFileStore, TaskPersistence};
use todomaster::store::TaskError;
use todomaster_core::{Category, CategoryFilter, FixedClock, Priority, TaskDraft, TaskId};

fn clock() -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap())
}

#[test]
fn changes_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo_data.json");
    let clock = clock();

    let (done_id, open_id) = {
        let mut session = Session::open(JsonFileStore::new(&path), &clock);
        let a = session
            .add(&TaskDraft::new("renew passport", Category::Personal, Priority::High))
            .unwrap();
        clock.advance(Duration::seconds(5));
        let b = session
            .add(
                &TaskDraft::new("book dentist", Category::Health, Priority::Medium)
                    .with_due_date("2025-03-10"),
            )
            .unwrap();
        session.toggle(a).unwrap();
        (a, b)
    };

    let mut session = Session::open(JsonFileStore::new(&path), &clock);
    assert_eq!(session.store().len(), 2);
    assert!(session.get(done_id).unwrap().completed);
    assert!(session.get(done_id).unwrap().completed_at.is_some());
    assert_eq!(
        session.get(open_id).unwrap().due_date.unwrap().to_string(),
        "2025-03-10"
    );
    assert!(session.drain_notices().is_empty());
}

#[test]
fn ids_keep_increasing_after_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo_data.json");
    let clock = clock();

    let first = {
        let mut session = Session::open(JsonFileStore::new(&path), &clock);
        session
            .add(&TaskDraft::new("one", Category::Work, Priority::Low))
            .unwrap()
    };

    // Same wall-clock second after restart.
    let mut session = Session::open(JsonFileStore::new(&path), &clock);
    let second = session
        .add(&TaskDraft::new("two", Category::Work, Priority::Low))
        .unwrap();
    assert!(second > first);
}

#[test]
fn corrupt_data_file_is_reported_once_and_replaced_on_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo_data.json");
    fs::write(&path, "this is not a task list").unwrap();

    let mut session = Session::open(JsonFileStore::new(&path), clock());
    assert!(session.store().is_empty());

    let notices = session.drain_notices();
    assert_eq!(notices.len(), 1);
    let Notice::Quarantined { path: moved } = &notices[0] else {
        panic!("expected quarantine notice, got {notices:?}");
    };
    assert_eq!(fs::read_to_string(moved).unwrap(), "this is not a task list");

    session
        .add(&TaskDraft::new("start over", Category::Personal, Priority::Medium))
        .unwrap();
    let reloaded = JsonFileStore::new(&path).load().unwrap();
    assert_eq!(reloaded.tasks.len(), 1);
}

#[test]
fn unreadable_data_file_starts_empty_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::open(JsonFileStore::new(dir.path()), clock());

    assert!(session.store().is_empty());
    assert!(matches!(
        session.drain_notices().as_slice(),
        [Notice::LoadFailed { .. }]
    ));
}

#[test]
fn failed_save_keeps_memory_authoritative() {
    let persistence = InMemoryPersistence::new();
    let mut session = Session::open(persistence, clock());
    let id = session
        .add(&TaskDraft::new("saved", Category::Work, Priority::High))
        .unwrap();

    session.persistence().set_failing(true);
    session.toggle(id).unwrap();
    session.delete(id).unwrap();
    assert!(session.store().is_empty());
    assert!(session.is_dirty());
    // Disk still holds the last good state.
    assert_eq!(session.persistence().saved().len(), 1);

    session.persistence().set_failing(false);
    assert!(session.retry_save());
    assert!(session.persistence().saved().is_empty());
}

#[test]
fn stale_ids_report_not_found_without_saving() {
    let mut session = Session::open(InMemoryPersistence::new(), clock());
    let ghost = TaskId::new(7);

    assert_eq!(session.toggle(ghost).unwrap_err(), TaskError::NotFound(ghost));
    assert_eq!(session.delete(ghost).unwrap_err(), TaskError::NotFound(ghost));
    assert_eq!(session.persistence().save_count(), 0);
}

#[test]
fn filter_and_counts_follow_mutations() {
    let mut session = Session::open(InMemoryPersistence::new(), clock())
        .with_filter(CategoryFilter::Only(Category::Shopping));
    let eggs = session
        .add(&TaskDraft::new("eggs", Category::Shopping, Priority::Low))
        .unwrap();
    session
        .add(&TaskDraft::new("slides", Category::Education, Priority::High))
        .unwrap();

    assert_eq!(session.visible().len(), 1);
    let counts = session.counts();
    assert!(counts.contains(&(CategoryFilter::All, 2)));
    assert!(counts.contains(&(CategoryFilter::Only(Category::Shopping), 1)));

    session.toggle(eggs).unwrap();
    let counts = session.counts();
    assert!(counts.contains(&(CategoryFilter::All, 1)));
    assert!(counts.contains(&(CategoryFilter::Only(Category::Shopping), 0)));
    assert_eq!(session.visible().len(), 1, "completed tasks stay visible");
}
