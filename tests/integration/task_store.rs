//! Integration tests for the task store and list policy.
//!
//! Covers add/update/toggle/delete through the public `TaskStore` API and
//! the documented display order of `select`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use todomaster::store::{TaskError, TaskStore};
use todomaster_core::{
    Category, CategoryFilter, Clock, FixedClock, Priority, Task, TaskDraft, TaskId, ValidationError,
    select,
};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn clock() -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap())
}

fn draft(text: &str, category: Category, priority: Priority) -> TaskDraft {
    TaskDraft::new(text, category, priority)
}

fn task(
    id: i64,
    text: &str,
    completed: bool,
    due: Option<(i32, u32, u32)>,
    priority: Priority,
) -> Task {
    let created_at = Utc.with_ymd_and_hms(2024, 12, 1, 8, 0, 0).unwrap();
    Task {
        id: TaskId::new(id),
        text: text.to_string(),
        completed,
        category: Category::Work,
        priority,
        due_date: due.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap()),
        created_at,
        completed_at: completed.then_some(created_at),
    }
}

fn texts<'a>(tasks: &[&'a Task]) -> Vec<&'a str> {
    tasks.iter().map(|t| t.text.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Store operations
// ---------------------------------------------------------------------------

#[test]
fn add_grows_collection_by_one_with_fresh_id() {
    let clock = clock();
    let mut store = TaskStore::with_clock(&clock);
    let mut seen = Vec::new();

    for (i, category) in Category::ALL.iter().enumerate() {
        let before = store.len();
        let id = store
            .add(&draft(&format!("task {i}"), *category, Priority::Low))
            .unwrap()
            .id;
        assert_eq!(store.all().len(), before + 1);
        assert!(!seen.contains(&id), "id {id} handed out twice");
        seen.push(id);
        if i % 2 == 0 {
            clock.advance(Duration::seconds(1));
        }
    }
}

#[test]
fn whitespace_only_text_is_rejected() {
    let mut store = TaskStore::with_clock(clock());
    store
        .add(&draft("keep", Category::Personal, Priority::High))
        .unwrap();
    let before = store.all().to_vec();

    let err = store
        .add(&draft("   ", Category::Personal, Priority::High))
        .unwrap_err();

    assert_eq!(err, TaskError::Validation(ValidationError::EmptyDescription));
    assert_eq!(store.all(), before.as_slice());
}

#[test]
fn update_with_impossible_date_changes_nothing() {
    let mut store = TaskStore::with_clock(clock());
    let id = store
        .add(&draft("pay rent", Category::Personal, Priority::High).with_due_date("2025-02-01"))
        .unwrap()
        .id;
    let before = store.get(id).cloned().unwrap();

    let err = store
        .update(
            id,
            &draft("pay rent later", Category::Work, Priority::Low).with_due_date("2025-13-40"),
        )
        .unwrap_err();

    assert_eq!(
        err,
        TaskError::Validation(ValidationError::BadDate("2025-13-40".to_string()))
    );
    assert_eq!(store.get(id), Some(&before));
}

#[test]
fn toggle_twice_is_identity_on_completion() {
    let clock = clock();
    let mut store = TaskStore::with_clock(&clock);
    let id = store
        .add(&draft("stretch", Category::Health, Priority::Medium))
        .unwrap()
        .id;
    let original = store.get(id).cloned().unwrap();

    clock.advance(Duration::hours(2));
    let done = store.toggle(id).unwrap().clone();
    assert!(done.completed);
    assert_eq!(done.completed_at, Some(clock.now()));

    let back = store.toggle(id).unwrap();
    assert_eq!(back.completed, original.completed);
    assert_eq!(back.completed_at, None);
    assert_eq!(back, &original);
}

#[test]
fn delete_removes_and_second_delete_is_not_found() {
    let mut store = TaskStore::with_clock(clock());
    let keep = store
        .add(&draft("keep", Category::Work, Priority::Low))
        .unwrap()
        .id;
    let gone = store
        .add(&draft("gone", Category::Work, Priority::Low))
        .unwrap()
        .id;

    store.delete(gone).unwrap();
    assert!(store.all().iter().all(|t| t.id != gone));

    let snapshot = store.all().to_vec();
    assert_eq!(store.delete(gone).unwrap_err(), TaskError::NotFound(gone));
    assert_eq!(store.all(), snapshot.as_slice());
    assert!(store.get(keep).is_some());
}

// ---------------------------------------------------------------------------
// Filter & sort policy
// ---------------------------------------------------------------------------

#[test]
fn documented_sort_example() {
    let tasks = vec![
        task(1, "A", false, Some((2025, 1, 1)), Priority::Low),
        task(2, "B", false, Some((2025, 1, 1)), Priority::High),
        task(3, "C", false, None, Priority::High),
        task(4, "D", true, Some((2024, 1, 1)), Priority::High),
    ];

    let view = select(&tasks, CategoryFilter::All);
    assert_eq!(texts(&view), ["B", "A", "C", "D"]);
}

#[test]
fn all_filter_returns_every_record() {
    let mut store = TaskStore::with_clock(clock());
    for category in Category::ALL {
        store
            .add(&draft(category.label(), category, Priority::Medium))
            .unwrap();
    }

    let view = store.view(CategoryFilter::All);
    assert_eq!(view.len(), store.len());
}

#[test]
fn category_filter_returns_only_that_category() {
    let mut store = TaskStore::with_clock(clock());
    store
        .add(&draft("report", Category::Work, Priority::High))
        .unwrap();
    store
        .add(&draft("milk", Category::Shopping, Priority::Low))
        .unwrap();
    store
        .add(&draft("standup", Category::Work, Priority::Low).with_due_date("2025-01-02"))
        .unwrap();

    let view = store.view(CategoryFilter::Only(Category::Work));
    assert!(view.iter().all(|t| t.category == Category::Work));
    assert_eq!(texts(&view), ["standup", "report"]);
}

#[test]
fn completing_a_task_moves_it_to_the_bottom() {
    let mut store = TaskStore::with_clock(clock());
    let first = store
        .add(&draft("first", Category::Work, Priority::High).with_due_date("2025-01-01"))
        .unwrap()
        .id;
    store
        .add(&draft("second", Category::Work, Priority::Low))
        .unwrap();

    store.toggle(first).unwrap();
    assert_eq!(texts(&store.view(CategoryFilter::All)), ["second", "first"]);
}
