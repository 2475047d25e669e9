//! Integration tests for the completion/mood flow: task mutations feeding
//! daily aggregates and streaks, persistence through the kv seam, and the
//! export round trip.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone};
use flowlist_core::storage::{Database, MemoryStore};
use flowlist_core::{export, NewTask, Storage, TaskStore};

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

fn new_task(title: &str) -> NewTask {
    NewTask {
        title: title.to_string(),
        ..NewTask::default()
    }
}

#[test]
fn two_completions_on_one_day_share_the_aggregate() {
    let mut store = TaskStore::open(Arc::new(MemoryStore::new()));
    let a = store.add(new_task("First")).unwrap();
    let b = store.add(new_task("Second")).unwrap();

    store.complete_at(&a.id, "😊", at(2026, 8, 3, 9)).unwrap();
    store.complete_at(&b.id, "😊", at(2026, 8, 3, 16)).unwrap();

    let day = &store.analytics().daily_stats["2026-08-03"];
    assert_eq!(day.tasks_completed, 2);
    assert_eq!(day.dominant_mood, "😊");
    assert_eq!(store.analytics().streaks.current, 1);
}

#[test]
fn streak_grows_then_resets_after_a_missed_day() {
    let mut store = TaskStore::open(Arc::new(MemoryStore::new()));

    let a = store.add(new_task("Day one")).unwrap();
    store.complete_at(&a.id, "😊", at(2026, 8, 3, 10)).unwrap();
    assert_eq!(store.analytics().streaks.current, 1);

    let b = store.add(new_task("Day two")).unwrap();
    store.complete_at(&b.id, "🤗", at(2026, 8, 4, 11)).unwrap();
    assert_eq!(store.analytics().streaks.current, 2);
    assert!(store.analytics().streaks.longest >= 2);

    // Skip the 5th entirely.
    let c = store.add(new_task("After the gap")).unwrap();
    store.complete_at(&c.id, "😐", at(2026, 8, 6, 9)).unwrap();
    assert_eq!(store.analytics().streaks.current, 1);
    assert_eq!(store.analytics().streaks.longest, 2);
}

#[test]
fn uncomplete_leaves_the_day_counters_in_place() {
    let mut store = TaskStore::open(Arc::new(MemoryStore::new()));
    let task = store.add(new_task("Fleeting win")).unwrap();
    store
        .complete_at(&task.id, "😊", at(2026, 8, 3, 9))
        .unwrap();

    store.uncomplete(&task.id).unwrap();

    let cleared = store.get(&task.id).unwrap();
    assert!(!cleared.completed);
    assert_eq!(cleared.mood, None);
    // The asymmetry is deliberate: aggregates only move forward.
    assert_eq!(
        store.analytics().daily_stats["2026-08-03"].tasks_completed,
        1
    );
    assert_eq!(store.analytics().streaks.current, 1);
}

#[test]
fn state_survives_a_reopen_through_sqlite() {
    let storage: Arc<dyn Storage> = Arc::new(Database::open_in_memory().unwrap());

    let id = {
        let mut store = TaskStore::open(Arc::clone(&storage));
        let task = store.add(new_task("Durable")).unwrap();
        store
            .complete_at(&task.id, "🤔", at(2026, 8, 3, 14))
            .unwrap();
        task.id
    };

    let reopened = TaskStore::open(storage);
    let task = reopened.get(&id).unwrap();
    assert!(task.completed);
    assert_eq!(task.mood.as_deref(), Some("🤔"));
    assert_eq!(
        reopened.analytics().daily_stats["2026-08-03"].tasks_completed,
        1
    );
}

#[test]
fn export_json_round_trips_the_collection() {
    let mut store = TaskStore::open(Arc::new(MemoryStore::new()));
    store.add(new_task("Alpha")).unwrap();
    let b = store.add(new_task("Beta")).unwrap();
    store.complete_at(&b.id, "😴", at(2026, 8, 3, 22)).unwrap();

    let json = export::to_json(store.list()).unwrap();
    let parsed: Vec<flowlist_core::Task> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, store.list());
}

#[test]
fn export_csv_lists_every_task_with_the_contract_header() {
    let mut store = TaskStore::open(Arc::new(MemoryStore::new()));
    store.add(new_task("Plain")).unwrap();
    let b = store.add(new_task("Done, with \"quotes\"")).unwrap();
    store.complete_at(&b.id, "😊", at(2026, 8, 3, 9)).unwrap();

    let csv = export::to_csv(store.list());
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "Title,Description,Priority,Category,Completed,CompletedAt,Mood,CreatedAt"
    );
    assert!(lines[1].contains(",No,"));
    assert!(lines[2].starts_with("\"Done, with \"\"quotes\"\"\""));
    assert!(lines[2].contains(",Yes,"));
    assert!(lines[2].contains("😊"));
}
