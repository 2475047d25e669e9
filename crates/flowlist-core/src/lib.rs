//! # FlowList Core Library
//!
//! Core business logic for FlowList: a to-do list with priority/category
//! tagging, a Pomodoro-style focus timer, mood check-ins bound to task
//! completion, and derived analytics/export. All operations are available
//! to any front-end; the CLI binary is a thin layer over this library.
//!
//! ## Architecture
//!
//! - **Timer**: a tick-driven state machine; the caller invokes `tick()`
//!   once per second while a phase is active
//! - **Settings**: persisted timer configuration pushed to subscribers on
//!   save, so a live countdown rescales immediately
//! - **Storage**: an opaque key-value seam with a SQLite-backed default;
//!   whole-object JSON, best-effort writes, in-memory state authoritative
//! - **Tasks/Analytics**: completion events fold mood check-ins into daily
//!   aggregates and streaks
//!
//! ## Key Components
//!
//! - [`FocusTimer`]: the focus/break state machine
//! - [`SettingsStore`]: configuration persistence and subscription push
//! - [`TaskStore`]: task CRUD and the completion/mood binder
//! - [`Notifier`]: the notification side channel

pub mod analytics;
pub mod error;
pub mod events;
pub mod export;
pub mod mood;
pub mod notify;
pub mod settings;
pub mod storage;
pub mod tasks;
pub mod timer;

pub use analytics::{Analytics, DailyStats, StreakState};
pub use error::{CoreError, NotifyError, Result, StorageError, ValidationError};
pub use events::Event;
pub use notify::{DesktopNotifier, Notifier};
pub use settings::{SettingsStore, TimerConfig};
pub use storage::{Database, MemoryStore, Storage};
pub use tasks::{NewTask, Priority, Task, TaskStore, TaskUpdate};
pub use timer::{next_break_phase, FocusTimer, Phase};
