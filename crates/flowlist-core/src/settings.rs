//! Persisted timer configuration and preference flags.
//!
//! The configuration is stored whole-object under the `timerSettings` key
//! and pushed to subscribers on every save, so a live countdown rescales
//! immediately. Latest reload wins; there is no versioning.
//!
//! The store itself accepts any integers. Bounds (work/long break 1-60,
//! short break 1-30, interval 1-10) are the caller's job.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::storage::{
    read_json, write_json, Storage, KEY_DAILY_REMINDERS, KEY_DARK_MODE, KEY_TIMER_SETTINGS,
};

/// Timer durations and break cadence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerConfig {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u32,
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u32,
    /// Completed work sessions between long breaks. 1 makes every break long.
    #[serde(default = "default_long_break_interval")]
    pub long_break_interval: u32,
    #[serde(default)]
    pub auto_start_breaks: bool,
    #[serde(default)]
    pub auto_start_pomodoros: bool,
}

fn default_work_minutes() -> u32 {
    25
}
fn default_short_break_minutes() -> u32 {
    5
}
fn default_long_break_minutes() -> u32 {
    15
}
fn default_long_break_interval() -> u32 {
    4
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            long_break_interval: default_long_break_interval(),
            auto_start_breaks: false,
            auto_start_pomodoros: false,
        }
    }
}

impl TimerConfig {
    /// Work duration in seconds. Saturating, so absurd minute values
    /// cannot overflow.
    pub fn work_secs(&self) -> u32 {
        self.work_minutes.saturating_mul(60)
    }

    pub fn short_break_secs(&self) -> u32 {
        self.short_break_minutes.saturating_mul(60)
    }

    pub fn long_break_secs(&self) -> u32 {
        self.long_break_minutes.saturating_mul(60)
    }
}

/// Configuration store with subscription push.
///
/// Holds the latest [`TimerConfig`] in a watch channel; `save` persists the
/// whole object and publishes it. Subscribers (the timer driver) apply the
/// newest value between ticks instead of re-reading storage.
pub struct SettingsStore {
    storage: Arc<dyn Storage>,
    tx: watch::Sender<TimerConfig>,
}

impl SettingsStore {
    /// Open the store, reading the persisted configuration.
    ///
    /// Unreadable or unparsable data falls back silently to defaults; the
    /// failure is logged, never returned.
    pub fn open(storage: Arc<dyn Storage>) -> Self {
        let cfg = read_json(storage.as_ref(), KEY_TIMER_SETTINGS).unwrap_or_default();
        let (tx, _rx) = watch::channel(cfg);
        Self { storage, tx }
    }

    /// The latest configuration.
    pub fn current(&self) -> TimerConfig {
        self.tx.borrow().clone()
    }

    /// Persist the whole object and push it to subscribers.
    ///
    /// A storage failure is logged; the in-memory value is published
    /// regardless and remains the source of truth.
    pub fn save(&self, cfg: TimerConfig) {
        write_json(self.storage.as_ref(), KEY_TIMER_SETTINGS, &cfg);
        self.tx.send_replace(cfg);
    }

    /// Re-read the persisted configuration (for out-of-band changes) and
    /// push it to subscribers.
    pub fn reload(&self) -> TimerConfig {
        let cfg: TimerConfig = read_json(self.storage.as_ref(), KEY_TIMER_SETTINGS).unwrap_or_default();
        self.tx.send_replace(cfg.clone());
        cfg
    }

    /// Subscribe to configuration changes. The receiver always carries the
    /// latest saved value.
    pub fn subscribe(&self) -> watch::Receiver<TimerConfig> {
        self.tx.subscribe()
    }

    pub fn dark_mode(&self) -> bool {
        read_json(self.storage.as_ref(), KEY_DARK_MODE).unwrap_or(false)
    }

    pub fn set_dark_mode(&self, on: bool) {
        write_json(self.storage.as_ref(), KEY_DARK_MODE, &on);
    }

    pub fn daily_reminders(&self) -> bool {
        read_json(self.storage.as_ref(), KEY_DAILY_REMINDERS).unwrap_or(false)
    }

    pub fn set_daily_reminders(&self, on: bool) {
        write_json(self.storage.as_ref(), KEY_DAILY_REMINDERS, &on);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn store() -> SettingsStore {
        SettingsStore::open(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn empty_storage_yields_defaults() {
        let settings = store();
        assert_eq!(settings.current(), TimerConfig::default());
        assert_eq!(settings.current().work_minutes, 25);
        assert_eq!(settings.current().long_break_interval, 4);
    }

    #[test]
    fn garbage_storage_yields_defaults() {
        let storage = Arc::new(MemoryStore::new());
        storage.set(KEY_TIMER_SETTINGS, "not json").unwrap();
        let settings = SettingsStore::open(storage);
        assert_eq!(settings.current(), TimerConfig::default());
    }

    #[test]
    fn save_persists_whole_object_and_updates_current() {
        let storage = Arc::new(MemoryStore::new());
        let settings = SettingsStore::open(Arc::clone(&storage) as Arc<dyn Storage>);
        let cfg = TimerConfig {
            work_minutes: 50,
            ..TimerConfig::default()
        };
        settings.save(cfg.clone());
        assert_eq!(settings.current(), cfg);

        let persisted: TimerConfig =
            serde_json::from_str(&storage.get(KEY_TIMER_SETTINGS).unwrap().unwrap()).unwrap();
        assert_eq!(persisted, cfg);
    }

    #[test]
    fn subscriber_sees_latest_of_multiple_saves() {
        let settings = store();
        let mut rx = settings.subscribe();
        settings.save(TimerConfig {
            work_minutes: 30,
            ..TimerConfig::default()
        });
        settings.save(TimerConfig {
            work_minutes: 45,
            ..TimerConfig::default()
        });
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().work_minutes, 45);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn reload_picks_up_out_of_band_writes() {
        let storage = Arc::new(MemoryStore::new());
        let settings = SettingsStore::open(Arc::clone(&storage) as Arc<dyn Storage>);
        storage
            .set(KEY_TIMER_SETTINGS, r#"{"workMinutes":40}"#)
            .unwrap();
        let cfg = settings.reload();
        assert_eq!(cfg.work_minutes, 40);
        // Missing fields fall back per-field.
        assert_eq!(cfg.short_break_minutes, 5);
    }

    #[test]
    fn preference_flags_default_false_and_round_trip() {
        let settings = store();
        assert!(!settings.dark_mode());
        assert!(!settings.daily_reminders());
        settings.set_dark_mode(true);
        settings.set_daily_reminders(true);
        assert!(settings.dark_mode());
        assert!(settings.daily_reminders());
    }

    #[test]
    fn config_json_uses_camel_case_field_names() {
        let json = serde_json::to_string(&TimerConfig::default()).unwrap();
        assert!(json.contains("workMinutes"));
        assert!(json.contains("longBreakInterval"));
        assert!(json.contains("autoStartBreaks"));
    }
}
