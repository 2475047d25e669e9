//! Daily aggregates and completion streaks.
//!
//! Aggregates are folded additively from completion events. Nothing here
//! reverses a past event: un-completing a task leaves the day's counters
//! and the streak as they were.

mod report;

pub use report::{
    mood_stats, productivity_stats, weekly_report, MoodStats, ProductivityStats, WeeklyReport,
};

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Calendar-date key format for `daily_stats` and streak dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const FALLBACK_MOOD: &str = "😐";

/// Per-calendar-date aggregate counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub tasks_completed: u32,
    /// Completed work sessions credited to the date.
    pub pomodoro_sessions: u32,
    /// Pinned by the first event of the day.
    pub most_active_hour: u32,
    /// Last-write-wins, not a true mode.
    pub dominant_mood: String,
}

/// Consecutive-day completion streak.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakState {
    pub current: u32,
    pub longest: u32,
    pub last_completion_date: Option<String>,
}

/// Whole-object analytics aggregate, persisted under the `analytics` key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    #[serde(default)]
    pub daily_stats: BTreeMap<String, DailyStats>,
    #[serde(default)]
    pub streaks: StreakState,
    /// Carried for persistence-shape compatibility; always empty.
    #[serde(default)]
    pub weekly_data: Vec<serde_json::Value>,
}

impl Analytics {
    /// Fold one task-completion event into the date's aggregate and the
    /// streak.
    pub fn record_completion(&mut self, mood: Option<&str>, date: NaiveDate, hour: u32) {
        let stats = self.day_entry(date, hour, mood);
        stats.tasks_completed += 1;
        if let Some(mood) = mood {
            stats.dominant_mood = mood.to_string();
        }
        self.touch_streak(date);
    }

    /// Credit a completed work session to the date.
    pub fn record_pomodoro(&mut self, date: NaiveDate, hour: u32) {
        let stats = self.day_entry(date, hour, None);
        stats.pomodoro_sessions += 1;
    }

    fn day_entry(&mut self, date: NaiveDate, hour: u32, mood: Option<&str>) -> &mut DailyStats {
        let key = date.format(DATE_FORMAT).to_string();
        self.daily_stats.entry(key).or_insert_with(|| DailyStats {
            tasks_completed: 0,
            pomodoro_sessions: 0,
            most_active_hour: hour,
            dominant_mood: mood.unwrap_or(FALLBACK_MOOD).to_string(),
        })
    }

    /// Evaluate the streak rule once against the previous completion date,
    /// then stamp today.
    fn touch_streak(&mut self, today: NaiveDate) {
        let today_key = today.format(DATE_FORMAT).to_string();
        let yesterday_key = today
            .pred_opt()
            .map(|d| d.format(DATE_FORMAT).to_string());

        let streaks = &mut self.streaks;
        match &streaks.last_completion_date {
            Some(last) if Some(last) == yesterday_key.as_ref() => {
                streaks.current += 1;
                streaks.longest = streaks.longest.max(streaks.current);
            }
            Some(last) if *last == today_key => {
                // Already counted today.
            }
            _ => {
                streaks.current = 1;
                streaks.longest = streaks.longest.max(1);
            }
        }
        streaks.last_completion_date = Some(today_key);
    }
}
