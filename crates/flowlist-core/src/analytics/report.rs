//! Derived reports over the task collection.
//!
//! These are computed on demand from the tasks themselves, not from the
//! persisted daily aggregates, so deleted or un-completed tasks fall out of
//! the report naturally.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Local, Utc};
use serde::Serialize;

use crate::tasks::Task;

const NO_DATA: &str = "No data";

/// Completion-rate summary over a task collection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductivityStats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Percent, 0-100.
    pub completion_rate: f64,
    /// Mean hours from creation to completion.
    pub average_completion_hours: f64,
    /// Weekday name with the most completions.
    pub most_productive_day: String,
}

pub fn productivity_stats(tasks: &[Task]) -> ProductivityStats {
    let total_tasks = tasks.len();
    let completed: Vec<&Task> = tasks.iter().filter(|t| t.completed).collect();

    let completion_rate = if total_tasks > 0 {
        completed.len() as f64 / total_tasks as f64 * 100.0
    } else {
        0.0
    };

    let completion_hours: Vec<f64> = completed
        .iter()
        .filter_map(|t| {
            t.completed_at
                .map(|done| (done - t.created_at).num_seconds() as f64 / 3600.0)
        })
        .collect();
    let average_completion_hours = if completion_hours.is_empty() {
        0.0
    } else {
        completion_hours.iter().sum::<f64>() / completion_hours.len() as f64
    };

    let mut day_counts: BTreeMap<String, u32> = BTreeMap::new();
    for task in &completed {
        if let Some(done) = task.completed_at {
            let day = done.with_timezone(&Local).format("%A").to_string();
            *day_counts.entry(day).or_default() += 1;
        }
    }
    let most_productive_day = day_counts
        .iter()
        .max_by_key(|(_, count)| **count)
        .map(|(day, _)| day.clone())
        .unwrap_or_else(|| NO_DATA.to_string());

    ProductivityStats {
        total_tasks,
        completed_tasks: completed.len(),
        completion_rate,
        average_completion_hours,
        most_productive_day,
    }
}

/// Mood distribution over completed tasks.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodStats {
    pub distribution: BTreeMap<String, u32>,
    pub most_common_mood: String,
}

pub fn mood_stats(tasks: &[Task]) -> MoodStats {
    let mut distribution: BTreeMap<String, u32> = BTreeMap::new();
    for task in tasks.iter().filter(|t| t.completed) {
        if let Some(mood) = &task.mood {
            *distribution.entry(mood.clone()).or_default() += 1;
        }
    }
    let most_common_mood = distribution
        .iter()
        .max_by_key(|(_, count)| **count)
        .map(|(mood, _)| mood.clone())
        .unwrap_or_else(|| NO_DATA.to_string());

    MoodStats {
        distribution,
        most_common_mood,
    }
}

/// Trailing seven-day summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReport {
    pub week: String,
    pub tasks_completed: usize,
    /// Estimated at one 25-minute session per completed task.
    pub total_focus_minutes: u32,
    pub average_mood: String,
    /// 0-100, from the completion rate.
    pub productivity_score: u32,
    pub trends: Vec<String>,
}

pub fn weekly_report(tasks: &[Task], now: DateTime<Utc>) -> WeeklyReport {
    let cutoff = now - Duration::days(7);
    let recent: Vec<Task> = tasks
        .iter()
        .filter(|t| t.completed && t.completed_at.is_some_and(|at| at > cutoff))
        .cloned()
        .collect();

    let moods = mood_stats(&recent);
    let productivity = productivity_stats(&recent);

    WeeklyReport {
        week: format!("Week of {}", now.with_timezone(&Local).format("%Y-%m-%d")),
        tasks_completed: recent.len(),
        total_focus_minutes: recent.len() as u32 * 25,
        average_mood: moods.most_common_mood,
        productivity_score: (productivity.completion_rate * 1.5).round().min(100.0) as u32,
        trends: if recent.len() > 3 {
            vec![
                "Increasing productivity".to_string(),
                "Consistent mood tracking".to_string(),
            ]
        } else {
            vec!["Getting started".to_string()]
        },
    }
}
