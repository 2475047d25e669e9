//! Productivity statistics commands.

use chrono::{Local, Utc};
use clap::Subcommand;
use flowlist_core::analytics::{mood_stats, productivity_stats, weekly_report, DATE_FORMAT};
use flowlist_core::TaskStore;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Productivity and mood summary over all tasks
    Show,
    /// Aggregates for one calendar date
    Daily {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Trailing seven-day report
    Weekly,
    /// Completion streaks
    Streak,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = TaskStore::open(super::open_storage()?);

    match action {
        StatsAction::Show => {
            let doc = serde_json::json!({
                "productivity": productivity_stats(store.list()),
                "moods": mood_stats(store.list()),
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        StatsAction::Daily { date } => {
            let key = date.unwrap_or_else(|| Local::now().format(DATE_FORMAT).to_string());
            match store.analytics().daily_stats.get(&key) {
                Some(day) => println!("{}", serde_json::to_string_pretty(day)?),
                None => println!("No activity recorded for {key}"),
            }
        }
        StatsAction::Weekly => {
            let report = weekly_report(store.list(), Utc::now());
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        StatsAction::Streak => {
            println!(
                "{}",
                serde_json::to_string_pretty(&store.analytics().streaks)?
            );
        }
    }

    Ok(())
}
