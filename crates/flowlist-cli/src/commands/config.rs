//! Timer settings and preference flags.
//!
//! The store accepts any integers; the ranges here are the UI-side bounds,
//! applied at this edge before saving.

use clap::Subcommand;
use flowlist_core::SettingsStore;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the persisted configuration and preference flags
    Show,
    /// Update timer durations and cadence
    Set {
        /// Work session length in minutes (1-60)
        #[arg(long)]
        work: Option<u32>,
        /// Short break length in minutes (1-30)
        #[arg(long)]
        short_break: Option<u32>,
        /// Long break length in minutes (1-60)
        #[arg(long)]
        long_break: Option<u32>,
        /// Work sessions between long breaks (1-10)
        #[arg(long)]
        interval: Option<u32>,
        /// Start breaks automatically
        #[arg(long)]
        auto_start_breaks: Option<bool>,
        /// Start work sessions automatically
        #[arg(long)]
        auto_start_pomodoros: Option<bool>,
    },
    /// Toggle the dark-mode preference
    DarkMode {
        /// "on" or "off"
        value: String,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let settings = SettingsStore::open(super::open_storage()?);

    match action {
        ConfigAction::Show => {
            let doc = serde_json::json!({
                "timerSettings": settings.current(),
                "darkMode": settings.dark_mode(),
                "dailyReminders": settings.daily_reminders(),
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        ConfigAction::Set {
            work,
            short_break,
            long_break,
            interval,
            auto_start_breaks,
            auto_start_pomodoros,
        } => {
            let mut cfg = settings.current();
            if let Some(v) = work {
                cfg.work_minutes = v.clamp(1, 60);
            }
            if let Some(v) = short_break {
                cfg.short_break_minutes = v.clamp(1, 30);
            }
            if let Some(v) = long_break {
                cfg.long_break_minutes = v.clamp(1, 60);
            }
            if let Some(v) = interval {
                cfg.long_break_interval = v.clamp(1, 10);
            }
            if let Some(v) = auto_start_breaks {
                cfg.auto_start_breaks = v;
            }
            if let Some(v) = auto_start_pomodoros {
                cfg.auto_start_pomodoros = v;
            }
            settings.save(cfg.clone());
            println!("{}", serde_json::to_string_pretty(&cfg)?);
        }
        ConfigAction::DarkMode { value } => {
            let on = match value.as_str() {
                "on" | "true" => true,
                "off" | "false" => false,
                other => return Err(format!("expected on or off, got {other}").into()),
            };
            settings.set_dark_mode(on);
            println!("darkMode = {on}");
        }
    }

    Ok(())
}
