//! Daily mood check-in reminders.
//!
//! A notifier failure aborts the command before the preference flag is
//! persisted; nothing is retried.

use clap::Subcommand;
use flowlist_core::notify::{set_daily_checkin, DesktopNotifier, Notifier};
use flowlist_core::SettingsStore;

#[derive(Subcommand)]
pub enum RemindAction {
    /// Enable the 20:00 daily check-in
    Enable,
    /// Disable reminders
    Disable,
    /// Fire a test mood check-in now
    Test,
}

pub fn run(action: RemindAction) -> Result<(), Box<dyn std::error::Error>> {
    let settings = SettingsStore::open(super::open_storage()?);
    let notifier = DesktopNotifier;

    match action {
        RemindAction::Enable => {
            set_daily_checkin(&notifier, true)?;
            settings.set_daily_reminders(true);
            println!("Daily reminders enabled.");
        }
        RemindAction::Disable => {
            set_daily_checkin(&notifier, false)?;
            settings.set_daily_reminders(false);
            println!("Daily reminders disabled.");
        }
        RemindAction::Test => {
            notifier.notify("Mood Check-in", "How are you feeling right now?")?;
            println!("Test notification sent.");
        }
    }

    Ok(())
}
