//! Timer control: the foreground countdown loop.
//!
//! Run state is process-local and never persisted; `timer run` owns the
//! machine for its lifetime. The loop is the single tick source: one
//! interval tick per second while a phase is active, with pending
//! configuration saves applied between ticks (latest reload wins).

use std::io::Write;
use std::time::Duration;

use clap::Subcommand;
use flowlist_core::notify::{completion_message, DesktopNotifier, Notifier};
use flowlist_core::{Event, FocusTimer, Phase, SettingsStore, TaskStore};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the focus timer in the foreground
    Run {
        /// Stop after this many completed work sessions
        #[arg(long, default_value = "4")]
        sessions: u32,
        /// Credit completed work sessions to this task ID
        #[arg(long)]
        task: Option<String>,
    },
    /// Print the effective timer configuration
    Show,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run { sessions, task } => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(drive(sessions, task))
        }
        TimerAction::Show => {
            let settings = SettingsStore::open(super::open_storage()?);
            println!("{}", serde_json::to_string_pretty(&settings.current())?);
            Ok(())
        }
    }
}

async fn drive(sessions: u32, task_id: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let storage = super::open_storage()?;
    let settings = SettingsStore::open(storage.clone());
    let mut tasks = TaskStore::open(storage);
    let notifier = DesktopNotifier;

    let mut config_rx = settings.subscribe();
    let mut machine = FocusTimer::new(settings.current());
    if let Some(event) = machine.start() {
        tracing::debug!(?event, "timer started");
    }
    print_status(&machine);

    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut completed_work = 0u32;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if config_rx.has_changed().unwrap_or(false) {
                    let cfg = config_rx.borrow_and_update().clone();
                    machine.apply_config(cfg);
                }
                if let Some(Event::PhaseCompleted { completed, next, .. }) = machine.tick() {
                    let (title, body) = completion_message(completed, next);
                    if let Err(e) = notifier.notify(&title, &body) {
                        tracing::warn!("notification failed: {e}");
                    }
                    if completed == Phase::Work {
                        completed_work += 1;
                        if let Some(id) = &task_id {
                            if let Err(e) = tasks.record_pomodoro(id) {
                                tracing::warn!("could not credit the session: {e}");
                            }
                        }
                        if completed_work >= sessions {
                            machine.reset();
                            println!();
                            println!("{completed_work} work sessions done.");
                            return Ok(());
                        }
                    }
                }
                print_status(&machine);
            }
            _ = tokio::signal::ctrl_c() => {
                machine.reset();
                println!();
                return Ok(());
            }
        }
    }
}

fn print_status(machine: &FocusTimer) {
    let secs = machine.seconds_remaining();
    print!(
        "\r{:<11} {:02}:{:02}  (session {})   ",
        machine.phase().to_string(),
        secs / 60,
        secs % 60,
        machine.session_count()
    );
    let _ = std::io::stdout().flush();
}
