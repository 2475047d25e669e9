//! Notification side channel.
//!
//! The core fires a notification at every phase completion and registers
//! the daily mood check-in. Delivery is best-effort: callers either log a
//! failure or surface it to the user and abort, never retry.

use std::sync::Mutex;

use crate::error::NotifyError;
use crate::timer::Phase;

/// Hour of the daily mood check-in (20:00 local).
pub const DAILY_CHECKIN_HOUR: u32 = 20;
pub const DAILY_CHECKIN_MINUTE: u32 = 0;
/// Payload tag carried by the scheduled check-in.
pub const MOOD_CHECK_PAYLOAD: &str = "mood-check";

/// Dispatch interface the core calls into. Platform scheduling mechanics
/// live behind this seam.
pub trait Notifier {
    /// Fire an immediate notification.
    fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError>;

    /// Register a repeating daily notification.
    fn schedule_daily(&self, hour: u32, minute: u32, payload: &str) -> Result<(), NotifyError>;

    /// Drop every scheduled notification.
    fn cancel_scheduled(&self) -> Result<(), NotifyError>;
}

/// Enable or disable the daily mood check-in.
///
/// Enabling replaces any previous schedule with the 20:00 check-in;
/// disabling clears the schedule.
pub fn set_daily_checkin(notifier: &dyn Notifier, enabled: bool) -> Result<(), NotifyError> {
    notifier.cancel_scheduled()?;
    if enabled {
        notifier.schedule_daily(DAILY_CHECKIN_HOUR, DAILY_CHECKIN_MINUTE, MOOD_CHECK_PAYLOAD)?;
    }
    Ok(())
}

/// Title and body for a phase-completion notification.
pub fn completion_message(completed: Phase, next: Phase) -> (String, String) {
    match completed {
        Phase::Work => {
            let body = match next {
                Phase::LongBreak => "Great work. Time for a long break.",
                _ => "Great work. Time for a short break.",
            };
            ("Focus session complete! 🍅".to_string(), body.to_string())
        }
        _ => (
            "Break over! ☕".to_string(),
            "Ready for the next focus session?".to_string(),
        ),
    }
}

/// Desktop notifications via the system notification service.
///
/// Daily scheduling has no desktop-session registry; the registration is
/// logged and recurring delivery is left to the platform shell.
#[derive(Debug, Default)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        notify_rust::Notification::new()
            .summary(title)
            .body(body)
            .show()
            .map(|_| ())
            .map_err(|e| NotifyError::Dispatch(e.to_string()))
    }

    fn schedule_daily(&self, hour: u32, minute: u32, payload: &str) -> Result<(), NotifyError> {
        tracing::info!(hour, minute, payload, "daily notification registered");
        Ok(())
    }

    fn cancel_scheduled(&self) -> Result<(), NotifyError> {
        tracing::info!("scheduled notifications cleared");
        Ok(())
    }
}

/// Captures dispatched notifications for assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    fired: Mutex<Vec<(String, String)>>,
    scheduled: Mutex<Vec<(u32, u32, String)>>,
    cancellations: Mutex<u32>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fired(&self) -> Vec<(String, String)> {
        self.fired.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn scheduled(&self) -> Vec<(u32, u32, String)> {
        self.scheduled
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn cancellations(&self) -> u32 {
        *self.cancellations.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        self.fired
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((title.to_string(), body.to_string()));
        Ok(())
    }

    fn schedule_daily(&self, hour: u32, minute: u32, payload: &str) -> Result<(), NotifyError> {
        self.scheduled
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((hour, minute, payload.to_string()));
        Ok(())
    }

    fn cancel_scheduled(&self) -> Result<(), NotifyError> {
        self.scheduled
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
        *self.cancellations.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(())
    }
}
