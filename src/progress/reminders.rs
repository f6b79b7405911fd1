//! Practice reminder scheduling
//!
//! A single self-rescheduling daily reminder. The timer is re-derived from
//! the wall clock on every step and any pending arm is cancelled before a
//! new one is set, so a reminder never fires twice for the same slot. One
//! scheduling step never spans more than 24 hours; if the target is further
//! out the step lands short and the next step re-measures.

use std::sync::{Arc, Mutex};

use chrono::Duration;
use tracing::{debug, info};

use crate::progress::clock::Clock;

/// Notification delivery primitive.
pub trait Notifier: Send + Sync {
    /// Ask the platform for permission to notify. May block on user input.
    fn request_permission(&self) -> bool;

    /// Deliver a notification.
    fn show(&self, title: &str, body: &str);
}

/// Terminal-only notifier used by the CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn request_permission(&self) -> bool {
        true
    }

    fn show(&self, title: &str, body: &str) {
        info!("{}: {}", title, body);
    }
}

/// When the daily reminder should fire, in local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderSchedule {
    pub hour: u32,
    pub minute: u32,
}

impl Default for ReminderSchedule {
    fn default() -> Self {
        Self { hour: 19, minute: 0 }
    }
}

/// Longest wait a single scheduling step may cover.
fn max_step() -> Duration {
    Duration::hours(24)
}

/// Drives the daily reminder. `tick` is expected to be called whenever the
/// host wakes the scheduler (the CLI does so on startup).
pub struct ReminderScheduler {
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
    schedule: ReminderSchedule,
    /// (step deadline, target instant) in epoch ms. None when disarmed.
    /// The step deadline trails the target when the 24h cap kicked in.
    armed: Mutex<Option<(i64, i64)>>,
}

impl ReminderScheduler {
    pub fn new(
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
        schedule: ReminderSchedule,
    ) -> Self {
        Self {
            clock,
            notifier,
            schedule,
            armed: Mutex::new(None),
        }
    }

    /// Request permission and arm the first step. Returns false (and stays
    /// disarmed) when permission is denied.
    pub fn start(&self) -> bool {
        if !self.notifier.request_permission() {
            debug!("reminder permission denied, staying disarmed");
            return false;
        }
        self.arm();
        true
    }

    /// Cancel any pending step and arm a fresh one from the current wall
    /// clock.
    pub fn arm(&self) {
        let mut armed = self.armed.lock().expect("reminder lock");
        *armed = None;

        let now = self.clock.now();
        let until = self.step_until_target();
        let step = until.min(max_step());
        *armed = Some((
            (now + step).timestamp_millis(),
            (now + until).timestamp_millis(),
        ));
        debug!("reminder armed, next step in {}s", step.num_seconds());
    }

    pub fn cancel(&self) {
        *self.armed.lock().expect("reminder lock") = None;
    }

    /// Epoch ms of the pending step deadline, if armed.
    pub fn next_step_at(&self) -> Option<i64> {
        self.armed.lock().expect("reminder lock").map(|(at, _)| at)
    }

    /// Fire if the pending step has elapsed and the target instant has been
    /// reached, then rearm from the wall clock. A capped step that landed
    /// short of the target rearms silently and waits out the remainder.
    /// Returns true when a notification was shown.
    pub fn tick(&self) -> bool {
        let target_at = {
            let armed = self.armed.lock().expect("reminder lock");
            match *armed {
                Some((step_at, target_at)) if self.clock.now_ms() >= step_at => target_at,
                Some(_) => return false,
                None => return false,
            }
        };

        let fired = self.clock.now_ms() >= target_at;
        if fired {
            self.notifier.show(
                "Time to practice",
                "Keep your streak going with a quick speaking session.",
            );
        }
        self.arm();
        fired
    }

    /// Time from now until the next occurrence of the scheduled local time.
    fn step_until_target(&self) -> Duration {
        let now = self.clock.now();
        let today_target = now
            .date_naive()
            .and_hms_opt(self.schedule.hour, self.schedule.minute, 0)
            .and_then(|naive| naive.and_local_timezone(chrono::Local).single());

        match today_target {
            Some(target) if target > now => target - now,
            // Past today's slot (or the local time is invalid, e.g. a DST
            // gap): aim for tomorrow's.
            _ => {
                let tomorrow = now.date_naive() + Duration::days(1);
                match tomorrow
                    .and_hms_opt(self.schedule.hour, self.schedule.minute, 0)
                    .and_then(|naive| naive.and_local_timezone(chrono::Local).single())
                {
                    Some(target) => target - now,
                    None => max_step(),
                }
            }
        }
    }

}
