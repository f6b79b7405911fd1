//! Remind command implementation

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use tracing::info;

use speakdrill::config::Config;
use speakdrill::progress::{
    Clock, LogNotifier, ReminderSchedule, ReminderScheduler, SystemClock,
};

/// Run the daily practice reminder in the foreground. Sleeps until the next
/// scheduling step, fires, and rearms. Runs until interrupted.
pub fn remind_command(config: &Config) -> Result<()> {
    if !config.reminder.enabled {
        bail!("reminders are disabled; set `reminder.enabled = true` in the config");
    }

    let clock = Arc::new(SystemClock);
    let scheduler = ReminderScheduler::new(
        clock.clone(),
        Arc::new(LogNotifier),
        ReminderSchedule {
            hour: config.reminder.hour,
            minute: config.reminder.minute,
        },
    );
    if !scheduler.start() {
        bail!("notification permission denied");
    }
    info!(
        "reminder armed for {:02}:{:02} daily",
        config.reminder.hour, config.reminder.minute
    );

    loop {
        let Some(step_at) = scheduler.next_step_at() else {
            break;
        };
        let wait_ms = (step_at - clock.now_ms()).max(0) as u64;
        std::thread::sleep(Duration::from_millis(wait_ms));
        scheduler.tick();
    }

    Ok(())
}
