use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Days, Timelike, Utc};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::service::SocialService;

/// Configuration for the trend decay scheduler.
#[derive(Debug, Clone)]
pub struct DecayConfig {
    /// UTC wall-clock hour at which the daily decay tick runs.
    pub hour_utc: u32,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self { hour_utc: 0 }
    }
}

/// Seconds from `now` until the next `hour_utc:00:00` trigger.
///
/// If the trigger time already passed today, the next one is tomorrow.
/// Never returns zero, so a tick fired exactly on the trigger does not
/// immediately re-fire.
fn until_next_run(now: DateTime<Utc>, hour_utc: u32) -> Duration {
    let today = now
        .with_hour(hour_utc)
        .and_then(|t| t.with_minute(0))
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now);

    let next = if today > now {
        today
    } else {
        today.checked_add_days(Days::new(1)).unwrap_or(today)
    };

    let secs = (next - now).num_seconds().max(1);
    Duration::from_secs(secs as u64)
}

/// Start the daily trend decay loop.
///
/// Waits until the configured wall-clock hour, runs the same
/// [`SocialService::decay_trends`] routine the manual admin trigger
/// uses, and goes back to sleep. A failed tick is logged and waited
/// out — no retry until the next scheduled run.
///
/// Returns a CancellationToken that stops the loop when cancelled.
pub fn start(service: Arc<SocialService>, config: DecayConfig) -> CancellationToken {
    let cancel = CancellationToken::new();

    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            info!(hour_utc = config.hour_utc, "trend decay scheduler started");
            loop {
                let wait = until_next_run(Utc::now(), config.hour_utc);
                tokio::select! {
                    _ = cancel.cancelled() => {
                        info!("trend decay scheduler stopped");
                        break;
                    }
                    _ = tokio::time::sleep(wait) => {
                        match service.decay_trends() {
                            Ok(0) => {}
                            Ok(n) => info!("trend decay: {n} posts decayed"),
                            Err(e) => error!("trend decay error: {e}"),
                        }
                    }
                }
            }
        });
    }

    cancel
}
