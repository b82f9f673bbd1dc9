//! Cosmetic progress indicator.
//!
//! The percentage has no relation to upload or processing progress; it only
//! shows that something is happening while the request is in flight.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Next progress value: add `step` while below `cap`, never exceeding it.
pub fn advance(current: u8, step: u8, cap: u8) -> u8 {
    if current < cap {
        current.saturating_add(step).min(cap)
    } else {
        current
    }
}

/// A repeating timer task that is aborted when the ticker is dropped.
///
/// The first tick fires one `period` after start. The callback returns
/// `false` to stop the timer early (for example when its receiver is gone).
#[derive(Debug)]
pub struct ProgressTicker {
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    pub fn start<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if !on_tick() {
                    break;
                }
            }
        });
        Self { handle }
    }

    /// Stop the timer. Equivalent to dropping the ticker.
    pub fn stop(self) {}

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
