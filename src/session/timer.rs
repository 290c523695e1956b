//! Cancellable repeating tick timer
//!
//! Wraps a tokio [`Interval`] so that stopping and rescheduling the game loop are
//! explicit calls instead of side effects of swapping a handle. The first tick
//! fires one full period after scheduling, not immediately.

use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tracing::trace;

#[derive(Debug, Default)]
pub struct TickTimer {
    interval: Option<Interval>,
}

impl TickTimer {
    pub fn new() -> Self {
        Self { interval: None }
    }

    /// Begin ticking every `period`. Must be called inside a tokio runtime.
    pub fn start(&mut self, period: Duration) {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
        trace!(period_ms = period.as_millis() as u64, "tick timer scheduled");
    }

    /// Stop ticking. A cancelled timer never fires until started again.
    pub fn cancel(&mut self) {
        if self.interval.take().is_some() {
            trace!("tick timer cancelled");
        }
    }

    /// Drop the pending tick and start over at `period`
    pub fn reschedule(&mut self, period: Duration) {
        self.cancel();
        self.start(period);
    }

    pub fn is_active(&self) -> bool {
        self.interval.is_some()
    }

    pub fn period(&self) -> Option<Duration> {
        self.interval.as_ref().map(Interval::period)
    }

    /// Wait for the next tick; pends forever while cancelled
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
