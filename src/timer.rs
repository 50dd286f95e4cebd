use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Handle to a periodic task started with [`schedule`]
///
/// The task runs until the handle is released, either through
/// [`TimerHandle::cancel`] or by dropping it. Release happens once; after it no
/// further tick fires.
#[derive(Debug)]
pub struct TimerHandle {
    task: Option<JoinHandle<()>>,
}

impl TimerHandle {
    /// Whether the periodic task is still scheduled
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stops the periodic task
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.release();
    }
}

/// Runs `on_tick` every `period` on the current tokio runtime
///
/// The first tick fires one full period after scheduling, like a browser
/// `setInterval`. Ticks that fall behind are delayed rather than bunched up.
///
/// # Arguments
/// * `period` - Interval between ticks, must be non-zero
/// * `on_tick` - Callback run on every tick
///
/// # Returns
/// * A `TimerHandle` that must be kept alive for as long as ticks are wanted
///
/// # Panics
/// * Must be called from within a tokio runtime
pub fn schedule<F>(period: Duration, mut on_tick: F) -> TimerHandle
where
    F: FnMut() + Send + 'static,
{
    let task = tokio::spawn(async move {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            on_tick();
        }
    });

    TimerHandle { task: Some(task) }
}
