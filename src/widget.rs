//! Widgets mounted on a tokio runtime
//!
//! Mounting starts the widget's periodic timer and unmounting (or dropping)
//! stops it. Each mounted widget owns its state; nothing is shared between
//! instances.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::countdown::{COUNTDOWN_INTERVAL_MS, Countdown, CountdownState};
use crate::rotation::Carousel;
use crate::timer::{self, TimerHandle};

/// Source of the current instant
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

fn lock<T>(state: &Mutex<T>) -> MutexGuard<'_, T> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Countdown recomputed once per second while mounted
pub struct MountedCountdown {
    state: Arc<Mutex<Countdown>>,
    timer: TimerHandle,
}

impl MountedCountdown {
    /// Computes the countdown right away, then on every tick
    pub fn mount<C: Clock>(countdown: Countdown, clock: C) -> Self {
        Self::mount_every(countdown, clock, Duration::from_millis(COUNTDOWN_INTERVAL_MS))
    }

    pub fn mount_every<C: Clock>(mut countdown: Countdown, clock: C, period: Duration) -> Self {
        countdown.tick(clock.now());
        let state = Arc::new(Mutex::new(countdown));

        let ticking = Arc::clone(&state);
        let timer = timer::schedule(period, move || {
            lock(&ticking).tick(clock.now());
        });

        Self { state, timer }
    }

    /// Current countdown state
    pub fn snapshot(&self) -> CountdownState {
        lock(&self.state).state()
    }

    pub fn display_fields(&self) -> Vec<(&'static str, String)> {
        lock(&self.state).display_fields()
    }

    pub fn is_ticking(&self) -> bool {
        self.timer.is_active()
    }

    /// Stops ticking and hands back the final state
    pub fn unmount(self) -> CountdownState {
        self.timer.cancel();
        lock(&self.state).state()
    }
}

/// Carousel advanced on a fixed period while mounted
pub struct MountedCarousel {
    state: Arc<Mutex<Carousel>>,
    timer: TimerHandle,
}

impl MountedCarousel {
    pub fn mount(carousel: Carousel, period: Duration) -> Self {
        let state = Arc::new(Mutex::new(carousel));

        let ticking = Arc::clone(&state);
        let timer = timer::schedule(period, move || {
            lock(&ticking).advance();
        });

        Self { state, timer }
    }

    pub fn cursor(&self) -> usize {
        lock(&self.state).cursor()
    }

    pub fn current(&self) -> String {
        lock(&self.state).current().to_string()
    }

    pub fn is_ticking(&self) -> bool {
        self.timer.is_active()
    }

    /// Stops rotating and returns the cursor it stopped at
    pub fn unmount(self) -> usize {
        self.timer.cancel();
        lock(&self.state).cursor()
    }
}
