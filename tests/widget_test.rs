#![cfg(feature = "web")]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use tokio::time::{Instant, sleep};
use undangan::countdown::{Countdown, CountdownState, CountdownTarget};
use undangan::rotation::{BACKDROP_INTERVAL_MS, Carousel, Fade, ImagePool};
use undangan::timer;
use undangan::widget::{Clock, MountedCarousel, MountedCountdown};

/// Wall clock that follows tokio's (paused) time
struct PausedClock {
    wall: DateTime<Utc>,
    start: Instant,
}

impl PausedClock {
    fn new(wall: DateTime<Utc>) -> Self {
        Self {
            wall,
            start: Instant::now(),
        }
    }
}

impl Clock for PausedClock {
    fn now(&self) -> DateTime<Utc> {
        self.wall + chrono::Duration::from_std(self.start.elapsed()).unwrap()
    }
}

fn pool(n: usize) -> ImagePool {
    ImagePool::new("test", (0..n).map(|i| format!("/assets/foto-{}.jpg", i)).collect()).unwrap()
}

fn wall() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 21, 9, 0, 0).unwrap()
}

#[tokio::test(start_paused = true)]
async fn carousel_advances_on_its_interval() {
    let period = Duration::from_millis(BACKDROP_INTERVAL_MS);
    let mounted = MountedCarousel::mount(Carousel::new(pool(3), Fade::BACKDROP), period);
    assert_eq!(mounted.cursor(), 0);
    assert!(mounted.is_ticking());

    sleep(period * 2 + Duration::from_millis(100)).await;
    assert_eq!(mounted.cursor(), 2);

    sleep(period).await;
    assert_eq!(mounted.cursor(), 0);
    assert_eq!(mounted.current(), "/assets/foto-0.jpg");

    assert_eq!(mounted.unmount(), 0);
}

#[tokio::test(start_paused = true)]
async fn no_tick_before_first_period() {
    let mounted = MountedCarousel::mount(Carousel::new(pool(4), Fade::PORTRAIT), Duration::from_millis(1000));
    sleep(Duration::from_millis(999)).await;
    assert_eq!(mounted.cursor(), 0);
    sleep(Duration::from_millis(2)).await;
    assert_eq!(mounted.cursor(), 1);
}

#[tokio::test(start_paused = true)]
async fn unmounted_carousel_stops_rotating() {
    let period = Duration::from_millis(1000);
    let mounted = MountedCarousel::mount(Carousel::new(pool(4), Fade::PORTRAIT), period);
    sleep(Duration::from_millis(1500)).await;
    assert_eq!(mounted.unmount(), 1);
}

#[tokio::test(start_paused = true)]
async fn cancelled_timer_never_fires_again() {
    let fired = Arc::new(AtomicUsize::new(0));

    for _ in 0..5 {
        let counter = Arc::clone(&fired);
        let handle = timer::schedule(Duration::from_millis(100), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        sleep(Duration::from_millis(250)).await;
        assert!(handle.is_active());
        handle.cancel();
    }

    let after_unmount = fired.load(Ordering::SeqCst);
    assert_eq!(after_unmount, 10);

    sleep(Duration::from_secs(60)).await;
    assert_eq!(fired.load(Ordering::SeqCst), after_unmount, "ticks fired after cancel");
}

#[tokio::test(start_paused = true)]
async fn dropping_the_handle_cancels() {
    let fired = Arc::new(AtomicUsize::new(0));
    {
        let counter = Arc::clone(&fired);
        let _handle = timer::schedule(Duration::from_millis(100), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        sleep(Duration::from_millis(350)).await;
    }
    let seen = fired.load(Ordering::SeqCst);
    assert_eq!(seen, 3);

    sleep(Duration::from_secs(10)).await;
    assert_eq!(fired.load(Ordering::SeqCst), seen);
}

#[tokio::test(start_paused = true)]
async fn mounted_countdown_ticks_until_arrival() {
    let clock = PausedClock::new(wall());
    let target = CountdownTarget::at(wall() + chrono::Duration::milliseconds(3500));
    let mounted = MountedCountdown::mount(Countdown::new(target, wall()), clock);

    match mounted.snapshot() {
        CountdownState::Counting(left) => assert_eq!(left.seconds, 3),
        CountdownState::Arrived => panic!("target is still ahead"),
    }

    sleep(Duration::from_millis(1100)).await;
    match mounted.snapshot() {
        CountdownState::Counting(left) => assert_eq!(left.seconds, 2),
        CountdownState::Arrived => panic!("target is still ahead"),
    }
    assert_eq!(mounted.display_fields()[3], ("Seconds", "02".to_string()));

    sleep(Duration::from_millis(3000)).await;
    assert_eq!(mounted.snapshot(), CountdownState::Arrived);
    assert!(mounted.display_fields().is_empty());
    assert_eq!(mounted.unmount(), CountdownState::Arrived);
}

#[tokio::test(start_paused = true)]
async fn past_target_mounts_arrived() {
    let clock = PausedClock::new(wall());
    let target = CountdownTarget::at(wall() - chrono::Duration::milliseconds(5000));
    let mounted = MountedCountdown::mount(Countdown::new(target, wall()), clock);
    assert_eq!(mounted.snapshot(), CountdownState::Arrived);
    assert!(mounted.is_ticking());
}
