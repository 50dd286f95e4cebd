use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use undangan::countdown::{Countdown, CountdownState, CountdownTarget, RemainingDuration, pad2, remaining};

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap()
}

fn target_in(ms: i64) -> CountdownTarget {
    CountdownTarget::at(fixed_now() + Duration::milliseconds(ms))
}

fn assert_fields(left: RemainingDuration, days: i64, hours: i64, minutes: i64, seconds: i64) {
    assert_eq!(
        (left.days, left.hours, left.minutes, left.seconds),
        (days, hours, minutes, seconds),
        "unexpected split of {:?}",
        left
    );
}

#[test]
fn one_of_each_unit() {
    let left = remaining(&target_in(90_061_000), fixed_now()).expect("target is in the future");
    assert_fields(left, 1, 1, 1, 1);
}

#[test]
fn past_target_has_arrived() {
    assert!(remaining(&target_in(-5000), fixed_now()).is_none());

    let countdown = Countdown::new(target_in(-5000), fixed_now());
    assert_eq!(countdown.state(), CountdownState::Arrived);
    assert!(countdown.display_fields().is_empty());
}

#[test]
fn exactly_at_target_has_arrived() {
    assert!(remaining(&target_in(0), fixed_now()).is_none());
}

#[test]
fn large_spans_split_correctly() {
    // 40 days, 23:59:59.999
    let ms = 40 * 86_400_000 + 23 * 3_600_000 + 59 * 60_000 + 59_999;
    let left = remaining(&target_in(ms), fixed_now()).unwrap();
    assert_fields(left, 40, 23, 59, 59);
}

#[test]
fn remaining_time_shrinks_as_now_advances() {
    let target = target_in(3 * 86_400_000 + 1234);
    let mut previous_ms = i64::MAX;
    let mut previous_seconds = i64::MAX;

    let mut now = fixed_now();
    loop {
        let ms = target.millis_until(now);
        assert!(ms < previous_ms, "remaining milliseconds must strictly decrease");
        previous_ms = ms;

        match remaining(&target, now) {
            Some(left) => {
                assert!(now < target.instant().unwrap());
                assert!(left.total_seconds() <= previous_seconds);
                previous_seconds = left.total_seconds();
            }
            None => {
                assert!(now >= target.instant().unwrap());
                break;
            }
        }
        now += Duration::milliseconds(7_777_777);
    }
}

#[test]
fn arrived_is_terminal() {
    let mut countdown = Countdown::new(target_in(1500), fixed_now());
    assert!(matches!(countdown.state(), CountdownState::Counting(_)));

    countdown.tick(fixed_now() + Duration::milliseconds(1000));
    let fields = countdown.display_fields();
    assert_eq!(
        fields,
        vec![
            ("Days", "00".to_string()),
            ("Hours", "00".to_string()),
            ("Minutes", "00".to_string()),
            ("Seconds", "00".to_string()),
        ]
    );

    assert_eq!(countdown.tick(fixed_now() + Duration::milliseconds(1500)), CountdownState::Arrived);
    // going back in time does not revive it
    assert_eq!(countdown.tick(fixed_now()), CountdownState::Arrived);
    assert!(countdown.has_arrived());
}

#[test]
fn invalid_target_shows_arrived() {
    let offset = FixedOffset::east_opt(7 * 3600).unwrap();
    for input in ["", "besok", "2025-13-40T00:00:00", "22/06/2025"] {
        let countdown = Countdown::new(CountdownTarget::parse(input, offset), fixed_now());
        assert!(countdown.has_arrived(), "{:?} should count as arrived", input);
    }
}

#[test]
fn zero_pad_rule() {
    for v in -20..200 {
        let expected = if (0..10).contains(&v) {
            format!("0{}", v)
        } else {
            v.to_string()
        };
        assert_eq!(pad2(v), expected);
    }
}
