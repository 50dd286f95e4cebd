use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;

const MS_PER_SECOND: i64 = 1000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Refresh cadence of the countdown widget
pub const COUNTDOWN_INTERVAL_MS: u64 = 1000;

/// Date-time layouts accepted for targets given without an offset
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// The fixed instant the countdown runs towards
///
/// An unparseable target is kept as `None` and behaves like an instant in
/// the past, so the widget shows the arrived state instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownTarget {
    instant: Option<DateTime<Utc>>,
}

impl CountdownTarget {
    /// Target at a known instant
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self {
            instant: Some(instant),
        }
    }

    /// Target that was never set; counts as already arrived
    pub fn unset() -> Self {
        Self { instant: None }
    }

    /// Parses a target date-time
    ///
    /// RFC 3339 strings carry their own offset. Naive strings such as
    /// `2025-06-22T00:00:00` are read as wall-clock time in `offset`.
    ///
    /// # Arguments
    /// * `input` - Date-time text from the content configuration
    /// * `offset` - Offset used for naive date-times
    ///
    /// # Returns
    /// * A target; invalid input yields an unset target that counts as arrived
    ///
    /// # Examples
    /// ```
    /// use chrono::FixedOffset;
    /// use undangan::countdown::CountdownTarget;
    ///
    /// let wib = FixedOffset::east_opt(7 * 3600).unwrap();
    /// assert!(CountdownTarget::parse("2025-06-22T00:00:00", wib).instant().is_some());
    /// assert!(CountdownTarget::parse("someday", wib).instant().is_none());
    /// ```
    pub fn parse(input: &str, offset: FixedOffset) -> Self {
        let input = input.trim();
        if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
            return Self::at(instant.with_timezone(&Utc));
        }

        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
                if let Some(local) = offset.from_local_datetime(&naive).single() {
                    return Self::at(local.with_timezone(&Utc));
                }
            }
        }

        log::warn!("countdown target {:?} is not a date-time, treating it as arrived", input);
        Self::unset()
    }

    pub fn instant(&self) -> Option<DateTime<Utc>> {
        self.instant
    }

    /// Milliseconds left until the target, non-positive once it has passed
    pub fn millis_until(&self, now: DateTime<Utc>) -> i64 {
        match self.instant {
            Some(target) => (target - now).num_milliseconds(),
            None => 0,
        }
    }
}

/// Remaining time split into display fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RemainingDuration {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl RemainingDuration {
    /// Splits a positive millisecond difference into days/hours/minutes/seconds
    pub fn from_millis(diff: i64) -> Self {
        Self {
            days: diff / MS_PER_DAY,
            hours: (diff / MS_PER_HOUR) % 24,
            minutes: (diff / MS_PER_MINUTE) % 60,
            seconds: (diff / MS_PER_SECOND) % 60,
        }
    }

    /// Fields in display order with their labels
    pub fn fields(&self) -> [(&'static str, i64); 4] {
        [
            ("Days", self.days),
            ("Hours", self.hours),
            ("Minutes", self.minutes),
            ("Seconds", self.seconds),
        ]
    }

    /// Total whole seconds represented by the fields
    pub fn total_seconds(&self) -> i64 {
        ((self.days * 24 + self.hours) * 60 + self.minutes) * 60 + self.seconds
    }
}

/// Computes the remaining time until `target`
///
/// # Returns
/// * `Some` while `now` is before the target, `None` once it has arrived
///
/// # Examples
/// ```
/// use chrono::{Duration, Utc};
/// use undangan::countdown::{CountdownTarget, remaining};
///
/// let now = Utc::now();
/// let target = CountdownTarget::at(now + Duration::milliseconds(90_061_000));
/// let left = remaining(&target, now).unwrap();
/// assert_eq!((left.days, left.hours, left.minutes, left.seconds), (1, 1, 1, 1));
/// ```
pub fn remaining(target: &CountdownTarget, now: DateTime<Utc>) -> Option<RemainingDuration> {
    let diff = target.millis_until(now);
    if diff > 0 {
        Some(RemainingDuration::from_millis(diff))
    } else {
        None
    }
}

/// Formats a field value, padding 0 through 9 to two digits
pub fn pad2(value: i64) -> String {
    if (0..10).contains(&value) {
        format!("0{}", value)
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Counting(RemainingDuration),
    Arrived,
}

/// Countdown widget state
///
/// Once `Arrived` is reached the widget stays there; the target is fixed at
/// construction so there is nothing that could bring it back.
#[derive(Debug, Clone)]
pub struct Countdown {
    target: CountdownTarget,
    state: CountdownState,
}

impl Countdown {
    pub fn new(target: CountdownTarget, now: DateTime<Utc>) -> Self {
        let state = match remaining(&target, now) {
            Some(left) => CountdownState::Counting(left),
            None => CountdownState::Arrived,
        };
        Self { target, state }
    }

    pub fn target(&self) -> &CountdownTarget {
        &self.target
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn has_arrived(&self) -> bool {
        self.state == CountdownState::Arrived
    }

    /// Recomputes the remaining time for the current instant
    pub fn tick(&mut self, now: DateTime<Utc>) -> CountdownState {
        if let CountdownState::Counting(_) = self.state {
            self.state = match remaining(&self.target, now) {
                Some(left) => CountdownState::Counting(left),
                None => {
                    log::info!("countdown reached its target");
                    CountdownState::Arrived
                }
            };
        }
        self.state
    }

    /// Padded display fields; empty once arrived
    pub fn display_fields(&self) -> Vec<(&'static str, String)> {
        match self.state {
            CountdownState::Counting(left) => left
                .fields()
                .iter()
                .map(|(label, value)| (*label, pad2(*value)))
                .collect(),
            CountdownState::Arrived => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn wib() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).unwrap()
    }

    #[test]
    fn naive_target_uses_offset() {
        let target = CountdownTarget::parse("2025-06-22T00:00:00", wib());
        let expected = Utc.with_ymd_and_hms(2025, 6, 21, 17, 0, 0).unwrap();
        assert_eq!(target.instant(), Some(expected));
    }

    #[test]
    fn rfc3339_target_keeps_its_offset() {
        let target = CountdownTarget::parse("2025-06-22T00:00:00Z", wib());
        let expected = Utc.with_ymd_and_hms(2025, 6, 22, 0, 0, 0).unwrap();
        assert_eq!(target.instant(), Some(expected));
    }

    #[test]
    fn unset_target_has_no_time_left() {
        let target = CountdownTarget::parse("", wib());
        assert_eq!(target.millis_until(Utc::now()), 0);
        assert!(remaining(&target, Utc::now()).is_none());
    }

    #[test]
    fn sub_second_remainder_still_counts() {
        let now = Utc::now();
        let target = CountdownTarget::at(now + Duration::milliseconds(400));
        let left = remaining(&target, now).unwrap();
        assert_eq!(left.total_seconds(), 0);
    }

    #[test]
    fn pad_boundaries() {
        assert_eq!(pad2(0), "00");
        assert_eq!(pad2(9), "09");
        assert_eq!(pad2(10), "10");
        assert_eq!(pad2(-1), "-1");
        assert_eq!(pad2(365), "365");
    }
}
