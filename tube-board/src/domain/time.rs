//! Time-of-day handling for live and timetabled arrivals.
//!
//! Upstream timetables give departures as separate hour and minute fields
//! with no date attached, and live predictions are compared against them at
//! minute granularity. [`TimeOfDay`] is the common currency for both.
//!
//! No midnight wraparound is modelled: a time earlier in the day than "now"
//! has already departed, it is never "tomorrow". Hours may exceed 23 when a
//! timetable counts past midnight relative to the start of the service day.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use chrono_tz::Europe::London;
use std::cmp::Ordering;
use std::fmt;

/// A 24-hour wall-clock time with no date or zone.
///
/// A time is either fully known (hour and minute) or fully unknown. Unknown
/// times are produced when upstream sends unparseable fields; every
/// comparison or arithmetic operation involving one yields `None`.
///
/// # Examples
///
/// ```
/// use tube_board::domain::TimeOfDay;
///
/// let t = TimeOfDay::new(9, 5);
/// assert_eq!(t.to_string(), "09:05");
/// assert_eq!(TimeOfDay::invalid().to_string(), "");
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TimeOfDay(Option<(u32, u32)>);

impl TimeOfDay {
    /// Create a time. Minutes above 59 carry into the hour; if the hour
    /// then overflows the time is unknown.
    pub fn new(hour: u32, minute: u32) -> Self {
        Self(hour.checked_add(minute / 60).map(|h| (h, minute % 60)))
    }

    /// The unknown time.
    pub fn invalid() -> Self {
        Self(None)
    }

    /// Build a time from upstream's string fields.
    ///
    /// If either field fails to parse the whole time is unknown.
    ///
    /// ```
    /// use tube_board::domain::TimeOfDay;
    ///
    /// assert_eq!(TimeOfDay::from_parts("13", "07"), TimeOfDay::new(13, 7));
    /// assert!(!TimeOfDay::from_parts("13", "").is_valid());
    /// assert!(!TimeOfDay::from_parts("x", "07").is_valid());
    /// ```
    pub fn from_parts(hour: &str, minute: &str) -> Self {
        match (hour.trim().parse::<u32>(), minute.trim().parse::<u32>()) {
            (Ok(h), Ok(m)) => Self::new(h, m),
            _ => Self::invalid(),
        }
    }

    /// Truncate a clock time to hour and minute.
    pub fn from_naive_time(time: NaiveTime) -> Self {
        Self::new(time.hour(), time.minute())
    }

    /// The current London wall-clock time, seconds discarded.
    pub fn now() -> Self {
        LondonClock.time_of_day()
    }

    /// Whether both fields are known.
    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    /// Hour, possibly above 23 for after-midnight service.
    pub fn hour(&self) -> Option<u32> {
        self.0.map(|(h, _)| h)
    }

    /// Minute (0-59).
    pub fn minute(&self) -> Option<u32> {
        self.0.map(|(_, m)| m)
    }

    fn total_minutes(&self) -> Option<i64> {
        self.0.map(|(h, m)| h as i64 * 60 + m as i64)
    }

    /// Seconds from `self` until `other`.
    ///
    /// Returns `None` if either time is unknown, or if `other` is earlier in
    /// the day than `self`.
    ///
    /// ```
    /// use tube_board::domain::TimeOfDay;
    ///
    /// let from = TimeOfDay::new(10, 50);
    /// assert_eq!(from.seconds_until(TimeOfDay::new(11, 10)), Some(1200));
    /// assert_eq!(from.seconds_until(TimeOfDay::new(10, 49)), None);
    /// ```
    pub fn seconds_until(&self, other: TimeOfDay) -> Option<i64> {
        let from = self.total_minutes()?;
        let to = other.total_minutes()?;
        if to < from {
            return None;
        }
        Some((to - from) * 60)
    }

    /// Project the time forward.
    ///
    /// Negative offsets are rejected. The hour never wraps at 24.
    ///
    /// ```
    /// use tube_board::domain::TimeOfDay;
    ///
    /// let t = TimeOfDay::new(23, 50);
    /// assert_eq!(t.add_minutes(20), Some(TimeOfDay::new(24, 10)));
    /// assert_eq!(t.add_minutes(-1), None);
    /// ```
    pub fn add_minutes(&self, minutes: i64) -> Option<Self> {
        if minutes < 0 {
            return None;
        }
        let total = self.total_minutes()?.checked_add(minutes)?;
        let hour = u32::try_from(total / 60).ok()?;
        Some(Self::new(hour, (total % 60) as u32))
    }

    /// Project forward by whole minutes; sub-minute offsets are a no-op.
    pub fn add_seconds(&self, seconds: i64) -> Option<Self> {
        if seconds > 59 {
            self.add_minutes(seconds / 60)
        } else if seconds < 0 {
            None
        } else {
            Some(*self)
        }
    }

    /// Whether this time is already behind `now`.
    ///
    /// `None` when either time is unknown.
    pub fn has_passed(&self, now: TimeOfDay) -> Option<bool> {
        match now.partial_cmp(self)? {
            Ordering::Greater => Some(true),
            _ if self.is_valid() => Some(false),
            _ => None,
        }
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(time: NaiveTime) -> Self {
        Self::from_naive_time(time)
    }
}

impl PartialOrd for TimeOfDay {
    /// Unknown times are unordered against known ones.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.0, other.0) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            (None, None) => Some(Ordering::Equal),
            _ => None,
        }
    }
}

impl fmt::Debug for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some((h, m)) => write!(f, "TimeOfDay({h:02}:{m:02})"),
            None => f.write_str("TimeOfDay(unknown)"),
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some((h, m)) => write!(f, "{h:02}:{m:02}"),
            None => Ok(()),
        }
    }
}

/// Source of the current London wall-clock time.
///
/// The board takes one of these rather than reading the system clock so
/// timetable arithmetic can be tested against a fixed instant.
pub trait Clock: Send + Sync {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;

    /// Current time of day, seconds discarded.
    fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay::from_naive_time(self.now().time())
    }

    /// Current local date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// The system clock, converted to Europe/London.
#[derive(Debug, Clone, Copy, Default)]
pub struct LondonClock;

impl Clock for LondonClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&London).naive_local()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Freeze the clock at the given date, hour and minute.
    pub fn at(date: NaiveDate, hour: u32, minute: u32) -> Option<Self> {
        date.and_hms_opt(hour, minute, 0).map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
