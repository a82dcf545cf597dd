//! Direction of travel and day-type selection.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::holidays::HolidayCalendar;

use super::model::Schedule;

/// Direction along a line, as upstream names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Inbound,
    Outbound,
}

impl Direction {
    pub const BOTH: [Direction; 2] = [Direction::Inbound, Direction::Outbound];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Inbound => "inbound",
            Direction::Outbound => "outbound",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which published schedule applies on a given date.
///
/// Weekdays share one bucket, represented upstream by Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayType {
    Weekday,
    Saturday,
    Sunday,
    Holiday,
}

impl DayType {
    /// Bucket a weekday, ignoring holidays.
    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sat => DayType::Saturday,
            Weekday::Sun => DayType::Sunday,
            _ => DayType::Weekday,
        }
    }

    /// Day type for `date`.
    ///
    /// An unavailable calendar is treated as "not a holiday".
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use tube_board::holidays::UnknownCalendar;
    /// use tube_board::timetable::DayType;
    ///
    /// let wednesday = NaiveDate::from_ymd_opt(2024, 3, 13).unwrap();
    /// assert_eq!(DayType::for_date(wednesday, &UnknownCalendar), DayType::Weekday);
    /// ```
    pub fn for_date(date: NaiveDate, calendar: &dyn HolidayCalendar) -> Self {
        match calendar.is_public_holiday(date) {
            Some(true) => DayType::Holiday,
            _ => Self::from_weekday(date.weekday()),
        }
    }

    /// The word upstream uses in schedule names for this bucket.
    pub fn schedule_keyword(&self) -> &'static str {
        match self {
            DayType::Weekday => "Monday",
            DayType::Saturday => "Saturday",
            DayType::Sunday => "Sunday",
            DayType::Holiday => "Holiday",
        }
    }

    /// Pick the schedule for this day type.
    ///
    /// An exact name match wins; otherwise the first schedule whose name
    /// contains the keyword, so "Monday - Friday" serves weekdays.
    pub fn select<'a>(&self, schedules: &'a [Schedule]) -> Option<&'a Schedule> {
        let keyword = self.schedule_keyword();
        schedules
            .iter()
            .find(|s| s.name == keyword)
            .or_else(|| schedules.iter().find(|s| s.name.contains(keyword)))
    }
}
