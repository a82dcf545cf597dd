//! Published line timetables.
//!
//! Upstream serves a timetable per (line, stop, direction). Each holds a set
//! of interval tables, one per pattern of service, and named schedules
//! ("Monday - Friday", "Saturday", ...) listing departures by clock time and
//! interval id. The last stop of an interval table is the terminus of every
//! journey that references it.
//!
//! Only the Underground and DLR publish timetables in this form.

mod day;
mod model;
mod resolve;

pub use day::{DayType, Direction};
pub use model::{
    Interval, KnownJourney, Route, Schedule, StationIntervals, Timetable, TimetableResponse,
    TimetabledStop,
};
pub use resolve::{UNKNOWN_DESTINATION, resolve};
