//! London departure boards.
//!
//! Merges live arrival predictions from the TfL Unified API with published
//! line timetables into a single, deduplicated, filterable list of upcoming
//! departures for a station, and groups them into display rows.

pub mod board;
pub mod cache;
pub mod domain;
pub mod favourites;
pub mod holidays;
pub mod tfl;
pub mod timetable;
