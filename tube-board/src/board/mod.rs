//! Departure boards.
//!
//! A [`Board`] reconciles live predictions with published timetables for one
//! [`Station`] and renders the result as filtered, optionally grouped rows.

mod config;
mod engine;
mod filter;
mod group;
mod source;
mod station;

pub use config::BoardConfig;
pub use engine::{Board, BoardSnapshot, PhaseState, RenderedBoard, TimetablingLines, timetabling_lines};
pub use filter::{ALL_LINES, ANY_DESTINATION, ArrivalFilter, DestinationFilter};
pub use group::{ArrivalGroup, group_arrivals, secondary_line};
pub use source::TransitApi;
pub use station::{BusStop, CombinationStation, Coordinate, SingleStation, Station, merge_stations};
