//! TfL Unified API client.
//!
//! Key characteristics of the upstream feeds:
//! - Underground, DLR and bus stops report a countdown in seconds
//!   (`StopPoint/{id}/Arrivals`)
//! - Overground and Elizabeth line stations report an "mm:ss" countdown with
//!   a scheduled departure time, and omit the line id
//!   (`StopPoint/{id}/ArrivalDepartures`)
//! - Timetables are published per (line, stop, direction) for the
//!   Underground and DLR only

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{TflClient, TflConfig};
pub use convert::{convert_arrival_departure, convert_stop_arrival, london_time_of_day};
pub use error::TflError;
pub use mock::MockTransitApi;
pub use types::{ArrivalDeparture, StopArrival};
