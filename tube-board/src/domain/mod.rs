//! Domain types for departure boards.
//!
//! Shared vocabulary for the rest of the crate: clock times, transport modes,
//! the line table, stop-name clean-up and the arrival sum type.

mod arrival;
mod line;
mod mode;
mod names;
mod time;

pub use arrival::{Arrival, ArrivalKey, Countdown, PredictedArrival, TimetabledArrival, dedup};
pub use line::{LINES, Line};
pub use mode::Mode;
pub use names::{
    NO_BUS_DESTINATION_FOUND, NO_STATION_FOUND, sanitise_bus_stop_name, sanitise_station_name,
};
pub use time::{Clock, FixedClock, LondonClock, TimeOfDay};
