//! Conversion from TfL wire records to domain arrivals.

use chrono::{DateTime, NaiveDateTime};
use chrono_tz::Europe::London;

use crate::domain::{Countdown, Mode, PredictedArrival, TimeOfDay};

use super::types::{ArrivalDeparture, StopArrival};

/// Convert a seconds-countdown record.
///
/// `queried_naptan` is used when the record omits its own stop identifier.
pub fn convert_stop_arrival(record: StopArrival, queried_naptan: &str) -> PredictedArrival {
    PredictedArrival {
        station_name: record.station_name,
        destination_name: record.destination_name,
        line_id: record.line_id,
        naptan: Some(record.naptan_id.unwrap_or_else(|| queried_naptan.to_string())),
        mode: record.mode_name.unwrap_or(Mode::Unknown),
        platform_name: record.platform_name,
        countdown: Countdown::Seconds(record.time_to_station),
    }
}

/// Convert an mm:ss departures record.
///
/// The departures feed does not say which line a record belongs to, so the
/// line the request was made for is stamped on.
pub fn convert_arrival_departure(
    record: ArrivalDeparture,
    queried_naptan: &str,
    mode: Mode,
    line_id: &str,
) -> PredictedArrival {
    let scheduled = record
        .scheduled_time_of_departure
        .as_deref()
        .map_or_else(TimeOfDay::invalid, london_time_of_day);

    PredictedArrival {
        station_name: record.station_name,
        destination_name: record.destination_name,
        line_id: Some(line_id.to_string()),
        naptan: Some(record.naptan_id.unwrap_or_else(|| queried_naptan.to_string())),
        mode,
        platform_name: record.platform_name,
        countdown: Countdown::MinutesSeconds {
            remaining: record.minutes_and_seconds_to_departure,
            scheduled,
        },
    }
}

/// London wall-clock time of an ISO 8601 timestamp.
///
/// Timestamps with an offset are converted; bare timestamps are taken as
/// London local time already. Anything else is unknown.
///
/// ```
/// use tube_board::domain::TimeOfDay;
/// use tube_board::tfl::london_time_of_day;
///
/// // British Summer Time: UTC+1
/// assert_eq!(london_time_of_day("2024-07-01T09:15:00Z"), TimeOfDay::new(10, 15));
/// assert_eq!(london_time_of_day("2024-01-10T09:15:00Z"), TimeOfDay::new(9, 15));
/// assert!(!london_time_of_day("soon").is_valid());
/// ```
pub fn london_time_of_day(iso: &str) -> TimeOfDay {
    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return TimeOfDay::from_naive_time(dt.with_timezone(&London).time());
    }
    match NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S") {
        Ok(naive) => TimeOfDay::from_naive_time(naive.time()),
        Err(_) => TimeOfDay::invalid(),
    }
}
