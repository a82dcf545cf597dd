//! Turn a raw timetable into today's departures from one stop.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::domain::{TimeOfDay, TimetabledArrival};

use super::day::DayType;
use super::model::{Route, TimetableResponse};

/// Destination used when a terminus has no stop record.
pub const UNKNOWN_DESTINATION: &str = "Unknown";

/// Resolve the journeys in `response` that run on `day`.
///
/// Every departure is emitted with `origin_name` as its station and the
/// terminus of its interval table as its destination. Departures that have
/// already left are still returned; callers filter on validity.
///
/// A route block with an empty interval table yields nothing, since the
/// terminus of that block cannot be trusted. A missing schedule for the day
/// also yields nothing.
pub fn resolve(
    response: &TimetableResponse,
    origin_name: &str,
    line_id: &str,
    day: DayType,
    now: TimeOfDay,
) -> Vec<TimetabledArrival> {
    let stop_names: HashMap<&str, &str> = response
        .stops
        .iter()
        .filter_map(|s| Some((s.naptan()?, s.name.as_str())))
        .collect();

    response
        .timetable
        .routes
        .iter()
        .flat_map(|route| resolve_route(route, &stop_names, origin_name, line_id, day, now))
        .collect()
}

fn resolve_route(
    route: &Route,
    stop_names: &HashMap<&str, &str>,
    origin_name: &str,
    line_id: &str,
    day: DayType,
    now: TimeOfDay,
) -> Vec<TimetabledArrival> {
    if route.station_intervals.iter().any(|t| t.intervals.is_empty()) {
        debug!(line = line_id, "Empty interval table, skipping route");
        return Vec::new();
    }

    let termini: HashMap<&str, &str> = route
        .station_intervals
        .iter()
        .filter_map(|t| Some((t.id.as_str(), t.intervals.last()?.stop_id.as_str())))
        .collect();

    let Some(schedule) = day.select(&route.schedules) else {
        trace!(line = line_id, day = ?day, "No schedule for day");
        return Vec::new();
    };

    schedule
        .known_journeys
        .iter()
        .filter_map(|journey| {
            let interval_id = journey.interval_id.to_string();
            let Some(terminus) = termini.get(interval_id.as_str()) else {
                trace!(line = line_id, interval_id = %interval_id, "Journey references unknown interval");
                return None;
            };
            let destination = stop_names
                .get(terminus)
                .copied()
                .unwrap_or(UNKNOWN_DESTINATION);

            Some(TimetabledArrival {
                station_name: origin_name.to_string(),
                destination_name: Some(destination.to_string()),
                line_id: Some(line_id.to_string()),
                departure: TimeOfDay::from_parts(&journey.hour, &journey.minute),
                now,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timetable::model::{Interval, KnownJourney, Schedule, StationIntervals, Timetable, TimetabledStop};

    fn journey(hour: &str, minute: &str, interval_id: i64) -> KnownJourney {
        KnownJourney {
            hour: hour.into(),
            minute: minute.into(),
            interval_id,
        }
    }

    fn intervals(id: &str, stops: &[&str]) -> StationIntervals {
        StationIntervals {
            id: id.into(),
            intervals: stops
                .iter()
                .enumerate()
                .map(|(i, s)| Interval {
                    stop_id: (*s).into(),
                    time_to_arrival: (i as f64) * 2.0,
                })
                .collect(),
        }
    }

    fn stop(id: &str, name: &str) -> TimetabledStop {
        TimetabledStop {
            id: Some(id.into()),
            name: name.into(),
            ..Default::default()
        }
    }

    fn response(routes: Vec<Route>) -> TimetableResponse {
        TimetableResponse {
            stops: vec![
                stop("940GZZLUEGW", "Edgware Underground Station"),
                stop("940GZZLUHBT", "High Barnet Underground Station"),
            ],
            timetable: Timetable {
                departure_stop_id: "940GZZLUCHX".into(),
                routes,
            },
        }
    }

    fn northern_route(schedules: Vec<Schedule>) -> Route {
        Route {
            station_intervals: vec![
                intervals("0", &["940GZZLUEMB", "940GZZLUEGW"]),
                intervals("1", &["940GZZLUEMB", "940GZZLUHBT"]),
                intervals("2", &["940GZZLUEMB", "940GZZLUMDN"]),
            ],
            schedules,
        }
    }

    fn schedule(name: &str, journeys: Vec<KnownJourney>) -> Schedule {
        Schedule {
            name: name.into(),
            known_journeys: journeys,
            ..Default::default()
        }
    }

    #[test]
    fn resolves_destinations_and_times() {
        let resp = response(vec![northern_route(vec![schedule(
            "Monday - Friday",
            vec![journey("13", "05", 0), journey("13", "12", 1)],
        )])]);

        let out = resolve(&resp, "Charing Cross", "northern", DayType::Weekday, TimeOfDay::new(13, 0));
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].destination_name.as_deref(), Some("Edgware Underground Station"));
        assert_eq!(out[0].departure, TimeOfDay::new(13, 5));
        assert_eq!(out[0].time_to_station_secs(), Some(300));
        assert_eq!(out[1].destination_name.as_deref(), Some("High Barnet Underground Station"));
        assert_eq!(out[1].station_name, "Charing Cross");
        assert_eq!(out[1].line_id.as_deref(), Some("northern"));
    }

    #[test]
    fn terminus_without_stop_record_is_unknown() {
        let resp = response(vec![northern_route(vec![schedule(
            "Monday - Friday",
            vec![journey("9", "30", 2)],
        )])]);

        let out = resolve(&resp, "Charing Cross", "northern", DayType::Weekday, TimeOfDay::new(9, 0));
        assert_eq!(out[0].destination_name.as_deref(), Some(UNKNOWN_DESTINATION));
    }

    #[test]
    fn saturday_only_schedule_on_tuesday_is_empty() {
        let resp = response(vec![northern_route(vec![schedule(
            "Saturday",
            vec![journey("10", "00", 0)],
        )])]);

        let out = resolve(&resp, "Charing Cross", "northern", DayType::Weekday, TimeOfDay::new(9, 0));
        assert!(out.is_empty());
    }

    #[test]
    fn empty_interval_table_rejects_route() {
        let mut route = northern_route(vec![schedule("Sunday", vec![journey("10", "00", 0)])]);
        route.station_intervals.push(StationIntervals {
            id: "3".into(),
            intervals: vec![],
        });
        let good = northern_route(vec![schedule("Sunday", vec![journey("11", "00", 1)])]);

        let out = resolve(&response(vec![route, good]), "Charing Cross", "northern", DayType::Sunday, TimeOfDay::new(9, 0));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].departure, TimeOfDay::new(11, 0));
    }

    #[test]
    fn unknown_interval_id_is_skipped() {
        let resp = response(vec![northern_route(vec![schedule(
            "Sunday",
            vec![journey("10", "00", 99), journey("10", "05", 0)],
        )])]);

        let out = resolve(&resp, "Charing Cross", "northern", DayType::Sunday, TimeOfDay::new(9, 0));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn past_departures_are_returned_invalid() {
        let resp = response(vec![northern_route(vec![schedule(
            "Monday - Friday",
            vec![journey("8", "59", 0), journey("9", "01", 0)],
        )])]);

        let out = resolve(&resp, "Charing Cross", "northern", DayType::Weekday, TimeOfDay::new(9, 0));
        let valid: Vec<_> = out.iter().filter(|a| a.is_valid()).collect();
        assert_eq!(out.len(), 2);
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].departure, TimeOfDay::new(9, 1));
    }

    #[test]
    fn out_of_range_time_is_invalid() {
        let resp = response(vec![northern_route(vec![schedule(
            "Monday - Friday",
            vec![journey("4294967295", "60", 0)],
        )])]);

        let out = resolve(&resp, "Charing Cross", "northern", DayType::Weekday, TimeOfDay::new(9, 0));
        assert_eq!(out.len(), 1);
        assert!(!out[0].is_valid());
    }

    #[test]
    fn unparseable_time_is_invalid() {
        let resp = response(vec![northern_route(vec![schedule(
            "Monday - Friday",
            vec![journey("", "30", 0)],
        )])]);

        let out = resolve(&resp, "Charing Cross", "northern", DayType::Weekday, TimeOfDay::new(9, 0));
        assert_eq!(out.len(), 1);
        assert!(!out[0].is_valid());
    }
}
