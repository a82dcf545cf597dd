//! Wire model for line timetables.
//!
//! These mirror the upstream `Line/{id}/Timetable/{stop}` response. Only the
//! fields the resolver reads are required; everything else is optional so a
//! sparse response still decodes.

use serde::{Deserialize, Serialize};

/// Timetable for one line, departing one stop, in one direction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableResponse {
    /// Every stop that appears in the interval tables.
    #[serde(default)]
    pub stops: Vec<TimetabledStop>,
    #[serde(default)]
    pub timetable: Timetable,
}

/// A stop referenced by the timetable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetabledStop {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub station_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub towards: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

impl TimetabledStop {
    /// Stop identifier, preferring `id` over `stationId`.
    pub fn naptan(&self) -> Option<&str> {
        self.id.as_deref().or(self.station_id.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timetable {
    #[serde(default)]
    pub departure_stop_id: String,
    #[serde(default)]
    pub routes: Vec<Route>,
}

/// One block of interval tables with the schedules that use them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    #[serde(default)]
    pub station_intervals: Vec<StationIntervals>,
    #[serde(default)]
    pub schedules: Vec<Schedule>,
}

/// Ordered stops for a pattern of service.
///
/// The final entry is the terminus for every journey with this id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationIntervals {
    pub id: String,
    #[serde(default)]
    pub intervals: Vec<Interval>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    pub stop_id: String,
    /// Minutes from the departure stop.
    #[serde(default)]
    pub time_to_arrival: f64,
}

/// The journeys run on one kind of day, e.g. "Monday - Friday".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub name: String,
    #[serde(default)]
    pub known_journeys: Vec<KnownJourney>,
    #[serde(default)]
    pub first_journey: Option<KnownJourney>,
    #[serde(default)]
    pub last_journey: Option<KnownJourney>,
}

/// A departure at a literal clock time following an interval table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnownJourney {
    pub hour: String,
    pub minute: String,
    pub interval_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_upstream_shape() {
        let json = r#"{
            "$type": "Tfl.Api.Presentation.Entities.TimetableResponse, Tfl.Api.Presentation.Entities",
            "lineId": "northern",
            "stops": [
                {"id": "940GZZLUEGW", "stationId": "940GZZLUEGW", "name": "Edgware Underground Station", "lat": 51.613, "lon": -0.275}
            ],
            "timetable": {
                "departureStopId": "940GZZLUCHX",
                "routes": [{
                    "stationIntervals": [
                        {"id": "0", "intervals": [{"stopId": "940GZZLUEGW", "timeToArrival": 32.0}]}
                    ],
                    "schedules": [{
                        "name": "Monday - Friday",
                        "knownJourneys": [{"hour": "5", "minute": "48", "intervalId": 0}],
                        "firstJourney": {"hour": "5", "minute": "48", "intervalId": 0},
                        "lastJourney": {"hour": "5", "minute": "48", "intervalId": 0}
                    }]
                }]
            }
        }"#;

        let response: TimetableResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.stops[0].naptan(), Some("940GZZLUEGW"));
        assert_eq!(response.timetable.departure_stop_id, "940GZZLUCHX");
        let route = &response.timetable.routes[0];
        assert_eq!(route.station_intervals[0].intervals[0].time_to_arrival, 32.0);
        assert_eq!(route.schedules[0].known_journeys[0].minute, "48");
    }

    #[test]
    fn stop_falls_back_to_station_id() {
        let stop: TimetabledStop =
            serde_json::from_str(r#"{"stationId": "940GZZLUBNK", "name": "Bank"}"#).unwrap();
        assert_eq!(stop.naptan(), Some("940GZZLUBNK"));
    }

    #[test]
    fn sparse_response_decodes() {
        let response: TimetableResponse = serde_json::from_str("{}").unwrap();
        assert!(response.stops.is_empty());
        assert!(response.timetable.routes.is_empty());
    }
}
