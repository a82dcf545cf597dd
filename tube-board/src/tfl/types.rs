//! Wire types for TfL Unified API arrival feeds.

use serde::{Deserialize, Serialize};

use crate::domain::Mode;

/// A record from `StopPoint/{id}/Arrivals`.
///
/// Used for the Underground, DLR and buses. `timeToStation` is a live
/// countdown in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopArrival {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub naptan_id: Option<String>,
    #[serde(default)]
    pub station_name: String,
    #[serde(default)]
    pub line_id: Option<String>,
    #[serde(default)]
    pub platform_name: Option<String>,
    #[serde(default)]
    pub destination_name: Option<String>,
    pub time_to_station: i64,
    #[serde(default)]
    pub mode_name: Option<Mode>,
}

/// A record from `StopPoint/{id}/ArrivalDepartures`.
///
/// Used for the Overground and Elizabeth line. The countdown is an "mm:ss"
/// string and may be missing, in which case only the scheduled departure is
/// known.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalDeparture {
    #[serde(default)]
    pub station_name: String,
    #[serde(default)]
    pub line_id: Option<String>,
    #[serde(default, alias = "naptanID")]
    pub naptan_id: Option<String>,
    #[serde(default)]
    pub platform_name: Option<String>,
    #[serde(default)]
    pub destination_name: Option<String>,
    /// ISO 8601 timestamp.
    #[serde(default)]
    pub scheduled_time_of_departure: Option<String>,
    #[serde(default)]
    pub minutes_and_seconds_to_departure: Option<String>,
    /// Usually "OnTime".
    #[serde(default)]
    pub departure_status: Option<String>,
}
