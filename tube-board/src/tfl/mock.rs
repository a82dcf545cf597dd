//! In-memory transit data for testing without API access.
//!
//! Serves canned predictions and timetables as if they were live
//! responses, and counts the requests made against it.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Mutex;

use crate::board::TransitApi;
use crate::domain::{Mode, PredictedArrival};
use crate::timetable::{Direction, TimetableResponse};

use super::convert::convert_stop_arrival;
use super::error::TflError;
use super::types::StopArrival;

type ScheduleKey = (String, String, Direction);

/// Mock upstream serving data from memory.
#[derive(Debug, Default)]
pub struct MockTransitApi {
    predictions: HashMap<String, Vec<PredictedArrival>>,
    schedules: HashMap<ScheduleKey, TimetableResponse>,
    failing_stops: HashSet<String>,
    prediction_calls: Mutex<Vec<String>>,
    schedule_calls: Mutex<Vec<ScheduleKey>>,
}

impl MockTransitApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load predictions from a directory of `{naptan}.json` files.
    ///
    /// Each file holds an array of seconds-feed records, as returned by
    /// `StopPoint/{naptan}/Arrivals`.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, TflError> {
        let data_dir = data_dir.as_ref();
        let mut mock = Self::new();

        let entries = std::fs::read_dir(data_dir).map_err(unreadable(data_dir))?;

        for entry in entries {
            let entry = entry.map_err(unreadable(data_dir))?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let Some(naptan) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let json = std::fs::read_to_string(&path).map_err(unreadable(&path))?;

            let records: Vec<StopArrival> =
                serde_json::from_str(&json).map_err(|e| TflError::Decode {
                    message: format!("{}: {}", path.display(), e),
                    excerpt: None,
                })?;

            let arrivals = records
                .into_iter()
                .map(|r| convert_stop_arrival(r, naptan))
                .collect();
            mock.predictions.insert(naptan.to_string(), arrivals);
        }

        Ok(mock)
    }

    /// Serve `arrivals` for `naptan`.
    pub fn with_predictions(mut self, naptan: &str, arrivals: Vec<PredictedArrival>) -> Self {
        self.predictions.insert(naptan.to_string(), arrivals);
        self
    }

    /// Serve `response` for a (line, stop, direction).
    pub fn with_schedule(
        mut self,
        line_id: &str,
        naptan: &str,
        direction: Direction,
        response: TimetableResponse,
    ) -> Self {
        self.schedules
            .insert((line_id.to_string(), naptan.to_string(), direction), response);
        self
    }

    /// Make every request for `naptan` fail.
    pub fn with_failing_stop(mut self, naptan: &str) -> Self {
        self.failing_stops.insert(naptan.to_string());
        self
    }

    /// Stops whose predictions have been requested, in order.
    pub fn prediction_calls(&self) -> Vec<String> {
        self.prediction_calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Timetables that have been requested, in order.
    pub fn schedule_calls(&self) -> Vec<(String, String, Direction)> {
        self.schedule_calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn fail(naptan: &str) -> TflError {
        TflError::Status {
            status: 503,
            body: format!("mock failure for {}", naptan),
        }
    }
}

fn unreadable(path: &Path) -> impl FnOnce(std::io::Error) -> TflError {
    let path = path.to_path_buf();
    move |source| TflError::Io { path, source }
}

impl TransitApi for MockTransitApi {
    async fn live_predictions(
        &self,
        naptan: &str,
        _mode: Mode,
    ) -> Result<Vec<PredictedArrival>, TflError> {
        self.prediction_calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(naptan.to_string());

        if self.failing_stops.contains(naptan) {
            return Err(Self::fail(naptan));
        }
        Ok(self.predictions.get(naptan).cloned().unwrap_or_default())
    }

    async fn schedule(
        &self,
        line_id: &str,
        naptan: &str,
        direction: Direction,
    ) -> Result<Option<TimetableResponse>, TflError> {
        let key = (line_id.to_string(), naptan.to_string(), direction);
        self.schedule_calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(key.clone());

        if self.failing_stops.contains(naptan) {
            return Err(Self::fail(naptan));
        }
        Ok(self.schedules.get(&key).cloned())
    }
}
