//! Upstream data seam for the board.

use crate::domain::{Mode, PredictedArrival};
use crate::tfl::{TflClient, TflError};
use crate::timetable::{Direction, TimetableResponse};

/// Source of live predictions and timetables.
///
/// This abstraction allows the board to be tested with in-memory data.
#[allow(async_fn_in_trait)]
pub trait TransitApi {
    /// Live predictions for one stop.
    async fn live_predictions(
        &self,
        naptan: &str,
        mode: Mode,
    ) -> Result<Vec<PredictedArrival>, TflError>;

    /// Timetable for a line from a stop in one direction.
    ///
    /// `Ok(None)` means no timetable is published for the combination.
    async fn schedule(
        &self,
        line_id: &str,
        naptan: &str,
        direction: Direction,
    ) -> Result<Option<TimetableResponse>, TflError>;
}

impl TransitApi for TflClient {
    async fn live_predictions(
        &self,
        naptan: &str,
        mode: Mode,
    ) -> Result<Vec<PredictedArrival>, TflError> {
        TflClient::live_predictions(self, naptan, mode).await
    }

    async fn schedule(
        &self,
        line_id: &str,
        naptan: &str,
        direction: Direction,
    ) -> Result<Option<TimetableResponse>, TflError> {
        self.timetable(line_id, naptan, direction).await
    }
}
