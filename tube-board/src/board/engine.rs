//! Live and timetabled arrivals for one station.
//!
//! A reload runs two phases in sequence. The prediction phase polls every
//! stop of the station concurrently, merges and deduplicates the results,
//! and drops far-future noise. The timetable phase only runs when a line
//! that publishes timetables was seen terminating here: the live feed tends
//! to under-report departures from a terminus, so the published timetable
//! is fetched for those (line, stop) pairs in both directions.
//!
//! Fetch failures never surface. A stop or timetable that fails to load
//! contributes nothing, and the phase still completes.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::RwLock;
use tracing::{debug, trace};

use crate::domain::{Arrival, Clock, Line, dedup};
use crate::holidays::HolidayCalendar;
use crate::timetable::{DayType, Direction, resolve};

use super::config::BoardConfig;
use super::filter::ArrivalFilter;
use super::group::{ArrivalGroup, group_arrivals};
use super::source::TransitApi;
use super::station::Station;

/// Progress of one reload phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhaseState {
    #[default]
    NotStarted,
    InFlight,
    /// Finished with this many arrivals, possibly zero.
    Complete(usize),
}

impl PhaseState {
    pub fn is_complete(&self) -> bool {
        matches!(self, PhaseState::Complete(_))
    }

    /// The state to fall back to if a reload is abandoned.
    fn settled(self) -> Self {
        match self {
            PhaseState::InFlight => PhaseState::NotStarted,
            other => other,
        }
    }
}

/// Line id to the stop identifiers it was seen terminating at.
pub type TimetablingLines = BTreeMap<String, BTreeSet<String>>;

/// Everything the board currently knows.
#[derive(Debug, Clone, Default)]
pub struct BoardSnapshot {
    /// Deduplicated live predictions within the countdown ceiling.
    pub predictions: Vec<Arrival>,
    /// Valid, deduplicated timetabled departures within the ceiling.
    pub timetabled: Vec<Arrival>,
    pub predictions_state: PhaseState,
    pub timetable_state: PhaseState,
    /// Lines found to terminate here on the last reload.
    pub timetabling_lines: TimetablingLines,
}

impl BoardSnapshot {
    pub fn is_loading(&self) -> bool {
        self.predictions_state == PhaseState::InFlight
            || self.timetable_state == PhaseState::InFlight
    }
}

/// Filtered, display-ready lists.
#[derive(Debug, Clone, Default)]
pub struct RenderedBoard {
    pub live: Vec<Arrival>,
    pub timetabled: Vec<Arrival>,
    pub predictions_state: PhaseState,
    pub timetable_state: PhaseState,
}

#[derive(Debug, Default)]
struct BoardState {
    snapshot: BoardSnapshot,
    /// Incremented by every reload; only the newest may commit.
    generation: u64,
}

/// Phase states to return to if a reload never completes.
#[derive(Debug, Clone, Copy)]
struct Fallback {
    generation: u64,
    predictions: PhaseState,
    timetable: PhaseState,
}

impl Fallback {
    /// Applies only while `generation` is current, and only to phases that
    /// have not completed.
    fn restore(self, state: &mut BoardState) {
        if state.generation != self.generation {
            return;
        }
        let snapshot = &mut state.snapshot;
        if !snapshot.predictions_state.is_complete() {
            snapshot.predictions_state = self.predictions;
        }
        if !snapshot.timetable_state.is_complete() {
            snapshot.timetable_state = self.timetable;
        }
    }
}

/// Held for the duration of one reload; restores the fallback on drop.
struct PendingReload {
    state: Arc<RwLock<BoardState>>,
    fallback: Fallback,
}

impl Drop for PendingReload {
    fn drop(&mut self) {
        let fallback = self.fallback;
        if let Ok(mut state) = self.state.try_write() {
            fallback.restore(&mut state);
            return;
        }

        // Lock busy: finish on the runtime if there is one.
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let state = Arc::clone(&self.state);
        handle.spawn(async move {
            fallback.restore(&mut *state.write().await);
        });
    }
}

/// Departure board for one station.
pub struct Board<A: TransitApi> {
    api: Arc<A>,
    station: Station,
    config: BoardConfig,
    clock: Arc<dyn Clock>,
    calendar: Arc<dyn HolidayCalendar>,
    state: Arc<RwLock<BoardState>>,
}

impl<A: TransitApi> Board<A> {
    pub fn new(
        api: Arc<A>,
        station: Station,
        config: BoardConfig,
        clock: Arc<dyn Clock>,
        calendar: Arc<dyn HolidayCalendar>,
    ) -> Self {
        Self {
            api,
            station,
            config,
            clock,
            calendar,
            state: Arc::new(RwLock::new(BoardState::default())),
        }
    }

    pub fn station(&self) -> &Station {
        &self.station
    }

    /// Refresh both phases.
    ///
    /// Results of a reload that has been overtaken by a newer one are
    /// discarded. Dropping the returned future cancels outstanding requests
    /// and puts any phase it left in flight back to its state before the
    /// reload.
    pub async fn reload(&self) {
        let pending = {
            let mut state = self.state.write().await;
            state.generation += 1;
            let pending = PendingReload {
                state: Arc::clone(&self.state),
                fallback: Fallback {
                    generation: state.generation,
                    predictions: state.snapshot.predictions_state.settled(),
                    timetable: state.snapshot.timetable_state.settled(),
                },
            };
            state.snapshot.predictions_state = PhaseState::InFlight;
            state.snapshot.timetable_state = PhaseState::NotStarted;
            pending
        };
        let generation = pending.fallback.generation;

        let predictions = self.fetch_predictions().await;
        let lines = timetabling_lines(&predictions);
        let needs_timetabling = self.station.supports_timetabling() && !lines.is_empty();

        {
            let mut state = self.state.write().await;
            if state.generation != generation {
                trace!(station = %self.station.name(), "Reload superseded");
                return;
            }
            let snapshot = &mut state.snapshot;
            snapshot.predictions_state = PhaseState::Complete(predictions.len());
            snapshot.predictions = predictions;
            snapshot.timetabling_lines = lines.clone();
            if needs_timetabling {
                snapshot.timetable_state = PhaseState::InFlight;
            } else {
                snapshot.timetabled.clear();
                snapshot.timetable_state = PhaseState::Complete(0);
                return;
            }
        }

        let timetabled = self.fetch_timetables(&lines).await;

        let mut state = self.state.write().await;
        if state.generation != generation {
            trace!(station = %self.station.name(), "Reload superseded");
            return;
        }
        state.snapshot.timetable_state = PhaseState::Complete(timetabled.len());
        state.snapshot.timetabled = timetabled;
    }

    /// Whether the last reload found lines worth timetabling.
    pub async fn needs_timetabling(&self) -> bool {
        if !self.station.supports_timetabling() {
            return false;
        }
        !self.state.read().await.snapshot.timetabling_lines.is_empty()
    }

    pub async fn snapshot(&self) -> BoardSnapshot {
        self.state.read().await.snapshot.clone()
    }

    /// Valid arrivals passing `filter`, without those terminating here,
    /// soonest first, at most `max_rows` per list.
    pub async fn render(&self, filter: &ArrivalFilter) -> RenderedBoard {
        let snapshot = self.snapshot().await;
        let mut live = self.visible(&snapshot.predictions, filter);
        let mut timetabled = self.visible(&snapshot.timetabled, filter);
        live.truncate(self.config.max_rows);
        timetabled.truncate(self.config.max_rows);

        RenderedBoard {
            live,
            timetabled,
            predictions_state: snapshot.predictions_state,
            timetable_state: snapshot.timetable_state,
        }
    }

    /// Live arrivals as display rows.
    ///
    /// Bus stops and combination stations collapse to one row per line and
    /// destination; other stations get one row per arrival.
    pub async fn grouped(&self, filter: &ArrivalFilter) -> Vec<ArrivalGroup> {
        let snapshot = self.snapshot().await;
        let live = self.visible(&snapshot.predictions, filter);

        let mut rows = if self.station.grouped_display() {
            group_arrivals(&live, self.config.group_size)
        } else {
            live.iter().map(ArrivalGroup::single).collect()
        };
        rows.truncate(self.config.max_rows);
        rows
    }

    /// Distinct destinations on offer, for a destination picker.
    pub async fn destinations(&self) -> Vec<String> {
        let snapshot = self.snapshot().await;
        let own_name = self.station.readable_name();

        snapshot
            .predictions
            .iter()
            .filter(|a| a.is_valid())
            .map(Arrival::readable_destination_name)
            .filter(|d| !d.contains(&own_name))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    async fn fetch_predictions(&self) -> Vec<Arrival> {
        let futures: Vec<_> = self
            .station
            .stops()
            .into_iter()
            .map(|(naptan, mode)| async move {
                let result = self.api.live_predictions(naptan, mode).await;
                (naptan, result)
            })
            .collect();

        let mut merged = Vec::new();
        for (naptan, result) in join_all(futures).await {
            match result {
                Ok(predictions) => merged.extend(predictions.into_iter().map(Arrival::Predicted)),
                Err(e) => {
                    debug!(
                        stop = naptan,
                        error = %e,
                        "Failed to fetch predictions, using empty"
                    );
                }
            }
        }

        self.within_ceiling(dedup(merged))
    }

    async fn fetch_timetables(&self, lines: &TimetablingLines) -> Vec<Arrival> {
        let now = self.clock.time_of_day();
        let day = DayType::for_date(self.clock.today(), self.calendar.as_ref());
        let origin = self.station.name();

        let requests: Vec<(&str, &str, Direction)> = lines
            .iter()
            .flat_map(|(line, stops)| {
                stops.iter().flat_map(move |stop| {
                    Direction::BOTH
                        .into_iter()
                        .map(move |direction| (line.as_str(), stop.as_str(), direction))
                })
            })
            .collect();

        let futures: Vec<_> = requests
            .into_iter()
            .map(|(line, stop, direction)| async move {
                let result = self.api.schedule(line, stop, direction).await;
                (line, stop, direction, result)
            })
            .collect();

        let mut merged = Vec::new();
        for (line, stop, direction, result) in join_all(futures).await {
            match result {
                Ok(Some(response)) => {
                    let resolved = resolve(&response, origin, line, day, now);
                    trace!(line, stop, %direction, journeys = resolved.len(), "Resolved timetable");
                    merged.extend(
                        resolved
                            .into_iter()
                            .filter(|t| t.is_valid())
                            .map(Arrival::Timetabled),
                    );
                }
                Ok(None) => {
                    trace!(line, stop, %direction, "No timetable published");
                }
                Err(e) => {
                    debug!(
                        line,
                        stop,
                        %direction,
                        error = %e,
                        "Failed to fetch timetable, using empty"
                    );
                }
            }
        }

        self.within_ceiling(dedup(merged))
    }

    /// Drop arrivals beyond the countdown ceiling or with no countdown.
    fn within_ceiling(&self, arrivals: Vec<Arrival>) -> Vec<Arrival> {
        let ceiling = self.config.countdown_ceiling_secs;
        arrivals
            .into_iter()
            .filter(|a| a.time_to_station_secs().is_some_and(|secs| secs <= ceiling))
            .collect()
    }

    fn visible(&self, arrivals: &[Arrival], filter: &ArrivalFilter) -> Vec<Arrival> {
        let own_name = self.station.readable_name();
        let mut out: Vec<Arrival> = arrivals
            .iter()
            .filter(|a| a.is_valid())
            .filter(|a| filter.matches(a))
            .filter(|a| !a.readable_destination_name().contains(&own_name))
            .cloned()
            .collect();
        out.sort_by_key(|a| a.time_to_station_secs().unwrap_or(i64::MAX));
        out
    }
}

/// Lines seen terminating at the stop they were predicted for.
///
/// Only lines that publish timetables qualify. An arrival counts when its
/// readable destination equals its readable station name.
pub fn timetabling_lines(predictions: &[Arrival]) -> TimetablingLines {
    let mut lines = TimetablingLines::new();
    for arrival in predictions {
        let (Some(line), Some(naptan)) = (arrival.line_id(), arrival.naptan()) else {
            continue;
        };
        if !Line::mode_for(Some(line)).supports_timetabling() {
            continue;
        }
        if arrival.readable_station_name() == arrival.readable_destination_name() {
            lines
                .entry(line.to_string())
                .or_default()
                .insert(naptan.to_string());
        }
    }
    lines
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
