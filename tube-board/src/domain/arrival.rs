//! Upcoming departures from a stop.
//!
//! An [`Arrival`] is either a live prediction polled from upstream or a
//! departure derived from a published timetable. Both expose the same
//! display surface: readable names, a platform label, a countdown and a
//! short time string.

use std::collections::HashSet;

use super::line::Line;
use super::mode::Mode;
use super::names::{sanitise_bus_stop_name, sanitise_station_name};
use super::time::TimeOfDay;

/// How a live prediction expresses time remaining.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Countdown {
    /// Seconds until the vehicle reaches the stop (Underground, DLR, bus).
    Seconds(i64),
    /// An "mm:ss" string with the scheduled departure as fallback
    /// (Overground, Elizabeth line). Either may be missing.
    MinutesSeconds {
        remaining: Option<String>,
        scheduled: TimeOfDay,
    },
}

/// A live prediction from the upstream feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictedArrival {
    /// Raw stop name as sent upstream.
    pub station_name: String,
    /// Raw destination; `None` means "check the board".
    pub destination_name: Option<String>,
    pub line_id: Option<String>,
    /// Stop identifier the prediction was reported for.
    pub naptan: Option<String>,
    pub mode: Mode,
    pub platform_name: Option<String>,
    pub countdown: Countdown,
}

impl PredictedArrival {
    fn sanitise(&self, raw: &str) -> String {
        if self.mode == Mode::Bus {
            sanitise_bus_stop_name(raw)
        } else {
            sanitise_station_name(raw)
        }
    }

    pub fn readable_station_name(&self) -> String {
        self.sanitise(&self.station_name)
    }

    pub fn readable_destination_name(&self) -> String {
        self.sanitise(self.destination_name.as_deref().unwrap_or(""))
    }

    /// Platform label, empty when upstream doesn't know.
    ///
    /// The seconds feed sends values like "Westbound - Platform 2" or a
    /// bare "2"; the departures feed sends the label as-is.
    pub fn platform_display(&self) -> String {
        let platform = match self.platform_name.as_deref() {
            Some(p) if !p.trim().is_empty() && !p.contains("Unknown") => p,
            _ => return String::new(),
        };

        match self.countdown {
            Countdown::MinutesSeconds { .. } => platform.to_string(),
            Countdown::Seconds(_) => {
                if let Some((_, after)) = platform.split_once('-') {
                    after.trim().to_string()
                } else if platform.contains("Platform") {
                    platform.to_string()
                } else {
                    format!("Platform {platform}")
                }
            }
        }
    }

    pub fn time_to_station_secs(&self) -> Option<i64> {
        match &self.countdown {
            Countdown::Seconds(secs) => Some(*secs),
            Countdown::MinutesSeconds { remaining, .. } => {
                let (mins, secs) = parse_minutes_seconds(remaining.as_deref()?)?;
                Some(mins * 60 + secs)
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        match &self.countdown {
            Countdown::Seconds(secs) => *secs >= 0,
            Countdown::MinutesSeconds { remaining, .. } => remaining
                .as_deref()
                .and_then(parse_minutes_seconds)
                .is_some(),
        }
    }

    pub fn display(&self) -> String {
        match &self.countdown {
            Countdown::Seconds(secs) => minutes_label(secs / 60),
            Countdown::MinutesSeconds {
                remaining,
                scheduled,
            } => match remaining.as_deref().and_then(parse_minutes_seconds) {
                Some((mins, _)) => minutes_label(mins),
                None => scheduled.to_string(),
            },
        }
    }
}

/// A departure taken from a published timetable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetabledArrival {
    pub station_name: String,
    pub destination_name: Option<String>,
    pub line_id: Option<String>,
    /// Literal scheduled departure.
    pub departure: TimeOfDay,
    /// Wall-clock time the countdown is measured from.
    pub now: TimeOfDay,
}

impl TimetabledArrival {
    pub fn mode(&self) -> Mode {
        Line::mode_for(self.line_id.as_deref())
    }

    pub fn time_to_station_secs(&self) -> Option<i64> {
        self.now.seconds_until(self.departure)
    }

    /// Valid while the scheduled time has not yet passed today.
    pub fn is_valid(&self) -> bool {
        self.departure.has_passed(self.now) == Some(false)
    }

    pub fn display(&self) -> String {
        self.departure.to_string()
    }
}

/// A single upcoming departure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arrival {
    Predicted(PredictedArrival),
    Timetabled(TimetabledArrival),
}

/// Identity used to collapse duplicate upstream records.
///
/// Two arrivals with the same line, destination and displayed time are the
/// same physical event even if other fields, such as platform, disagree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArrivalKey {
    pub line_id: Option<String>,
    pub destination_name: Option<String>,
    pub display: String,
}

impl Arrival {
    pub fn station_name(&self) -> &str {
        match self {
            Arrival::Predicted(p) => &p.station_name,
            Arrival::Timetabled(t) => &t.station_name,
        }
    }

    /// Raw destination as sent upstream.
    pub fn destination_name(&self) -> Option<&str> {
        match self {
            Arrival::Predicted(p) => p.destination_name.as_deref(),
            Arrival::Timetabled(t) => t.destination_name.as_deref(),
        }
    }

    /// Whether upstream recorded any destination at all.
    pub fn has_destination(&self) -> bool {
        self.destination_name().is_some_and(|d| !d.trim().is_empty())
    }

    pub fn line_id(&self) -> Option<&str> {
        match self {
            Arrival::Predicted(p) => p.line_id.as_deref(),
            Arrival::Timetabled(t) => t.line_id.as_deref(),
        }
    }

    pub fn naptan(&self) -> Option<&str> {
        match self {
            Arrival::Predicted(p) => p.naptan.as_deref(),
            Arrival::Timetabled(_) => None,
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Arrival::Predicted(p) => p.mode,
            Arrival::Timetabled(t) => t.mode(),
        }
    }

    pub fn readable_station_name(&self) -> String {
        match self {
            Arrival::Predicted(p) => p.readable_station_name(),
            Arrival::Timetabled(t) => sanitise_station_name(&t.station_name),
        }
    }

    pub fn readable_destination_name(&self) -> String {
        match self {
            Arrival::Predicted(p) => p.readable_destination_name(),
            Arrival::Timetabled(t) => {
                sanitise_station_name(t.destination_name.as_deref().unwrap_or(""))
            }
        }
    }

    pub fn platform_display(&self) -> String {
        match self {
            Arrival::Predicted(p) => p.platform_display(),
            Arrival::Timetabled(_) => String::new(),
        }
    }

    /// Seconds until departure, if it can be determined.
    pub fn time_to_station_secs(&self) -> Option<i64> {
        match self {
            Arrival::Predicted(p) => p.time_to_station_secs(),
            Arrival::Timetabled(t) => t.time_to_station_secs(),
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            Arrival::Predicted(p) => p.is_valid(),
            Arrival::Timetabled(t) => t.is_valid(),
        }
    }

    /// Whether the countdown is strictly below `seconds`. Unknown countdowns
    /// are never below anything.
    pub fn is_due_within(&self, seconds: u64) -> bool {
        self.time_to_station_secs()
            .is_some_and(|secs| secs < 0 || (secs as u64) < seconds)
    }

    /// Short display string: "Due", "1 min", "N mins" or "HH:MM".
    pub fn display(&self) -> String {
        match self {
            Arrival::Predicted(p) => p.display(),
            Arrival::Timetabled(t) => t.display(),
        }
    }

    pub fn key(&self) -> ArrivalKey {
        ArrivalKey {
            line_id: self.line_id().map(str::to_string),
            destination_name: self.destination_name().map(str::to_string),
            display: self.display(),
        }
    }
}

impl From<PredictedArrival> for Arrival {
    fn from(p: PredictedArrival) -> Self {
        Arrival::Predicted(p)
    }
}

impl From<TimetabledArrival> for Arrival {
    fn from(t: TimetabledArrival) -> Self {
        Arrival::Timetabled(t)
    }
}

/// Drop arrivals whose [`ArrivalKey`] has already been seen.
///
/// The first record for each key is kept, in input order.
pub fn dedup(arrivals: impl IntoIterator<Item = Arrival>) -> Vec<Arrival> {
    let mut seen = HashSet::new();
    arrivals
        .into_iter()
        .filter(|a| seen.insert(a.key()))
        .collect()
}

fn minutes_label(minutes: i64) -> String {
    match minutes {
        m if m < 1 => "Due".to_string(),
        1 => "1 min".to_string(),
        m => format!("{m} mins"),
    }
}

fn parse_minutes_seconds(s: &str) -> Option<(i64, i64)> {
    let (mins, secs) = s.split_once(':')?;
    Some((mins.trim().parse().ok()?, secs.trim().parse().ok()?))
}
