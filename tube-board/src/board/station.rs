//! Places a board can be shown for.
//!
//! A station is one of three closed shapes: a single-mode station with one
//! stop identifier, a bus stop, or a combination of single-mode stations
//! that share a public name (e.g. the Underground and Elizabeth line halves
//! of Paddington).

use std::collections::BTreeSet;

use crate::domain::{Mode, sanitise_bus_stop_name, sanitise_station_name};

/// A WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Arithmetic mean of `points`, or `None` if empty.
    pub fn mean(points: impl IntoIterator<Item = Coordinate>) -> Option<Self> {
        let (count, lat, lon) = points
            .into_iter()
            .fold((0usize, 0.0, 0.0), |(n, lat, lon), p| (n + 1, lat + p.lat, lon + p.lon));
        if count == 0 {
            return None;
        }
        Some(Self::new(lat / count as f64, lon / count as f64))
    }
}

/// A station served by one mode through one stop identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleStation {
    /// Raw upstream name, e.g. "Paddington Underground Station".
    pub name: String,
    pub naptan: String,
    pub mode: Mode,
    /// Line ids served.
    pub lines: Vec<String>,
    pub point: Coordinate,
    pub favourite: bool,
}

impl SingleStation {
    pub fn new(name: impl Into<String>, naptan: impl Into<String>, mode: Mode) -> Self {
        Self {
            name: name.into(),
            naptan: naptan.into(),
            mode,
            lines: Vec::new(),
            point: Coordinate::default(),
            favourite: false,
        }
    }

    pub fn with_lines(mut self, lines: &[&str]) -> Self {
        self.lines = lines.iter().map(|l| (*l).to_string()).collect();
        self
    }

    pub fn with_point(mut self, point: Coordinate) -> Self {
        self.point = point;
        self
    }

    pub fn readable_name(&self) -> String {
        sanitise_station_name(&self.name)
    }
}

/// A bus stop.
#[derive(Debug, Clone, PartialEq)]
pub struct BusStop {
    pub name: String,
    pub naptan: String,
    /// Letter shown on the flag, e.g. "K".
    pub stop_letter: Option<String>,
    /// Direction hint, e.g. "Towards Aldwych".
    pub towards: Option<String>,
    /// Route ids served.
    pub lines: Vec<String>,
    pub point: Coordinate,
    pub favourite: bool,
}

impl BusStop {
    pub fn new(name: impl Into<String>, naptan: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            naptan: naptan.into(),
            stop_letter: None,
            towards: None,
            lines: Vec::new(),
            point: Coordinate::default(),
            favourite: false,
        }
    }

    pub fn with_lines(mut self, lines: &[&str]) -> Self {
        self.lines = lines.iter().map(|l| (*l).to_string()).collect();
        self
    }
}

/// Several single-mode stations presented as one.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinationStation {
    /// Readable shared name.
    pub name: String,
    pub members: Vec<SingleStation>,
}

/// A place that can be queried for arrivals.
#[derive(Debug, Clone, PartialEq)]
pub enum Station {
    Single(SingleStation),
    Combination(CombinationStation),
    BusStop(BusStop),
}

impl Station {
    /// Name as stored; raw for single stations and bus stops.
    pub fn name(&self) -> &str {
        match self {
            Station::Single(s) => &s.name,
            Station::Combination(c) => &c.name,
            Station::BusStop(b) => &b.name,
        }
    }

    pub fn readable_name(&self) -> String {
        match self {
            Station::Single(s) => s.readable_name(),
            Station::Combination(c) => sanitise_station_name(&c.name),
            Station::BusStop(b) => sanitise_bus_stop_name(&b.name),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Station::Single(s) => s.mode,
            Station::Combination(_) => Mode::AllMetro,
            Station::BusStop(_) => Mode::Bus,
        }
    }

    /// Every underlying (stop identifier, mode) to query.
    pub fn stops(&self) -> Vec<(&str, Mode)> {
        match self {
            Station::Single(s) => vec![(s.naptan.as_str(), s.mode)],
            Station::Combination(c) => c.members.iter().map(|m| (m.naptan.as_str(), m.mode)).collect(),
            Station::BusStop(b) => vec![(b.naptan.as_str(), Mode::Bus)],
        }
    }

    /// Line ids served, deduplicated and sorted.
    pub fn lines(&self) -> BTreeSet<&str> {
        match self {
            Station::Single(s) => s.lines.iter().map(String::as_str).collect(),
            Station::Combination(c) => c
                .members
                .iter()
                .flat_map(|m| m.lines.iter().map(String::as_str))
                .collect(),
            Station::BusStop(b) => b.lines.iter().map(String::as_str).collect(),
        }
    }

    /// Location; a combination sits at the mean of its members.
    pub fn point(&self) -> Coordinate {
        match self {
            Station::Single(s) => s.point,
            Station::Combination(c) => Coordinate::mean(c.members.iter().map(|m| m.point)).unwrap_or_default(),
            Station::BusStop(b) => b.point,
        }
    }

    /// Whether any underlying stop has published line timetables.
    pub fn supports_timetabling(&self) -> bool {
        self.stops().iter().any(|(_, mode)| mode.supports_timetabling())
    }

    /// Whether arrivals are best shown grouped by line and destination.
    pub fn grouped_display(&self) -> bool {
        matches!(self, Station::BusStop(_) | Station::Combination(_))
    }

    /// Favourite flag; `None` when combination members disagree.
    pub fn favourite_state(&self) -> Option<bool> {
        match self {
            Station::Single(s) => Some(s.favourite),
            Station::BusStop(b) => Some(b.favourite),
            Station::Combination(c) => {
                let first = c.members.first()?.favourite;
                c.members
                    .iter()
                    .all(|m| m.favourite == first)
                    .then_some(first)
            }
        }
    }

    /// Set the favourite flag on every underlying stop.
    pub fn set_favourite(&mut self, favourite: bool) {
        match self {
            Station::Single(s) => s.favourite = favourite,
            Station::BusStop(b) => b.favourite = favourite,
            Station::Combination(c) => c.members.iter_mut().for_each(|m| m.favourite = favourite),
        }
    }
}

/// Key used to decide which stations share a public name.
fn merge_key(name: &str) -> String {
    sanitise_station_name(name).replace(['\'', '’'], "")
}

/// Merge single-mode stations that share a readable name.
///
/// Names are compared after sanitising and ignoring apostrophes, so
/// "King's Cross St. Pancras Underground Station" and "Kings Cross St.
/// Pancras" meet. Stations with a unique name stay single. Output order
/// follows the first appearance of each name.
pub fn merge_stations(stations: Vec<SingleStation>) -> Vec<Station> {
    let mut groups: Vec<(String, Vec<SingleStation>)> = Vec::new();

    for station in stations {
        let key = merge_key(&station.name);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(station),
            None => groups.push((key, vec![station])),
        }
    }

    groups
        .into_iter()
        .filter_map(|(_, mut members)| match members.len() {
            0 => None,
            1 => members.pop().map(Station::Single),
            _ => Some(Station::Combination(CombinationStation {
                name: members[0].readable_name(),
                members,
            })),
        })
        .collect()
}
