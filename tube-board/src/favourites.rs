//! Favourite stations.
//!
//! Favourites are kept per underlying stop, so a combination station is a
//! favourite only when every member stop is. The set is persisted as a JSON
//! array of records.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::board::{SingleStation, Station};
use crate::domain::Mode;

/// Errors from reading or writing the favourites file.
#[derive(Debug, thiserror::Error)]
pub enum FavouritesError {
    #[error("favourites I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("favourites JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One favourited stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavouriteStation {
    pub name: String,
    pub naptan: String,
    pub mode: Mode,
    #[serde(default)]
    pub lines: Vec<String>,
}

impl FavouriteStation {
    fn key(&self) -> (String, Mode) {
        (self.naptan.clone(), self.mode)
    }
}

impl From<&SingleStation> for FavouriteStation {
    fn from(station: &SingleStation) -> Self {
        Self {
            name: station.name.clone(),
            naptan: station.naptan.clone(),
            mode: station.mode,
            lines: station.lines.clone(),
        }
    }
}

/// The records a station contributes, one per underlying stop.
pub fn favourite_records(station: &Station) -> Vec<FavouriteStation> {
    match station {
        Station::Single(s) => vec![FavouriteStation::from(s)],
        Station::Combination(c) => c.members.iter().map(FavouriteStation::from).collect(),
        Station::BusStop(b) => vec![FavouriteStation {
            name: b.name.clone(),
            naptan: b.naptan.clone(),
            mode: Mode::Bus,
            lines: b.lines.clone(),
        }],
    }
}

/// Favourite stops keyed by (stop identifier, mode).
///
/// ```
/// use tube_board::domain::Mode;
/// use tube_board::favourites::{FavouriteSet, FavouriteStation};
///
/// let mut set = FavouriteSet::new();
/// set.insert(FavouriteStation {
///     name: "Bank Underground Station".into(),
///     naptan: "940GZZLUBNK".into(),
///     mode: Mode::Tube,
///     lines: vec!["central".into()],
/// });
/// assert!(set.is_favourite("940GZZLUBNK", Mode::Tube));
/// assert!(!set.is_favourite("940GZZLUBNK", Mode::Dlr));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<FavouriteStation>", into = "Vec<FavouriteStation>")]
pub struct FavouriteSet {
    entries: BTreeMap<(String, Mode), FavouriteStation>,
}

impl FavouriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a record. Returns true if it was new.
    pub fn insert(&mut self, station: FavouriteStation) -> bool {
        self.entries.insert(station.key(), station).is_none()
    }

    pub fn remove(&mut self, naptan: &str, mode: Mode) -> Option<FavouriteStation> {
        self.entries.remove(&(naptan.to_string(), mode))
    }

    /// Add every record in `other`.
    pub fn merge(&mut self, other: impl IntoIterator<Item = FavouriteStation>) {
        for station in other {
            self.insert(station);
        }
    }

    /// Remove every record in `other`.
    pub fn subtract(&mut self, other: impl IntoIterator<Item = FavouriteStation>) {
        for station in other {
            self.entries.remove(&station.key());
        }
    }

    pub fn is_favourite(&self, naptan: &str, mode: Mode) -> bool {
        self.entries.contains_key(&(naptan.to_string(), mode))
    }

    /// Favourite or unfavourite every stop of `station`.
    pub fn set_station(&mut self, station: &Station, favourite: bool) {
        let records = favourite_records(station);
        if favourite {
            self.merge(records);
        } else {
            self.subtract(records);
        }
    }

    /// Copy favourite flags from this set onto `station`'s stops.
    pub fn apply_to(&self, station: &mut Station) {
        match station {
            Station::Single(s) => s.favourite = self.is_favourite(&s.naptan, s.mode),
            Station::BusStop(b) => b.favourite = self.is_favourite(&b.naptan, Mode::Bus),
            Station::Combination(c) => {
                for member in &mut c.members {
                    member.favourite = self.is_favourite(&member.naptan, member.mode);
                }
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FavouriteStation> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<FavouriteStation>> for FavouriteSet {
    fn from(stations: Vec<FavouriteStation>) -> Self {
        let mut set = Self::new();
        set.merge(stations);
        set
    }
}

impl From<FavouriteSet> for Vec<FavouriteStation> {
    fn from(set: FavouriteSet) -> Self {
        set.entries.into_values().collect()
    }
}

impl IntoIterator for FavouriteSet {
    type Item = FavouriteStation;
    type IntoIter = std::collections::btree_map::IntoValues<(String, Mode), FavouriteStation>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}

/// JSON file holding the favourite set.
#[derive(Debug, Clone)]
pub struct FavouritesStore {
    path: PathBuf,
}

impl FavouritesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the set; a missing file is an empty set.
    pub fn load(&self) -> Result<FavouriteSet, FavouritesError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(FavouriteSet::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&contents)?)
    }

    /// Write the set, creating parent directories if needed.
    pub fn save(&self, set: &FavouriteSet) -> Result<(), FavouritesError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(set)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FavouritesStore {
    fn default() -> Self {
        Self::new("favourites.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BusStop, merge_stations};
    use tempfile::tempdir;

    fn paddington() -> Station {
        merge_stations(vec![
            SingleStation::new("Paddington Underground Station", "940GZZLUPAC", Mode::Tube)
                .with_lines(&["bakerloo", "circle"]),
            SingleStation::new("Paddington", "910GPADTON", Mode::Elizabeth).with_lines(&["elizabeth"]),
        ])
        .remove(0)
    }

    #[test]
    fn combination_contributes_every_member() {
        let records = favourite_records(&paddington());
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].naptan, "910GPADTON");
        assert_eq!(records[1].lines, vec!["elizabeth"]);
    }

    #[test]
    fn merge_and_subtract() {
        let mut set = FavouriteSet::new();
        set.set_station(&paddington(), true);
        assert_eq!(set.len(), 2);

        let bank = Station::Single(SingleStation::new("Bank Underground Station", "940GZZLUBNK", Mode::Tube));
        set.merge(favourite_records(&bank));
        assert_eq!(set.len(), 3);

        set.subtract(favourite_records(&paddington()));
        assert_eq!(set.len(), 1);
        assert!(set.is_favourite("940GZZLUBNK", Mode::Tube));
    }

    #[test]
    fn insert_replaces_same_stop() {
        let mut set = FavouriteSet::new();
        let bank = FavouriteStation {
            name: "Bank".into(),
            naptan: "940GZZLUBNK".into(),
            mode: Mode::Tube,
            lines: vec![],
        };
        assert!(set.insert(bank.clone()));
        assert!(!set.insert(FavouriteStation {
            lines: vec!["central".into()],
            ..bank
        }));
        assert_eq!(set.len(), 1);
        assert_eq!(set.remove("940GZZLUBNK", Mode::Tube).map(|s| s.lines.len()), Some(1));
        assert!(set.is_empty());
    }

    #[test]
    fn apply_marks_partial_combination_indeterminate() {
        let mut set = FavouriteSet::new();
        set.insert(FavouriteStation {
            name: "Paddington".into(),
            naptan: "910GPADTON".into(),
            mode: Mode::Elizabeth,
            lines: vec![],
        });

        let mut station = paddington();
        set.apply_to(&mut station);
        assert_eq!(station.favourite_state(), None);

        set.set_station(&station, true);
        set.apply_to(&mut station);
        assert_eq!(station.favourite_state(), Some(true));
    }

    #[test]
    fn bus_stops_use_bus_mode() {
        let mut stop = Station::BusStop(BusStop::new("Trafalgar Square", "490G00013307"));
        let mut set = FavouriteSet::new();
        set.set_station(&stop, true);

        assert!(set.is_favourite("490G00013307", Mode::Bus));
        set.apply_to(&mut stop);
        assert_eq!(stop.favourite_state(), Some(true));
    }

    #[test]
    fn store_round_trip() {
        let dir = tempdir().unwrap();
        let store = FavouritesStore::new(dir.path().join("nested").join("favourites.json"));

        let mut set = FavouriteSet::new();
        set.set_station(&paddington(), true);
        store.save(&set).unwrap();

        assert_eq!(store.load().unwrap(), set);
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = FavouritesStore::new(dir.path().join("favourites.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("favourites.json");
        std::fs::write(&path, "not json").unwrap();

        let result = FavouritesStore::new(path).load();
        assert!(matches!(result, Err(FavouritesError::Json(_))));
    }

    #[test]
    fn persisted_form_is_a_record_array() {
        let mut set = FavouriteSet::new();
        set.set_station(&Station::BusStop(BusStop::new("Trafalgar Square", "490G00013307")), true);

        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json[0]["naptan"], "490G00013307");
        assert_eq!(json[0]["mode"], "bus");
    }
}
