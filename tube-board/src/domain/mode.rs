//! Transport modes.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A transport mode on the network.
///
/// Unrecognised upstream mode strings map to [`Mode::Unknown`] rather than
/// failing, so grouping and colouring code always has a case to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    /// A merged multi-modal station.
    AllMetro,
    Tube,
    Dlr,
    Elizabeth,
    Overground,
    Bus,
    Unknown,
}

impl Mode {
    /// The modes that appear as stations (as opposed to bus stops).
    pub const STATION_MODES: [Mode; 4] = [Mode::Dlr, Mode::Elizabeth, Mode::Overground, Mode::Tube];

    /// Parse an upstream mode string.
    ///
    /// ```
    /// use tube_board::domain::Mode;
    ///
    /// assert_eq!(Mode::parse("elizabeth-line"), Mode::Elizabeth);
    /// assert_eq!(Mode::parse("tube"), Mode::Tube);
    /// assert_eq!(Mode::parse("river-bus"), Mode::Unknown);
    /// ```
    pub fn parse(s: &str) -> Self {
        match s {
            "allMetro" => Mode::AllMetro,
            "tube" => Mode::Tube,
            "dlr" => Mode::Dlr,
            "elizabeth" | "elizabeth-line" => Mode::Elizabeth,
            "overground" | "london-overground" => Mode::Overground,
            "bus" => Mode::Bus,
            _ => Mode::Unknown,
        }
    }

    /// The string the upstream API expects for this mode.
    pub fn api_format(&self) -> &'static str {
        match self {
            Mode::AllMetro => "tube,dlr,elizabeth-line,overground",
            Mode::Tube => "tube",
            Mode::Dlr => "dlr",
            Mode::Elizabeth => "elizabeth-line",
            Mode::Overground => "overground",
            Mode::Bus => "bus",
            Mode::Unknown => "unknown",
        }
    }

    /// Human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Mode::AllMetro => "All Modes",
            Mode::Tube => "London Underground",
            Mode::Dlr => "Docklands Light Railway",
            Mode::Elizabeth => "Elizabeth line",
            Mode::Overground => "London Overground",
            Mode::Bus => "Bus",
            Mode::Unknown => "unknown",
        }
    }

    /// Whether upstream publishes line timetables for this mode.
    ///
    /// Only the Underground and DLR are timetabled; Overground, Elizabeth
    /// line and buses are served by live predictions alone.
    pub fn supports_timetabling(&self) -> bool {
        matches!(self, Mode::Tube | Mode::Dlr)
    }

    /// Whether live predictions come from the mm:ss departures feed.
    pub fn uses_departures_feed(&self) -> bool {
        matches!(self, Mode::Elizabeth | Mode::Overground)
    }

    /// The line id used to request departures for mm:ss-feed modes.
    pub fn departures_line_id(&self) -> Option<&'static str> {
        match self {
            Mode::Elizabeth => Some("elizabeth"),
            Mode::Overground => Some("london-overground"),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_format())
    }
}

impl<'de> Deserialize<'de> for Mode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Mode::parse(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_modes() {
        assert_eq!(Mode::parse("dlr"), Mode::Dlr);
        assert_eq!(Mode::parse("overground"), Mode::Overground);
        assert_eq!(Mode::parse("london-overground"), Mode::Overground);
        assert_eq!(Mode::parse("bus"), Mode::Bus);
    }

    #[test]
    fn parse_unknown_is_explicit() {
        assert_eq!(Mode::parse(""), Mode::Unknown);
        assert_eq!(Mode::parse("Tube"), Mode::Unknown);
        assert_eq!(Mode::parse("cable-car"), Mode::Unknown);
    }

    #[test]
    fn timetabling_capability() {
        assert!(Mode::Tube.supports_timetabling());
        assert!(Mode::Dlr.supports_timetabling());
        assert!(!Mode::Overground.supports_timetabling());
        assert!(!Mode::Elizabeth.supports_timetabling());
        assert!(!Mode::Bus.supports_timetabling());
        assert!(!Mode::Unknown.supports_timetabling());
    }

    #[test]
    fn deserialize_is_lenient() {
        let modes: Vec<Mode> = serde_json::from_str(r#"["tube","elizabeth-line","tram"]"#).unwrap();
        assert_eq!(modes, vec![Mode::Tube, Mode::Elizabeth, Mode::Unknown]);
    }

    #[test]
    fn departures_line_ids() {
        assert_eq!(Mode::Elizabeth.departures_line_id(), Some("elizabeth"));
        assert_eq!(Mode::Overground.departures_line_id(), Some("london-overground"));
        assert_eq!(Mode::Tube.departures_line_id(), None);
    }
}
