//! Line and destination filtering for rendered boards.

use crate::domain::{Arrival, Line, NO_STATION_FOUND};

/// Picker label meaning "no line filter".
pub const ALL_LINES: &str = "All Lines";

/// Picker label meaning "no destination filter".
pub const ANY_DESTINATION: &str = "Any Destination";

/// Destination part of a filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DestinationFilter {
    /// No filter: everything matches, including arrivals with no destination.
    #[default]
    Any,
    /// Only arrivals upstream gave no destination for.
    NoDestination,
    /// Readable destination contains this text, case-insensitively.
    Matching(String),
}

impl DestinationFilter {
    /// Interpret a destination picker selection.
    pub fn from_selection(selection: &str) -> Self {
        match selection.trim() {
            "" | ANY_DESTINATION => DestinationFilter::Any,
            NO_STATION_FOUND => DestinationFilter::NoDestination,
            text => DestinationFilter::Matching(text.to_string()),
        }
    }

    fn matches(&self, arrival: &Arrival) -> bool {
        match self {
            DestinationFilter::Any => true,
            DestinationFilter::NoDestination => !arrival.has_destination(),
            DestinationFilter::Matching(text) => {
                arrival.has_destination()
                    && arrival
                        .readable_destination_name()
                        .to_lowercase()
                        .contains(&text.to_lowercase())
            }
        }
    }
}

/// Filter applied to both the live and timetabled lists.
///
/// ```
/// use tube_board::board::{ArrivalFilter, DestinationFilter};
///
/// let filter = ArrivalFilter::from_selection("Central", "Epping");
/// assert_eq!(filter.line.as_deref(), Some("central"));
/// assert_eq!(filter.destination, DestinationFilter::Matching("Epping".into()));
///
/// assert_eq!(ArrivalFilter::from_selection("All Lines", "Any Destination"), ArrivalFilter::default());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArrivalFilter {
    /// Line id to keep; `None` keeps every line.
    pub line: Option<String>,
    pub destination: DestinationFilter,
}

impl ArrivalFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_line(mut self, line_id: impl Into<String>) -> Self {
        self.line = Some(line_id.into());
        self
    }

    pub fn with_destination(mut self, destination: DestinationFilter) -> Self {
        self.destination = destination;
        self
    }

    /// Interpret picker selections.
    ///
    /// The line may be given as an id or as a display name. Text naming no
    /// rail line, such as a bus route, is used as the id verbatim.
    pub fn from_selection(line: &str, destination: &str) -> Self {
        let line = match line.trim() {
            "" | ALL_LINES => None,
            text => Some(Line::find(text).map_or_else(|| text.to_string(), |l| l.id.to_string())),
        };

        Self {
            line,
            destination: DestinationFilter::from_selection(destination),
        }
    }

    pub fn matches(&self, arrival: &Arrival) -> bool {
        let line_ok = match &self.line {
            None => true,
            Some(line) => arrival
                .line_id()
                .is_some_and(|id| id.eq_ignore_ascii_case(line)),
        };
        line_ok && self.destination.matches(arrival)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Countdown, Mode, PredictedArrival};

    fn arrival(line: &str, destination: Option<&str>) -> Arrival {
        Arrival::Predicted(PredictedArrival {
            station_name: "Liverpool Street Underground Station".into(),
            destination_name: destination.map(str::to_string),
            line_id: Some(line.into()),
            naptan: None,
            mode: Mode::Tube,
            platform_name: None,
            countdown: Countdown::Seconds(60),
        })
    }

    #[test]
    fn default_matches_everything() {
        let filter = ArrivalFilter::default();
        assert!(filter.matches(&arrival("central", Some("Epping Underground Station"))));
        assert!(filter.matches(&arrival("central", None)));
    }

    #[test]
    fn line_filter_is_case_insensitive() {
        let filter = ArrivalFilter::new().with_line("Central");
        assert!(filter.matches(&arrival("central", None)));
        assert!(!filter.matches(&arrival("circle", None)));
    }

    #[test]
    fn destination_substring_case_insensitive() {
        let filter = ArrivalFilter::new().with_destination(DestinationFilter::Matching("epp".into()));
        assert!(filter.matches(&arrival("central", Some("Epping Underground Station"))));
        assert!(!filter.matches(&arrival("central", Some("West Ruislip Underground Station"))));
    }

    #[test]
    fn missing_destination_only_matches_sentinel() {
        let no_dest = arrival("central", None);
        let empty_dest = arrival("central", Some(""));

        let sentinel = ArrivalFilter::from_selection(ALL_LINES, NO_STATION_FOUND);
        assert!(sentinel.matches(&no_dest));
        assert!(sentinel.matches(&empty_dest));
        assert!(!sentinel.matches(&arrival("central", Some("Epping Underground Station"))));

        // "Check" is a substring of the sentinel text but must not match
        let text = ArrivalFilter::new().with_destination(DestinationFilter::Matching("Check".into()));
        assert!(!text.matches(&no_dest));
    }

    #[test]
    fn selection_parsing() {
        assert_eq!(ArrivalFilter::from_selection("", "").line, None);
        assert_eq!(ArrivalFilter::from_selection("Hammersmith & City", "").line.as_deref(), Some("hammersmith-city"));
        assert_eq!(ArrivalFilter::from_selection("188", "").line.as_deref(), Some("188"));
        assert_eq!(DestinationFilter::from_selection(" Any Destination "), DestinationFilter::Any);
    }

    #[test]
    fn single_letter_bus_routes_stay_routes() {
        assert_eq!(ArrivalFilter::from_selection("H", "").line.as_deref(), Some("H"));
        assert_eq!(ArrivalFilter::from_selection("C", "").line.as_deref(), Some("C"));
        assert_eq!(ArrivalFilter::from_selection("N", "").line.as_deref(), Some("N"));

        let filter = ArrivalFilter::from_selection("C", "");
        assert!(!filter.matches(&arrival("circle", None)));
        assert!(filter.matches(&arrival("c", None)));
    }

    #[test]
    fn line_names_resolve_exactly() {
        assert_eq!(ArrivalFilter::from_selection("Northern Line", "").line.as_deref(), Some("northern"));
        assert_eq!(ArrivalFilter::from_selection("W&C Line", "").line.as_deref(), Some("waterloo-city"));
        assert_eq!(ArrivalFilter::from_selection("Elizabeth line", "").line.as_deref(), Some("elizabeth"));
    }
}
