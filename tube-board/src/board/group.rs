//! Collapse arrivals into one row per line and destination.

use std::collections::HashMap;

use crate::domain::Arrival;

/// Upcoming times for one (line, destination).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrivalGroup {
    pub line_id: Option<String>,
    /// Readable destination.
    pub destination: String,
    /// Display strings, soonest first.
    pub times: Vec<String>,
}

impl ArrivalGroup {
    /// A row holding a single arrival.
    pub fn single(arrival: &Arrival) -> Self {
        Self {
            line_id: arrival.line_id().map(str::to_string),
            destination: arrival.readable_destination_name(),
            times: vec![arrival.display()],
        }
    }

    /// The soonest time.
    pub fn primary(&self) -> Option<&str> {
        self.times.first().map(String::as_str)
    }

    /// The remaining times as a compact list, e.g. "3, 7 mins".
    pub fn secondary(&self) -> Option<String> {
        self.times.get(1..).and_then(secondary_line)
    }

    fn sort_key(&self) -> (String, String) {
        (
            self.line_id.clone().unwrap_or_default(),
            self.destination.clone(),
        )
    }
}

/// Group `arrivals` by line and readable destination.
///
/// Times within a group are ordered by countdown and capped at
/// `group_size`. Groups are ordered by line, then destination.
pub fn group_arrivals(arrivals: &[Arrival], group_size: usize) -> Vec<ArrivalGroup> {
    let mut buckets: HashMap<(Option<String>, String), Vec<&Arrival>> = HashMap::new();
    for arrival in arrivals {
        let key = (
            arrival.line_id().map(str::to_string),
            arrival.readable_destination_name(),
        );
        buckets.entry(key).or_default().push(arrival);
    }

    let mut groups: Vec<ArrivalGroup> = buckets
        .into_iter()
        .map(|((line_id, destination), mut members)| {
            members.sort_by_key(|a| a.time_to_station_secs().unwrap_or(i64::MAX));
            ArrivalGroup {
                line_id,
                destination,
                times: members
                    .iter()
                    .take(group_size)
                    .map(|a| a.display())
                    .collect(),
            }
        })
        .collect();

    groups.sort_by_cached_key(ArrivalGroup::sort_key);
    groups
}

/// Render trailing times with one shared unit.
///
/// Units are stripped from each entry and appended once at the end, singular
/// only when the last entry is exactly one minute. Entries that are not
/// minute countdowns ("Due", "HH:MM") are kept verbatim.
///
/// ```
/// use tube_board::board::secondary_line;
///
/// let times = ["3 mins".to_string(), "1 min".to_string()];
/// assert_eq!(secondary_line(&times).as_deref(), Some("3, 1 min"));
/// assert_eq!(secondary_line(&[]), None);
/// ```
pub fn secondary_line(times: &[String]) -> Option<String> {
    let last = times.last()?;

    let joined = times
        .iter()
        .map(|t| strip_minutes(t).map_or(t.as_str(), |(n, _)| n))
        .collect::<Vec<_>>()
        .join(", ");

    match strip_minutes(last) {
        Some((_, 1)) => Some(format!("{joined} min")),
        Some(_) => Some(format!("{joined} mins")),
        None => Some(joined),
    }
}

/// Split "N min"/"N mins" into the number text and its value.
fn strip_minutes(time: &str) -> Option<(&str, i64)> {
    let number = time
        .strip_suffix(" mins")
        .or_else(|| time.strip_suffix(" min"))?;
    Some((number, number.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Countdown, Mode, PredictedArrival};

    fn bus(route: &str, destination: &str, secs: i64) -> Arrival {
        Arrival::Predicted(PredictedArrival {
            station_name: "Trafalgar Square".into(),
            destination_name: Some(destination.into()),
            line_id: Some(route.into()),
            naptan: Some("490G00013307".into()),
            mode: Mode::Bus,
            platform_name: None,
            countdown: Countdown::Seconds(secs),
        })
    }

    fn strings(times: &[&str]) -> Vec<String> {
        times.iter().map(|t| (*t).to_string()).collect()
    }

    #[test]
    fn secondary_scenario() {
        let group = ArrivalGroup {
            line_id: Some("12".into()),
            destination: "Dulwich Library".into(),
            times: strings(&["Due", "3 mins", "1 min"]),
        };
        assert_eq!(group.primary(), Some("Due"));
        assert_eq!(group.secondary().as_deref(), Some("3, 1 min"));
    }

    #[test]
    fn secondary_plural_and_mixed() {
        assert_eq!(secondary_line(&strings(&["2 mins", "5 mins"])).as_deref(), Some("2, 5 mins"));
        assert_eq!(secondary_line(&strings(&["4 mins", "Due"])).as_deref(), Some("4, Due"));
        assert_eq!(secondary_line(&strings(&["10:04", "10:19"])).as_deref(), Some("10:04, 10:19"));
        assert_eq!(secondary_line(&strings(&["11 mins"])).as_deref(), Some("11 mins"));
    }

    #[test]
    fn single_time_has_no_secondary() {
        let group = ArrivalGroup {
            line_id: None,
            destination: "Bank".into(),
            times: strings(&["4 mins"]),
        };
        assert_eq!(group.secondary(), None);
    }

    #[test]
    fn groups_by_route_and_destination() {
        let arrivals = vec![
            bus("12", "Dulwich Library", 400),
            bus("12", "Dulwich Library", 30),
            bus("12", "Oxford Circus", 90),
            bus("453", "Deptford Bridge", 200),
            bus("12", "Dulwich Library", 130),
        ];

        let groups = group_arrivals(&arrivals, 5);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].destination, "Dulwich Library");
        assert_eq!(groups[0].times, strings(&["Due", "2 mins", "6 mins"]));
        assert_eq!(groups[1].destination, "Oxford Circus");
        assert_eq!(groups[2].line_id.as_deref(), Some("453"));
    }

    #[test]
    fn group_size_caps_times() {
        let arrivals: Vec<Arrival> = (0..8).map(|i| bus("12", "Dulwich Library", i * 120)).collect();
        let groups = group_arrivals(&arrivals, 3);
        assert_eq!(groups[0].times, strings(&["Due", "2 mins", "4 mins"]));
    }

    #[test]
    fn line_and_destination_order_separately() {
        let arrivals = vec![bus("12", " X", 60), bus("1", "2 X", 60)];
        let groups = group_arrivals(&arrivals, 5);
        assert_eq!(groups[0].line_id.as_deref(), Some("1"));
        assert_eq!(groups[1].line_id.as_deref(), Some("12"));
    }

    #[test]
    fn empty_input() {
        assert!(group_arrivals(&[], 5).is_empty());
    }
}
