//! Stop and destination name clean-up.
//!
//! Upstream names carry operator and modal decoration ("Paddington
//! Underground Station", "Shadwell Rail Station"). Boards show the bare
//! place name. A short allow-list protects names that the deny-list would
//! otherwise mangle.

/// Shown when nothing is left of a station or destination name.
pub const NO_STATION_FOUND: &str = "Check Station Board";

/// Shown when nothing is left of a bus destination name.
pub const NO_BUS_DESTINATION_FOUND: &str = "Check front of Bus";

const STATION_EXCEPTIONS: [&str; 7] = [
    NO_STATION_FOUND,
    "London Bridge",
    "London Fields",
    "London City Airport",
    "Battersea Power Station",
    "Nine Elms",
    "Bromley-by-Bow",
];

// Order is significant: each entry is removed from what the previous ones left.
const STATION_DENY_LIST: [&str; 15] = [
    "ELL",
    "(London)",
    "London",
    "Crossrail",
    "Underground",
    "Rail",
    "DLR",
    "Station",
    "(H&C Line)-Underground",
    " El",
    "Nll",
    "(Berks)",
    "(H&C Line)",
    "(for ExCel)",
    "-",
];

const BUS_DENY_LIST: [&str; 1] = ["Woolwich Common "];

/// Strip modal decoration from a station name.
///
/// ```
/// use tube_board::domain::sanitise_station_name;
///
/// assert_eq!(sanitise_station_name("Paddington Underground Station"), "Paddington");
/// assert_eq!(sanitise_station_name("London Bridge Underground Station"), "London Bridge");
/// assert_eq!(sanitise_station_name("Underground Station"), "Check Station Board");
/// ```
pub fn sanitise_station_name(raw: &str) -> String {
    sanitise(raw, &STATION_DENY_LIST, &STATION_EXCEPTIONS, NO_STATION_FOUND)
}

/// Strip decoration from a bus stop or bus destination name.
pub fn sanitise_bus_stop_name(raw: &str) -> String {
    sanitise(raw, &BUS_DENY_LIST, &[], NO_BUS_DESTINATION_FOUND)
}

fn sanitise(raw: &str, deny_list: &[&str], exceptions: &[&str], none_found: &str) -> String {
    if let Some(exception) = exceptions.iter().find(|e| raw.contains(**e)) {
        return (*exception).to_string();
    }

    let mut name = raw.to_string();
    for term in deny_list {
        name = name.replace(term, "");
    }

    let trimmed = name.trim();
    if trimmed.is_empty() {
        none_found.to_string()
    } else {
        trimmed.to_string()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Output is never empty
        #[test]
        fn never_empty(s in ".{0,40}") {
            prop_assert!(!sanitise_station_name(&s).is_empty());
            prop_assert!(!sanitise_bus_stop_name(&s).is_empty());
        }

        /// Output carries no surrounding whitespace
        #[test]
        fn trimmed(s in "[A-Za-z ]{0,40}") {
            let out = sanitise_station_name(&s);
            prop_assert_eq!(out.trim(), out.as_str());
        }
    }
}
