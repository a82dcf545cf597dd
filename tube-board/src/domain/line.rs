//! Static table of the rail lines on the network.

use super::Mode;

/// A named line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Line {
    pub id: &'static str,
    pub name: &'static str,
    pub compact_name: &'static str,
    pub mode: Mode,
}

const fn line(id: &'static str, name: &'static str, compact_name: &'static str, mode: Mode) -> Line {
    Line {
        id,
        name,
        compact_name,
        mode,
    }
}

/// Every line the upstream API can be queried for, sorted by id.
pub const LINES: [Line; 14] = [
    line("bakerloo", "Bakerloo Line", "Bakerloo", Mode::Tube),
    line("central", "Central Line", "Central", Mode::Tube),
    line("circle", "Circle Line", "Circle", Mode::Tube),
    line("district", "District Line", "District", Mode::Tube),
    line("dlr", "Docklands Light Railway", "DLR", Mode::Dlr),
    line("elizabeth", "Elizabeth line", "Elizabeth", Mode::Elizabeth),
    line("hammersmith-city", "Hammersmith & City Line", "H&C Line", Mode::Tube),
    line("jubilee", "Jubilee Line", "Jubilee", Mode::Tube),
    line("london-overground", "London Overground", "Overground", Mode::Overground),
    line("metropolitan", "Metropolitan Line", "Metropolitan", Mode::Tube),
    line("northern", "Northern Line", "Northern", Mode::Tube),
    line("piccadilly", "Piccadilly Line", "Piccadilly", Mode::Tube),
    line("victoria", "Victoria Line", "Victoria", Mode::Tube),
    line("waterloo-city", "Waterloo & City Line", "W&C Line", Mode::Tube),
];

impl Line {
    /// Look up a line by id.
    pub fn lookup(id: &str) -> Option<&'static Line> {
        LINES.iter().find(|l| l.id == id)
    }

    /// Full name for a line id.
    pub fn lookup_name(id: Option<&str>) -> Option<&'static str> {
        id.and_then(Self::lookup).map(|l| l.name)
    }

    /// Compact name for a line id, empty when unknown.
    pub fn lookup_compact_name(id: Option<&str>) -> &'static str {
        id.and_then(Self::lookup).map_or("", |l| l.compact_name)
    }

    /// Find a line by its id, full name or compact name.
    ///
    /// Case and a trailing "Line" are ignored. Anything else, such as a bus
    /// route number, is not a line.
    ///
    /// ```
    /// use tube_board::domain::Line;
    ///
    /// assert_eq!(Line::find("Hammersmith & City").map(|l| l.id), Some("hammersmith-city"));
    /// assert_eq!(Line::find("dlr").map(|l| l.id), Some("dlr"));
    /// assert_eq!(Line::find("H"), None);
    /// ```
    pub fn find(text: &str) -> Option<&'static Line> {
        let wanted = without_line_suffix(text);
        LINES.iter().find(|l| {
            [l.id, l.name, l.compact_name]
                .iter()
                .any(|n| without_line_suffix(n).eq_ignore_ascii_case(wanted))
        })
    }

    /// Find a line id from free text such as "Northern Line".
    ///
    /// The first word, lowercased, must occur inside a line id.
    ///
    /// ```
    /// use tube_board::domain::Line;
    ///
    /// assert_eq!(Line::lookup_line_id("Northern Line"), Some("northern"));
    /// assert_eq!(Line::lookup_line_id("Hammersmith & City"), Some("hammersmith-city"));
    /// assert_eq!(Line::lookup_line_id("Tramlink"), None);
    /// ```
    pub fn lookup_line_id(search: &str) -> Option<&'static str> {
        let candidate = search.split(' ').next()?.to_lowercase();
        if candidate.is_empty() {
            return None;
        }
        LINES
            .iter()
            .find(|l| l.id.contains(candidate.as_str()))
            .map(|l| l.id)
    }

    /// Mode for a line id as used by timetabled arrivals.
    ///
    /// No line means [`Mode::Unknown`]; a line id outside the rail table is
    /// taken to be a bus route.
    pub fn mode_for(id: Option<&str>) -> Mode {
        match id {
            None => Mode::Unknown,
            Some(id) => Self::lookup(id).map_or(Mode::Bus, |l| l.mode),
        }
    }
}

fn without_line_suffix(text: &str) -> &str {
    let text = text.trim();
    text.strip_suffix(" Line")
        .or_else(|| text.strip_suffix(" line"))
        .unwrap_or(text)
        .trim_end()
}
