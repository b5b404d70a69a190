/// Label prefixed to addresses that mention an airport but match no hotel.
pub const DEFAULT_AIRPORT_LABEL: &str = "CPH Airport";

/// Ordered street-snippet to hotel table. First matching snippet wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelDirectory {
    entries: Vec<(String, String)>,
    airport_label: String,
}

impl HotelDirectory {
    pub fn new(entries: Vec<(String, String)>, airport_label: impl Into<String>) -> Self {
        Self {
            entries,
            airport_label: airport_label.into(),
        }
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Prefixes a known hotel or the airport label; other addresses pass through.
    ///
    /// An address that already starts with the label it would receive is
    /// returned unchanged, so mapping is idempotent.
    pub fn map_address(&self, address: &str) -> String {
        let label = self
            .entries
            .iter()
            .find(|(snippet, _)| address.contains(snippet.as_str()))
            .map(|(_, hotel)| hotel.as_str())
            .or_else(|| mentions_airport(address).then_some(self.airport_label.as_str()));

        match label {
            Some(label) if !has_label(address, label) => format!("{}, {}", label, address),
            _ => address.to_string(),
        }
    }
}

fn has_label(address: &str, label: &str) -> bool {
    address
        .strip_prefix(label)
        .is_some_and(|rest| rest.starts_with(", "))
}

impl Default for HotelDirectory {
    fn default() -> Self {
        let entries = [
            ("Vester Søgade 6", "Scandic Copenhagen"),
            ("Falkoner Alle 9", "Scandic Falkoner"),
            ("Amager Boulevard 70", "Radisson Blu Scandinavia Hotel"),
            ("Blegdamsvej 3B", "University of Copenhagen Panum"),
        ]
        .into_iter()
        .map(|(snippet, hotel)| (snippet.to_string(), hotel.to_string()))
        .collect();

        Self::new(entries, DEFAULT_AIRPORT_LABEL)
    }
}

pub fn mentions_airport(address: &str) -> bool {
    address.to_lowercase().contains("airport")
}
