use crate::domain::rules::address::mentions_airport;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// How an airport pickup's flight number is written to the import file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightFormat {
    /// The flight number exactly as booked.
    Raw,
    /// A space between the two-letter airline code and the number: `LH 441`.
    #[default]
    Spaced,
}

impl FlightFormat {
    pub fn apply(&self, flight: &str) -> String {
        match self {
            Self::Raw => flight.to_string(),
            Self::Spaced => airline_code_pattern()
                .replace(flight, "$code $number")
                .into_owned(),
        }
    }
}

impl FromStr for FlightFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "spaced" => Ok(Self::Spaced),
            other => Err(format!(
                "unknown flight format '{}', expected 'raw' or 'spaced'",
                other
            )),
        }
    }
}

impl fmt::Display for FlightFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw => f.write_str("raw"),
            Self::Spaced => f.write_str("spaced"),
        }
    }
}

fn airline_code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<code>[a-zA-Z]{2})(?P<number>\d+)").expect("valid flight pattern")
    })
}

/// Flight numbers only matter for airport pickups; elsewhere the column stays empty.
pub fn format_flight(flight: Option<&str>, pickup_address: &str, format: FlightFormat) -> String {
    match flight {
        Some(flight) if mentions_airport(pickup_address) => format.apply(flight),
        _ => String::new(),
    }
}
