use std::fmt;

/// Passenger count from which an unlabelled booking needs a people carrier.
pub const PEOPLE_CARRIER_THRESHOLD: i64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleClass {
    Standard,
    PeopleCarrier,
}

impl VehicleClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::PeopleCarrier => "People Carrier",
        }
    }

    /// An explicit van label wins over sedan, which wins over head count.
    pub fn classify(raw_type: &str, passengers: i64) -> Self {
        let raw_type = raw_type.to_lowercase();
        if raw_type.contains("van") || raw_type.contains("minivan") {
            Self::PeopleCarrier
        } else if raw_type.contains("sedan") {
            Self::Standard
        } else if passengers >= PEOPLE_CARRIER_THRESHOLD {
            Self::PeopleCarrier
        } else {
            Self::Standard
        }
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
