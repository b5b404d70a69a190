use crate::domain::rules::{CrewClassifier, HotelDirectory};
use crate::utils::error::Result;

/// Contact number the booking platform uses when the passenger left none.
pub const DEFAULT_PHONE_FILTER: &str = "442038568655";

/// Read-only lookup data shared by every row of a conversion.
#[derive(Debug, Clone)]
pub struct LookupTables {
    pub hotels: HotelDirectory,
    pub crew: CrewClassifier,
    pub phone_filter: String,
}

impl LookupTables {
    pub fn new(hotels: HotelDirectory, crew: CrewClassifier, phone_filter: impl Into<String>) -> Self {
        Self {
            hotels,
            crew,
            phone_filter: phone_filter.into(),
        }
    }

    pub fn builtin() -> Result<Self> {
        Ok(Self::new(
            HotelDirectory::default(),
            CrewClassifier::builtin()?,
            DEFAULT_PHONE_FILTER,
        ))
    }

    /// Blanks the placeholder contact number, passes anything else through.
    pub fn redact_contact(&self, contact: &str) -> String {
        if contact == self.phone_filter {
            String::new()
        } else {
            contact.to_string()
        }
    }
}
