//! Lookup tables from a TOML file.
//!
//! Every key is optional. A list that is present replaces the built-in list
//! entirely, it is not merged.

use crate::domain::lookup::{LookupTables, DEFAULT_PHONE_FILTER};
use crate::domain::rules::address::DEFAULT_AIRPORT_LABEL;
use crate::domain::rules::{CrewClassifier, CrewRule, Customer, FlightFormat, HotelDirectory};
use crate::utils::error::{ImportError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LookupConfig {
    pub phone_filter: Option<String>,
    pub airport_label: Option<String>,
    pub flight_format: Option<FlightFormat>,
    pub default_customer: Option<CustomerEntry>,
    pub hotels: Option<Vec<HotelEntry>>,
    pub crew_rules: Option<Vec<CrewRuleEntry>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelEntry {
    pub snippet: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerEntry {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewRuleEntry {
    pub pattern: String,
    pub name: String,
    pub code: String,
}

impl LookupConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// `FlightFormat` chosen by the file, or the built-in default.
    pub fn flight_format(&self) -> FlightFormat {
        self.flight_format.unwrap_or_default()
    }

    /// Compiles crew patterns and fills the gaps with built-in tables.
    pub fn into_tables(self) -> Result<LookupTables> {
        let builtin = LookupTables::builtin()?;

        let airport_label = self
            .airport_label
            .unwrap_or_else(|| DEFAULT_AIRPORT_LABEL.to_string());
        let hotel_entries = match self.hotels {
            Some(hotels) => hotels.into_iter().map(|h| (h.snippet, h.name)).collect(),
            None => builtin.hotels.entries().to_vec(),
        };
        let hotels = HotelDirectory::new(hotel_entries, airport_label);

        let fallback = self
            .default_customer
            .map(|c| Customer::new(c.name, c.code))
            .unwrap_or_default();
        let rules = match self.crew_rules {
            Some(entries) => entries
                .into_iter()
                .map(|e| CrewRule::new(&e.pattern, Customer::new(e.name, e.code)))
                .collect::<Result<Vec<_>>>()?,
            None => builtin.crew.rules().to_vec(),
        };
        let crew = CrewClassifier::new(rules, fallback);

        let phone_filter = self
            .phone_filter
            .unwrap_or_else(|| DEFAULT_PHONE_FILTER.to_string());

        tracing::debug!(
            "Lookup tables: {} hotels, {} crew rules",
            hotels.entries().len(),
            crew.rules().len()
        );
        Ok(LookupTables::new(hotels, crew, phone_filter))
    }
}

impl Validate for LookupConfig {
    fn validate(&self) -> Result<()> {
        if let Some(hotels) = &self.hotels {
            if let Some(empty) = hotels.iter().find(|h| h.snippet.trim().is_empty()) {
                return Err(ImportError::InvalidConfigValueError {
                    field: "hotels.snippet".to_string(),
                    value: empty.name.clone(),
                    reason: "An empty snippet would match every address".to_string(),
                });
            }
        }

        if let Some(rules) = &self.crew_rules {
            if let Some(empty) = rules.iter().find(|r| r.pattern.is_empty()) {
                return Err(ImportError::InvalidConfigValueError {
                    field: "crew_rules.pattern".to_string(),
                    value: empty.name.clone(),
                    reason: "An empty pattern would match every passenger".to_string(),
                });
            }
        }

        Ok(())
    }
}
