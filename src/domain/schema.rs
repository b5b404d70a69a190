//! Output column schema.
//!
//! The schema is the ordered header of the import file. It comes either from
//! a template CSV (header row only) or from the built-in 98-column list.

use crate::domain::model::output_columns;
use crate::utils::error::{ImportError, Result};
use std::collections::{HashMap, HashSet};

/// Column count of the dispatch platform's import layout.
pub const FALLBACK_WIDTH: usize = 98;

/// Renames repeated names to `name.1`, `name.2`, ... keeping the first as is.
pub fn dedupe_names(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(names.len());
    let mut unique = Vec::with_capacity(names.len() + 1);

    for name in names {
        let mut candidate = name.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", name, suffix);
            suffix += 1;
        }
        seen.insert(candidate.clone());
        unique.push(candidate);
    }

    unique
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    columns: Vec<String>,
    index: HashMap<String, usize>,
}

impl ColumnSchema {
    /// Builds a schema from header names.
    ///
    /// Duplicate names get `.1`, `.2`, ... suffixes on their later occurrences,
    /// and "Customer Reference No" is appended when the header lacks it.
    pub fn from_header(header: Vec<String>) -> Self {
        let mut columns = dedupe_names(header);
        let mut index: HashMap<String, usize> = columns
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect();

        if !index.contains_key(output_columns::CUSTOMER_REFERENCE_NO) {
            index.insert(
                output_columns::CUSTOMER_REFERENCE_NO.to_string(),
                columns.len(),
            );
            columns.push(output_columns::CUSTOMER_REFERENCE_NO.to_string());
        }

        Self { columns, index }
    }

    /// The 19 meaningful columns padded with inert placeholders to 98.
    pub fn fallback() -> Self {
        let mut header: Vec<String> = output_columns::BASIC
            .iter()
            .map(|c| c.to_string())
            .collect();
        let placeholders = FALLBACK_WIDTH - header.len();
        header.extend((1..=placeholders).map(|i| format!("Placeholder_{}", i)));
        Self::from_header(header)
    }

    /// Reads only the header row of a template CSV.
    pub fn from_template_csv(data: &[u8]) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(data);
        let header: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

        if header.iter().all(|h| h.trim().is_empty()) {
            return Err(ImportError::ConfigError {
                message: "template has no header row".to_string(),
            });
        }

        Ok(Self::from_header(header))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self::fallback()
    }
}
