use crate::domain::schema::ColumnSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Column names of the raw booking export.
pub mod raw_columns {
    pub const PASSENGER_NAME: &str = "PASSENGER_NAME";
    pub const CUSTOMER_CONTACT_NUMBER: &str = "CUSTOMER_CONTACT_NUMBER";
    pub const PICKUP_ADDRESS: &str = "PICKUP_ADDRESS";
    pub const DROP_OFF_ADDRESS: &str = "DROP_OFF_ADDRESS";
    pub const PICKUP_TIME: &str = "PICKUP_TIME";
    pub const FLIGHT_NUMBER: &str = "FLIGHT_NUMBER";
    pub const VEHICLE_TYPE: &str = "VEHICLE_TYPE";
    pub const AMOUNT_PASSENGERS: &str = "AMOUNT_PASSENGERS";
    pub const AMOUNT_LUGGAGE: &str = "AMOUNT_LUGGAGE";
    pub const CLIENT_INSTRUCTIONS: &str = "CLIENT_INSTRUCTIONS";
    pub const COST: &str = "COST";
    pub const BOOKING_NUMBER: &str = "BOOKING_NUMBER";

    /// Every column a conversion needs. CLIENT_INSTRUCTIONS is optional.
    pub const REQUIRED: [&str; 11] = [
        PASSENGER_NAME,
        CUSTOMER_CONTACT_NUMBER,
        PICKUP_ADDRESS,
        DROP_OFF_ADDRESS,
        PICKUP_TIME,
        FLIGHT_NUMBER,
        VEHICLE_TYPE,
        AMOUNT_PASSENGERS,
        AMOUNT_LUGGAGE,
        COST,
        BOOKING_NUMBER,
    ];
}

/// Column names of the dispatch platform import file.
pub mod output_columns {
    pub const CUSTOMER: &str = "Customer";
    pub const CUSTOMER_CODE: &str = "Customer Code";
    pub const PAX_NAME: &str = "Pax Name";
    pub const MOBILE_1: &str = "Mobile 1";
    pub const PICK_UP: &str = "Pick Up";
    pub const DROP_OFF: &str = "Drop Off";
    pub const PICKUP_TIME: &str = "Pickup Time";
    pub const FLIGHT: &str = "Flight";
    pub const VEHICLE_TYPE: &str = "Vehicle Type";
    pub const ADULTS: &str = "Adults";
    pub const BAGS: &str = "Bags";
    pub const PICK_UP_INSTRUCTIONS: &str = "Pick Up Instructions";
    pub const BASE_RATE: &str = "Base Rate";
    pub const PRICE: &str = "Price";
    pub const SERVICE_TYPE: &str = "Service Type";
    pub const TRIP_STATUS: &str = "Trip Status";
    pub const PAYMENT_METHOD: &str = "Payment Method";
    pub const CUSTOMER_REFERENCE_NO: &str = "Customer Reference No";
    pub const REF_NO: &str = "Ref No";

    /// The meaningful head of the fallback schema, in import order.
    pub const BASIC: [&str; 19] = [
        CUSTOMER,
        CUSTOMER_CODE,
        PAX_NAME,
        MOBILE_1,
        PICK_UP,
        DROP_OFF,
        PICKUP_TIME,
        FLIGHT,
        VEHICLE_TYPE,
        ADULTS,
        BAGS,
        PICK_UP_INSTRUCTIONS,
        BASE_RATE,
        PRICE,
        SERVICE_TYPE,
        TRIP_STATUS,
        PAYMENT_METHOD,
        CUSTOMER_REFERENCE_NO,
        REF_NO,
    ];
}

static NULL: Value = Value::Null;

/// One raw booking row. Cells keep their JSON type so numbers stay numbers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    pub data: HashMap<String, Value>,
}

impl Record {
    pub fn new(data: HashMap<String, Value>) -> Self {
        Self { data }
    }

    /// Absent cells read as null.
    pub fn get(&self, column: &str) -> &Value {
        self.data.get(column).unwrap_or(&NULL)
    }
}

/// A parsed input table: the columns seen in the source plus its rows.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl RawTable {
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// The first `rows` records as `column=value` lines in column order.
    /// Null cells are left out.
    pub fn preview_lines(&self, rows: usize) -> Vec<String> {
        self.records
            .iter()
            .take(rows)
            .enumerate()
            .map(|(idx, record)| {
                let cells: Vec<String> = self
                    .columns
                    .iter()
                    .filter_map(|column| match record.get(column) {
                        Value::Null => None,
                        Value::String(text) => Some(format!("{}={}", column, text)),
                        other => Some(format!("{}={}", column, other)),
                    })
                    .collect();
                format!("#{}: {}", idx + 1, cells.join(", "))
            })
            .collect()
    }
}

/// One converted row, aligned with the schema it was built for.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRecord {
    schema: Arc<ColumnSchema>,
    values: Vec<String>,
}

impl OutputRecord {
    pub fn builder(schema: Arc<ColumnSchema>) -> OutputRecordBuilder {
        OutputRecordBuilder::new(schema)
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.schema
            .position(column)
            .map(|idx| self.values[idx].as_str())
    }

    /// Values in schema order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }
}

/// Starts with every schema column empty; writes to unknown columns are dropped.
#[derive(Debug)]
pub struct OutputRecordBuilder {
    schema: Arc<ColumnSchema>,
    values: Vec<String>,
}

impl OutputRecordBuilder {
    pub fn new(schema: Arc<ColumnSchema>) -> Self {
        let values = vec![String::new(); schema.len()];
        Self { schema, values }
    }

    pub fn set(&mut self, column: &str, value: impl Into<String>) -> &mut Self {
        if let Some(idx) = self.schema.position(column) {
            self.values[idx] = value.into();
        }
        self
    }

    pub fn build(self) -> OutputRecord {
        OutputRecord {
            schema: self.schema,
            values: self.values,
        }
    }
}

/// Everything the transform phase produced, ready to be written out.
#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub schema: Arc<ColumnSchema>,
    pub records: Vec<OutputRecord>,
    pub csv_output: String,
}

impl ConversionResult {
    pub fn row_count(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_ignores_unknown_columns() {
        let schema = Arc::new(ColumnSchema::from_header(vec![
            "Customer".to_string(),
            "Extra".to_string(),
        ]));
        let mut builder = OutputRecord::builder(schema);
        builder.set("Customer", "LH Crew").set("Not In Schema", "x");
        let record = builder.build();

        assert_eq!(record.get("Customer"), Some("LH Crew"));
        assert_eq!(record.get("Extra"), Some(""));
        assert_eq!(record.get("Customer Reference No"), Some(""));
        assert_eq!(record.get("Not In Schema"), None);
        assert_eq!(record.values().len(), 3);
    }

    #[test]
    fn test_raw_preview_follows_column_order() {
        let record = |name: &str, pax: Value| {
            Record::new(HashMap::from([
                ("PASSENGER_NAME".to_string(), Value::String(name.to_string())),
                ("AMOUNT_PASSENGERS".to_string(), pax),
            ]))
        };
        let table = RawTable {
            columns: vec!["PASSENGER_NAME".to_string(), "AMOUNT_PASSENGERS".to_string()],
            records: vec![
                record("John Doe", Value::from(2)),
                record("Jane Doe", Value::Null),
                record("Ann Doe", Value::from(1)),
            ],
        };

        assert_eq!(
            table.preview_lines(2),
            vec![
                "#1: PASSENGER_NAME=John Doe, AMOUNT_PASSENGERS=2",
                "#2: PASSENGER_NAME=Jane Doe",
            ]
        );
        assert!(table.preview_lines(0).is_empty());
        assert_eq!(table.preview_lines(10).len(), 3);
    }

    #[test]
    fn test_record_missing_cell_is_null() {
        let record = Record::default();
        assert!(record.get("COST").is_null());
    }
}
