use crate::domain::lookup::LookupTables;
use crate::domain::model::{output_columns as out, raw_columns as raw};
use crate::domain::model::{OutputRecord, RawTable, Record};
use crate::domain::rules::cell::{cell_integer, cell_number, cell_text};
use crate::domain::rules::datetime::shift_pickup_time;
use crate::domain::rules::flight::format_flight;
use crate::domain::rules::text::trim_text;
use crate::domain::rules::{FlightFormat, VehicleClass};
use crate::domain::schema::ColumnSchema;
use crate::utils::error::{ImportError, Result};
use serde_json::Value;
use std::sync::Arc;

pub const PAX_NAME_LIMIT: usize = 50;
pub const INSTRUCTIONS_LIMIT: usize = 100;

pub const SERVICE_TYPE: &str = "Point to Point";
pub const TRIP_STATUS: &str = "UN-SCHEDULED";
pub const PAYMENT_METHOD: &str = "Booked on account";

/// Turns raw booking rows into import rows for one schema.
#[derive(Debug, Clone)]
pub struct RowMapper {
    schema: Arc<ColumnSchema>,
    lookups: Arc<LookupTables>,
    flight_format: FlightFormat,
}

impl RowMapper {
    pub fn new(schema: ColumnSchema, lookups: LookupTables, flight_format: FlightFormat) -> Self {
        Self {
            schema: Arc::new(schema),
            lookups: Arc::new(lookups),
            flight_format,
        }
    }

    pub fn schema(&self) -> &Arc<ColumnSchema> {
        &self.schema
    }

    pub fn flight_format(&self) -> FlightFormat {
        self.flight_format
    }

    /// Fails on the first required column the input lacks.
    pub fn check_columns(&self, table: &RawTable) -> Result<()> {
        match raw::REQUIRED.iter().find(|c| !table.has_column(c)) {
            Some(column) => Err(ImportError::MissingColumnError {
                column: column.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Maps every row or none: the first bad row aborts the whole table.
    pub fn map_table(&self, table: &RawTable) -> Result<Vec<OutputRecord>> {
        self.check_columns(table)?;
        table
            .records
            .iter()
            .enumerate()
            .map(|(idx, record)| self.map_record(record, idx + 1))
            .collect()
    }

    /// `row` is the 1-based data row used in error messages.
    pub fn map_record(&self, record: &Record, row: usize) -> Result<OutputRecord> {
        let passenger_name = cell_text(record.get(raw::PASSENGER_NAME));
        let passenger_name = passenger_name.as_deref();
        let customer = self.lookups.crew.classify(passenger_name.unwrap_or_default());

        let pickup_address = text_or_empty(record.get(raw::PICKUP_ADDRESS));
        let drop_off_address = text_or_empty(record.get(raw::DROP_OFF_ADDRESS));
        let contact = text_or_empty(record.get(raw::CUSTOMER_CONTACT_NUMBER));

        let passengers = required_integer(record, raw::AMOUNT_PASSENGERS, row)?;
        let cost = required_number(record, raw::COST, row)?;
        let bags = cell_integer(record.get(raw::AMOUNT_LUGGAGE)).unwrap_or(0);

        let vehicle = VehicleClass::classify(
            &text_or_empty(record.get(raw::VEHICLE_TYPE)),
            passengers,
        );
        let flight = format_flight(
            cell_text(record.get(raw::FLIGHT_NUMBER)).as_deref(),
            &pickup_address,
            self.flight_format,
        );
        let instructions = cell_text(record.get(raw::CLIENT_INSTRUCTIONS));

        let mut builder = OutputRecord::builder(Arc::clone(&self.schema));
        builder
            .set(out::CUSTOMER, customer.name.as_str())
            .set(out::CUSTOMER_CODE, customer.code.as_str())
            .set(out::PAX_NAME, trim_text(passenger_name, PAX_NAME_LIMIT))
            .set(out::MOBILE_1, self.lookups.redact_contact(&contact))
            .set(out::PICK_UP, self.lookups.hotels.map_address(&pickup_address))
            .set(out::DROP_OFF, self.lookups.hotels.map_address(&drop_off_address))
            .set(out::PICKUP_TIME, shift_pickup_time(record.get(raw::PICKUP_TIME)))
            .set(out::FLIGHT, flight)
            .set(out::VEHICLE_TYPE, vehicle.as_str())
            .set(out::ADULTS, passengers.to_string())
            .set(out::BAGS, bags.to_string())
            .set(
                out::PICK_UP_INSTRUCTIONS,
                trim_text(instructions.as_deref(), INSTRUCTIONS_LIMIT),
            )
            .set(out::BASE_RATE, format!("{}", cost.round_ties_even() as i64))
            .set(out::PRICE, "")
            .set(out::SERVICE_TYPE, SERVICE_TYPE)
            .set(out::TRIP_STATUS, TRIP_STATUS)
            .set(out::PAYMENT_METHOD, PAYMENT_METHOD)
            .set(
                out::CUSTOMER_REFERENCE_NO,
                text_or_empty(record.get(raw::BOOKING_NUMBER)),
            )
            .set(out::REF_NO, "");

        Ok(builder.build())
    }
}

fn text_or_empty(value: &Value) -> String {
    cell_text(value).unwrap_or_default()
}

fn coercion_error(record: &Record, column: &str, row: usize, expected: &'static str) -> ImportError {
    ImportError::CoercionError {
        row,
        column: column.to_string(),
        value: text_or_empty(record.get(column)),
        expected,
    }
}

fn required_integer(record: &Record, column: &str, row: usize) -> Result<i64> {
    cell_integer(record.get(column)).ok_or_else(|| coercion_error(record, column, row, "an integer"))
}

fn required_number(record: &Record, column: &str, row: usize) -> Result<f64> {
    cell_number(record.get(column)).ok_or_else(|| coercion_error(record, column, row, "a number"))
}
