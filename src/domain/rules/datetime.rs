//! Pickup time parsing and shifting.
//!
//! Spreadsheet serial dates count days from 1899-12-30 with the time of day
//! in the fraction.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};
use serde_json::Value;
use std::sync::OnceLock;

/// Minutes subtracted from the booked pickup time.
pub const PICKUP_LEAD_MINUTES: i64 = 10;

/// `DD/MM/YYYY HH:MM`
pub const PICKUP_TIME_FORMAT: &str = "%d/%m/%Y %H:%M";

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Serial day number of 9999-12-31, the last date a spreadsheet can hold.
pub const MAX_SERIAL: f64 = 2_958_465.0;

/// Date layouts tried in order. Ambiguous numeric dates read month-first and
/// fall back to day-first when the month-first reading is impossible.
const DATE_LAYOUTS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%m.%d.%Y",
    "%d.%m.%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%Y%m%d",
];

const TIME_LAYOUTS: &[&str] = &["%H:%M:%S%.f", "%H:%M", "%I:%M:%S %p", "%I:%M %p"];

fn datetime_layouts() -> &'static [String] {
    static LAYOUTS: OnceLock<Vec<String>> = OnceLock::new();
    LAYOUTS.get_or_init(|| {
        DATE_LAYOUTS
            .iter()
            .flat_map(|date| {
                TIME_LAYOUTS.iter().flat_map(move |time| {
                    [" ", "T"]
                        .into_iter()
                        .map(move |sep| format!("{}{}{}", date, sep, time))
                })
            })
            .collect()
    })
}

fn serial_epoch() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)
}

/// Converts a spreadsheet serial day number, fraction included, to a timestamp.
///
/// Values outside `0..=MAX_SERIAL` are not serial dates.
pub fn from_serial(serial: f64) -> Option<NaiveDateTime> {
    if !(0.0..=MAX_SERIAL).contains(&serial) {
        return None;
    }
    let millis = (serial * MILLIS_PER_DAY).round();
    let offset = TimeDelta::try_milliseconds(millis as i64)?;
    serial_epoch()?.checked_add_signed(offset)
}

/// Best-effort parse of a free-form date or date-time string.
pub fn parse_datetime_text(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(dt) = text.parse::<f64>().ok().and_then(from_serial) {
        return Some(dt);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.naive_local());
    }

    datetime_layouts()
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_LAYOUTS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Reads a pickup cell: numbers are serial dates, strings are parsed, anything
/// else is absent.
pub fn parse_pickup_time(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::Number(n) => n.as_f64().and_then(from_serial),
        Value::String(s) => parse_datetime_text(s),
        _ => None,
    }
}

/// The pickup time moved ten minutes earlier, or empty when it cannot be read.
pub fn shift_pickup_time(value: &Value) -> String {
    parse_pickup_time(value)
        .and_then(|dt| dt.checked_sub_signed(TimeDelta::minutes(PICKUP_LEAD_MINUTES)))
        .map(|dt| dt.format(PICKUP_TIME_FORMAT).to_string())
        .unwrap_or_default()
}
