// Data loading and normalization for the hotel and flight tables
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::records::{
    FlightRecord, HotelRecord, RawFlightRow, RawHotelRow, FLIGHT_COLUMNS, HOTEL_COLUMNS,
};

// A source that cannot be read as a whole
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    CsvError(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

// A single row that could not be normalized. Rows are numbered from 1, header excluded.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowError {
    #[error("row {row}: missing required field '{field}'")]
    MissingField { row: usize, field: &'static str },

    #[error("row {row}: cannot parse '{value}' in '{field}' as an amount")]
    InvalidAmount {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("row {row}: malformed record: {message}")]
    Malformed { row: usize, message: String },
}

// Outcome of normalizing one source
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport<T> {
    pub records: Vec<T>,
    pub rejected: Vec<RowError>,
}

impl<T> Default for LoadReport<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

// Strip thousands separators and quoting, then parse. Negative and
// non-finite amounts are rejected.
pub fn clean_amount(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|c| *c != ',' && *c != '"').collect();
    let value = cleaned.trim().parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn required(value: Option<&str>, field: &'static str, row: usize) -> Result<String, RowError> {
    non_blank(value)
        .map(str::to_string)
        .ok_or(RowError::MissingField { row, field })
}

fn amount(value: Option<&str>, field: &'static str, row: usize) -> Result<f64, RowError> {
    let text = non_blank(value).ok_or(RowError::MissingField { row, field })?;
    clean_amount(text).ok_or_else(|| RowError::InvalidAmount {
        row,
        field,
        value: text.to_string(),
    })
}

impl RawFlightRow {
    fn into_record(self, row: usize) -> Result<FlightRecord, RowError> {
        Ok(FlightRecord {
            flight_name: required(self.flight_name.as_deref(), "Flight Name", row)?,
            fare: amount(self.fare.as_deref(), "Fare (INR)", row)?,
            departure_city: required(self.departure_city.as_deref(), "Departure City", row)?
                .to_lowercase(),
            arrival_city: required(self.arrival_city.as_deref(), "Arrival City", row)?
                .to_lowercase(),
            departure_time: required(self.departure_time.as_deref(), "Departure Time", row)?,
            flight_number: required(self.flight_number.as_deref(), "Flight Number", row)?,
        })
    }
}

fn csv_reader<R: Read>(source: R, columns: &[&str]) -> Result<csv::Reader<R>, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| LoadError::CsvError(e.to_string()))?;
    if let Some(missing) = columns
        .iter()
        .find(|column| !headers.iter().any(|header| header == **column))
    {
        return Err(LoadError::MissingColumn(missing.to_string()));
    }

    Ok(reader)
}

// Normalize the hotel table.
//
// Blank destinations inherit the last non-blank one seen above them, including
// from rows that are later dropped for having no hotel name. Rows without a
// hotel name are dropped before their rate is looked at.
pub fn parse_hotels<R: Read>(source: R) -> Result<LoadReport<HotelRecord>, LoadError> {
    let mut reader = csv_reader(source, &HOTEL_COLUMNS)?;
    let mut report = LoadReport::default();
    let mut current_destination: Option<String> = None;

    for (index, row) in reader.deserialize::<RawHotelRow>().enumerate() {
        let row_number = index + 1;
        let raw = match row {
            Ok(raw) => raw,
            Err(e) => {
                report.rejected.push(RowError::Malformed {
                    row: row_number,
                    message: e.to_string(),
                });
                continue;
            }
        };

        if let Some(destination) = non_blank(raw.destination.as_deref()) {
            current_destination = Some(destination.to_lowercase());
        }

        let Some(hotel_name) = non_blank(raw.hotel_name.as_deref()) else {
            debug!(row = row_number, "Skipping hotel row without a name");
            continue;
        };
        let Some(destination) = current_destination.clone() else {
            debug!(row = row_number, "Skipping hotel row before any destination");
            continue;
        };

        match amount(raw.rate_per_night.as_deref(), "Rate Per Night (INR)", row_number) {
            Ok(rate_per_night) => report.records.push(HotelRecord {
                destination,
                hotel_name: hotel_name.to_string(),
                rate_per_night,
            }),
            Err(e) => report.rejected.push(e),
        }
    }

    Ok(report)
}

// Normalize the flight table. Every row is kept unless one of its fields is invalid.
pub fn parse_flights<R: Read>(source: R) -> Result<LoadReport<FlightRecord>, LoadError> {
    let mut reader = csv_reader(source, &FLIGHT_COLUMNS)?;
    let mut report = LoadReport::default();

    for (index, row) in reader.deserialize::<RawFlightRow>().enumerate() {
        let row_number = index + 1;
        let result = row
            .map_err(|e| RowError::Malformed {
                row: row_number,
                message: e.to_string(),
            })
            .and_then(|raw| raw.into_record(row_number));

        match result {
            Ok(record) => report.records.push(record),
            Err(e) => report.rejected.push(e),
        }
    }

    Ok(report)
}

fn open_and_parse<T>(
    path: &Path,
    parse: fn(File) -> Result<LoadReport<T>, LoadError>,
) -> Result<LoadReport<T>, LoadError> {
    let file = File::open(path)?;
    parse(file)
}

// Load a source from disk, logging failures instead of returning them.
// An unreadable source yields an empty collection.
fn load_source<T>(
    kind: &str,
    path: &Path,
    parse: fn(File) -> Result<LoadReport<T>, LoadError>,
) -> Vec<T> {
    match open_and_parse(path, parse) {
        Ok(report) => {
            for rejected in &report.rejected {
                warn!(source = kind, path = %path.display(), "Rejected {}", rejected);
            }
            info!(
                source = kind,
                path = %path.display(),
                loaded = report.records.len(),
                rejected = report.rejected.len(),
                "Loaded {} data",
                kind
            );
            report.records
        }
        Err(e) => {
            error!(source = kind, path = %path.display(), "Error loading {} data: {}", kind, e);
            Vec::new()
        }
    }
}

pub fn load_hotels(path: impl AsRef<Path>) -> Vec<HotelRecord> {
    load_source("hotels", path.as_ref(), parse_hotels)
}

pub fn load_flights(path: impl AsRef<Path>) -> Vec<FlightRecord> {
    load_source("flights", path.as_ref(), parse_flights)
}
