use serde::{Deserialize, Serialize};

// Normalized hotel row, one per retained line of the hotel table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelRecord {
    // Lowercased and trimmed, never empty
    pub destination: String,
    pub hotel_name: String,
    pub rate_per_night: f64,
}

// Normalized flight row. Cities are lowercased for matching,
// departure time is kept as the opaque source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightRecord {
    pub flight_name: String,
    pub fare: f64,
    pub departure_city: String,
    pub arrival_city: String,
    pub departure_time: String,
    pub flight_number: String,
}

impl FlightRecord {
    pub fn route(&self) -> String {
        format!("{} to {}", self.departure_city, self.arrival_city)
    }
}

// Raw rows as they appear in the source tables (headers already trimmed).
// Every column is optional here; required fields are checked during normalization.
#[derive(Debug, Default, Deserialize)]
pub struct RawHotelRow {
    #[serde(rename = "Destination")]
    pub destination: Option<String>,
    #[serde(rename = "Hotel Name")]
    pub hotel_name: Option<String>,
    #[serde(rename = "Rate Per Night (INR)")]
    pub rate_per_night: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawFlightRow {
    #[serde(rename = "Flight Name")]
    pub flight_name: Option<String>,
    #[serde(rename = "Fare (INR)")]
    pub fare: Option<String>,
    #[serde(rename = "Departure City")]
    pub departure_city: Option<String>,
    #[serde(rename = "Arrival City")]
    pub arrival_city: Option<String>,
    #[serde(rename = "Departure Time")]
    pub departure_time: Option<String>,
    #[serde(rename = "Flight Number")]
    pub flight_number: Option<String>,
}

pub const HOTEL_COLUMNS: [&str; 3] = ["Destination", "Hotel Name", "Rate Per Night (INR)"];

pub const FLIGHT_COLUMNS: [&str; 6] = [
    "Flight Name",
    "Fare (INR)",
    "Departure City",
    "Arrival City",
    "Departure Time",
    "Flight Number",
];
