// Flight and hotel search over the loaded records
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::records::{FlightRecord, HotelRecord};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSearchRequest {
    pub departure_date: String,
    pub return_date: String,
    pub travelers: u32,
    pub destination: String,
    pub origin: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelSearchRequest {
    pub check_in: String,
    pub check_out: String,
    pub destination: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSearchResult {
    pub search_id: String,
    pub departure_date: String,
    pub return_date: String,
    pub travelers: u32,
    pub destination: String,
    pub origin: String,
    pub flight_name: String,
    pub price: f64,
    pub departure_time: String,
    // Always null: the flight table has no arrival column
    pub arrival_time: Option<String>,
    pub flight_number: String,
    pub route: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelSearchResult {
    pub search_id: String,
    pub check_in: String,
    pub check_out: String,
    pub destination: String,
    pub hotel_name: String,
    pub rate_per_night: f64,
}

// An empty result set is reported through the status, never as an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Success,
    NoFlightsFound,
    NoHotelsFound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightSearchResponse {
    pub status: SearchStatus,
    pub results: Vec<FlightSearchResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelSearchResponse {
    pub status: SearchStatus,
    pub results: Vec<HotelSearchResult>,
}

// Matching key for user supplied city and destination names
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

fn compact_date(date: &str) -> String {
    date.replace('-', "")
}

// Read-only view over the record collections
#[derive(Debug, Clone, Copy)]
pub struct TravelSearchEngine<'a> {
    hotels: &'a [HotelRecord],
    flights: &'a [FlightRecord],
}

impl<'a> TravelSearchEngine<'a> {
    pub fn new(hotels: &'a [HotelRecord], flights: &'a [FlightRecord]) -> Self {
        Self { hotels, flights }
    }

    // Outbound legs (origin -> destination) come first, then return legs
    // (destination -> origin), each in source order. Return legs echo the
    // request's origin and destination swapped.
    pub fn search_flights(&self, request: &FlightSearchRequest) -> FlightSearchResponse {
        let origin = normalize(&request.origin);
        let destination = normalize(&request.destination);

        let outbound = self
            .flights
            .iter()
            .filter(|f| f.departure_city == origin && f.arrival_city == destination)
            .map(|f| FlightSearchResult {
                search_id: format!(
                    "FL{}{}",
                    f.flight_number,
                    compact_date(&request.departure_date)
                ),
                departure_date: request.departure_date.clone(),
                return_date: request.return_date.clone(),
                travelers: request.travelers,
                destination: request.destination.clone(),
                origin: request.origin.clone(),
                flight_name: f.flight_name.clone(),
                price: f.fare * f64::from(request.travelers),
                departure_time: f.departure_time.clone(),
                arrival_time: None,
                flight_number: f.flight_number.clone(),
                route: format!("{} to {}", request.origin, request.destination),
            });

        let inbound = self
            .flights
            .iter()
            .filter(|f| f.departure_city == destination && f.arrival_city == origin)
            .map(|f| FlightSearchResult {
                search_id: format!(
                    "FL{}{}",
                    f.flight_number,
                    compact_date(&request.return_date)
                ),
                departure_date: request.departure_date.clone(),
                return_date: request.return_date.clone(),
                travelers: request.travelers,
                destination: request.origin.clone(),
                origin: request.destination.clone(),
                flight_name: f.flight_name.clone(),
                price: f.fare * f64::from(request.travelers),
                departure_time: f.departure_time.clone(),
                arrival_time: None,
                flight_number: f.flight_number.clone(),
                route: format!("{} to {}", request.destination, request.origin),
            });

        let results: Vec<FlightSearchResult> = outbound.chain(inbound).collect();
        debug!(
            origin = %origin,
            destination = %destination,
            matches = results.len(),
            "Flight search"
        );

        let status = if results.is_empty() {
            SearchStatus::NoFlightsFound
        } else {
            SearchStatus::Success
        };
        FlightSearchResponse { status, results }
    }

    // Exact destination match. Ids are numbered per response, starting at 01.
    pub fn search_hotels(&self, request: &HotelSearchRequest) -> HotelSearchResponse {
        let destination = normalize(&request.destination);
        let prefix: String = request
            .destination
            .trim()
            .to_uppercase()
            .chars()
            .take(3)
            .collect();
        let check_in = compact_date(&request.check_in);

        let results: Vec<HotelSearchResult> = self
            .hotels
            .iter()
            .filter(|h| h.destination == destination)
            .enumerate()
            .map(|(index, h)| HotelSearchResult {
                search_id: format!("HT{}{}{:02}", prefix, check_in, index + 1),
                check_in: request.check_in.clone(),
                check_out: request.check_out.clone(),
                destination: request.destination.clone(),
                hotel_name: h.hotel_name.clone(),
                rate_per_night: h.rate_per_night,
            })
            .collect();
        debug!(destination = %destination, matches = results.len(), "Hotel search");

        let status = if results.is_empty() {
            SearchStatus::NoHotelsFound
        } else {
            SearchStatus::Success
        };
        HotelSearchResponse { status, results }
    }
}
