// Immutable snapshot of the loaded data, plus read-only introspection over it
use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::config::ServiceConfig;
use crate::loader::{load_flights, load_hotels};
use crate::records::{FlightRecord, HotelRecord};
use crate::search::{
    FlightSearchRequest, FlightSearchResponse, HotelSearchRequest, HotelSearchResponse,
    TravelSearchEngine,
};

pub const SERVICE_NAME: &str = "travel-search-api";

const SAMPLE_SIZE: usize = 3;

#[derive(Debug, Clone)]
pub struct Dataset {
    hotels: Vec<HotelRecord>,
    flights: Vec<FlightRecord>,
    loaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub sample_hotels: Vec<HotelRecord>,
    pub sample_flights: Vec<FlightRecord>,
    pub hotels_count: usize,
    pub flights_count: usize,
    pub available_destinations: Vec<String>,
    pub available_flight_routes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadedCounts {
    pub hotels: usize,
    pub flights: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceInfo {
    pub message: String,
    pub description: String,
    pub endpoints: BTreeMap<String, String>,
    pub data_loaded: LoadedCounts,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataStatus {
    pub hotels_loaded: bool,
    pub flights_loaded: bool,
    pub loaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub status: String,
    pub service: String,
    pub data_status: DataStatus,
}

impl Dataset {
    pub fn new(hotels: Vec<HotelRecord>, flights: Vec<FlightRecord>) -> Self {
        Self {
            hotels,
            flights,
            loaded_at: Utc::now(),
        }
    }

    // Load both tables once. Never fails: an unreadable source leaves its collection empty.
    pub fn load(config: &ServiceConfig) -> Self {
        let dataset = Self::new(
            load_hotels(&config.hotels_path),
            load_flights(&config.flights_path),
        );
        info!(
            "Loaded {} hotels and {} flights",
            dataset.hotels.len(),
            dataset.flights.len()
        );
        dataset
    }

    pub fn hotels(&self) -> &[HotelRecord] {
        &self.hotels
    }

    pub fn flights(&self) -> &[FlightRecord] {
        &self.flights
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn engine(&self) -> TravelSearchEngine<'_> {
        TravelSearchEngine::new(&self.hotels, &self.flights)
    }

    pub fn search_flights(&self, request: &FlightSearchRequest) -> FlightSearchResponse {
        self.engine().search_flights(request)
    }

    pub fn search_hotels(&self, request: &HotelSearchRequest) -> HotelSearchResponse {
        self.engine().search_hotels(request)
    }

    pub fn summary(&self) -> DatasetSummary {
        let destinations: BTreeSet<&str> =
            self.hotels.iter().map(|h| h.destination.as_str()).collect();
        let routes: BTreeSet<String> = self.flights.iter().map(FlightRecord::route).collect();

        DatasetSummary {
            sample_hotels: self.hotels.iter().take(SAMPLE_SIZE).cloned().collect(),
            sample_flights: self.flights.iter().take(SAMPLE_SIZE).cloned().collect(),
            hotels_count: self.hotels.len(),
            flights_count: self.flights.len(),
            available_destinations: destinations.into_iter().map(str::to_string).collect(),
            available_flight_routes: routes.into_iter().collect(),
        }
    }

    pub fn service_info(&self) -> ServiceInfo {
        let endpoints = [
            ("flight_search", "/searchflight"),
            ("hotel_search", "/searchhotel"),
            ("debug", "/debug"),
            ("health", "/health"),
        ]
        .into_iter()
        .map(|(name, path)| (name.to_string(), path.to_string()))
        .collect();

        ServiceInfo {
            message: "Travel Search API".to_string(),
            description: "API for searching flights and hotels".to_string(),
            endpoints,
            data_loaded: LoadedCounts {
                hotels: self.hotels.len(),
                flights: self.flights.len(),
            },
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn health(&self) -> HealthReport {
        HealthReport {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
            data_status: DataStatus {
                hotels_loaded: !self.hotels.is_empty(),
                flights_loaded: !self.flights.is_empty(),
                loaded_at: self.loaded_at,
            },
        }
    }
}
