// Mock travel search service: CSV loading, normalization and flight/hotel search

pub mod config;
pub mod dataset;
pub mod loader;
pub mod records;
pub mod search;
pub mod server;

// Re-export key types for convenience
pub use config::{ConfigError, ServiceConfig};
pub use dataset::{Dataset, DatasetSummary, HealthReport, ServiceInfo};
pub use loader::{
    load_flights, load_hotels, parse_flights, parse_hotels, LoadError, LoadReport, RowError,
};
pub use records::{FlightRecord, HotelRecord};
pub use search::{
    FlightSearchRequest, FlightSearchResponse, FlightSearchResult, HotelSearchRequest,
    HotelSearchResponse, HotelSearchResult, SearchStatus, TravelSearchEngine,
};
pub use server::{router, ApiError};
