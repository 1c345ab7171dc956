// HTTP boundary: validates request payloads and dispatches into the dataset
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ServiceConfig;
use crate::dataset::{Dataset, DatasetSummary, HealthReport, ServiceInfo};
use crate::search::{
    FlightSearchRequest, FlightSearchResponse, HotelSearchRequest, HotelSearchResponse,
};

// Requests that never reach the search engine
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    MalformedBody(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::MalformedBody(rejection) => rejection.status(),
        };
        warn!(status = status.as_u16(), "Rejected request: {}", self);
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

pub fn router(dataset: Arc<Dataset>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/debug", get(debug_data))
        .route("/searchflight", post(search_flight))
        .route("/searchhotel", post(search_hotel))
        .with_state(dataset)
}

// Resolves the configured host, so names like `localhost` work as well as IP literals
pub async fn bind(config: &ServiceConfig) -> anyhow::Result<TcpListener> {
    let (host, port) = config.bind_addr();
    TcpListener::bind((host, port))
        .await
        .with_context(|| format!("failed to bind {}:{}", host, port))
}

pub async fn run(config: &ServiceConfig, dataset: Arc<Dataset>) -> anyhow::Result<()> {
    let listener = bind(config).await?;
    info!("Travel search API running at http://{}", listener.local_addr()?);

    axum::serve(listener, router(dataset))
        .await
        .context("server terminated")?;
    Ok(())
}

async fn root(State(dataset): State<Arc<Dataset>>) -> Json<ServiceInfo> {
    Json(dataset.service_info())
}

async fn health(State(dataset): State<Arc<Dataset>>) -> Json<HealthReport> {
    Json(dataset.health())
}

async fn debug_data(State(dataset): State<Arc<Dataset>>) -> Json<DatasetSummary> {
    Json(dataset.summary())
}

async fn search_flight(
    State(dataset): State<Arc<Dataset>>,
    payload: Result<Json<FlightSearchRequest>, JsonRejection>,
) -> Result<Json<FlightSearchResponse>, ApiError> {
    let Json(request) = payload?;
    if request.travelers == 0 {
        return Err(ApiError::InvalidRequest(
            "travelers must be greater than zero".to_string(),
        ));
    }
    Ok(Json(dataset.search_flights(&request)))
}

async fn search_hotel(
    State(dataset): State<Arc<Dataset>>,
    payload: Result<Json<HotelSearchRequest>, JsonRejection>,
) -> Result<Json<HotelSearchResponse>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(dataset.search_hotels(&request)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{FlightRecord, HotelRecord};
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use test_case::test_case;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let hotels = vec![
            HotelRecord {
                destination: "goa".to_string(),
                hotel_name: "Casa Anjuna".to_string(),
                rate_per_night: 6200.0,
            },
            HotelRecord {
                destination: "goa".to_string(),
                hotel_name: "The Leela Goa".to_string(),
                rate_per_night: 18750.0,
            },
        ];
        let flights = vec![
            FlightRecord {
                flight_name: "IndiGo".to_string(),
                fare: 1000.0,
                departure_city: "delhi".to_string(),
                arrival_city: "mumbai".to_string(),
                departure_time: "06:15".to_string(),
                flight_number: "6E-2131".to_string(),
            },
            FlightRecord {
                flight_name: "Vistara".to_string(),
                fare: 1200.0,
                departure_city: "mumbai".to_string(),
                arrival_city: "delhi".to_string(),
                departure_time: "18:20".to_string(),
                flight_number: "UK-944".to_string(),
            },
        ];
        router(Arc::new(Dataset::new(hotels, flights)))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_search_flight_endpoint() {
        let body = r#"{"departureDate":"2024-05-01","returnDate":"2024-05-08","travelers":2,"destination":"Mumbai","origin":"Delhi"}"#;
        let (status, value) = send(test_router(), post_json("/searchflight", body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["status"], "success");
        let results = value["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["searchId"], "FL6E-213120240501");
        assert_eq!(results[0]["price"], 2000.0);
        assert_eq!(results[0]["route"], "Delhi to Mumbai");
        assert!(results[0].as_object().unwrap().contains_key("arrivalTime"));
        assert!(results[0]["arrivalTime"].is_null());
        assert_eq!(results[1]["searchId"], "FLUK-94420240508");
        assert_eq!(results[1]["origin"], "Mumbai");
        assert_eq!(results[1]["destination"], "Delhi");
    }

    #[tokio::test]
    async fn test_search_hotel_endpoint() {
        let body = r#"{"checkIn":"2024-05-01","checkOut":"2024-05-04","destination":"goa"}"#;
        let (status, value) = send(test_router(), post_json("/searchhotel", body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["status"], "success");
        assert_eq!(value["results"][0]["searchId"], "HTGOA2024050101");
        assert_eq!(value["results"][1]["searchId"], "HTGOA2024050102");
    }

    #[tokio::test]
    async fn test_no_match_is_not_an_error() {
        let body = r#"{"checkIn":"2024-05-01","checkOut":"2024-05-04","destination":"Atlantis"}"#;
        let (status, value) = send(test_router(), post_json("/searchhotel", body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value, json!({ "status": "no_hotels_found", "results": [] }));

        let body = r#"{"departureDate":"2024-05-01","returnDate":"2024-05-08","travelers":1,"destination":"Goa","origin":"Delhi"}"#;
        let (status, value) = send(test_router(), post_json("/searchflight", body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value, json!({ "status": "no_flights_found", "results": [] }));
    }

    #[test_case(r#"{"departureDate":"2024-05-01","returnDate":"2024-05-08","travelers":0,"destination":"Mumbai","origin":"Delhi"}"#; "zero travelers")]
    #[test_case(r#"{"departureDate":"2024-05-01","returnDate":"2024-05-08","travelers":-1,"destination":"Mumbai","origin":"Delhi"}"#; "negative travelers")]
    #[test_case(r#"{"departureDate":"2024-05-01","returnDate":"2024-05-08","travelers":"two","destination":"Mumbai","origin":"Delhi"}"#; "wrong type")]
    #[test_case(r#"{"departureDate":"2024-05-01","travelers":2,"destination":"Mumbai","origin":"Delhi"}"#; "missing field")]
    #[tokio::test]
    async fn test_invalid_flight_request_is_rejected(body: &str) {
        let (status, value) = send(test_router(), post_json("/searchflight", body)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(value["detail"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let (status, _) = send(test_router(), post_json("/searchhotel", "{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_introspection_endpoints() {
        let (status, value) = send(test_router(), get_request("/debug")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["hotels_count"], 2);
        assert_eq!(value["flights_count"], 2);
        assert_eq!(value["available_destinations"], json!(["goa"]));
        assert_eq!(
            value["available_flight_routes"],
            json!(["delhi to mumbai", "mumbai to delhi"])
        );
        assert_eq!(value["sample_hotels"][0]["hotelName"], "Casa Anjuna");

        let (status, value) = send(test_router(), get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["status"], "healthy");
        assert_eq!(value["data_status"]["hotels_loaded"], true);

        let (status, value) = send(test_router(), get_request("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["data_loaded"]["flights"], 2);
        assert_eq!(value["endpoints"]["debug"], "/debug");
    }

    #[tokio::test]
    async fn test_bind_resolves_localhost() {
        let config = ServiceConfig {
            host: "localhost".to_string(),
            port: 0,
            ..ServiceConfig::default()
        };

        let listener = bind(&config).await.unwrap();
        let addr = listener.local_addr().unwrap();

        assert!(addr.ip().is_loopback());
        assert_ne!(addr.port(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_searches_are_identical() {
        let app = test_router();
        let body = r#"{"departureDate":"2024-05-01","returnDate":"2024-05-08","travelers":3,"destination":"mumbai","origin":"DELHI"}"#;

        let responses = futures::future::join_all(
            (0..32).map(|_| send(app.clone(), post_json("/searchflight", body))),
        )
        .await;

        let (_, first) = &responses[0];
        assert_eq!(first["results"].as_array().unwrap().len(), 2);
        assert!(responses
            .iter()
            .all(|(status, value)| *status == StatusCode::OK && value == first));
    }
}
