// Module containing response data structures for reverse geocoding
pub mod response;

use crate::error::AppError;
use crate::geolocation::Coordinates;
use response::GeocodeResponse;
use tracing::{debug, error, info};

// API endpoint for the Google reverse-geocoding service
pub const GEOCODE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

pub const PREMISE_NOT_FOUND: &str = "Premise address not found";
pub const ADDRESS_NOT_FOUND: &str = "Address not found";
pub const ADDRESS_FETCH_FAILED: &str = "Error fetching address";

/// Fetches address candidates for a coordinate pair using the reverse-geocoding API.
///
/// # Arguments
/// * `client` - Shared HTTP client
/// * `endpoint` - Base URL of the geocoding service
/// * `api_key` - The API key for accessing the service
/// * `coordinates` - Point to resolve
///
/// # Returns
/// * `GeocodeResponse` as reported by the service, whatever its status
/// * Error if the request fails, the HTTP status is unsuccessful or the body is not valid JSON
pub async fn reverse_geocode(
    client: &reqwest::Client,
    endpoint: &str,
    api_key: &str,
    coordinates: Coordinates,
) -> Result<GeocodeResponse, AppError> {
    info!(
        "Fetching address for location: {},{}",
        coordinates.latitude, coordinates.longitude
    );

    let url = format!(
        "{}?latlng={},{}&key={}",
        endpoint, coordinates.latitude, coordinates.longitude, api_key
    );

    let response = client.get(&url).send().await?;

    if response.status().is_success() {
        let body = response.text().await?;
        let geocode_response: GeocodeResponse = serde_json::from_str(&body)?;
        debug!("Address data fetched successfully: {:?}", geocode_response);
        Ok(geocode_response)
    } else {
        error!("Failed to fetch address data: {}", response.status());
        Err(AppError::ApiRequestFailed(format!(
            "Failed to fetch address data: {}",
            response.status()
        )))
    }
}

/// Picks the text to display for a geocoding response.
///
/// Prefers the first result tagged "premise"; falls back to fixed messages
/// when there is no such result or the lookup found nothing.
pub fn select_address(response: &GeocodeResponse) -> String {
    if response.status != "OK" || response.results.is_empty() {
        debug!(
            "No address for status {} ({:?})",
            response.status, response.error_message
        );
        return ADDRESS_NOT_FOUND.to_string();
    }

    response
        .results
        .iter()
        .find(|result| result.types.iter().any(|t| t == "premise"))
        .map(|result| result.formatted_address.clone())
        .unwrap_or_else(|| PREMISE_NOT_FOUND.to_string())
}
