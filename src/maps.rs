use crate::config::Config;
use crate::error::AppError;
use crate::geocoding::{self, response::GeocodeResponse};
use crate::geolocation::Coordinates;
use crate::time_zone::{self, response::TimeZoneResponse};

/// The two HTTP lookups the orchestrator depends on.
pub trait MapsApi: Send + Sync + 'static {
    fn reverse_geocode(
        &self,
        coordinates: Coordinates,
    ) -> impl Future<Output = Result<GeocodeResponse, AppError>> + Send;

    fn time_zone(
        &self,
        coordinates: Coordinates,
        timestamp: i64,
    ) -> impl Future<Output = Result<TimeZoneResponse, AppError>> + Send;
}

/// Google Maps Platform client for the geocoding and time-zone endpoints.
#[derive(Debug, Clone)]
pub struct GoogleMaps {
    client: reqwest::Client,
    api_key: String,
    geocode_endpoint: String,
    timezone_endpoint: String,
}

impl GoogleMaps {
    /// Builds the client; every request is bounded by `config.http_timeout`.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            geocode_endpoint: config.geocode_endpoint.clone(),
            timezone_endpoint: config.timezone_endpoint.clone(),
        })
    }
}

impl MapsApi for GoogleMaps {
    async fn reverse_geocode(&self, coordinates: Coordinates) -> Result<GeocodeResponse, AppError> {
        geocoding::reverse_geocode(
            &self.client,
            &self.geocode_endpoint,
            &self.api_key,
            coordinates,
        )
        .await
    }

    async fn time_zone(
        &self,
        coordinates: Coordinates,
        timestamp: i64,
    ) -> Result<TimeZoneResponse, AppError> {
        time_zone::lookup_time_zone(
            &self.client,
            &self.timezone_endpoint,
            &self.api_key,
            coordinates,
            timestamp,
        )
        .await
    }
}
