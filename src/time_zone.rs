// Module containing response data structures for time-zone lookups
pub mod response;

use crate::error::AppError;
use crate::geolocation::Coordinates;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use response::TimeZoneResponse;
use tracing::{debug, error, info};

// API endpoint for the Google time-zone service
pub const TIMEZONE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/timezone/json";

// Long locale form: weekday, month day, year h:mm AM/PM
const LONG_CLOCK_FORMAT: &str = "%A, %B %-d, %Y %-I:%M %p";

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Time-zone details ready to be shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeZoneReading {
    pub name: String,
    /// Offset from UTC in hours
    pub gmt_offset: f64,
    pub current_time: String,
}

/// Fetches the time zone of a coordinate pair at a given instant.
///
/// # Arguments
/// * `client` - Shared HTTP client
/// * `endpoint` - Base URL of the time-zone service
/// * `api_key` - The API key for accessing the service
/// * `coordinates` - Point to look up
/// * `timestamp` - Seconds since the Unix epoch, used to pick the DST rules
pub async fn lookup_time_zone(
    client: &reqwest::Client,
    endpoint: &str,
    api_key: &str,
    coordinates: Coordinates,
    timestamp: i64,
) -> Result<TimeZoneResponse, AppError> {
    info!(
        "Fetching time zone for location: {},{} at {}",
        coordinates.latitude, coordinates.longitude, timestamp
    );

    let url = format!(
        "{}?location={},{}&timestamp={}&key={}",
        endpoint, coordinates.latitude, coordinates.longitude, timestamp, api_key
    );

    let response = client.get(&url).send().await?;

    if response.status().is_success() {
        let body = response.text().await?;
        let time_zone_response: TimeZoneResponse = serde_json::from_str(&body)?;
        debug!("Time zone data fetched successfully: {:?}", time_zone_response);
        Ok(time_zone_response)
    } else {
        error!("Failed to fetch time zone data: {}", response.status());
        Err(AppError::ApiRequestFailed(format!(
            "Failed to fetch time zone data: {}",
            response.status()
        )))
    }
}

/// Turns a time-zone response into display values, using `now` for the clock.
pub fn reading_from_response(
    response: TimeZoneResponse,
    now: DateTime<Utc>,
) -> Result<TimeZoneReading, AppError> {
    if response.status != "OK" {
        return Err(AppError::ApiStatus {
            status: response.status,
            message: response.error_message.unwrap_or_default(),
        });
    }

    let name = response
        .time_zone_name
        .ok_or(AppError::MissingField("timeZoneName"))?;
    let zone_id = response
        .time_zone_id
        .ok_or(AppError::MissingField("timeZoneId"))?;
    let raw_offset = response
        .raw_offset
        .ok_or(AppError::MissingField("rawOffset"))?;

    Ok(TimeZoneReading {
        name,
        gmt_offset: raw_offset / SECONDS_PER_HOUR,
        current_time: format_local_time(&zone_id, now)?,
    })
}

/// Formats `now` as a long-form wall-clock string in the given IANA zone.
pub fn format_local_time(zone_id: &str, now: DateTime<Utc>) -> Result<String, AppError> {
    let tz: Tz = zone_id
        .parse()
        .map_err(|_| AppError::UnknownTimeZone(zone_id.to_string()))?;
    Ok(now.with_timezone(&tz).format(LONG_CLOCK_FORMAT).to_string())
}
