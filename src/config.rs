use std::env;
use std::time::Duration;

use crate::error::AppError;
use crate::geocoding::GEOCODE_ENDPOINT;
use crate::geolocation::Coordinates;
use crate::time_zone::TIMEZONE_ENDPOINT;

const DEFAULT_REFRESH_INTERVAL_MS: u64 = 1000;

/// Runtime settings, read from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Credential shared by the geocoding, time-zone and map-embed calls
    pub api_key: String,
    pub geocode_endpoint: String,
    pub timezone_endpoint: String,
    pub refresh_interval: Duration,
    /// Position reported by the host; `None` means no geolocation capability
    pub position: Option<Coordinates>,
    pub position_timeout: Option<Duration>,
    /// Per-request timeout of the HTTP lookups
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_key = get("GOOGLE_MAPS_API_KEY")
            .ok_or_else(|| AppError::EnvVarNotSet("GOOGLE_MAPS_API_KEY".to_string()))?;

        let geocode_endpoint = get("GEOCODE_ENDPOINT").unwrap_or_else(|| GEOCODE_ENDPOINT.to_string());
        let timezone_endpoint =
            get("TIMEZONE_ENDPOINT").unwrap_or_else(|| TIMEZONE_ENDPOINT.to_string());

        let refresh_ms = match get("REFRESH_INTERVAL_MS") {
            Some(raw) => parse_millis("REFRESH_INTERVAL_MS", &raw)?,
            None => DEFAULT_REFRESH_INTERVAL_MS,
        };
        if refresh_ms == 0 {
            return Err(AppError::InvalidConfig(
                "REFRESH_INTERVAL_MS must be greater than zero".to_string(),
            ));
        }

        let position = match (get("GEO_LATITUDE"), get("GEO_LONGITUDE")) {
            (Some(lat), Some(lng)) => {
                let latitude = parse_degrees("GEO_LATITUDE", &lat)?;
                let longitude = parse_degrees("GEO_LONGITUDE", &lng)?;
                let coordinates = Coordinates::new(latitude, longitude).ok_or_else(|| {
                    AppError::InvalidConfig(format!("coordinates out of range: {lat},{lng}"))
                })?;
                Some(coordinates)
            }
            (None, None) => None,
            _ => {
                return Err(AppError::InvalidConfig(
                    "GEO_LATITUDE and GEO_LONGITUDE must be set together".to_string(),
                ));
            }
        };

        let http_timeout = match get("HTTP_TIMEOUT_MS") {
            Some(raw) => match parse_millis("HTTP_TIMEOUT_MS", &raw)? {
                0 => {
                    return Err(AppError::InvalidConfig(
                        "HTTP_TIMEOUT_MS must be greater than zero".to_string(),
                    ));
                }
                ms => Duration::from_millis(ms),
            },
            None => Duration::from_millis(refresh_ms),
        };

        let position_timeout = get("GEO_TIMEOUT_MS")
            .map(|raw| parse_millis("GEO_TIMEOUT_MS", &raw))
            .transpose()?
            .map(Duration::from_millis);

        Ok(Config {
            api_key,
            geocode_endpoint,
            timezone_endpoint,
            refresh_interval: Duration::from_millis(refresh_ms),
            position,
            position_timeout,
            http_timeout,
        })
    }
}

fn parse_millis(key: &str, raw: &str) -> Result<u64, AppError> {
    raw.parse()
        .map_err(|_| AppError::InvalidConfig(format!("{key} is not a number of milliseconds: {raw}")))
}

fn parse_degrees(key: &str, raw: &str) -> Result<f64, AppError> {
    raw.parse()
        .map_err(|_| AppError::InvalidConfig(format!("{key} is not a decimal degree value: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = config_from(&[("GOOGLE_MAPS_API_KEY", "test-key")]).unwrap();
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.geocode_endpoint, GEOCODE_ENDPOINT);
        assert_eq!(config.timezone_endpoint, TIMEZONE_ENDPOINT);
        assert_eq!(config.refresh_interval, Duration::from_secs(1));
        assert_eq!(config.position, None);
        assert_eq!(config.position_timeout, None);
        assert_eq!(config.http_timeout, config.refresh_interval);
    }

    #[test]
    fn missing_key_is_reported() {
        let err = config_from(&[("GOOGLE_MAPS_API_KEY", "   ")]).unwrap_err();
        assert!(err.to_string().contains("GOOGLE_MAPS_API_KEY"));
    }

    #[test]
    fn reads_position_and_timings() {
        let config = config_from(&[
            ("GOOGLE_MAPS_API_KEY", "k"),
            ("GEO_LATITUDE", "48.8584"),
            ("GEO_LONGITUDE", " 2.2945 "),
            ("REFRESH_INTERVAL_MS", "250"),
            ("GEO_TIMEOUT_MS", "5000"),
            ("HTTP_TIMEOUT_MS", "800"),
            ("TIMEZONE_ENDPOINT", "http://localhost:9000/tz"),
        ])
        .unwrap();
        assert_eq!(config.position, Coordinates::new(48.8584, 2.2945));
        assert_eq!(config.refresh_interval, Duration::from_millis(250));
        assert_eq!(config.position_timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.http_timeout, Duration::from_millis(800));
        assert_eq!(config.timezone_endpoint, "http://localhost:9000/tz");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            config_from(&[("GOOGLE_MAPS_API_KEY", "k"), ("GEO_LATITUDE", "10")]),
            Err(AppError::InvalidConfig(_))
        ));
        assert!(matches!(
            config_from(&[
                ("GOOGLE_MAPS_API_KEY", "k"),
                ("GEO_LATITUDE", "95"),
                ("GEO_LONGITUDE", "10"),
            ]),
            Err(AppError::InvalidConfig(_))
        ));
        assert!(matches!(
            config_from(&[("GOOGLE_MAPS_API_KEY", "k"), ("REFRESH_INTERVAL_MS", "0")]),
            Err(AppError::InvalidConfig(_))
        ));
        assert!(matches!(
            config_from(&[("GOOGLE_MAPS_API_KEY", "k"), ("GEO_TIMEOUT_MS", "soon")]),
            Err(AppError::InvalidConfig(_))
        ));
        assert!(matches!(
            config_from(&[("GOOGLE_MAPS_API_KEY", "k"), ("HTTP_TIMEOUT_MS", "0")]),
            Err(AppError::InvalidConfig(_))
        ));
    }
}
