/// Response structure for the Google reverse-geocoding API
/// Results are ordered from most to least specific
#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
pub struct GeocodeResponse {
    /// Request status, "OK" on success (e.g. "ZERO_RESULTS", "REQUEST_DENIED")
    pub status: String,
    /// Candidate addresses for the requested coordinates
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    /// Explanation supplied with some non-OK statuses
    pub error_message: Option<String>,
}

/// A single address candidate
#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    /// Human-readable address (e.g. "1600 Amphitheatre Pkwy, Mountain View, CA 94043, USA")
    #[serde(default)]
    pub formatted_address: String,
    /// Granularity tags such as "premise", "route" or "locality"
    #[serde(default)]
    pub types: Vec<String>,
}
