/// Response structure for the Google time-zone API
/// Offsets are expressed in seconds
#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeZoneResponse {
    /// Request status, "OK" on success (e.g. "ZERO_RESULTS", "INVALID_REQUEST")
    pub status: String,
    /// Display name of the zone (e.g. "Pacific Daylight Time")
    pub time_zone_name: Option<String>,
    /// IANA identifier of the zone (e.g. "America/Los_Angeles")
    pub time_zone_id: Option<String>,
    /// Offset from UTC without daylight saving
    pub raw_offset: Option<f64>,
    /// Daylight saving offset in effect at the requested timestamp
    pub dst_offset: Option<f64>,
    /// Explanation supplied with some non-OK statuses
    pub error_message: Option<String>,
}
