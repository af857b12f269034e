use crate::geolocation::{Coordinates, PositionError};

pub const UNSUPPORTED_MESSAGE: &str = "Geolocation is not supported by your browser";
pub const TIME_ZONE_NOT_FOUND: &str = "Time Zone Not Found";

/// Everything the view knows about the user's location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationState {
    /// Last acquired coordinates; latitude and longitude are set together.
    pub coordinates: Option<Coordinates>,
    /// Last acquisition error message.
    pub error: Option<String>,
    /// True while a geolocation request is outstanding.
    pub loading: bool,
    pub address: Option<String>,
    pub timezone: Option<String>,
    /// UTC offset in hours.
    pub gmt_offset: Option<f64>,
    pub current_time: Option<String>,
}

/// A change to [`LocationState`] produced by one step of the orchestration.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationEvent {
    AcquisitionStarted,
    AcquisitionUnsupported,
    PositionAcquired(Coordinates),
    PositionFailed(PositionError),
    AddressResolved(String),
    TimeZoneResolved {
        name: String,
        gmt_offset: f64,
        current_time: String,
    },
    TimeZoneFailed,
}

impl LocationState {
    pub fn latitude(&self) -> Option<f64> {
        self.coordinates.map(|c| c.latitude)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.coordinates.map(|c| c.longitude)
    }

    /// Derives the next state from this one and an event.
    pub fn apply(self, event: LocationEvent) -> LocationState {
        match event {
            LocationEvent::AcquisitionStarted => LocationState {
                loading: true,
                ..self
            },
            LocationEvent::AcquisitionUnsupported => LocationState {
                coordinates: None,
                error: Some(UNSUPPORTED_MESSAGE.to_string()),
                loading: false,
                ..self
            },
            LocationEvent::PositionAcquired(coordinates) => LocationState {
                coordinates: Some(coordinates),
                error: None,
                loading: false,
                ..self
            },
            LocationEvent::PositionFailed(reason) => LocationState {
                coordinates: None,
                error: Some(reason.to_string()),
                loading: false,
                ..self
            },
            LocationEvent::AddressResolved(address) => LocationState {
                address: Some(address),
                ..self
            },
            LocationEvent::TimeZoneResolved {
                name,
                gmt_offset,
                current_time,
            } => LocationState {
                timezone: Some(name),
                gmt_offset: Some(gmt_offset),
                current_time: Some(current_time),
                ..self
            },
            LocationEvent::TimeZoneFailed => LocationState {
                timezone: Some(TIME_ZONE_NOT_FOUND.to_string()),
                ..self
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn here() -> Coordinates {
        Coordinates::new(37.42, -122.08).unwrap()
    }

    #[test]
    fn acquisition_success_clears_previous_error() {
        let state = LocationState::default()
            .apply(LocationEvent::AcquisitionStarted)
            .apply(LocationEvent::PositionFailed(PositionError::Timeout));
        assert_eq!(state.error.as_deref(), Some("Request timed out."));
        assert!(!state.loading);

        let state = state
            .apply(LocationEvent::AcquisitionStarted)
            .apply(LocationEvent::PositionAcquired(here()));
        assert_eq!(state.error, None);
        assert!(!state.loading);
        assert_eq!(state.latitude(), Some(37.42));
        assert_eq!(state.longitude(), Some(-122.08));
    }

    #[test]
    fn acquisition_failure_drops_previous_coordinates() {
        let state = LocationState::default()
            .apply(LocationEvent::PositionAcquired(here()))
            .apply(LocationEvent::AcquisitionStarted);
        assert!(state.loading);
        assert!(state.coordinates.is_some());

        let state = state.apply(LocationEvent::PositionFailed(PositionError::PermissionDenied));
        assert_eq!(state.coordinates, None);
        assert_eq!(
            state.error.as_deref(),
            Some("Permission denied by the user.")
        );
    }

    #[test]
    fn unsupported_host_sets_fixed_message() {
        let state = LocationState::default()
            .apply(LocationEvent::AcquisitionStarted)
            .apply(LocationEvent::AcquisitionUnsupported);
        assert_eq!(state.error.as_deref(), Some(UNSUPPORTED_MESSAGE));
        assert!(!state.loading);
    }

    #[test]
    fn time_zone_failure_keeps_offset_and_clock() {
        let state = LocationState::default()
            .apply(LocationEvent::TimeZoneResolved {
                name: "Pacific Standard Time".to_string(),
                gmt_offset: -8.0,
                current_time: "Monday, January 5, 2026 9:00 AM".to_string(),
            })
            .apply(LocationEvent::TimeZoneFailed);
        assert_eq!(state.timezone.as_deref(), Some(TIME_ZONE_NOT_FOUND));
        assert_eq!(state.gmt_offset, Some(-8.0));
        assert_eq!(
            state.current_time.as_deref(),
            Some("Monday, January 5, 2026 9:00 AM")
        );
    }

    #[test]
    fn address_and_time_zone_write_disjoint_fields() {
        let state = LocationState::default()
            .apply(LocationEvent::AddressResolved("1 Infinite Loop".to_string()))
            .apply(LocationEvent::TimeZoneFailed);
        assert_eq!(state.address.as_deref(), Some("1 Infinite Loop"));

        let state = state.apply(LocationEvent::AddressResolved("Address not found".to_string()));
        assert_eq!(state.timezone.as_deref(), Some(TIME_ZONE_NOT_FOUND));
    }
}
