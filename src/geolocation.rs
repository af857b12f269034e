use thiserror::Error;
use tracing::debug;

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Builds a coordinate pair, rejecting values outside the valid ranges.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);
        valid.then_some(Self {
            latitude,
            longitude,
        })
    }
}

/// Reasons a host can give for failing to produce a position fix.
///
/// The display text of each variant is the message shown to the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionError {
    #[error("Permission denied by the user.")]
    PermissionDenied,

    #[error("Position unavailable.")]
    PositionUnavailable,

    #[error("Request timed out.")]
    Timeout,

    #[error("An unknown error occurred.")]
    Unknown,
}

/// Host capability that produces a one-shot position fix.
pub trait GeolocationProvider: Send + Sync + 'static {
    fn current_position(&self) -> impl Future<Output = Result<Coordinates, PositionError>> + Send;
}

/// Host that always reports the same configured position.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition {
    coordinates: Coordinates,
}

impl FixedPosition {
    pub fn new(coordinates: Coordinates) -> Self {
        Self { coordinates }
    }
}

impl GeolocationProvider for FixedPosition {
    async fn current_position(&self) -> Result<Coordinates, PositionError> {
        debug!("Reporting fixed position: {:?}", self.coordinates);
        Ok(self.coordinates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_reject_out_of_range_values() {
        assert!(Coordinates::new(91.0, 0.0).is_none());
        assert!(Coordinates::new(0.0, -180.5).is_none());
        assert!(Coordinates::new(f64::NAN, 0.0).is_none());
        assert_eq!(
            Coordinates::new(-33.86, 151.2),
            Some(Coordinates {
                latitude: -33.86,
                longitude: 151.2
            })
        );
    }

    #[test]
    fn position_errors_display_user_messages() {
        assert_eq!(
            PositionError::PermissionDenied.to_string(),
            "Permission denied by the user."
        );
        assert_eq!(
            PositionError::PositionUnavailable.to_string(),
            "Position unavailable."
        );
        assert_eq!(PositionError::Timeout.to_string(), "Request timed out.");
        assert_eq!(
            PositionError::Unknown.to_string(),
            "An unknown error occurred."
        );
    }

    #[tokio::test]
    async fn fixed_position_reports_its_coordinates() {
        let coordinates = Coordinates::new(51.5, -0.12).unwrap();
        let host = FixedPosition::new(coordinates);
        assert_eq!(host.current_position().await, Ok(coordinates));
    }
}
