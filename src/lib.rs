//! Locate the device, resolve its street address and time zone, and keep
//! the local clock current.

pub mod config;
pub mod error;
pub mod geocoding;
pub mod geolocation;
pub mod maps;
pub mod orchestrator;
pub mod refresh;
pub mod render;
pub mod state;
pub mod time_zone;

pub use config::Config;
pub use error::AppError;
pub use geolocation::{Coordinates, FixedPosition, GeolocationProvider, PositionError};
pub use maps::{GoogleMaps, MapsApi};
pub use orchestrator::LocationOrchestrator;
pub use refresh::RefreshLoop;
pub use state::{LocationEvent, LocationState};
