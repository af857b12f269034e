use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{Instrument, debug, info, info_span, instrument, warn};

use crate::error::AppError;
use crate::geocoding::{self, ADDRESS_FETCH_FAILED};
use crate::geolocation::{Coordinates, GeolocationProvider, PositionError};
use crate::maps::MapsApi;
use crate::state::{LocationEvent, LocationState};
use crate::time_zone;

/// Drives the acquire -> enrich sequence and publishes the resulting state.
///
/// `host` is the geolocation capability; `None` means the environment has none.
/// Lookups started by [`request_location`](Self::request_location) are never
/// cancelled, so a slow response can overwrite a newer one.
pub struct LocationOrchestrator<G, A> {
    host: Option<G>,
    api: Arc<A>,
    state: Arc<watch::Sender<LocationState>>,
    position_timeout: Option<Duration>,
    clock: Clock,
}

/// Source of the current instant for time-zone lookups.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

impl<G, A> LocationOrchestrator<G, A>
where
    G: GeolocationProvider,
    A: MapsApi,
{
    pub fn new(host: Option<G>, api: Arc<A>) -> Self {
        let (state, _) = watch::channel(LocationState::default());
        Self {
            host,
            api,
            state: Arc::new(state),
            position_timeout: None,
            clock: Arc::new(Utc::now),
        }
    }

    /// Bounds how long the host may take to produce a fix.
    pub fn with_position_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.position_timeout = timeout;
        self
    }

    /// Replaces the wall clock used for timestamps and the displayed time.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<LocationState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> LocationState {
        self.state.borrow().clone()
    }

    /// Asks the host for a position fix and, on success, starts the address
    /// and time-zone lookups without waiting for them.
    #[instrument(skip(self))]
    pub async fn request_location(&self) {
        dispatch(&self.state, LocationEvent::AcquisitionStarted);

        let Some(host) = &self.host else {
            warn!("No geolocation capability available");
            dispatch(&self.state, LocationEvent::AcquisitionUnsupported);
            return;
        };

        let fix = match self.position_timeout {
            Some(limit) => tokio::time::timeout(limit, host.current_position())
                .await
                .unwrap_or(Err(PositionError::Timeout)),
            None => host.current_position().await,
        };

        match fix {
            Ok(coordinates) => {
                info!(
                    "Position acquired: {},{}",
                    coordinates.latitude, coordinates.longitude
                );
                dispatch(&self.state, LocationEvent::PositionAcquired(coordinates));
                self.spawn_lookups(coordinates);
            }
            Err(reason) => {
                warn!("Position acquisition failed: {:?}", reason);
                dispatch(&self.state, LocationEvent::PositionFailed(reason));
            }
        }
    }

    /// Resolves and stores the street address of `coordinates`.
    pub async fn resolve_address(&self, coordinates: Coordinates) {
        store_address(self.api.as_ref(), &self.state, coordinates).await
    }

    /// Resolves and stores the time zone and local clock of `coordinates`.
    pub async fn resolve_time_zone(&self, coordinates: Option<Coordinates>) {
        store_time_zone(self.api.as_ref(), &self.state, &self.clock, coordinates).await
    }

    /// A detached time-zone resolution for the most recently stored coordinates.
    pub(crate) fn time_zone_refresh(&self) -> impl Future<Output = ()> + Send + use<G, A> {
        let api = Arc::clone(&self.api);
        let state = Arc::clone(&self.state);
        let clock = Arc::clone(&self.clock);
        let coordinates = state.borrow().coordinates;
        async move { store_time_zone(api.as_ref(), &state, &clock, coordinates).await }
    }

    fn spawn_lookups(&self, coordinates: Coordinates) {
        let api = Arc::clone(&self.api);
        let state = Arc::clone(&self.state);
        tokio::spawn(
            async move { store_address(api.as_ref(), &state, coordinates).await }
                .instrument(info_span!("resolve_address")),
        );

        let api = Arc::clone(&self.api);
        let state = Arc::clone(&self.state);
        let clock = Arc::clone(&self.clock);
        tokio::spawn(
            async move { store_time_zone(api.as_ref(), &state, &clock, Some(coordinates)).await }
                .instrument(info_span!("resolve_time_zone")),
        );
    }
}

fn dispatch(state: &watch::Sender<LocationState>, event: LocationEvent) {
    debug!("Applying {:?}", event);
    state.send_modify(|current| *current = std::mem::take(current).apply(event));
}

async fn store_address<A: MapsApi>(
    api: &A,
    state: &watch::Sender<LocationState>,
    coordinates: Coordinates,
) {
    let address = match api.reverse_geocode(coordinates).await {
        Ok(response) => geocoding::select_address(&response),
        Err(e) => {
            warn!("Error fetching address: {}", e);
            ADDRESS_FETCH_FAILED.to_string()
        }
    };
    dispatch(state, LocationEvent::AddressResolved(address));
}

async fn store_time_zone<A: MapsApi>(
    api: &A,
    state: &watch::Sender<LocationState>,
    clock: &Clock,
    coordinates: Option<Coordinates>,
) {
    let reading = async {
        let coordinates = coordinates.ok_or(AppError::NoCoordinates)?;
        let response = api
            .time_zone(coordinates, clock().timestamp())
            .await?;
        time_zone::reading_from_response(response, clock())
    }
    .await;

    match reading {
        Ok(reading) => dispatch(
            state,
            LocationEvent::TimeZoneResolved {
                name: reading.name,
                gmt_offset: reading.gmt_offset,
                current_time: reading.current_time,
            },
        ),
        Err(AppError::NoCoordinates) => {
            debug!("Skipping time zone lookup without coordinates");
            dispatch(state, LocationEvent::TimeZoneFailed);
        }
        Err(e) => {
            warn!("Failed to resolve time zone: {}", e);
            dispatch(state, LocationEvent::TimeZoneFailed);
        }
    }
}
