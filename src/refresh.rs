use std::sync::Arc;
use std::time::Duration;

use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tracing::{Instrument, debug, info, info_span};

use crate::geolocation::GeolocationProvider;
use crate::maps::MapsApi;
use crate::orchestrator::LocationOrchestrator;

/// Handle to the task that keeps the displayed clock current.
///
/// Every `period` the task re-resolves the time zone of the last stored
/// coordinates. The period restarts whenever the latitude changes. Dropping
/// the handle (or calling [`stop`](Self::stop)) aborts the task together
/// with any lookups it still has in flight.
pub struct RefreshLoop {
    task: JoinHandle<()>,
}

impl RefreshLoop {
    pub fn spawn<G, A>(orchestrator: Arc<LocationOrchestrator<G, A>>, period: Duration) -> Self
    where
        G: GeolocationProvider,
        A: MapsApi,
    {
        let task = tokio::spawn(run(orchestrator, period).instrument(info_span!("refresh_loop")));
        Self { task }
    }

    pub fn stop(self) {
        info!("Stopping time zone refresh");
    }
}

impl Drop for RefreshLoop {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run<G, A>(orchestrator: Arc<LocationOrchestrator<G, A>>, period: Duration)
where
    G: GeolocationProvider,
    A: MapsApi,
{
    let mut changes = orchestrator.subscribe();
    let mut armed_latitude = changes.borrow_and_update().latitude();
    let mut ticker = arm(period);
    // Owned here so aborting the loop also aborts its lookups.
    let mut in_flight = JoinSet::new();

    debug!("Refreshing time zone every {:?}", period);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                while in_flight.try_join_next().is_some() {}
                in_flight.spawn(orchestrator.time_zone_refresh());
            }
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                let latitude = changes.borrow_and_update().latitude();
                if latitude != armed_latitude {
                    debug!("Latitude changed to {:?}, re-arming refresh", latitude);
                    armed_latitude = latitude;
                    ticker = arm(period);
                }
            }
        }
    }
}

fn arm(period: Duration) -> Interval {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}
