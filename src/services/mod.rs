/// Business logic services layer
use crate::clients::NasaClient;
use crate::domain::RequestOutcome;
use crate::errors::{ApiError, ApiResult};
use crate::state::OutcomeStore;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;
use tracing::{info, warn};

fn lock(flag: &Mutex<bool>) -> MutexGuard<'_, bool> {
    flag.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Marks a fetch as in flight.
///
/// [`InFlight::finish`] publishes the terminal outcome and clears the flag
/// under one lock; dropping an unfinished guard only clears the flag.
struct InFlight {
    flag: Arc<Mutex<bool>>,
    armed: bool,
}

impl InFlight {
    fn finish(mut self, store: &OutcomeStore, outcome: RequestOutcome) {
        let mut in_flight = lock(&self.flag);
        store.publish(outcome);
        *in_flight = false;
        self.armed = false;
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.armed {
            *lock(&self.flag) = false;
        }
    }
}

/// APOD fetch controller.
///
/// Owns the lifecycle of one outcome: publishes `Loading`, performs the
/// single request, and publishes the classified terminal outcome. At most
/// one fetch runs at a time; overlapping requests are ignored.
pub struct ApodService {
    client: NasaClient,
    store: OutcomeStore,
    in_flight: Arc<Mutex<bool>>,
}

impl ApodService {
    pub fn new(client: NasaClient, store: OutcomeStore) -> Self {
        Self {
            client,
            store,
            in_flight: Arc::new(Mutex::new(false)),
        }
    }

    pub fn store(&self) -> &OutcomeStore {
        &self.store
    }

    /// Fetch and classify APOD, returning the terminal outcome.
    ///
    /// If another fetch is already running, nothing is sent and the current
    /// outcome (`Loading`) is returned.
    pub async fn fetch_apod(&self) -> RequestOutcome {
        match self.begin() {
            Some(guard) => self.complete(guard).await,
            None => self.store.current().outcome,
        }
    }

    /// Publish `Loading` now and finish the fetch on a background task
    pub fn spawn_fetch(self: &Arc<Self>) -> Option<JoinHandle<RequestOutcome>> {
        let guard = self.begin()?;
        let service = Arc::clone(self);
        Some(tokio::spawn(async move { service.complete(guard).await }))
    }

    /// User-triggered retry, only available after a failed fetch.
    ///
    /// A failure is published together with the release of the in-flight
    /// flag, so a retry that observes it can always start.
    pub fn retry(self: &Arc<Self>) -> ApiResult<JoinHandle<RequestOutcome>> {
        let current = self.store.current();
        if !current.outcome.is_failure() {
            return Err(ApiError::RetryUnavailable(format!(
                "retry is only available after a failed fetch (current state: {})",
                current.outcome.label()
            )));
        }

        self.spawn_fetch().ok_or_else(|| {
            ApiError::RetryUnavailable("a fetch is already in progress".to_string())
        })
    }

    fn begin(&self) -> Option<InFlight> {
        let mut in_flight = lock(&self.in_flight);
        if *in_flight {
            info!("APOD fetch already in flight, ignoring request");
            return None;
        }
        *in_flight = true;
        self.store.publish(RequestOutcome::Loading);
        drop(in_flight);

        let guard = InFlight {
            flag: Arc::clone(&self.in_flight),
            armed: true,
        };
        info!("Fetching APOD from {}", self.client.endpoint());
        Some(guard)
    }

    async fn complete(&self, guard: InFlight) -> RequestOutcome {
        let outcome = match self.client.fetch_apod().await {
            Ok(payload) => {
                info!("APOD fetched: {} ({})", payload.title, payload.date);
                RequestOutcome::Success { payload }
            }
            Err(kind) => {
                warn!(kind = kind.code(), "APOD fetch failed: {}", kind);
                RequestOutcome::failure(kind)
            }
        };

        guard.finish(&self.store, outcome.clone());
        outcome
    }
}
