/// Current-outcome store with subscriber notification
use crate::domain::RequestOutcome;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};

const TRANSITION_CAPACITY: usize = 16;

/// One published outcome; replaced wholesale on every write
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub version: u64,
    pub outcome: RequestOutcome,
    pub updated_at: DateTime<Utc>,
}

/// Holds the single current [`RequestOutcome`].
///
/// Readers take the latest value with [`OutcomeStore::current`]; listeners
/// that need every transition in order use [`OutcomeStore::subscribe`].
#[derive(Clone)]
pub struct OutcomeStore {
    current: Arc<watch::Sender<Snapshot>>,
    transitions: broadcast::Sender<Snapshot>,
}

impl OutcomeStore {
    pub fn new() -> Self {
        let (current, _) = watch::channel(Snapshot {
            version: 0,
            outcome: RequestOutcome::Idle,
            updated_at: Utc::now(),
        });
        let (transitions, _) = broadcast::channel(TRANSITION_CAPACITY);
        Self {
            current: Arc::new(current),
            transitions,
        }
    }

    pub fn current(&self) -> Snapshot {
        self.current.borrow().clone()
    }

    /// Replace the current outcome and notify listeners; returns the new version
    pub fn publish(&self, outcome: RequestOutcome) -> u64 {
        let mut published = None;
        self.current.send_modify(|snapshot| {
            *snapshot = Snapshot {
                version: snapshot.version + 1,
                outcome,
                updated_at: Utc::now(),
            };
            published = Some(snapshot.clone());
        });

        let snapshot = published.unwrap_or_else(|| self.current());
        let version = snapshot.version;
        // no listeners is fine
        let _ = self.transitions.send(snapshot);
        version
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Snapshot> {
        self.transitions.subscribe()
    }
}

impl Default for OutcomeStore {
    fn default() -> Self {
        Self::new()
    }
}
