//! Change feed synthesised by polling the collection head.
//!
//! The hosted service's push protocol is not part of the contract, so this
//! adapter watches the highest row id and reports inserts and deletes as
//! notifications. Poll intervals carry jitter so multiple instances do not
//! hit the service in lockstep.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::rest::RemoteDataService;
use crate::domain::ports::{ChangeEvent, ChangeKind, ChangeStream, RealtimeError, RealtimeFeed};

const CHANNEL_CAPACITY: usize = 16;

/// Polling feed over a [`RemoteDataService`].
pub struct PollingRealtimeFeed {
    service: Arc<RemoteDataService>,
    interval: Duration,
    jitter: Duration,
}

impl PollingRealtimeFeed {
    pub fn new(service: Arc<RemoteDataService>) -> Self {
        Self {
            service,
            interval: Duration::from_secs(10),
            jitter: Duration::from_secs(3),
        }
    }

    /// Override the poll cadence.
    pub fn with_cadence(mut self, interval: Duration, jitter: Duration) -> Self {
        self.interval = interval;
        self.jitter = jitter;
        self
    }
}

fn jittered(interval: Duration, jitter: Duration, rng: &mut SmallRng) -> Duration {
    let jitter_ms = u64::try_from(jitter.as_millis()).unwrap_or(u64::MAX);
    if jitter_ms == 0 {
        return interval;
    }
    interval + Duration::from_millis(rng.gen_range(0..=jitter_ms))
}

#[async_trait]
impl RealtimeFeed for PollingRealtimeFeed {
    async fn subscribe(&self, collection: &str) -> Result<ChangeStream, RealtimeError> {
        let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
        let service = Arc::clone(&self.service);
        let collection = collection.to_owned();
        let interval = self.interval;
        let jitter = self.jitter;

        tokio::spawn(async move {
            let mut rng = SmallRng::from_entropy();
            let mut last_head: Option<i64> = None;
            let mut baselined = false;
            loop {
                tokio::time::sleep(jittered(interval, jitter, &mut rng)).await;
                let head = match service.registrations_head().await {
                    Ok(head) => head,
                    Err(error) => {
                        warn!(%error, collection = %collection, "change poll failed");
                        continue;
                    }
                };
                if !baselined {
                    // First successful poll establishes the baseline silently.
                    baselined = true;
                    last_head = head;
                    continue;
                }
                let kind = match (last_head, head) {
                    (Some(previous), Some(current)) if current > previous => {
                        Some(ChangeKind::Insert)
                    }
                    (Some(previous), Some(current)) if current < previous => {
                        Some(ChangeKind::Delete)
                    }
                    (Some(_), None) => Some(ChangeKind::Delete),
                    (None, Some(_)) => Some(ChangeKind::Insert),
                    _ => None,
                };
                last_head = head;
                if let Some(kind) = kind {
                    debug!(collection = %collection, kind = ?kind, "collection changed");
                    let event = ChangeEvent {
                        collection: collection.clone(),
                        kind,
                    };
                    if sender.send(event).await.is_err() {
                        // Subscriber dropped the stream.
                        break;
                    }
                }
            }
        });

        Ok(ChangeStream::new(receiver))
    }
}
