//! Driven port for change notifications from the hosted data service.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::macros::define_port_error;

define_port_error! {
    /// Failures reported when subscribing to a change feed.
    RealtimeError {
        /// The backing service could not be reached.
        Unreachable { message: String } => "realtime feed unreachable: {message}",
    }
}

/// Kind of collection change observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// A change observed on a remote collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub collection: String,
    pub kind: ChangeKind,
}

/// Stream of change notifications. Ends when the feed shuts down.
#[derive(Debug)]
pub struct ChangeStream {
    receiver: mpsc::Receiver<ChangeEvent>,
}

impl ChangeStream {
    pub fn new(receiver: mpsc::Receiver<ChangeEvent>) -> Self {
        Self { receiver }
    }

    /// Next change, or `None` once the feed has shut down.
    pub async fn next(&mut self) -> Option<ChangeEvent> {
        self.receiver.recv().await
    }
}

/// Subscription to collection change notifications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RealtimeFeed: Send + Sync {
    /// Subscribe to changes on one collection.
    async fn subscribe(&self, collection: &str) -> Result<ChangeStream, RealtimeError>;
}

/// Manually driven feed used in development and tests.
#[derive(Debug)]
pub struct FixtureRealtimeFeed {
    sender: mpsc::Sender<ChangeEvent>,
    receiver: std::sync::Mutex<Option<mpsc::Receiver<ChangeEvent>>>,
}

impl Default for FixtureRealtimeFeed {
    fn default() -> Self {
        let (sender, receiver) = mpsc::channel(16);
        Self {
            sender,
            receiver: std::sync::Mutex::new(Some(receiver)),
        }
    }
}

impl FixtureRealtimeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a change to the subscriber. Dropped when the buffer is full or
    /// nobody has subscribed yet.
    pub fn notify(&self, event: ChangeEvent) {
        let _ = self.sender.try_send(event);
    }
}

#[async_trait]
impl RealtimeFeed for FixtureRealtimeFeed {
    async fn subscribe(&self, _collection: &str) -> Result<ChangeStream, RealtimeError> {
        let receiver = self
            .receiver
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take()
            .ok_or_else(|| RealtimeError::unreachable("fixture feed already subscribed"))?;
        Ok(ChangeStream::new(receiver))
    }
}
