//! Driven port for persisted auth snapshots.

use super::macros::define_port_error;
use crate::domain::auth_store::AuthSnapshot;

define_port_error! {
    /// Failures reported by a state repository.
    StatePersistenceError {
        /// The snapshot could not be read or written.
        Io { message: String } => "state persistence failed: {message}",
    }
}

/// Persistence for the auth store snapshot.
///
/// Synchronous by design; implementations write small local files and are
/// called from the store's mutation path.
#[cfg_attr(test, mockall::automock)]
pub trait StateRepository: Send + Sync {
    /// Load the last persisted snapshot, or `None` when none exists.
    fn load(&self) -> Result<Option<AuthSnapshot>, StatePersistenceError>;

    /// Persist the given snapshot, replacing any previous one.
    fn save(&self, snapshot: &AuthSnapshot) -> Result<(), StatePersistenceError>;
}

/// In-memory repository used in development and tests.
#[derive(Debug, Default)]
pub struct FixtureStateRepository {
    snapshot: std::sync::Mutex<Option<AuthSnapshot>>,
}

impl FixtureStateRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateRepository for FixtureStateRepository {
    fn load(&self) -> Result<Option<AuthSnapshot>, StatePersistenceError> {
        let snapshot = self
            .snapshot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(snapshot.clone())
    }

    fn save(&self, snapshot: &AuthSnapshot) -> Result<(), StatePersistenceError> {
        let mut slot = self
            .snapshot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *slot = Some(snapshot.clone());
        Ok(())
    }
}
