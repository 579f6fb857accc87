//! Shared application state handed to HTTP handlers.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::ports::RegistrationRepository;
use crate::domain::{AccountService, AuthStore, EventStore, LeaderboardService};

/// Services and stores shared by every handler.
///
/// The stores sit behind `RwLock`s; handlers take short guards and never
/// hold one across an await point.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<AccountService>,
    pub leaderboard: Arc<LeaderboardService>,
    pub registrations: Arc<dyn RegistrationRepository>,
    auth: Arc<RwLock<AuthStore>>,
    events: Arc<RwLock<EventStore>>,
}

impl HttpState {
    pub fn new(
        accounts: Arc<AccountService>,
        leaderboard: Arc<LeaderboardService>,
        registrations: Arc<dyn RegistrationRepository>,
        auth: AuthStore,
        events: EventStore,
    ) -> Self {
        Self {
            accounts,
            leaderboard,
            registrations,
            auth: Arc::new(RwLock::new(auth)),
            events: Arc::new(RwLock::new(events)),
        }
    }

    // Lock poisoning only happens after a panic in another handler; the
    // stores stay usable, so recover the guard instead of propagating.

    pub fn auth(&self) -> RwLockReadGuard<'_, AuthStore> {
        self.auth.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn auth_mut(&self) -> RwLockWriteGuard<'_, AuthStore> {
        self.auth.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn events(&self) -> RwLockReadGuard<'_, EventStore> {
        self.events.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn events_mut(&self) -> RwLockWriteGuard<'_, EventStore> {
        self.events.write().unwrap_or_else(PoisonError::into_inner)
    }
}
