//! Authentication state with persisted snapshots.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;
use utoipa::ToSchema;

use super::ports::StateRepository;
use super::user::{User, UserPatch};

/// Interface colour theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The opposite theme.
    pub fn flipped(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Persisted auth state.
///
/// ## Invariants
/// - `authenticated` is true exactly when `user` is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthSnapshot {
    pub user: Option<User>,
    pub authenticated: bool,
    pub theme: Theme,
}

/// Authentication state container.
///
/// Every mutation persists the resulting snapshot through the configured
/// repository. Persistence failures are logged and swallowed; state changes
/// always take effect in memory.
pub struct AuthStore {
    snapshot: AuthSnapshot,
    repository: Arc<dyn StateRepository>,
}

impl AuthStore {
    /// Create a store backed by the given repository, restoring the last
    /// persisted snapshot when one loads cleanly.
    pub fn restore(repository: Arc<dyn StateRepository>) -> Self {
        let snapshot = match repository.load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => AuthSnapshot::default(),
            Err(error) => {
                warn!(%error, "failed to restore auth state; starting fresh");
                AuthSnapshot::default()
            }
        };
        Self {
            snapshot,
            repository,
        }
    }

    pub fn snapshot(&self) -> &AuthSnapshot {
        &self.snapshot
    }

    pub fn user(&self) -> Option<&User> {
        self.snapshot.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.snapshot.authenticated
    }

    pub fn theme(&self) -> Theme {
        self.snapshot.theme
    }

    /// Record a signed-in user.
    pub fn login(&mut self, user: User) {
        self.snapshot.user = Some(user);
        self.snapshot.authenticated = true;
        self.persist();
    }

    /// Clear the signed-in user. The theme survives logout.
    pub fn logout(&mut self) {
        self.snapshot.user = None;
        self.snapshot.authenticated = false;
        self.persist();
    }

    /// Flip the colour theme.
    pub fn toggle_theme(&mut self) {
        self.snapshot.theme = self.snapshot.theme.flipped();
        self.persist();
    }

    /// Merge a patch into the signed-in user. No-op when signed out.
    pub fn update_user(&mut self, patch: UserPatch) {
        if let Some(user) = self.snapshot.user.as_mut() {
            user.apply(patch);
            self.persist();
        }
    }

    fn persist(&self) {
        if let Err(error) = self.repository.save(&self.snapshot) {
            warn!(%error, "failed to persist auth state");
        }
    }
}
