//! Driven port for the hosted user profile collection.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::macros::define_port_error;
use crate::domain::user::User;

define_port_error! {
    /// Failures reported by a user directory.
    DirectoryError {
        /// The backing service could not be reached.
        Unreachable { message: String } => "user directory unreachable: {message}",
        /// The backing service rejected the request.
        Rejected { message: String } => "user directory rejected the request: {message}",
    }
}

/// Lookup and upsert of user profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch the profile stored for an account id.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DirectoryError>;

    /// Insert or update a profile keyed on its id.
    async fn upsert(&self, user: &User) -> Result<(), DirectoryError>;
}

/// In-memory directory used in development and tests.
#[derive(Debug, Default)]
pub struct FixtureUserDirectory {
    users: Mutex<HashMap<String, User>>,
}

impl FixtureUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for FixtureUserDirectory {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DirectoryError> {
        let users = self
            .users
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(users.get(id).cloned())
    }

    async fn upsert(&self, user: &User) -> Result<(), DirectoryError> {
        let mut users = self
            .users
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }
}
