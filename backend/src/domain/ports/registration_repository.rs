//! Driven port for the hosted registration collection.

use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use super::macros::define_port_error;
use crate::domain::registration::{NewRegistration, RegistrationRow};

define_port_error! {
    /// Failures reported by a registration repository.
    RegistrationStoreError {
        /// The backing service could not be reached.
        Unreachable { message: String } => "registration store unreachable: {message}",
        /// The backing service rejected the request.
        Rejected { message: String } => "registration store rejected the request: {message}",
    }
}

/// Access to registration rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Fetch every registration row, newest first.
    async fn list_all(&self) -> Result<Vec<RegistrationRow>, RegistrationStoreError>;

    /// Fetch the rows recorded for one email address.
    async fn list_by_email(
        &self,
        email: &str,
    ) -> Result<Vec<RegistrationRow>, RegistrationStoreError>;

    /// Append a new registration row.
    async fn insert(&self, registration: NewRegistration)
        -> Result<(), RegistrationStoreError>;
}

/// In-memory repository used in development and tests.
#[derive(Debug, Default)]
pub struct FixtureRegistrationRepository {
    rows: Mutex<Vec<RegistrationRow>>,
    next_id: AtomicI64,
}

impl FixtureRegistrationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load rows, keeping the id counter ahead of the seed.
    pub fn seed(self, rows: Vec<RegistrationRow>) -> Self {
        let max_id = rows.iter().map(|r| r.id).max().unwrap_or(0);
        self.next_id.store(max_id, Ordering::SeqCst);
        if let Ok(mut guard) = self.rows.lock() {
            *guard = rows;
        }
        self
    }

    fn snapshot(&self) -> Vec<RegistrationRow> {
        self.rows
            .lock()
            .map(|rows| rows.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

#[async_trait]
impl RegistrationRepository for FixtureRegistrationRepository {
    async fn list_all(&self) -> Result<Vec<RegistrationRow>, RegistrationStoreError> {
        let mut rows = self.snapshot();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn list_by_email(
        &self,
        email: &str,
    ) -> Result<Vec<RegistrationRow>, RegistrationStoreError> {
        let needle = email.trim().to_lowercase();
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|row| {
                row.email
                    .as_deref()
                    .is_some_and(|e| e.trim().to_lowercase() == needle)
            })
            .collect())
    }

    async fn insert(
        &self,
        registration: NewRegistration,
    ) -> Result<(), RegistrationStoreError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let row = RegistrationRow {
            id,
            email: Some(registration.email),
            full_name: Some(registration.full_name),
            department: registration.department,
            event_name: Some(registration.event_name),
            phone: registration.phone,
            year: registration.year,
            message: registration.message,
            created_at: Some(chrono::Utc::now()),
        };
        let mut rows = self
            .rows
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        rows.push(row);
        Ok(())
    }
}
