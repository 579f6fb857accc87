//! Driven ports of the domain.
//!
//! Each port lives in its own module with its error type and a `Fixture*`
//! implementation for development and tests. Outbound adapters implement
//! these traits against the hosted data service.

pub(crate) mod macros;

mod auth_gateway;
mod realtime_feed;
mod registration_repository;
mod state_repository;
mod user_directory;

pub use auth_gateway::{
    AuthGateway, AuthGatewayError, AuthenticatedIdentity, FixtureAuthGateway, SignupProfile,
    FIXTURE_EMAIL, FIXTURE_PASSWORD,
};
pub use realtime_feed::{
    ChangeEvent, ChangeKind, ChangeStream, FixtureRealtimeFeed, RealtimeError, RealtimeFeed,
};
pub use registration_repository::{
    FixtureRegistrationRepository, RegistrationRepository, RegistrationStoreError,
};
pub use state_repository::{FixtureStateRepository, StatePersistenceError, StateRepository};
pub use user_directory::{DirectoryError, FixtureUserDirectory, UserDirectory};

#[cfg(test)]
pub use auth_gateway::MockAuthGateway;
#[cfg(test)]
pub use realtime_feed::MockRealtimeFeed;
#[cfg(test)]
pub use registration_repository::MockRegistrationRepository;
#[cfg(test)]
pub use state_repository::MockStateRepository;
#[cfg(test)]
pub use user_directory::MockUserDirectory;
