//! Domain core: entities, state containers, services, and driven ports.
//!
//! Nothing in this module touches HTTP or the network; adapters under
//! `inbound` and `outbound` translate between the outside world and these
//! types.

pub mod accounts;
pub mod auth_store;
pub mod catalog;
pub mod defaults;
pub mod error;
pub mod event_store;
pub mod events;
pub mod leaderboard;
pub mod leaderboard_service;
pub mod ports;
pub mod registration;
pub mod user;
pub mod venues;

pub use accounts::{AccountService, ServiceAvailability, SignupForm, SignupOutcome};
pub use auth_store::{AuthSnapshot, AuthStore, Theme};
pub use error::{DomainError, ErrorCode};
pub use event_store::EventStore;
pub use events::{Event, EventCategory, EventPatch};
pub use leaderboard::{LeaderboardEntry, POINTS_PER_REGISTRATION};
pub use leaderboard_service::{LeaderboardService, REGISTRATIONS_COLLECTION};
pub use registration::{NewRegistration, RegistrationRow};
pub use user::{Role, User, UserPatch};
pub use venues::{Booking, BookingStatus, Venue, VenueKind};
