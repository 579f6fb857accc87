//! Adapters for the hosted remote data service.

pub mod config;
pub mod dto;
pub mod polling;
pub mod rest;

pub use config::RemoteConfig;
pub use polling::PollingRealtimeFeed;
pub use rest::RemoteDataService;
