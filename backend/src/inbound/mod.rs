//! Inbound (driving) adapters.

pub mod http;
pub mod ws;
