//! Outbound (driven) adapters.

pub mod persistence;
pub mod remote;
