//! Local persistence adapters.

pub mod file_state;

pub use file_state::FileStateRepository;
