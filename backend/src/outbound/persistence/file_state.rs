//! JSON file persistence for the auth snapshot.

use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::warn;

use crate::domain::ports::{StatePersistenceError, StateRepository};
use crate::domain::AuthSnapshot;

/// Stores the auth snapshot as pretty-printed JSON at a fixed path.
///
/// A missing file means no snapshot; a corrupt file is treated the same
/// after a warning, so a bad write never wedges startup.
#[derive(Debug, Clone)]
pub struct FileStateRepository {
    path: PathBuf,
}

impl FileStateRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StateRepository for FileStateRepository {
    fn load(&self) -> Result<Option<AuthSnapshot>, StatePersistenceError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(StatePersistenceError::io(error.to_string())),
        };
        match serde_json::from_slice(&bytes) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(error) => {
                warn!(%error, path = %self.path.display(), "discarding corrupt auth snapshot");
                Ok(None)
            }
        }
    }

    fn save(&self, snapshot: &AuthSnapshot) -> Result<(), StatePersistenceError> {
        let bytes = serde_json::to_vec_pretty(snapshot)
            .map_err(|error| StatePersistenceError::io(error.to_string()))?;
        std::fs::write(&self.path, bytes)
            .map_err(|error| StatePersistenceError::io(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Theme;

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("temp dir");
        let repo = FileStateRepository::new(dir.path().join("auth.json"));
        assert_eq!(repo.load().expect("load succeeds"), None);

        let snapshot = AuthSnapshot {
            user: None,
            authenticated: false,
            theme: Theme::Dark,
        };
        repo.save(&snapshot).expect("save succeeds");
        assert_eq!(repo.load().expect("load succeeds"), Some(snapshot));
    }

    #[test]
    fn corrupt_files_load_as_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("auth.json");
        std::fs::write(&path, b"{not json").expect("write succeeds");
        let repo = FileStateRepository::new(path);
        assert_eq!(repo.load().expect("load succeeds"), None);
    }

    #[test]
    fn unreadable_paths_surface_io_errors() {
        let dir = tempfile::tempdir().expect("temp dir");
        // The path is a directory, so reading it as a file fails.
        let repo = FileStateRepository::new(dir.path());
        assert!(repo.load().is_err());
    }
}
