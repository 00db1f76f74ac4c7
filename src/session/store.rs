// Session store - full-replace persistence of the session list
// One JSON array under a fixed file name; unreadable data loads as empty.

use crate::session::types::Session;
use std::path::{Path, PathBuf};

/// Fixed storage key: the file holding every session
pub const STORAGE_FILE_NAME: &str = "workout-sessions-v1.json";

/// Store error types
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("File system error: {0}")]
    FileSystemError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Session store - loads and saves the whole session list at once
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store rooted in `data_dir`
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            path: data_dir.as_ref().join(STORAGE_FILE_NAME),
        }
    }

    /// Location of the storage file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every session in stored order
    /// A missing or malformed file yields an empty list.
    pub fn load_all(&self) -> Vec<Session> {
        match self.try_load() {
            Ok(sessions) => {
                tracing::debug!(count = sessions.len(), path = %self.path.display(), "loaded sessions");
                sessions
            }
            Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no session file yet");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable session file");
                Vec::new()
            }
        }
    }

    fn try_load(&self) -> Result<Vec<Session>, StoreError> {
        let data = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Replace the stored list with `sessions`
    /// Written to a sibling temp file first, then renamed over the old one.
    pub fn save_all(&self, sessions: &[Session]) -> Result<(), StoreError> {
        let dir = self
            .path
            .parent()
            .ok_or_else(|| StoreError::FileSystemError("Invalid storage path".to_string()))?;

        std::fs::create_dir_all(dir).map_err(|e| {
            StoreError::FileSystemError(format!("Failed to create data directory: {}", e))
        })?;

        let json = serde_json::to_string(sessions)?;
        let temp_path = self.path.with_extension("json.tmp");

        std::fs::write(&temp_path, json).map_err(|e| {
            StoreError::FileSystemError(format!("Failed to write sessions: {}", e))
        })?;
        std::fs::rename(&temp_path, &self.path).map_err(|e| {
            StoreError::FileSystemError(format!("Failed to replace session file: {}", e))
        })?;

        tracing::debug!(count = sessions.len(), path = %self.path.display(), "saved sessions");
        Ok(())
    }
}
