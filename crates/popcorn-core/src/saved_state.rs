//! Persist and restore the movie list across suspend/resume.
//!
//! Stored as a small JSON document with fixed keys:
//! `movies` (each movie as its flat field list), `page` and `language`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::Movie;

/// Snapshot of the list controller taken when the screen is suspended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    pub movies: Vec<Movie>,
    pub page: u32,
    /// Language the movies were loaded in. Older snapshots may lack it.
    #[serde(default)]
    pub language: Option<String>,
}

impl SavedState {
    /// Load from disk. A missing file is `Ok(None)`; an unreadable or
    /// empty snapshot is an error.
    pub fn load(path: &Path) -> Result<Option<Self>, CoreError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let state: SavedState =
            serde_json::from_str(&content).map_err(|e| CoreError::State(e.to_string()))?;
        if state.movies.is_empty() {
            return Err(CoreError::State("snapshot has no movies".into()));
        }
        Ok(Some(state))
    }

    /// Write to disk, creating the parent directory.
    pub fn save(&self, path: &Path) -> Result<(), CoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json =
            serde_json::to_string_pretty(self).map_err(|e| CoreError::State(e.to_string()))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Remove a snapshot so the next start loads fresh data.
    pub fn clear(path: &Path) -> Result<(), CoreError> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
