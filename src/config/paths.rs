//! Path management for Snapshotter
//!
//! Resolves the per-user configuration directory and the files inside it.
//!
//! ## Path Resolution Order
//!
//! 1. `SNAPSHOTTER_HOME` environment variable (if set)
//! 2. `~/.snapshotter`

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::error::SnapshotError;

/// Manages all paths used by Snapshotter
#[derive(Debug, Clone)]
pub struct SnapshotterPaths {
    /// Base directory for all Snapshotter configuration
    base_dir: PathBuf,
}

impl SnapshotterPaths {
    /// Create a new SnapshotterPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, SnapshotError> {
        let base_dir = if let Ok(custom) = std::env::var("SNAPSHOTTER_HOME") {
            PathBuf::from(custom)
        } else {
            home_dir()?.join(".snapshotter")
        };

        Ok(Self { base_dir })
    }

    /// Create SnapshotterPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.snapshotter/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the rsync exclude-pattern file
    pub fn excludes_file(&self) -> PathBuf {
        self.base_dir.join("excludes")
    }

    /// The excludes file, only if it exists as a regular file
    pub fn existing_excludes_file(&self) -> Option<PathBuf> {
        let path = self.excludes_file();
        path.is_file().then_some(path)
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), SnapshotError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SnapshotError::Io(format!("Failed to create config directory: {}", e)))
    }
}

/// The current user's home directory
pub fn home_dir() -> Result<PathBuf, SnapshotError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or_else(|| SnapshotError::Config("Could not determine home directory".into()))
}

/// Expand a leading `~` or `~/` into the home directory
///
/// Anything else (including `~user`) is returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
    };

    match (rest, home_dir()) {
        (Some(rest), Ok(home)) if rest.is_empty() => home,
        (Some(rest), Ok(home)) => home.join(rest),
        _ => Path::new(path).to_path_buf(),
    }
}
