//! User settings for Snapshotter
//!
//! Manages defaults for the transfer tool, the remote shell, the retention
//! floor and the out-of-space signature.

use serde::{Deserialize, Serialize};

use super::paths::SnapshotterPaths;
use crate::error::SnapshotError;

/// User settings for Snapshotter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Never evict below this many committed snapshots
    #[serde(default = "default_min_snapshots")]
    pub min_snapshots: usize,

    /// Transfer tool executable
    #[serde(default = "default_rsync_command")]
    pub rsync_command: String,

    /// Remote shell executable used for `user@host:path` destinations
    #[serde(default = "default_remote_shell")]
    pub remote_shell: String,

    /// Compress file data during transfer
    #[serde(default = "default_true")]
    pub compress: bool,

    /// Look for basis files for destination files that are missing
    #[serde(default = "default_true")]
    pub fuzzy: bool,

    /// Show per-file progress during transfer
    #[serde(default)]
    pub progress: bool,

    /// Exclude patterns passed to every transfer
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Transfer exit code that signals a full destination
    #[serde(default = "default_no_space_exit_code")]
    pub no_space_exit_code: i32,

    /// Output substring that signals a full destination
    #[serde(default = "default_no_space_message")]
    pub no_space_message: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_min_snapshots() -> usize {
    3
}

fn default_rsync_command() -> String {
    "rsync".to_string()
}

fn default_remote_shell() -> String {
    "ssh".to_string()
}

fn default_true() -> bool {
    true
}

fn default_no_space_exit_code() -> i32 {
    11 // rsync: error in file IO
}

fn default_no_space_message() -> String {
    "No space left on device".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            min_snapshots: default_min_snapshots(),
            rsync_command: default_rsync_command(),
            remote_shell: default_remote_shell(),
            compress: true,
            fuzzy: true,
            progress: false,
            exclude: Vec::new(),
            no_space_exit_code: default_no_space_exit_code(),
            no_space_message: default_no_space_message(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use default settings if the file doesn't exist
    pub fn load_or_create(paths: &SnapshotterPaths) -> Result<Self, SnapshotError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                SnapshotError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SnapshotError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SnapshotterPaths) -> Result<(), SnapshotError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            SnapshotError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            SnapshotError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
