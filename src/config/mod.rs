//! Configuration module for Snapshotter
//!
//! This module provides configuration management including:
//! - Per-user configuration directory resolution
//! - The optional rsync excludes file
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::SnapshotterPaths;
pub use settings::Settings;
