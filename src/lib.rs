//! Snapshotter - incremental snapshot backups with rsync
//!
//! This library makes space-efficient snapshot backups of a directory tree.
//! Each run transfers into a staging directory, hard-linking unchanged files
//! against the previous snapshot, then commits it under a timestamped name
//! and repoints a `latest.snapshot` symlink. When the destination fills up,
//! the oldest snapshots are evicted one at a time, never going below a
//! minimum retention count.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: tracing subscriber setup for the binary
//! - `snapshot`: The snapshot engine
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use snapshotter::config::{SnapshotterPaths, Settings};
//! use snapshotter::snapshot::{ProcessRunner, SnapshotRequest, Snapshotter};
//!
//! let paths = SnapshotterPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let engine = Snapshotter::from_settings(ProcessRunner::new(), &settings, Some(&paths));
//! let report = engine.snapshot(&SnapshotRequest::new("/home/fred", "/media/backup"))?;
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod snapshot;

pub use error::{SnapshotError, SnapshotResult};
