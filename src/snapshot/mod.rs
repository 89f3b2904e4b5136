//! Snapshot engine
//!
//! Makes incremental, hard-linked snapshot backups by driving rsync plus
//! `mv`, `rm` and `ln`, locally or over ssh.
//!
//! # Architecture
//!
//! - `pathspec`: classifies `path` / `[user@]host:path` specifiers
//! - `remote`: wraps a command to run on a remote host
//! - `transfer`: builds the incremental rsync invocation
//! - `runner`: executes commands and maps failures to typed errors
//! - `destination`: the snapshots root layout and its mutating commands
//! - `lister`: enumerates committed snapshots, oldest first
//! - `eviction`: frees space by removing the oldest snapshot
//! - `engine`: the orchestrator tying it all together
//!
//! # Example
//!
//! ```rust,no_run
//! use snapshotter::snapshot::{snapshot, SnapshotRequest};
//!
//! let request = SnapshotRequest::new("~/Mail", "fred@nas:/srv/Mail.snapshots");
//! let report = snapshot(&request)?;
//! println!("{:?}", report.snapshot);
//! # Ok::<(), snapshotter::SnapshotError>(())
//! ```

pub mod destination;
pub mod engine;
pub mod eviction;
pub mod lister;
pub mod pathspec;
pub mod remote;
pub mod runner;
pub mod transfer;

pub use destination::DestinationRoot;
pub use engine::{NoSpaceSignature, SnapshotReport, SnapshotRequest, Snapshotter};
pub use lister::list_snapshots;
pub use pathspec::PathSpec;
pub use runner::{CommandRunner, ProcessRunner};
pub use transfer::TransferOptions;

use crate::config::{Settings, SnapshotterPaths};
use crate::error::SnapshotResult;

/// Take a snapshot with real processes and the default settings
///
/// The per-user excludes file (`~/.snapshotter/excludes`) is used when it
/// exists.
pub fn snapshot(request: &SnapshotRequest) -> SnapshotResult<SnapshotReport> {
    let paths = SnapshotterPaths::new().ok();
    Snapshotter::from_settings(ProcessRunner::new(), &Settings::default(), paths.as_ref())
        .snapshot(request)
}
