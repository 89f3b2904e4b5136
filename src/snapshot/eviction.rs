//! Eviction of old snapshots when the destination is full
//!
//! One snapshot goes per failed transfer attempt, oldest first, and never
//! below the retention floor.

use tracing::warn;

use super::destination::DestinationRoot;
use super::lister::list_snapshots;
use super::runner::CommandRunner;
use crate::error::{SnapshotError, SnapshotResult};

/// Default retention floor
pub const DEFAULT_MIN_SNAPSHOTS: usize = 3;

/// The snapshot to evict, if the floor allows one
///
/// `snapshots` must be sorted oldest first.
pub fn select_eviction(snapshots: &[String], min_snapshots: usize) -> Option<&str> {
    if snapshots.len() <= min_snapshots {
        return None;
    }
    snapshots.first().map(String::as_str)
}

/// List the destination and delete its oldest snapshot
///
/// Returns the evicted snapshot's name. Fails with
/// `NoMoreSnapshotsToRemove` without deleting anything when the floor would
/// be violated.
pub fn evict_oldest(
    dest: &DestinationRoot,
    runner: &dyn CommandRunner,
    min_snapshots: usize,
    debug: bool,
) -> SnapshotResult<String> {
    let snapshots = list_snapshots(dest, runner)?;

    let Some(oldest) = select_eviction(&snapshots, min_snapshots) else {
        return Err(SnapshotError::NoMoreSnapshotsToRemove {
            root: dest.spec().to_string(),
            remaining: snapshots.len(),
            min_snapshots,
        });
    };

    warn!(
        snapshot = oldest,
        remaining = snapshots.len() - 1,
        "out of space, removing oldest snapshot"
    );
    runner.run(&dest.remove_snapshot_command(oldest), debug)?;
    Ok(oldest.to_string())
}
