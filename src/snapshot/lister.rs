//! Committed snapshot enumeration
//!
//! Lists the `YYYY-MM-DDTHH_MM_SS.snapshot` directories directly under a
//! snapshots root, oldest first. The name format sorts lexicographically
//! in time order, so a plain string sort is a chronological sort.

use std::fs;
use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::Regex;
use tracing::debug;

use super::destination::{DestinationRoot, SNAPSHOT_SUFFIX};
use super::runner::CommandRunner;
use crate::error::{SnapshotError, SnapshotResult};

/// strftime format of the timestamp part of a snapshot name
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H_%M_%S";

fn snapshot_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}_\d{2}_\d{2}\.snapshot$")
            .expect("snapshot name pattern is valid")
    })
}

/// Whether `name` is a committed snapshot directory name
///
/// `incomplete.snapshot` and `latest.snapshot` never match.
pub fn is_snapshot_name(name: &str) -> bool {
    snapshot_name_pattern().is_match(name)
}

/// The time encoded in a snapshot name
pub fn parse_snapshot_time(name: &str) -> Option<NaiveDateTime> {
    if !is_snapshot_name(name) {
        return None;
    }
    let timestamp = name.strip_suffix(SNAPSHOT_SUFFIX)?;
    NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).ok()
}

/// List committed snapshots under `dest`, oldest first
///
/// Local roots are read from the filesystem; a root that does not exist
/// yet has no snapshots. Remote roots are listed with `ls` over the remote
/// shell. Nothing is modified either way.
pub fn list_snapshots(
    dest: &DestinationRoot,
    runner: &dyn CommandRunner,
) -> SnapshotResult<Vec<String>> {
    let mut snapshots = if dest.is_remote() {
        list_remote(dest, runner)?
    } else {
        list_local(dest.root())?
    };

    snapshots.sort();
    debug!(root = %dest.spec(), count = snapshots.len(), "listed snapshots");
    Ok(snapshots)
}

fn list_local(root: &str) -> SnapshotResult<Vec<String>> {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(SnapshotError::Io(format!(
                "Failed to read snapshots root {}: {}",
                root, e
            )))
        }
    };

    let mut snapshots = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            SnapshotError::Io(format!("Failed to read directory entry: {}", e))
        })?;

        // file_type() does not follow symlinks, so latest.snapshot is skipped
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_dir && is_snapshot_name(&name) {
            snapshots.push(name);
        }
    }
    Ok(snapshots)
}

fn list_remote(dest: &DestinationRoot, runner: &dyn CommandRunner) -> SnapshotResult<Vec<String>> {
    let output = runner.run(&dest.list_command(), false)?;
    Ok(parse_listing(&output))
}

/// Pick snapshot directories out of `ls -1 -p` output
pub fn parse_listing(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.trim_end_matches('\r').strip_suffix('/'))
        .filter(|name| is_snapshot_name(name))
        .map(str::to_string)
        .collect()
}
