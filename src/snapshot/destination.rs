//! The destination root and the commands that mutate it
//!
//! Layout under a snapshots root:
//!
//! - `incomplete.snapshot/` staging directory for the in-flight transfer
//! - `YYYY-MM-DDTHH_MM_SS.snapshot/` one directory per committed snapshot
//! - `latest.snapshot` relative symlink to the newest committed snapshot
//!
//! Commands are built host-agnostically and wrapped for the destination's
//! host in one place.

use super::pathspec::PathSpec;
use super::remote::wrap_for_host;

/// Name of the staging directory
pub const STAGING_NAME: &str = "incomplete.snapshot";

/// Name of the pointer to the most recent committed snapshot
pub const LATEST_NAME: &str = "latest.snapshot";

/// Suffix shared by every snapshot directory
pub const SNAPSHOT_SUFFIX: &str = ".snapshot";

/// Hard-link baseline, relative to the staging directory
pub const LINK_DEST: &str = "../latest.snapshot";

/// A resolved snapshots root, local or remote
#[derive(Debug, Clone)]
pub struct DestinationRoot {
    spec: PathSpec,
    remote_shell: String,
}

impl DestinationRoot {
    /// Create a destination root for a classified spec
    pub fn new(spec: PathSpec, remote_shell: impl Into<String>) -> Self {
        Self {
            spec,
            remote_shell: remote_shell.into(),
        }
    }

    /// The classified spec
    pub fn spec(&self) -> &PathSpec {
        &self.spec
    }

    /// The snapshots root path on its host
    pub fn root(&self) -> &str {
        &self.spec.path
    }

    /// Whether the root lives on another host
    pub fn is_remote(&self) -> bool {
        self.spec.is_remote()
    }

    /// Directory name for a snapshot taken at `timestamp`
    pub fn snapshot_name(timestamp: &str) -> String {
        format!("{}{}", timestamp, SNAPSHOT_SUFFIX)
    }

    /// Path of the staging directory on the destination host
    pub fn staging_path(&self) -> String {
        self.spec.join(STAGING_NAME)
    }

    /// Path of the latest pointer on the destination host
    pub fn latest_path(&self) -> String {
        self.spec.join(LATEST_NAME)
    }

    /// Path of a named entry on the destination host
    pub fn entry_path(&self, name: &str) -> String {
        self.spec.join(name)
    }

    /// Path of the snapshot for `timestamp` on the destination host
    pub fn snapshot_path(&self, timestamp: &str) -> String {
        self.entry_path(&Self::snapshot_name(timestamp))
    }

    /// The staging directory as an rsync destination (`user@host:path`)
    pub fn qualified_staging(&self) -> String {
        self.spec.qualify(&self.staging_path())
    }

    /// A snapshot path as the user would address it (`user@host:path`)
    pub fn qualified_snapshot(&self, timestamp: &str) -> String {
        self.spec.qualify(&self.snapshot_path(timestamp))
    }

    /// `mv incomplete.snapshot TIMESTAMP.snapshot`
    pub fn commit_command(&self, timestamp: &str) -> Vec<String> {
        self.wrap(vec![
            "mv".to_string(),
            self.staging_path(),
            self.snapshot_path(timestamp),
        ])
    }

    /// `rm -f latest.snapshot`; a missing link is not an error
    pub fn unlink_latest_command(&self) -> Vec<String> {
        self.wrap(vec!["rm".to_string(), "-f".to_string(), self.latest_path()])
    }

    /// `ln -s TIMESTAMP.snapshot latest.snapshot` with a relative target
    pub fn link_latest_command(&self, timestamp: &str) -> Vec<String> {
        self.wrap(vec![
            "ln".to_string(),
            "-s".to_string(),
            Self::snapshot_name(timestamp),
            self.latest_path(),
        ])
    }

    /// `rm -rf NAME` for evicting a committed snapshot
    pub fn remove_snapshot_command(&self, name: &str) -> Vec<String> {
        self.wrap(vec!["rm".to_string(), "-rf".to_string(), self.entry_path(name)])
    }

    /// `ls -1 -p ROOT`, directories marked with a trailing `/`
    pub fn list_command(&self) -> Vec<String> {
        self.wrap(vec![
            "ls".to_string(),
            "-1".to_string(),
            "-p".to_string(),
            self.root().to_string(),
        ])
    }

    fn wrap(&self, command: Vec<String>) -> Vec<String> {
        wrap_for_host(
            command,
            &self.remote_shell,
            self.spec.user.as_deref(),
            self.spec.host.as_deref(),
        )
    }
}
