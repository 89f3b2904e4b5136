//! Source and destination specifier classification
//!
//! An rsync-style specifier is either a local path (`/media/backup`,
//! `~/Mail`, `Mail.snapshots`) or a remote one (`host:path`,
//! `user@host:path`). Classification is purely syntactic: nothing here
//! touches the network, and local existence is never checked.

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::config::paths::expand_home;

/// A classified endpoint: optional `user@host` plus a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSpec {
    /// The username in a remote path spec (`fred` in `fred@host:path`)
    pub user: Option<String>,
    /// The hostname in a remote path spec; `None` for local paths
    pub host: Option<String>,
    /// Absolute and normalized for local paths, verbatim for remote ones
    pub path: String,
}

impl PathSpec {
    /// Classify a specifier string
    pub fn parse(spec: &str) -> Self {
        let parsed = if is_remote(spec) {
            let (before_colon, after_colon) = spec.split_once(':').unwrap_or((spec, ""));
            let (user, host) = match before_colon.split_once('@') {
                Some((user, _)) => (
                    Some(user.to_string()),
                    before_colon.rsplit('@').next().unwrap_or_default().to_string(),
                ),
                None => (None, before_colon.to_string()),
            };
            Self {
                user,
                host: Some(host),
                path: after_colon.to_string(),
            }
        } else {
            Self {
                user: None,
                host: None,
                path: absolutize(&expand_home(spec)).to_string_lossy().into_owned(),
            }
        };

        debug!(
            spec,
            user = ?parsed.user,
            host = ?parsed.host,
            path = %parsed.path,
            "classified path spec"
        );
        parsed
    }

    /// A local path spec
    pub fn local(path: impl Into<String>) -> Self {
        Self {
            user: None,
            host: None,
            path: path.into(),
        }
    }

    /// Whether this spec names a remote host
    pub fn is_remote(&self) -> bool {
        self.host.is_some()
    }

    /// `user@host`, `host`, or `None` for local specs
    pub fn target(&self) -> Option<String> {
        let host = self.host.as_deref()?;
        Some(match &self.user {
            Some(user) => format!("{}@{}", user, host),
            None => host.to_string(),
        })
    }

    /// Qualify a path on this spec's host for rsync (`user@host:path`)
    pub fn qualify(&self, path: &str) -> String {
        match self.target() {
            Some(target) => format!("{}:{}", target, path),
            None => path.to_string(),
        }
    }

    /// Join a child name under this spec's path
    pub fn join(&self, name: &str) -> String {
        join_path(&self.path, name)
    }
}

impl std::fmt::Display for PathSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.qualify(&self.path))
    }
}

/// A spec is remote if there is a `:` before the first `/`
pub fn is_remote(spec: &str) -> bool {
    spec.split('/').next().is_some_and(|first| first.contains(':'))
}

/// Join `name` under `root` with exactly one separator
///
/// An empty root yields `name` alone, which for a remote spec like
/// `host:` keeps the path relative to the remote login directory.
pub fn join_path(root: &str, name: &str) -> String {
    if root.is_empty() {
        return name.to_string();
    }
    format!("{}/{}", root.trim_end_matches('/'), name)
}

/// Make a path absolute against the working directory and fold `.`/`..`
fn absolutize(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::home_dir;

    #[test]
    fn test_absolute_local_path() {
        let spec = PathSpec::parse("/media/backup");
        assert_eq!(spec, PathSpec::local("/media/backup"));
        assert!(!spec.is_remote());
    }

    #[test]
    fn test_relative_local_path_is_made_absolute() {
        let spec = PathSpec::parse("Mail.snapshots");
        let expected = std::env::current_dir().unwrap().join("Mail.snapshots");
        assert_eq!(spec.path, expected.to_string_lossy());
        assert_eq!(spec.user, None);
        assert_eq!(spec.host, None);
    }

    #[test]
    fn test_dot_segments_are_folded() {
        let spec = PathSpec::parse("/media/./backup/../SNAPSHOTS/");
        assert_eq!(spec.path, "/media/SNAPSHOTS");
    }

    #[test]
    fn test_home_is_expanded() {
        let spec = PathSpec::parse("~/Snapshots");
        assert_eq!(spec.path, home_dir().unwrap().join("Snapshots").to_string_lossy());
    }

    #[test]
    fn test_remote_with_user() {
        let spec = PathSpec::parse("seanh@mydomain.org:/path/to/backups");
        assert_eq!(spec.user.as_deref(), Some("seanh"));
        assert_eq!(spec.host.as_deref(), Some("mydomain.org"));
        assert_eq!(spec.path, "/path/to/backups");
    }

    #[test]
    fn test_remote_without_user() {
        let spec = PathSpec::parse("yourdomain.org:/path/to/snapshots");
        assert_eq!(spec.user, None);
        assert_eq!(spec.host.as_deref(), Some("yourdomain.org"));
        assert_eq!(spec.path, "/path/to/snapshots");
    }

    #[test]
    fn test_remote_relative_path_is_untouched() {
        let spec = PathSpec::parse("seanh@mydomain.org:Snapshots/../Documents");
        assert_eq!(spec.path, "Snapshots/../Documents");
    }

    #[test]
    fn test_colon_after_first_separator_is_local() {
        let spec = PathSpec::parse("/backups/host:1");
        assert!(!spec.is_remote());
        assert_eq!(spec.path, "/backups/host:1");
    }

    #[test]
    fn test_qualify_and_join() {
        let remote = PathSpec::parse("you@yourdomain.org:/path/to/snapshots/");
        assert_eq!(
            remote.qualify(&remote.join("incomplete.snapshot")),
            "you@yourdomain.org:/path/to/snapshots/incomplete.snapshot"
        );

        let root = PathSpec::local("/");
        assert_eq!(root.join("incomplete.snapshot"), "/incomplete.snapshot");

        let bare_host = PathSpec::parse("backuphost:");
        assert_eq!(bare_host.join("latest.snapshot"), "latest.snapshot");
        assert_eq!(bare_host.target().as_deref(), Some("backuphost"));
    }

    #[test]
    fn test_display() {
        assert_eq!(PathSpec::parse("fred@nas:/srv").to_string(), "fred@nas:/srv");
        assert_eq!(PathSpec::local("/srv").to_string(), "/srv");
    }
}
