//! Incremental transfer command construction
//!
//! Builds the rsync invocation that copies the source into the staging
//! directory, hard-linking unchanged files against the previous snapshot.

use std::path::PathBuf;

use tracing::debug;

use super::destination::{DestinationRoot, LINK_DEST};
use super::pathspec::is_remote;
use crate::config::paths::expand_home;
use crate::config::Settings;

/// Side directory (inside the staging directory) for partial transfers
pub const PARTIAL_DIR: &str = "partially_transferred_files";

/// Tunables for the transfer tool invocation
#[derive(Debug, Clone)]
pub struct TransferOptions {
    /// Transfer tool executable
    pub rsync_command: String,
    /// Pass `--compress`
    pub compress: bool,
    /// Pass `--fuzzy`
    pub fuzzy: bool,
    /// Pass `--progress`
    pub progress: bool,
    /// Exclude-pattern file passed as `--exclude-from`, if present
    pub excludes_file: Option<PathBuf>,
    /// Patterns passed as `--exclude=PATTERN`
    pub exclude: Vec<String>,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl TransferOptions {
    /// Options taken from user settings, without an excludes file
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            rsync_command: settings.rsync_command.clone(),
            compress: settings.compress,
            fuzzy: settings.fuzzy,
            progress: settings.progress,
            excludes_file: None,
            exclude: settings.exclude.clone(),
        }
    }
}

/// Force the "copy contents of directory" form of a source argument
///
/// Local sources starting with `~` are home-expanded, everything else is
/// passed through. Exactly one trailing `/` is ensured.
pub fn normalize_source(source: &str) -> String {
    let mut source = if is_remote(source) {
        source.to_string()
    } else {
        expand_home(source).to_string_lossy().into_owned()
    };
    if !source.ends_with('/') {
        source.push('/');
    }
    source
}

/// Build the rsync argument vector for one transfer attempt
///
/// The command targets the staging directory of `dest`. It is only built
/// here, never executed.
pub fn build_transfer_command(
    source: &str,
    dest: &DestinationRoot,
    debug: bool,
    options: &TransferOptions,
    extra_args: &[String],
) -> Vec<String> {
    let mut command: Vec<String> = vec![
        options.rsync_command.clone(),
        "--archive".into(),
        "--partial".into(),
        format!("--partial-dir={}", PARTIAL_DIR),
        "--one-file-system".into(),
        "--delete".into(),
        "--delete-excluded".into(),
        "--itemize-changes".into(),
        format!("--link-dest={}", LINK_DEST),
        "--human-readable".into(),
        "--quiet".into(),
    ];

    if options.compress {
        command.push("--compress".into());
    }
    if options.fuzzy {
        command.push("--fuzzy".into());
    }
    if options.progress {
        command.push("--progress".into());
    }
    if let Some(excludes) = &options.excludes_file {
        command.push(format!("--exclude-from={}", excludes.display()));
    }
    command.extend(options.exclude.iter().map(|p| format!("--exclude={}", p)));
    command.extend(extra_args.iter().cloned());
    if debug {
        command.push("--dry-run".into());
    }

    command.push(normalize_source(source));
    command.push(dest.qualified_staging());

    debug!(command = %command.join(" "), "built transfer command");
    command
}
