//! Snapshot creation CLI command
//!
//! Bridges the clap arguments with the snapshot engine. Command-line values
//! override the user's settings file.

use clap::Args;

use crate::config::paths::SnapshotterPaths;
use crate::config::settings::Settings;
use crate::error::SnapshotResult;
use crate::snapshot::{ProcessRunner, SnapshotReport, SnapshotRequest, Snapshotter};

/// Arguments for `snapshotter create`
#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    /// Directory to back up (local path or [USER@]HOST:PATH)
    pub source: String,

    /// Snapshots root (local path or [USER@]HOST:PATH)
    pub dest: String,

    /// Perform a trial run with no changes made (passes --dry-run to rsync)
    #[arg(short = 'n', long = "dry-run", short_alias = 'd', alias = "debug")]
    pub dry_run: bool,

    /// Never remove old snapshots below this count when out of space
    #[arg(long, value_name = "N", env = "SNAPSHOTTER_MIN_SNAPSHOTS")]
    pub min_snapshots: Option<usize>,

    /// Do not compress file data during transfer
    #[arg(long)]
    pub no_compress: bool,

    /// Do not look for basis files for missing destination files
    #[arg(long)]
    pub no_fuzzy: bool,

    /// Show progress during transfer
    #[arg(long)]
    pub progress: bool,

    /// Exclude files matching PATTERN (repeatable, see `man rsync`)
    #[arg(long, value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Extra arguments passed to rsync as-is, after `--`
    #[arg(last = true, value_name = "RSYNC_ARGS")]
    pub extra_args: Vec<String>,
}

impl CreateArgs {
    /// Settings with the command-line overrides applied
    pub fn effective_settings(&self, settings: &Settings) -> Settings {
        let mut effective = settings.clone();
        if let Some(min) = self.min_snapshots {
            effective.min_snapshots = min;
        }
        if self.no_compress {
            effective.compress = false;
        }
        if self.no_fuzzy {
            effective.fuzzy = false;
        }
        if self.progress {
            effective.progress = true;
        }
        effective.exclude.extend(self.exclude.iter().cloned());
        effective
    }

    /// The engine request for these arguments
    pub fn to_request(&self, settings: &Settings) -> SnapshotRequest {
        SnapshotRequest::new(self.source.clone(), self.dest.clone())
            .debug(self.dry_run)
            .min_snapshots(settings.min_snapshots)
            .extra_args(self.extra_args.clone())
    }
}

/// Handle `snapshotter create`
pub fn handle_create_command(
    paths: &SnapshotterPaths,
    settings: &Settings,
    args: &CreateArgs,
) -> SnapshotResult<SnapshotReport> {
    let settings = args.effective_settings(settings);
    let engine = Snapshotter::from_settings(ProcessRunner::new(), &settings, Some(paths));
    let report = engine.snapshot(&args.to_request(&settings))?;

    if !report.evicted.is_empty() {
        println!("Removed {} old snapshot(s) to make room:", report.evicted.len());
        for name in &report.evicted {
            println!("  {}", name);
        }
    }

    match &report.snapshot {
        Some(snapshot) => println!("Snapshot created: {}", snapshot),
        None => println!("Dry run complete, no snapshot created."),
    }

    Ok(report)
}
