//! The snapshot orchestrator
//!
//! Drives one run through `Transferring -> Committing -> Relinking -> Done`,
//! with an `Evicting` side loop whenever the transfer runs out of space:
//!
//! ```text
//!            +-----------+  out of space   +----------+
//!   start -> |Transferring| -------------> | Evicting |
//!            +-----------+ <-------------  +----------+
//!                  | ok                         | floor reached
//!                  v                            v
//!            +-----------+              NoMoreSnapshotsToRemove
//!            | Committing|  (skipped on dry run)
//!            +-----------+
//!                  v
//!            +-----------+
//!            | Relinking |
//!            +-----------+
//!                  v
//!                 Done
//! ```
//!
//! A single writer per destination root is assumed; nothing here locks.

use chrono::Local;
use tracing::{info, warn};

use super::destination::DestinationRoot;
use super::eviction::{evict_oldest, DEFAULT_MIN_SNAPSHOTS};
use super::lister::TIMESTAMP_FORMAT;
use super::pathspec::PathSpec;
use super::runner::CommandRunner;
use super::transfer::{build_transfer_command, TransferOptions};
use crate::config::{Settings, SnapshotterPaths};
use crate::error::{SnapshotError, SnapshotResult};

/// What the caller asks for
#[derive(Debug, Clone)]
pub struct SnapshotRequest {
    /// Directory to back up (local path or `user@host:path`)
    pub source: String,
    /// Snapshots root (local path or `user@host:path`)
    pub dest: String,
    /// Dry run: build and log the transfer but commit nothing
    pub debug: bool,
    /// Retention floor for eviction
    pub min_snapshots: usize,
    /// Pass-through flags for the transfer tool
    pub extra_args: Vec<String>,
}

impl SnapshotRequest {
    /// A request with default options
    pub fn new(source: impl Into<String>, dest: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            debug: false,
            min_snapshots: DEFAULT_MIN_SNAPSHOTS,
            extra_args: Vec::new(),
        }
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn min_snapshots(mut self, min_snapshots: usize) -> Self {
        self.min_snapshots = min_snapshots;
        self
    }

    pub fn extra_args(mut self, extra_args: Vec<String>) -> Self {
        self.extra_args = extra_args;
        self
    }

    fn validate(&self) -> SnapshotResult<()> {
        if self.source.trim().is_empty() {
            return Err(SnapshotError::InvalidArguments("source is empty".into()));
        }
        if self.dest.trim().is_empty() {
            return Err(SnapshotError::InvalidArguments("destination is empty".into()));
        }
        Ok(())
    }
}

/// How a full destination shows up in a failed transfer
///
/// Depends on the transfer tool's version, so both parts are configurable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoSpaceSignature {
    pub exit_code: i32,
    pub message: String,
}

impl Default for NoSpaceSignature {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl NoSpaceSignature {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            exit_code: settings.no_space_exit_code,
            message: settings.no_space_message.clone(),
        }
    }

    /// Whether a failure's exit code and output match the signature
    pub fn matches(&self, exit_code: i32, output: &str) -> bool {
        exit_code == self.exit_code && output.contains(&self.message)
    }

    /// Turn a matching `ExecutionFailed` into `NoSpaceLeftOnDevice`
    pub fn refine(&self, err: SnapshotError) -> SnapshotError {
        match err {
            SnapshotError::ExecutionFailed {
                command,
                output,
                exit_code,
            } if self.matches(exit_code, &output) => {
                SnapshotError::NoSpaceLeftOnDevice { command, output }
            }
            other => other,
        }
    }
}

/// What a run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotReport {
    /// Timestamp shared by every attempt of this run
    pub timestamp: String,
    /// The committed snapshot (`user@host:path` when remote); `None` on a dry run
    pub snapshot: Option<String>,
    /// How many times the transfer ran
    pub transfer_attempts: usize,
    /// Snapshots evicted to make room, oldest first
    pub evicted: Vec<String>,
    /// Whether this was a dry run
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Transferring,
    Evicting,
    Committing,
    Relinking,
    Done,
}

enum Attempt {
    Transferred,
    OutOfSpace,
}

/// Current local time as a snapshot timestamp
pub fn local_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Orchestrates snapshot runs over a [`CommandRunner`]
pub struct Snapshotter<R: CommandRunner> {
    runner: R,
    remote_shell: String,
    transfer: TransferOptions,
    no_space: NoSpaceSignature,
    clock: Box<dyn Fn() -> String>,
}

impl<R: CommandRunner> Snapshotter<R> {
    /// A snapshotter with default settings
    pub fn new(runner: R) -> Self {
        Self::from_settings(runner, &Settings::default(), None)
    }

    /// A snapshotter configured from user settings
    ///
    /// With `paths`, the per-user excludes file is passed to the transfer
    /// when it exists.
    pub fn from_settings(
        runner: R,
        settings: &Settings,
        paths: Option<&SnapshotterPaths>,
    ) -> Self {
        let mut transfer = TransferOptions::from_settings(settings);
        transfer.excludes_file = paths.and_then(SnapshotterPaths::existing_excludes_file);

        Self {
            runner,
            remote_shell: settings.remote_shell.clone(),
            transfer,
            no_space: NoSpaceSignature::from_settings(settings),
            clock: Box::new(local_timestamp),
        }
    }

    /// Replace the timestamp source
    pub fn with_clock(mut self, clock: impl Fn() -> String + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_transfer_options(mut self, transfer: TransferOptions) -> Self {
        self.transfer = transfer;
        self
    }

    pub fn with_no_space_signature(mut self, no_space: NoSpaceSignature) -> Self {
        self.no_space = no_space;
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Take one snapshot of `request.source` into `request.dest`
    pub fn snapshot(&self, request: &SnapshotRequest) -> SnapshotResult<SnapshotReport> {
        request.validate()?;

        let timestamp = (self.clock)();
        let dest = DestinationRoot::new(PathSpec::parse(&request.dest), &self.remote_shell);
        info!(
            source = %request.source,
            dest = %dest.spec(),
            timestamp = %timestamp,
            dry_run = request.debug,
            "starting snapshot"
        );

        let mut report = SnapshotReport {
            timestamp: timestamp.clone(),
            snapshot: None,
            transfer_attempts: 0,
            evicted: Vec::new(),
            dry_run: request.debug,
        };

        let mut state = State::Transferring;
        while state != State::Done {
            state = match state {
                State::Transferring => {
                    report.transfer_attempts += 1;
                    match self.transfer(request, &dest)? {
                        Attempt::Transferred if request.debug => State::Done,
                        Attempt::Transferred => State::Committing,
                        Attempt::OutOfSpace => State::Evicting,
                    }
                }
                State::Evicting => {
                    let evicted =
                        evict_oldest(&dest, &self.runner, request.min_snapshots, request.debug)?;
                    if report.evicted.contains(&evicted) {
                        return Err(SnapshotError::Io(format!(
                            "{} is still present after removal",
                            dest.entry_path(&evicted)
                        )));
                    }
                    report.evicted.push(evicted);
                    State::Transferring
                }
                State::Committing => {
                    self.runner
                        .run(&dest.commit_command(&timestamp), request.debug)?;
                    State::Relinking
                }
                State::Relinking => {
                    self.runner
                        .run(&dest.unlink_latest_command(), request.debug)?;
                    self.runner
                        .run(&dest.link_latest_command(&timestamp), request.debug)?;
                    report.snapshot = Some(dest.qualified_snapshot(&timestamp));
                    State::Done
                }
                State::Done => State::Done,
            };
        }

        match &report.snapshot {
            Some(snapshot) => info!(snapshot = %snapshot, "snapshot committed"),
            None => info!("dry run finished, nothing committed"),
        }
        Ok(report)
    }

    fn transfer(&self, request: &SnapshotRequest, dest: &DestinationRoot) -> SnapshotResult<Attempt> {
        let command = build_transfer_command(
            &request.source,
            dest,
            request.debug,
            &self.transfer,
            &request.extra_args,
        );

        match self.runner.run(&command, request.debug) {
            Ok(_) => Ok(Attempt::Transferred),
            Err(err) => {
                let err = self.no_space.refine(err);
                if err.is_no_space() {
                    warn!(error = %err, "transfer ran out of space");
                    Ok(Attempt::OutOfSpace)
                } else {
                    Err(err)
                }
            }
        }
    }
}
