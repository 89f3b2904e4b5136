//! External command execution
//!
//! The orchestrator's only contact with the outside world. Commands are
//! argument vectors handed straight to the OS, never joined into a shell
//! string.

use std::io::ErrorKind;
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::error::{SnapshotError, SnapshotResult};

/// Something that can execute an argument vector
pub trait CommandRunner {
    /// Run `command` and return its combined output
    ///
    /// When `debug` is set the command is logged and not executed, and the
    /// output is empty.
    fn run(&self, command: &[String], debug: bool) -> SnapshotResult<String>;
}

/// Runs commands as real subprocesses
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, command: &[String], debug: bool) -> SnapshotResult<String> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| SnapshotError::InvalidArguments("empty command".into()))?;
        let command_line = command.join(" ");

        if debug {
            info!(command = %command_line, "dry run, not executing");
            return Ok(String::new());
        }

        info!(command = %command_line, "running");
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => SnapshotError::CommandNotFound {
                    command: program.clone(),
                },
                _ => SnapshotError::Io(format!("Failed to start {}: {}", program, e)),
            })?;

        // stderr follows stdout so diagnostics are always searchable
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            // Killed by a signal: no exit code
            let exit_code = output.status.code().unwrap_or(-1);
            debug!(command = %command_line, exit_code, "command failed");
            return Err(SnapshotError::ExecutionFailed {
                command: command_line,
                output: combined,
                exit_code,
            });
        }

        Ok(combined)
    }
}
