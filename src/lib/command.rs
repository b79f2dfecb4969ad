// SPDX-License-Identifier: Apache-2.0

use std::process::Command;

use crate::{ErrorKind, NicfgError};

/// Run an external program and return its standard output.
pub trait CommandExecutor: std::fmt::Debug {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, NicfgError>;
}

/// [CommandExecutor] spawning real processes.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, NicfgError> {
        log::debug!("Running {program} {}", args.join(" "));
        let output = Command::new(program).args(args).output().map_err(|e| {
            NicfgError::new(
                ErrorKind::IoFailure,
                format!("Failed to execute {program}: {e}"),
            )
        })?;
        if !output.status.success() {
            return Err(NicfgError::new(
                ErrorKind::IoFailure,
                format!(
                    "{program} {} failed with {}: {}",
                    args.join(" "),
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
