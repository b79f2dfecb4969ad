// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::JsonDisplay;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Please report this as bug to upstream
    Bug,
    /// Invalid argument or unparsable value
    InvalidArgument,
    /// Requested interface or connection does not exist
    NotFound,
    /// Failed to read, write or remove a file
    IoFailure,
    /// Not supported by the selected backend
    NoSupport,
    /// Unknown backend identifier
    InvalidBackend,
}

// Try not implement From for NicfgError here unless you are sure this
// error should always convert to certain type of ErrorKind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct NicfgError {
    pub kind: ErrorKind,
    pub msg: String,
}

impl std::fmt::Display for NicfgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.msg)
    }
}

impl NicfgError {
    pub fn new(kind: ErrorKind, msg: String) -> Self {
        Self { kind, msg }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn msg(&self) -> &str {
        self.msg.as_str()
    }

    /// Wrap [std::io::Error] with the path it happened on.
    pub(crate) fn io(
        action: &str,
        path: &std::path::Path,
        e: std::io::Error,
    ) -> Self {
        Self::new(
            ErrorKind::IoFailure,
            format!("Failed to {action} {}: {e}", path.display()),
        )
    }
}

impl std::error::Error for NicfgError {}

impl From<serde_json::Error> for NicfgError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(ErrorKind::Bug, format!("serde_json::Error: {e}"))
    }
}

impl From<std::io::Error> for NicfgError {
    fn from(e: std::io::Error) -> Self {
        Self::new(ErrorKind::IoFailure, format!("std::io::Error: {e}"))
    }
}

impl From<std::net::AddrParseError> for NicfgError {
    fn from(e: std::net::AddrParseError) -> Self {
        Self::new(
            ErrorKind::InvalidArgument,
            format!("Invalid IP address: {e}"),
        )
    }
}
