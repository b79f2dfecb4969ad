// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::JsonDisplay;

/// Where a recoverable problem was found: the file and the key inside it.
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct IssueLocation {
    pub file: PathBuf,
    pub key: String,
}

impl IssueLocation {
    pub fn new(file: &Path, key: &str) -> Self {
        Self {
            file: file.to_path_buf(),
            key: key.to_string(),
        }
    }
}

/// A data-quality problem the reader recovered from by using a fallback
/// value.
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct Issue {
    pub location: IssueLocation,
    /// The offending value as found on disk.
    pub value: String,
    /// The value used instead.
    pub fallback: String,
    pub message: String,
}

impl Issue {
    pub fn new(
        location: IssueLocation,
        value: &str,
        fallback: &str,
        message: String,
    ) -> Self {
        Self {
            location,
            value: value.to_string(),
            fallback: fallback.to_string(),
            message,
        }
    }
}

/// Caller visible list of [Issue] collected while reading.
/// Readers only append to it, they never fail because of an issue.
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonDisplay,
)]
#[non_exhaustive]
pub struct Issues {
    issues: Vec<Issue>,
}

impl Issues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: Issue) {
        log::warn!(
            "{}: {} ({}), using '{}' instead of '{}'",
            issue.location.file.display(),
            issue.message,
            issue.location.key,
            issue.fallback,
            issue.value,
        );
        self.issues.push(issue);
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter()
    }
}
