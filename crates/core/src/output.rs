// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Records shown in the output panel

use serde::{Deserialize, Serialize};

/// Which stream a piece of output belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    Stdout,
    Stderr,
    Info,
    Success,
    #[serde(alias = "error")]
    Failure,
    /// Echo of a value the user submitted.
    Input,
}

crate::simple_display! {
    StreamKind {
        Stdout => "stdout",
        Stderr => "stderr",
        Info => "info",
        Success => "success",
        Failure => "failure",
        Input => "input",
    }
}

impl StreamKind {
    pub const ALL: [StreamKind; 6] = [
        StreamKind::Stdout,
        StreamKind::Stderr,
        StreamKind::Info,
        StreamKind::Success,
        StreamKind::Failure,
        StreamKind::Input,
    ];

    /// Whether consecutive writes of this kind coalesce into one record.
    /// Each submitted input stays its own record.
    pub fn is_mergeable(self) -> bool {
        !matches!(self, StreamKind::Input)
    }
}

/// One display-ready block of output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    #[serde(rename = "type")]
    pub kind: StreamKind,
    pub content: String,
}

impl OutputRecord {
    pub fn new(kind: StreamKind, content: impl Into<String>) -> Self {
        Self { kind, content: content.into() }
    }

    pub fn stdout(content: impl Into<String>) -> Self {
        Self::new(StreamKind::Stdout, content)
    }

    pub fn failure(content: impl Into<String>) -> Self {
        Self::new(StreamKind::Failure, content)
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self::new(StreamKind::Success, content)
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
