// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Custom error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! directly, allowing `main()` to handle process termination.

use std::fmt;

pub mod codes {
    /// The program raised, or a command failed.
    pub const FAILED: i32 = 1;
    /// The run was turned away before the program started.
    pub const REJECTED: i32 = 2;
    /// An AI or memory service request failed.
    pub const SERVICE: i32 = 3;
}

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    /// Printed to stderr by `main`; empty when the command already reported.
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    /// Exit with `code` without printing anything further.
    pub fn silent(code: i32) -> Self {
        Self::new(code, "")
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}
