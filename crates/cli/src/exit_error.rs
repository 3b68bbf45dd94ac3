// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! directly, so `main()` owns process termination.

use std::fmt;

use jd_engine::EngineError;

/// Exit code for rejected requests: unknown jobs, failed preconditions.
pub const EXIT_REJECTED: i32 = 1;

/// Exit code for failures reading or writing the tree.
pub const EXIT_FAILURE: i32 = 2;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

/// Exit code for an error surfacing from a command.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(exit) = err.downcast_ref::<ExitError>() {
        return exit.code;
    }
    match err.downcast_ref::<EngineError>() {
        Some(engine) if engine.is_validation() => EXIT_REJECTED,
        _ => EXIT_FAILURE,
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

#[cfg(test)]
#[path = "exit_error_tests.rs"]
mod tests;
