// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jd_tree::TreeError;

#[test]
fn validation_failures_are_rejections() {
    let err = anyhow::Error::from(EngineError::job_not_found("ghost"));
    assert_eq!(exit_code(&err), EXIT_REJECTED);
    assert_eq!(err.to_string(), "job ghost does not exist");
}

#[test]
fn tree_failures_are_failures() {
    let err = anyhow::Error::from(EngineError::Tree(TreeError::Unavailable("/$Jobs".into())));
    assert_eq!(exit_code(&err), EXIT_FAILURE);
}

#[test]
fn explicit_exit_codes_are_kept() {
    let err = anyhow::Error::from(ExitError::new(EXIT_REJECTED, "nothing to update"));
    assert_eq!(exit_code(&err), EXIT_REJECTED);
}

#[test]
fn anything_else_is_a_failure() {
    assert_eq!(exit_code(&anyhow::anyhow!("boom")), EXIT_FAILURE);
}
