// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use jd_core::JobName;
use jd_tree::TreeError;
use thiserror::Error;

/// Errors from engine operations.
///
/// `NotFound` and `InvalidState` carry user-facing messages and are raised
/// before any mutation.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidState(String),
    /// A batch operation failed on one job
    #[error("job {job}: {source}")]
    Batch {
        job: JobName,
        #[source]
        source: Box<EngineError>,
    },
    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl EngineError {
    pub fn job_not_found(job: &str) -> Self {
        EngineError::NotFound(format!("job {} does not exist", job))
    }

    pub(crate) fn in_batch(self, job: &JobName) -> Self {
        EngineError::Batch { job: job.clone(), source: Box::new(self) }
    }

    /// True for validation failures that leave the tree untouched.
    pub fn is_validation(&self) -> bool {
        match self {
            EngineError::NotFound(_) | EngineError::InvalidState(_) => true,
            EngineError::Batch { source, .. } => source.is_validation(),
            EngineError::Tree(_) => false,
        }
    }
}
