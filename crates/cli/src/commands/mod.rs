// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod fleet;
pub mod job;
pub mod migrate;
pub mod schedule;
pub mod settings;

use jd_core::{JobName, SystemClock};
use jd_engine::{EngineConfig, EngineError};
use jd_tree::read::job_exists;
use jd_tree::MemoryTree;

use crate::exit_error::ExitError;
use crate::output::OutputFormat;
use crate::store::TreeFile;

/// Everything a command needs: the loaded tree and how to present results.
pub struct Context {
    pub tree: MemoryTree<SystemClock>,
    pub file: TreeFile,
    pub engine: EngineConfig,
    pub format: OutputFormat,
}

impl Context {
    pub fn open(file: TreeFile, engine: EngineConfig, format: OutputFormat) -> Result<Self, ExitError> {
        let tree = file.load()?;
        Ok(Self { tree, file, engine, format })
    }

    /// Write the tree back to its snapshot file.
    pub fn save(&self) -> Result<(), ExitError> {
        self.file.save(&self.tree)
    }

    pub async fn require_job(&self, job: &JobName) -> Result<(), EngineError> {
        if job_exists(&self.tree, job.as_str()).await? {
            Ok(())
        } else {
            Err(EngineError::job_not_found(job.as_str()))
        }
    }
}
