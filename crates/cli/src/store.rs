// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The snapshot file a command works on.

use std::path::{Path, PathBuf};

use jd_core::SystemClock;
use jd_tree::{MemoryTree, TreeSnapshot};

use crate::exit_error::{ExitError, EXIT_FAILURE};

pub struct TreeFile {
    path: PathBuf,
}

impl TreeFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the tree. A missing file is an error: there is nothing to query.
    pub fn load(&self) -> Result<MemoryTree<SystemClock>, ExitError> {
        if !self.path.exists() {
            return Err(ExitError::new(
                EXIT_FAILURE,
                format!("tree file {} not found", self.path.display()),
            ));
        }
        let snapshot = TreeSnapshot::load(&self.path).map_err(|e| {
            ExitError::new(EXIT_FAILURE, format!("cannot load {}: {}", self.path.display(), e))
        })?;
        tracing::debug!(path = %self.path.display(), nodes = snapshot.nodes.len(), "loaded tree");
        Ok(MemoryTree::from_snapshot(snapshot, SystemClock))
    }

    pub fn save(&self, tree: &MemoryTree<SystemClock>) -> Result<(), ExitError> {
        tree.snapshot().save(&self.path).map_err(|e| {
            ExitError::new(EXIT_FAILURE, format!("cannot save {}: {}", self.path.display(), e))
        })
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
