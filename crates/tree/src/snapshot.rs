// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tree snapshot files.
//!
//! A snapshot is the complete node map of a [`MemoryTree`](crate::MemoryTree)
//! serialized as JSON. Files whose name ends in `.zst` are zstd-compressed.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::memory::Node;

/// Current snapshot schema version
pub const CURRENT_SNAPSHOT_VERSION: u32 = 1;

const ZSTD_LEVEL: i32 = 3;

/// Errors that can occur in snapshot operations
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot version {0} is newer than supported")]
    TooNew(u32),
}

/// All nodes of a tree at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    /// Schema version
    #[serde(rename = "v")]
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub nodes: BTreeMap<String, Node>,
}

fn is_compressed(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "zst")
}

impl TreeSnapshot {
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let reader = BufReader::new(File::open(path)?);
        let snapshot: TreeSnapshot = if is_compressed(path) {
            serde_json::from_reader(zstd::stream::Decoder::new(reader)?)?
        } else {
            serde_json::from_reader(reader)?
        };
        if snapshot.version > CURRENT_SNAPSHOT_VERSION {
            return Err(SnapshotError::TooNew(snapshot.version));
        }
        Ok(snapshot)
    }

    /// Write atomically: serialize to a sibling temp file, then rename over `path`.
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let tmp = path.with_extension("tmp");
        {
            let mut file = File::create(&tmp)?;
            if is_compressed(path) {
                let mut encoder = zstd::stream::Encoder::new(&mut file, ZSTD_LEVEL)?;
                serde_json::to_writer(&mut encoder, self)?;
                encoder.finish()?;
            } else {
                serde_json::to_writer_pretty(&mut file, self)?;
            }
            file.flush()?;
            file.sync_all()?;
        }
        fs::rename(&tmp, path)?;
        tracing::debug!(path = %path.display(), nodes = self.nodes.len(), "saved tree snapshot");
        Ok(())
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
