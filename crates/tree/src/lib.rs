// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jd-tree: Coordination tree access
//!
//! [`TreeAccessor`] is the only way the engine touches shared state. The
//! crate also carries the path grammar, typed reads, and [`MemoryTree`], an
//! in-memory implementation backed by snapshot files.

mod accessor;
mod memory;
pub mod paths;
pub mod read;
mod snapshot;
mod transaction;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use accessor::{TreeAccessor, TreeError};
pub use memory::{MemoryTree, Node};
pub use read::{read_job_config, read_schedule_config};
pub use snapshot::{SnapshotError, TreeSnapshot, CURRENT_SNAPSHOT_VERSION};
pub use transaction::{Transaction, TreeValue, TxnOp};
