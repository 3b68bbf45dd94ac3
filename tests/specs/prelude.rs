//! Shared imports and tree builders for specs.

pub use jd_core::{
    compare_version, ExecutionStatus, FakeClock, JobName, JobStatus, PauseWindow, TaskId,
};
pub use jd_engine::EngineConfig;
pub use jd_tree::test_support::{container_task, executor, job, server, shard, EXECUTOR_SESSION};
pub use jd_tree::{MemoryTree, TreeAccessor};
pub use similar_asserts::assert_eq;

/// 2026-03-01 00:00:00 UTC
pub const MARCH_1: u64 = 1_772_323_200_000;
pub const MINUTE: u64 = 60_000;
pub const HOUR: u64 = 60 * MINUTE;

/// An empty tree whose clock reads `epoch_ms`.
pub fn tree_at(epoch_ms: u64) -> MemoryTree<FakeClock> {
    MemoryTree::with_clock(FakeClock::at(epoch_ms))
}

/// Engine settings with UTC as the default zone and no report wait.
pub fn utc() -> EngineConfig {
    EngineConfig::default()
        .default_time_zone("UTC")
        .report_refresh_wait(std::time::Duration::ZERO)
}

pub fn name(s: &str) -> JobName {
    JobName::new(s)
}
