// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::path::PathBuf;
use std::time::Duration;

/// Default log filter when `JD_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Config file next to the working directory, used when `JD_CONFIG` is unset
pub const LOCAL_CONFIG_FILE: &str = "jd.toml";

/// Log filter directives: `JD_LOG` > `warn`
pub fn log_filter() -> String {
    std::env::var("JD_LOG")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Resolve the config file: `JD_CONFIG` > `./jd.toml` if present
pub fn config_file() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("JD_CONFIG") {
        return Some(PathBuf::from(path));
    }
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    local.exists().then_some(local)
}

/// Tree snapshot file override
pub fn tree_file() -> Option<PathBuf> {
    std::env::var("JD_TREE_FILE").ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}

/// Time zone for jobs without a `timeZone` node
pub fn default_time_zone() -> Option<String> {
    std::env::var("JD_DEFAULT_TIME_ZONE")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Wait between touching a job's report marker and reading execution state
pub fn refresh_wait() -> Option<Duration> {
    std::env::var("JD_REFRESH_WAIT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}
