// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI configuration.
//!
//! Resolution order, lowest first: built-in defaults, the TOML config file,
//! environment variables, command-line flags.
//!
//! ```toml
//! tree_file = "tree.json.zst"
//! default_time_zone = "Asia/Shanghai"
//! refresh_wait_ms = 500
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use jd_engine::EngineConfig;
use serde::Deserialize;

use crate::env;

/// Tree file used when nothing else names one
pub const DEFAULT_TREE_FILE: &str = "tree.json";

/// Contents of the TOML config file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub tree_file: Option<PathBuf>,
    pub default_time_zone: Option<String>,
    pub refresh_wait_ms: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("invalid config file {}", path.display()))
    }
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub tree_file: PathBuf,
    pub engine: EngineConfig,
}

impl Settings {
    /// Layer the config file and environment over the defaults, then apply
    /// the `--tree` flag.
    pub fn resolve(tree_flag: Option<PathBuf>) -> anyhow::Result<Self> {
        let file = match env::config_file() {
            Some(path) => FileConfig::load(&path)?,
            None => FileConfig::default(),
        };
        Ok(Self::layered(file, tree_flag))
    }

    fn layered(file: FileConfig, tree_flag: Option<PathBuf>) -> Self {
        let mut engine = EngineConfig::default();
        if let Some(tz) = env::default_time_zone().or(file.default_time_zone) {
            engine = engine.default_time_zone(tz);
        }
        if let Some(wait) = env::refresh_wait().or(file.refresh_wait_ms.map(Duration::from_millis)) {
            engine = engine.report_refresh_wait(wait);
        }
        let tree_file = tree_flag
            .or_else(env::tree_file)
            .or(file.tree_file)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TREE_FILE));
        tracing::debug!(tree_file = %tree_file.display(), ?engine, "resolved settings");
        Self { tree_file, engine }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
