// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed job configuration.
//!
//! Every config node is an untyped string on the tree. This module names the
//! keys, holds the default for each typed field, and parses a whole job's
//! config in one place.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::job::{JobName, JobType};
use crate::pause::PauseWindow;
use crate::prefer::PreferList;
use crate::schedule::{resolve_time_zone, CronSchedule};

/// Config node names under `<job>/config/`.
pub mod keys {
    pub const ENABLED: &str = "enabled";
    pub const ENABLED_REPORT: &str = "enabledReport";
    pub const JOB_TYPE: &str = "jobType";
    pub const JOB_CLASS: &str = "jobClass";
    pub const JOB_MODE: &str = "jobMode";
    pub const CRON: &str = "cron";
    pub const TIME_ZONE: &str = "timeZone";
    pub const PAUSE_PERIOD_DATE: &str = "pausePeriodDate";
    pub const PAUSE_PERIOD_TIME: &str = "pausePeriodTime";
    pub const SHARDING_TOTAL_COUNT: &str = "shardingTotalCount";
    pub const SHARDING_ITEM_PARAMETERS: &str = "shardingItemParameters";
    pub const JOB_PARAMETER: &str = "jobParameter";
    pub const DEPENDENCIES: &str = "dependencies";
    pub const GROUPS: &str = "groups";
    pub const DESCRIPTION: &str = "description";
    pub const QUEUE_NAME: &str = "queueName";
    pub const CHANNEL_NAME: &str = "channelName";
    pub const PREFER_LIST: &str = "preferList";
    pub const USE_DISPREFER_LIST: &str = "useDispreferList";
    pub const LOAD_LEVEL: &str = "loadLevel";
    pub const JOB_DEGREE: &str = "jobDegree";
    pub const TIMEOUT_4_ALARM_SECONDS: &str = "timeout4AlarmSeconds";
    pub const TIMEOUT_SECONDS: &str = "timeoutSeconds";
    pub const PROCESS_COUNT_INTERVAL_SECONDS: &str = "processCountIntervalSeconds";
    pub const SHOW_NORMAL_LOG: &str = "showNormalLog";
    pub const LOCAL_MODE: &str = "localMode";
    pub const USE_SERIAL: &str = "useSerial";
    pub const FAILOVER: &str = "failover";
    pub const FORCE_SHARD: &str = "forceShard";

    /// Every key read into a [`super::JobConfig`].
    pub const ALL: &[&str] = &[
        ENABLED,
        ENABLED_REPORT,
        JOB_TYPE,
        JOB_CLASS,
        JOB_MODE,
        CRON,
        TIME_ZONE,
        PAUSE_PERIOD_DATE,
        PAUSE_PERIOD_TIME,
        SHARDING_TOTAL_COUNT,
        SHARDING_ITEM_PARAMETERS,
        JOB_PARAMETER,
        DEPENDENCIES,
        GROUPS,
        DESCRIPTION,
        QUEUE_NAME,
        CHANNEL_NAME,
        PREFER_LIST,
        USE_DISPREFER_LIST,
        LOAD_LEVEL,
        JOB_DEGREE,
        TIMEOUT_4_ALARM_SECONDS,
        TIMEOUT_SECONDS,
        PROCESS_COUNT_INTERVAL_SECONDS,
        SHOW_NORMAL_LOG,
        LOCAL_MODE,
        USE_SERIAL,
        FAILOVER,
    ];

    /// Keys read into a [`super::ScheduleConfig`]. None of them is numeric.
    pub const SCHEDULE: &[&str] = &[
        ENABLED,
        ENABLED_REPORT,
        JOB_TYPE,
        JOB_CLASS,
        CRON,
        TIME_ZONE,
        PAUSE_PERIOD_DATE,
        PAUSE_PERIOD_TIME,
    ];
}

/// Defaults for missing or empty config nodes.
pub mod defaults {
    pub const TIME_ZONE: &str = "Asia/Shanghai";
    pub const LOAD_LEVEL: i32 = 1;
    pub const JOB_DEGREE: i32 = 0;
    pub const TIMEOUT_4_ALARM_SECONDS: i32 = 0;
    pub const TIMEOUT_SECONDS: i32 = 0;
    pub const PROCESS_COUNT_INTERVAL_SECONDS: i32 = 300;
    pub const SHARDING_TOTAL_COUNT: u32 = 1;
}

/// `jobMode` prefix of jobs owned by the platform itself.
pub const SYSTEM_MODE_PREFIX: &str = "system";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Lenient boolean: only a case-insensitive `true` is true.
pub fn parse_flag(raw: Option<&str>) -> bool {
    raw.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|v| !v.trim().is_empty())
}

fn parse_number<N: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: N,
) -> Result<N, ConfigError> {
    match non_empty(raw) {
        None => Ok(default),
        Some(v) => v.trim().parse().map_err(|_| ConfigError::InvalidValue { key, value: v }),
    }
}

/// Split a comma-separated job list, dropping blanks.
pub fn split_names(raw: &str) -> Vec<JobName> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(JobName::new).collect()
}

/// The part of a job's configuration that drives firing and reporting.
///
/// Unlike [`JobConfig`] this never fails: a job with garbage in an unrelated
/// numeric field still has a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub job_type: JobType,
    pub enabled: bool,
    /// Resolved: unset means on for cron-driven job types only
    pub enabled_report: bool,
    pub cron: Option<String>,
    pub time_zone: String,
    pub pause_period_date: Option<String>,
    pub pause_period_time: Option<String>,
}

impl ScheduleConfig {
    pub fn from_raw(lookup: impl Fn(&str) -> Option<String>, default_time_zone: &str) -> Self {
        let job_class = non_empty(lookup(keys::JOB_CLASS));
        let job_type = JobType::infer(lookup(keys::JOB_TYPE).as_deref(), job_class.as_deref());
        let enabled_report = match non_empty(lookup(keys::ENABLED_REPORT)) {
            Some(v) => parse_flag(Some(&v)),
            None => job_type.is_cron_driven(),
        };
        Self {
            job_type,
            enabled: parse_flag(lookup(keys::ENABLED).as_deref()),
            enabled_report,
            cron: non_empty(lookup(keys::CRON)).map(|c| c.trim().to_string()),
            time_zone: non_empty(lookup(keys::TIME_ZONE))
                .map(|tz| tz.trim().to_string())
                .unwrap_or_else(|| default_time_zone.to_string()),
            pause_period_date: non_empty(lookup(keys::PAUSE_PERIOD_DATE)),
            pause_period_time: non_empty(lookup(keys::PAUSE_PERIOD_TIME)),
        }
    }

    pub fn pause_window(&self) -> PauseWindow {
        PauseWindow::parse(self.pause_period_date.as_deref(), self.pause_period_time.as_deref())
    }

    /// The cron bound to the job's time zone; `None` without a valid cron.
    pub fn schedule(&self) -> Option<CronSchedule> {
        CronSchedule::parse(self.cron.as_deref()?, resolve_time_zone(&self.time_zone))
    }

    /// Next fire strictly after `after_ms` outside the pause window.
    pub fn next_fire_time(&self, after_ms: u64) -> Option<u64> {
        self.schedule()?.next_fire_time_excluding(after_ms, &self.pause_window())
    }
}

/// A job's configuration with every typed field resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobConfig {
    pub name: JobName,
    pub job_type: JobType,
    pub job_class: Option<String>,
    pub job_mode: Option<String>,
    pub enabled: bool,
    /// Resolved: unset means on for cron-driven job types only
    pub enabled_report: bool,
    pub cron: Option<String>,
    pub time_zone: String,
    pub pause_period_date: Option<String>,
    pub pause_period_time: Option<String>,
    pub sharding_total_count: u32,
    pub sharding_item_parameters: Option<String>,
    pub job_parameter: Option<String>,
    pub dependencies: Vec<JobName>,
    pub groups: Option<String>,
    pub description: Option<String>,
    pub queue_name: Option<String>,
    pub channel_name: Option<String>,
    /// `None` when the job has no preferred list node or it holds no value
    pub prefer_list: Option<PreferList>,
    pub use_disprefer_list: Option<bool>,
    pub load_level: i32,
    pub job_degree: i32,
    pub timeout_4_alarm_seconds: i32,
    pub timeout_seconds: i32,
    pub process_count_interval_seconds: i32,
    pub show_normal_log: bool,
    pub local_mode: bool,
    pub use_serial: bool,
    pub failover: Option<bool>,
}

impl JobConfig {
    /// Build from raw node values; `lookup` returns a key's value, if any.
    pub fn from_raw(
        name: JobName,
        lookup: impl Fn(&str) -> Option<String>,
        default_time_zone: &str,
    ) -> Result<Self, ConfigError> {
        let opt_flag = |key: &str| non_empty(lookup(key)).map(|v| parse_flag(Some(&v)));
        let ScheduleConfig {
            job_type,
            enabled,
            enabled_report,
            cron,
            time_zone,
            pause_period_date,
            pause_period_time,
        } = ScheduleConfig::from_raw(&lookup, default_time_zone);

        Ok(Self {
            job_type,
            job_class: non_empty(lookup(keys::JOB_CLASS)),
            job_mode: non_empty(lookup(keys::JOB_MODE)),
            enabled,
            enabled_report,
            cron,
            time_zone,
            pause_period_date,
            pause_period_time,
            sharding_total_count: parse_number(
                keys::SHARDING_TOTAL_COUNT,
                lookup(keys::SHARDING_TOTAL_COUNT),
                defaults::SHARDING_TOTAL_COUNT,
            )?,
            sharding_item_parameters: non_empty(lookup(keys::SHARDING_ITEM_PARAMETERS)),
            job_parameter: non_empty(lookup(keys::JOB_PARAMETER)),
            dependencies: lookup(keys::DEPENDENCIES).as_deref().map(split_names).unwrap_or_default(),
            groups: non_empty(lookup(keys::GROUPS)),
            description: non_empty(lookup(keys::DESCRIPTION)),
            queue_name: non_empty(lookup(keys::QUEUE_NAME)),
            channel_name: non_empty(lookup(keys::CHANNEL_NAME)),
            prefer_list: lookup(keys::PREFER_LIST).as_deref().map(PreferList::parse),
            use_disprefer_list: opt_flag(keys::USE_DISPREFER_LIST),
            load_level: parse_number(
                keys::LOAD_LEVEL,
                lookup(keys::LOAD_LEVEL),
                defaults::LOAD_LEVEL,
            )?,
            job_degree: parse_number(
                keys::JOB_DEGREE,
                lookup(keys::JOB_DEGREE),
                defaults::JOB_DEGREE,
            )?,
            timeout_4_alarm_seconds: parse_number(
                keys::TIMEOUT_4_ALARM_SECONDS,
                lookup(keys::TIMEOUT_4_ALARM_SECONDS),
                defaults::TIMEOUT_4_ALARM_SECONDS,
            )?,
            timeout_seconds: parse_number(
                keys::TIMEOUT_SECONDS,
                lookup(keys::TIMEOUT_SECONDS),
                defaults::TIMEOUT_SECONDS,
            )?,
            process_count_interval_seconds: parse_number(
                keys::PROCESS_COUNT_INTERVAL_SECONDS,
                lookup(keys::PROCESS_COUNT_INTERVAL_SECONDS),
                defaults::PROCESS_COUNT_INTERVAL_SECONDS,
            )?,
            show_normal_log: parse_flag(lookup(keys::SHOW_NORMAL_LOG).as_deref()),
            local_mode: parse_flag(lookup(keys::LOCAL_MODE).as_deref()),
            use_serial: parse_flag(lookup(keys::USE_SERIAL).as_deref()),
            failover: opt_flag(keys::FAILOVER),
            name,
        })
    }

    pub fn is_system(&self) -> bool {
        self.job_mode.as_deref().is_some_and(|m| m.starts_with(SYSTEM_MODE_PREFIX))
    }
}

/// A partial settings update; `None` fields are left untouched on the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSettingsUpdate {
    pub job_mode: Option<String>,
    pub sharding_total_count: Option<u32>,
    pub load_level: Option<i32>,
    pub job_degree: Option<i32>,
    pub enabled_report: Option<bool>,
    pub time_zone: Option<String>,
    pub cron: Option<String>,
    pub pause_period_date: Option<String>,
    pub pause_period_time: Option<String>,
    pub sharding_item_parameters: Option<String>,
    pub job_parameter: Option<String>,
    pub process_count_interval_seconds: Option<i32>,
    pub timeout_4_alarm_seconds: Option<i32>,
    pub timeout_seconds: Option<i32>,
    pub dependencies: Option<String>,
    pub groups: Option<String>,
    pub description: Option<String>,
    pub channel_name: Option<String>,
    pub queue_name: Option<String>,
    pub show_normal_log: Option<bool>,
    pub prefer_list: Option<String>,
    pub use_disprefer_list: Option<bool>,
    pub failover: Option<bool>,
    pub local_mode: Option<bool>,
    pub use_serial: Option<bool>,
}

impl JobSettingsUpdate {
    crate::setters! {
        option {
            job_mode: String,
            sharding_total_count: u32,
            load_level: i32,
            job_degree: i32,
            enabled_report: bool,
            time_zone: String,
            cron: String,
            pause_period_date: String,
            pause_period_time: String,
            sharding_item_parameters: String,
            job_parameter: String,
            process_count_interval_seconds: i32,
            timeout_4_alarm_seconds: i32,
            timeout_seconds: i32,
            dependencies: String,
            groups: String,
            description: String,
            channel_name: String,
            queue_name: String,
            show_normal_log: bool,
            prefer_list: String,
            use_disprefer_list: bool,
            failover: bool,
            local_mode: bool,
            use_serial: bool,
        }
    }

    /// `(key, value)` for every supplied field, in write order.
    ///
    /// Time zone, cron, channel and queue names are trimmed on the way out.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        fn trimmed(v: &Option<String>) -> Option<String> {
            v.as_ref().map(|s| s.trim().to_string())
        }
        fn shown<T: ToString>(v: &Option<T>) -> Option<String> {
            v.as_ref().map(ToString::to_string)
        }
        [
            (keys::JOB_MODE, self.job_mode.clone()),
            (keys::SHARDING_TOTAL_COUNT, shown(&self.sharding_total_count)),
            (keys::LOAD_LEVEL, shown(&self.load_level)),
            (keys::JOB_DEGREE, shown(&self.job_degree)),
            (keys::ENABLED_REPORT, shown(&self.enabled_report)),
            (keys::TIME_ZONE, trimmed(&self.time_zone)),
            (keys::CRON, trimmed(&self.cron)),
            (keys::PAUSE_PERIOD_DATE, self.pause_period_date.clone()),
            (keys::PAUSE_PERIOD_TIME, self.pause_period_time.clone()),
            (keys::SHARDING_ITEM_PARAMETERS, self.sharding_item_parameters.clone()),
            (keys::JOB_PARAMETER, self.job_parameter.clone()),
            (keys::PROCESS_COUNT_INTERVAL_SECONDS, shown(&self.process_count_interval_seconds)),
            (keys::TIMEOUT_4_ALARM_SECONDS, shown(&self.timeout_4_alarm_seconds)),
            (keys::TIMEOUT_SECONDS, shown(&self.timeout_seconds)),
            (keys::DEPENDENCIES, self.dependencies.clone()),
            (keys::GROUPS, self.groups.clone()),
            (keys::DESCRIPTION, self.description.clone()),
            (keys::CHANNEL_NAME, trimmed(&self.channel_name)),
            (keys::QUEUE_NAME, trimmed(&self.queue_name)),
            (keys::SHOW_NORMAL_LOG, shown(&self.show_normal_log)),
            (keys::PREFER_LIST, self.prefer_list.clone()),
            (keys::USE_DISPREFER_LIST, shown(&self.use_disprefer_list)),
            (keys::FAILOVER, shown(&self.failover)),
            (keys::LOCAL_MODE, shown(&self.local_mode)),
            (keys::USE_SERIAL, shown(&self.use_serial)),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
    }

    /// True when the update switches execution reporting off.
    pub fn disables_report(&self) -> bool {
        self.enabled_report == Some(false)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
