// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job settings command handlers

use std::io::Write;

use anyhow::Result;
use clap::{Args, Subcommand};
use jd_core::{JobConfig, JobName, JobSettingsUpdate};
use jd_engine::{get_job_settings, update_job_settings};
use serde::Serialize;

use super::Context;
use crate::exit_error::{ExitError, EXIT_REJECTED};
use crate::output::{format_or_json, or_dash};

#[derive(Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommand,
}

#[derive(Subcommand)]
pub enum SettingsCommand {
    /// Show a job's resolved settings
    Show {
        /// Job name
        job: String,
    },
    /// Update selected settings in one transaction
    Update {
        /// Job name
        job: String,
        #[command(flatten)]
        fields: UpdateFields,
    },
}

#[derive(Args, Default)]
pub struct UpdateFields {
    /// Cron expression (seconds first)
    #[arg(long)]
    pub cron: Option<String>,
    /// IANA time zone id
    #[arg(long)]
    pub time_zone: Option<String>,
    /// Paused date ranges, e.g. `12/24-12/26,1/1-1/1`
    #[arg(long)]
    pub pause_date: Option<String>,
    /// Paused time ranges, e.g. `1:00-3:30`
    #[arg(long)]
    pub pause_time: Option<String>,
    /// Preferred executors; `@task` pins a container task
    #[arg(long)]
    pub prefer_list: Option<String>,
    /// Switch execution reporting on or off (off clears execution state)
    #[arg(long)]
    pub enabled_report: Option<bool>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub load_level: Option<i32>,
    #[arg(long)]
    pub job_degree: Option<i32>,
}

impl UpdateFields {
    fn into_update(self) -> JobSettingsUpdate {
        JobSettingsUpdate {
            cron: self.cron,
            time_zone: self.time_zone,
            pause_period_date: self.pause_date,
            pause_period_time: self.pause_time,
            prefer_list: self.prefer_list,
            enabled_report: self.enabled_report,
            description: self.description,
            load_level: self.load_level,
            job_degree: self.job_degree,
            ..JobSettingsUpdate::default()
        }
    }
}

#[derive(Serialize)]
struct UpdateView {
    job: JobName,
    changed: bool,
}

pub async fn handle(command: SettingsCommand, ctx: &Context, out: &mut dyn Write) -> Result<()> {
    match command {
        SettingsCommand::Show { job } => {
            let settings = get_job_settings(&ctx.tree, &JobName::new(job), &ctx.engine).await?;
            format_or_json(out, ctx.format, &settings, |out| write_settings(out, &settings))?;
        }
        SettingsCommand::Update { job, fields } => {
            let job = JobName::new(job);
            let update = fields.into_update();
            if update == JobSettingsUpdate::default() {
                return Err(ExitError::new(EXIT_REJECTED, "nothing to update").into());
            }
            let changed = update_job_settings(&ctx.tree, &job, &update).await?;
            ctx.save()?;
            let view = UpdateView { job, changed };
            format_or_json(out, ctx.format, &view, |out| {
                if view.changed {
                    writeln!(out, "Updated settings of {}", view.job)
                } else {
                    writeln!(out, "No changes to {}", view.job)
                }
            })?;
        }
    }
    Ok(())
}

fn write_settings(out: &mut dyn Write, s: &JobConfig) -> std::io::Result<()> {
    let prefer = s.prefer_list.as_ref().map(ToString::to_string);
    let dependencies: Vec<String> = s.dependencies.iter().map(ToString::to_string).collect();
    let dependencies = dependencies.join(",");
    let rows: [(&str, String); 14] = [
        ("job", s.name.to_string()),
        ("type", s.job_type.to_string()),
        ("enabled", s.enabled.to_string()),
        ("report", s.enabled_report.to_string()),
        ("cron", or_dash(s.cron.as_deref()).to_string()),
        ("time zone", s.time_zone.clone()),
        ("pause dates", or_dash(s.pause_period_date.as_deref()).to_string()),
        ("pause times", or_dash(s.pause_period_time.as_deref()).to_string()),
        ("shards", s.sharding_total_count.to_string()),
        ("prefer list", or_dash(prefer.as_deref()).to_string()),
        ("dependencies", or_dash(Some(dependencies.as_str())).to_string()),
        ("groups", or_dash(s.groups.as_deref()).to_string()),
        ("load level", s.load_level.to_string()),
        ("description", or_dash(s.description.as_deref()).to_string()),
    ];
    for (key, value) in rows {
        writeln!(out, "{:<13} {}", format!("{}:", key), value)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
