// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schedule commands

use std::io::Write;

use anyhow::Result;
use clap::Subcommand;
use jd_core::{Clock, JobName};
use jd_engine::{format_time_by_job_time_zone, next_fire_time, overdue_jobs};
use serde::Serialize;

use super::Context;
use crate::output::{format_or_json, handle_list};
use crate::table::{Column, Table};

#[derive(Subcommand)]
pub enum ScheduleCommand {
    /// Show the next fire time of a job, skipping its pause windows
    NextFire {
        /// Job name
        job: String,
        /// Epoch milliseconds to search after (default: now)
        #[arg(long)]
        after: Option<u64>,
    },
    /// List cron jobs that should have fired but are not running
    Health,
}

#[derive(Serialize)]
struct NextFireView {
    job: JobName,
    next_fire_time: Option<u64>,
    formatted: Option<String>,
}

#[derive(Serialize)]
struct OverdueView {
    job: JobName,
    next_fire_time: Option<u64>,
    formatted: Option<String>,
}

pub async fn handle(command: ScheduleCommand, ctx: &Context, out: &mut dyn Write) -> Result<()> {
    match command {
        ScheduleCommand::NextFire { job, after } => {
            let job = JobName::new(job);
            let after = after.unwrap_or_else(|| ctx.tree.clock().epoch_ms());
            let next = next_fire_time(&ctx.tree, &job, after, &ctx.engine).await?;
            let formatted = match next {
                Some(ms) => Some(format_time_by_job_time_zone(&ctx.tree, &job, ms, &ctx.engine).await?),
                None => None,
            };
            let view = NextFireView { job, next_fire_time: next, formatted };
            format_or_json(out, ctx.format, &view, |out| match &view.formatted {
                Some(time) => writeln!(out, "{}", time),
                None => writeln!(out, "No upcoming fire time for {}", view.job),
            })?;
        }
        ScheduleCommand::Health => {
            let overdue = overdue_jobs(&ctx.tree, ctx.tree.clock(), &ctx.engine).await?;
            let mut views = Vec::with_capacity(overdue.len());
            for health in overdue {
                let formatted = match health.next_fire_time {
                    Some(ms) => {
                        Some(format_time_by_job_time_zone(&ctx.tree, &health.job, ms, &ctx.engine).await?)
                    }
                    None => None,
                };
                views.push(OverdueView { job: health.job, next_fire_time: health.next_fire_time, formatted });
            }
            if !views.is_empty() {
                tracing::warn!(count = views.len(), "overdue jobs");
            }
            handle_list(out, ctx.format, &views, "All jobs on schedule", |items, out| {
                let mut table = Table::new(vec![Column::left("JOB"), Column::status("STATE"), Column::left("EXPECTED")]);
                for view in items {
                    table.row(vec![
                        view.job.to_string(),
                        "OVERDUE".to_string(),
                        view.formatted.clone().unwrap_or_default(),
                    ]);
                }
                table.render(out);
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
