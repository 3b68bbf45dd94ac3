// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job inspection commands

use std::io::Write;

use anyhow::Result;
use clap::Subcommand;
use jd_core::{format_elapsed, format_rate, JobName};
use jd_engine::{
    depended_jobs, dependent_jobs, derive_job_status, execution_log, executor_candidates,
    job_overviews, job_servers, list_execution_info, DependencyStatus, ExecutorCandidate,
};
use serde::Serialize;

use super::Context;
use crate::output::{format_or_json, handle_list, or_dash};
use crate::table::{Column, Table};

#[derive(Subcommand)]
pub enum JobCommand {
    /// List every job with its status and schedule
    Jobs,
    /// Show the derived status of a job
    Status {
        /// Job name
        job: String,
    },
    /// Show execution detail of every assigned shard (touches the report marker)
    Executions {
        /// Job name
        job: String,
    },
    /// Print the log a shard's last run left behind
    Log {
        /// Job name
        job: String,
        /// Sharding item
        item: u32,
    },
    /// List the executors serving a job
    Servers {
        /// Job name
        job: String,
    },
    /// Show the jobs a job depends on and the jobs depending on it
    Deps {
        /// Job name
        job: String,
    },
    /// List executors and container tasks a job could be pinned to
    Candidates {
        /// Job name
        job: String,
    },
}

#[derive(Serialize)]
struct StatusView<'a> {
    job: &'a JobName,
    status: jd_core::JobStatus,
}

#[derive(Serialize)]
struct DepsView {
    job: JobName,
    depends_on: Vec<DependencyStatus>,
    depended_by: Vec<DependencyStatus>,
}

pub async fn handle(command: JobCommand, ctx: &Context, out: &mut dyn Write) -> Result<()> {
    match command {
        JobCommand::Jobs => {
            let jobs = job_overviews(&ctx.tree, &ctx.engine).await?;
            handle_list(out, ctx.format, &jobs, "No jobs found", |items, out| {
                let mut table = Table::new(vec![
                    Column::left("JOB"),
                    Column::left("TYPE"),
                    Column::status("STATUS"),
                    Column::left("CRON"),
                    Column::left("SHARDS"),
                    Column::muted("GROUPS"),
                    Column::left("RATE"),
                ]);
                for job in items {
                    table.row(vec![
                        job.job.to_string(),
                        job.job_type.to_string(),
                        job.status.to_string(),
                        or_dash(job.cron.as_deref()).to_string(),
                        job.sharding_total_count.to_string(),
                        or_dash(job.groups.as_deref()).to_string(),
                        job.success_rate.map(format_rate).unwrap_or_else(|| "-".to_string()),
                    ]);
                }
                table.render(out);
            })?;
        }
        JobCommand::Status { job } => {
            let job = JobName::new(job);
            ctx.require_job(&job).await?;
            let status = derive_job_status(&ctx.tree, &job).await?;
            let view = StatusView { job: &job, status };
            format_or_json(out, ctx.format, &view, |out| writeln!(out, "{}", status))?;
        }
        JobCommand::Executions { job } => {
            let job = JobName::new(job);
            ctx.require_job(&job).await?;
            let infos = list_execution_info(&ctx.tree, &job, ctx.tree.clock(), &ctx.engine).await?;
            handle_list(out, ctx.format, &infos, "No running shards", |items, out| {
                let mut table = Table::new(vec![
                    Column::left("ITEM"),
                    Column::status("STATUS"),
                    Column::left("EXECUTOR"),
                    Column::left("BEGIN"),
                    Column::left("COMPLETE"),
                    Column::left("NEXT FIRE"),
                    Column::left("ELAPSED"),
                    Column::muted("MESSAGE").with_max(40),
                ]);
                for info in items {
                    table.row(vec![
                        info.item.to_string(),
                        info.status.to_string(),
                        info.running_executor.as_ref().map(ToString::to_string).unwrap_or_default(),
                        or_dash(info.last_begin_time.as_deref()).to_string(),
                        or_dash(info.last_complete_time.as_deref()).to_string(),
                        or_dash(info.next_fire_time.as_deref()).to_string(),
                        info.elapsed_secs.map(format_elapsed).unwrap_or_else(|| "-".to_string()),
                        or_dash(info.job_msg.as_deref()).to_string(),
                    ]);
                }
                table.render(out);
            })?;
        }
        JobCommand::Log { job, item } => {
            let job = JobName::new(job);
            ctx.require_job(&job).await?;
            let log = execution_log(&ctx.tree, &job, item).await?;
            format_or_json(out, ctx.format, &log, |out| match &log {
                Some(text) => writeln!(out, "{}", text),
                None => writeln!(out, "No log for {} item {}", job, item),
            })?;
        }
        JobCommand::Servers { job } => {
            let job = JobName::new(job);
            ctx.require_job(&job).await?;
            let servers = job_servers(&ctx.tree, &job).await?;
            handle_list(out, ctx.format, &servers, "No servers", |items, out| {
                let mut table = Table::new(vec![
                    Column::left("EXECUTOR"),
                    Column::left("IP"),
                    Column::left("VERSION"),
                    Column::status("STATE"),
                    Column::left("SHARDING"),
                    Column::left("SUCCESS"),
                    Column::left("FAILURE"),
                    Column::left("LEADER"),
                ]);
                for server in items {
                    table.row(vec![
                        server.executor.to_string(),
                        or_dash(server.ip.as_deref()).to_string(),
                        or_dash(server.version.as_deref()).to_string(),
                        if server.online { "ONLINE" } else { "OFFLINE" }.to_string(),
                        or_dash(server.sharding.as_deref()).to_string(),
                        server.process_success_count.to_string(),
                        server.process_failure_count.to_string(),
                        if server.leader { "*" } else { "" }.to_string(),
                    ]);
                }
                table.render(out);
            })?;
        }
        JobCommand::Deps { job } => {
            let job = JobName::new(job);
            ctx.require_job(&job).await?;
            let view = DepsView {
                depends_on: dependent_jobs(&ctx.tree, &job).await?,
                depended_by: depended_jobs(&ctx.tree, &job).await?,
                job,
            };
            format_or_json(out, ctx.format, &view, |out| {
                write_deps(out, "Depends on", &view.depends_on)?;
                write_deps(out, "Depended on by", &view.depended_by)
            })?;
        }
        JobCommand::Candidates { job } => {
            let job = JobName::new(job);
            ctx.require_job(&job).await?;
            let candidates = executor_candidates(&ctx.tree, &job).await?;
            handle_list(out, ctx.format, &candidates, "No executors registered", |items, out| {
                let mut table =
                    Table::new(vec![Column::status("KIND"), Column::left("NAME"), Column::left("IP")]);
                for candidate in items {
                    table.row(candidate_cells(candidate));
                }
                table.render(out);
            })?;
        }
    }
    Ok(())
}

fn write_deps(out: &mut dyn Write, title: &str, deps: &[DependencyStatus]) -> std::io::Result<()> {
    writeln!(out, "{}:", title)?;
    if deps.is_empty() {
        return writeln!(out, "  (none)");
    }
    for dep in deps {
        let state = if dep.enabled { "enabled" } else { "disabled" };
        writeln!(out, "  {} ({})", dep.job, state)?;
    }
    Ok(())
}

fn candidate_cells(candidate: &ExecutorCandidate) -> Vec<String> {
    match candidate {
        ExecutorCandidate::Online { executor, ip } => {
            vec!["ONLINE".into(), executor.to_string(), ip.clone()]
        }
        ExecutorCandidate::ContainerTask { task } => {
            vec!["CONTAINER".into(), task.to_string(), "-".into()]
        }
        ExecutorCandidate::Offline { executor } => {
            vec!["OFFLINE".into(), executor.to_string(), "-".into()]
        }
        ExecutorCandidate::Deleted { executor } => {
            vec!["DELETED".into(), executor.to_string(), "-".into()]
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
