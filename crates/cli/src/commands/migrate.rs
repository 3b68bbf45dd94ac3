// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Container task migration command handlers

use std::io::Write;

use anyhow::Result;
use clap::{Args, Subcommand};
use jd_core::config::split_names;
use jd_core::{JobName, TaskId};
use jd_engine::{available_migration_targets, batch_migrate_task, migrate_task};
use serde::Serialize;

use super::Context;
use crate::output::{format_or_json, handle_list};
use crate::table::{Column, Table};

#[derive(Args)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub command: MigrateCommand,
}

#[derive(Subcommand)]
pub enum MigrateCommand {
    /// Show the container tasks a job uses and the ones it could move to
    Targets {
        /// Job name
        job: String,
    },
    /// Move a job's container task references to another task
    Run {
        /// Job name
        job: String,
        /// Target container task
        task: String,
    },
    /// Move several jobs at once; every job is validated before any write
    Batch {
        /// Comma-separated job names
        jobs: String,
        /// Target container task
        task: String,
    },
}

#[derive(Serialize)]
struct Migrated {
    job: JobName,
    prefer_list: String,
}

pub async fn handle(command: MigrateCommand, ctx: &Context, out: &mut dyn Write) -> Result<()> {
    match command {
        MigrateCommand::Targets { job } => {
            let targets = available_migration_targets(&ctx.tree, &JobName::new(job)).await?;
            format_or_json(out, ctx.format, &targets, |out| {
                writeln!(out, "current:    {}", join_tasks(&targets.current))?;
                writeln!(out, "migratable: {}", join_tasks(&targets.migratable))
            })?;
        }
        MigrateCommand::Run { job, task } => {
            let job = JobName::new(job);
            let prefer = migrate_task(&ctx.tree, &job, &TaskId::new(task)).await?;
            ctx.save()?;
            let migrated = [Migrated { job, prefer_list: prefer.to_string() }];
            render(out, ctx, &migrated)?;
        }
        MigrateCommand::Batch { jobs, task } => {
            let jobs = split_names(&jobs);
            let result = batch_migrate_task(&ctx.tree, &jobs, &TaskId::new(task)).await;
            // Jobs migrated before a failing one stay migrated
            ctx.save()?;
            let migrated: Vec<Migrated> = jobs
                .into_iter()
                .zip(result?)
                .map(|(job, prefer)| Migrated { job, prefer_list: prefer.to_string() })
                .collect();
            render(out, ctx, &migrated)?;
        }
    }
    Ok(())
}

fn render(out: &mut dyn Write, ctx: &Context, migrated: &[Migrated]) -> Result<()> {
    handle_list(out, ctx.format, migrated, "Nothing migrated", |items, out| {
        let mut table = Table::new(vec![Column::left("JOB"), Column::left("PREFER LIST")]);
        for item in items {
            table.row(vec![item.job.to_string(), item.prefer_list.clone()]);
        }
        table.render(out);
    })
}

fn join_tasks(tasks: &[TaskId]) -> String {
    if tasks.is_empty() {
        return "-".to_string();
    }
    tasks.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
#[path = "migrate_tests.rs"]
mod tests;
