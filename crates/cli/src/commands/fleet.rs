// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Executor fleet classification

use std::io::Write;

use anyhow::Result;
use clap::Args;
use jd_core::DomainClass;
use jd_engine::{classify_executor_fleet, executor_versions};
use serde::Serialize;

use super::Context;
use crate::color;
use crate::output::format_or_json;

#[derive(Args)]
pub struct FleetArgs {
    /// Compare every executor against this version
    #[arg(long)]
    pub version: Option<String>,
}

#[derive(Serialize)]
struct FleetView {
    class: DomainClass,
    code: i32,
    executors: usize,
    target: Option<String>,
}

pub async fn handle(args: FleetArgs, ctx: &Context, out: &mut dyn Write) -> Result<()> {
    let class = classify_executor_fleet(&ctx.tree, args.version.as_deref()).await?;
    let executors = executor_versions(&ctx.tree).await?.len();
    let view = FleetView { class, code: class.code(), executors, target: args.version };
    format_or_json(out, ctx.format, &view, |out| {
        let against = match &view.target {
            Some(v) => format!(" against {}", v),
            None => String::new(),
        };
        writeln!(
            out,
            "{} ({} executors{})",
            color::header(&view.class.to_string()),
            view.executors,
            against
        )
    })?;
    Ok(())
}

#[cfg(test)]
#[path = "fleet_tests.rs"]
mod tests;
