// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use clap::CommandFactory;
use yare::parameterized;

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[parameterized(
    jobs = { &["jd", "jobs"] },
    status = { &["jd", "status", "demo"] },
    log = { &["jd", "log", "demo", "3"] },
    next_fire = { &["jd", "next-fire", "demo", "--after", "1772323200000"] },
    health = { &["jd", "health"] },
    fleet = { &["jd", "fleet", "--version", "3.0.0"] },
    settings_update = { &["jd", "settings", "update", "demo", "--cron", "0 0 * * * ?", "--enabled-report", "false"] },
    migrate_batch = { &["jd", "--format", "json", "migrate", "batch", "a,b", "t2"] },
    tree_after_command = { &["jd", "jobs", "--tree", "snap.json.zst"] },
)]
fn commands_parse(args: &[&str]) {
    assert!(Cli::try_parse_from(args).is_ok(), "{args:?}");
}

#[parameterized(
    missing_job = { &["jd", "status"] },
    bad_item = { &["jd", "log", "demo", "first"] },
    bad_format = { &["jd", "--format", "yaml", "jobs"] },
    bad_flag_value = { &["jd", "settings", "update", "demo", "--enabled-report", "maybe"] },
)]
fn invalid_commands_are_rejected(args: &[&str]) {
    assert!(Cli::try_parse_from(args).is_err(), "{args:?}");
}

#[test]
fn global_flags_are_read() {
    let cli = Cli::try_parse_from(["jd", "--tree", "t.json", "--format", "json", "health"]).unwrap();
    assert_eq!(cli.tree, Some(PathBuf::from("t.json")));
    assert_eq!(cli.format, OutputFormat::Json);
    assert!(matches!(cli.command, Commands::Schedule(ScheduleCommand::Health)));
}
