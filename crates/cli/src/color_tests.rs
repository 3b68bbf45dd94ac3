// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;
use yare::parameterized;

fn force_color() {
    std::env::set_var("COLOR", "1");
    std::env::remove_var("NO_COLOR");
}

fn disable_color() {
    std::env::set_var("NO_COLOR", "1");
    std::env::remove_var("COLOR");
}

#[test]
#[serial]
fn styles_returns_styled_when_color_forced() {
    force_color();
    assert_ne!(format!("{:?}", styles()), format!("{:?}", Styles::plain()));
}

#[test]
#[serial]
fn styles_returns_plain_when_no_color() {
    disable_color();
    assert_eq!(format!("{:?}", styles()), format!("{:?}", Styles::plain()));
}

#[test]
#[serial]
fn header_produces_ansi_when_color_forced() {
    force_color();
    let result = header("JOB");
    assert!(result.contains("\x1b[38;5;74m"), "expected ANSI header color");
    assert!(result.contains("JOB"));
    assert!(result.ends_with("\x1b[0m"), "expected ANSI reset");
}

#[test]
#[serial]
fn no_color_returns_plain_text() {
    disable_color();
    assert_eq!(header("JOB"), "JOB");
    assert_eq!(muted("-"), "-");
    assert_eq!(status("FAILED"), "FAILED");
}

#[parameterized(
    ready = { "READY", codes::GOOD },
    running = { "RUNNING", codes::ACTIVE },
    timeout = { "TIMEOUT", codes::BAD },
    deleted = { "DELETED", codes::BAD },
    other = { "NOT_REPORTED", codes::CONTEXT },
)]
#[serial]
fn status_colors(text: &str, code: u8) {
    force_color();
    assert!(status(text).starts_with(&format!("\x1b[38;5;{code}m")));
}
