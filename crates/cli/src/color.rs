// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use std::io::IsTerminal;

pub mod codes {
    /// Section headers: steel blue
    pub const HEADER: u8 = 74;
    /// Commands and literals: light grey
    pub const LITERAL: u8 = 250;
    /// Descriptions and context: medium grey
    pub const CONTEXT: u8 = 245;
    /// Muted / secondary text: darker grey
    pub const MUTED: u8 = 240;
    /// Healthy states: READY, COMPLETED, online
    pub const GOOD: u8 = 71;
    /// In-flight states: RUNNING, STOPPING
    pub const ACTIVE: u8 = 179;
    /// Failure states: FAILED, TIMEOUT, deleted
    pub const BAD: u8 = 167;
}

/// Determine if color output should be enabled.
///
/// Priority: `NO_COLOR=1` disables → `COLOR=1` forces → TTY check.
pub fn should_colorize() -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }
    if std::env::var("COLOR").is_ok_and(|v| v == "1") {
        return true;
    }
    std::io::stdout().is_terminal()
}

/// Build clap `Styles` using the project palette.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    Styles::styled()
        .header(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::HEADER)))))
        .literal(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::LITERAL)))))
        .placeholder(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::CONTEXT)))))
}

fn fg256(code: u8) -> String {
    format!("\x1b[38;5;{code}m")
}

const RESET: &str = "\x1b[0m";

fn paint(code: u8, text: &str) -> String {
    if should_colorize() {
        format!("{}{}{}", fg256(code), text, RESET)
    } else {
        text.to_string()
    }
}

/// Format text with the header color (steel blue).
pub fn header(text: &str) -> String {
    paint(codes::HEADER, text)
}

/// Format text with the muted color (darker grey).
pub fn muted(text: &str) -> String {
    paint(codes::MUTED, text)
}

/// Color a status word by what it means for the operator.
pub fn status(text: &str) -> String {
    let code = match text {
        "READY" | "COMPLETED" | "ONLINE" => codes::GOOD,
        "RUNNING" | "STOPPING" | "PENDING" => codes::ACTIVE,
        "FAILED" | "TIMEOUT" | "DELETED" | "OVERDUE" => codes::BAD,
        _ => codes::CONTEXT,
    };
    paint(code, text)
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
