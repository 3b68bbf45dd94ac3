//! Pause window specs
//!
//! Date and time families combine with AND when both are set. A malformed
//! family is quiet: it matches nothing and never errors.

use crate::prelude::*;
use chrono::{TimeZone, Utc};

fn at(month: u32, day: u32, hour: u32, minute: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, month, day, hour, minute, 0).unwrap()
}

#[test]
fn january_date_range_pauses_all_of_january() {
    let window = PauseWindow::parse(Some("1/1-1/31"), None);

    for (day, hour) in [(1, 0), (15, 12), (31, 23)] {
        assert!(window.contains(&at(1, day, hour, 59)), "1/{day} {hour}:59");
    }
    for day in [1, 14, 28] {
        assert!(!window.contains(&at(2, day, 0, 0)), "2/{day}");
    }
}

#[test]
fn time_range_pauses_the_same_hours_every_day() {
    let window = PauseWindow::parse(None, Some("23:00-23:59"));

    for (month, day) in [(1, 1), (6, 15), (12, 31)] {
        assert!(window.contains(&at(month, day, 23, 0)));
        assert!(window.contains(&at(month, day, 23, 59)));
        assert!(!window.contains(&at(month, day, 22, 59)));
    }
}

#[test]
fn both_families_must_match() {
    let window = PauseWindow::parse(Some("1/1-1/31"), Some("23:00-23:59"));

    assert!(window.contains(&at(1, 10, 23, 30)));
    assert!(!window.contains(&at(1, 10, 12, 0)));
    assert!(!window.contains(&at(2, 10, 23, 30)));
}

#[test]
fn malformed_ranges_never_match() {
    for (date, time) in [
        (Some("1/1-"), None),
        (Some("13-14"), None),
        (None, Some("25:00")),
        (None, Some("aa:bb-cc:dd")),
        (Some("1/1-12/31"), Some("garbage")),
    ] {
        let window = PauseWindow::parse(date, time);
        for instant in [at(1, 1, 0, 0), at(7, 4, 12, 30), at(12, 31, 23, 59)] {
            assert!(!window.contains(&instant), "{date:?} {time:?} at {instant}");
        }
    }
}

#[test]
fn empty_configuration_pauses_nothing() {
    assert!(PauseWindow::parse(Some(""), Some(" ")).is_empty());
    assert!(!jd_core::in_pause(&at(3, 1, 0, 0), None, None));
}
