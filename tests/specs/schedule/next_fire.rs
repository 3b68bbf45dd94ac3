//! Next fire time specs

use crate::prelude::*;
use crate::prelude::assert_eq;

const FIVE_MINUTES: u64 = 5 * MINUTE;

fn five_minute_job(tree: &MemoryTree<FakeClock>) {
    job(
        tree,
        "demo",
        &[
            ("enabled", "true"),
            ("cron", "0 0/5 * * * ?"),
            ("timeZone", "UTC"),
            ("pausePeriodDate", ""),
            ("pausePeriodTime", "12:00-13:00"),
        ],
    );
}

#[tokio::test]
async fn fire_times_inside_the_pause_window_are_skipped() {
    let tree = tree_at(MARCH_1);
    five_minute_job(&tree);
    // 2026-03-01 11:58 UTC; the 12:00 to 13:00 fires are paused
    let after = MARCH_1 + 11 * HOUR + 58 * MINUTE;

    let next = jd_engine::next_fire_time(&tree, &name("demo"), after, &utc()).await.unwrap().unwrap();

    assert!(next >= MARCH_1 + 13 * HOUR, "{next}");
    assert_eq!(next % FIVE_MINUTES, 0);
    assert_eq!(next, MARCH_1 + 13 * HOUR + FIVE_MINUTES);
}

#[tokio::test]
async fn successive_fire_times_increase_and_avoid_the_window() {
    let tree = tree_at(MARCH_1);
    five_minute_job(&tree);
    let window = PauseWindow::parse(None, Some("12:00-13:00"));
    let demo = name("demo");

    let mut after = MARCH_1 + 11 * HOUR;
    for _ in 0..40 {
        let next = jd_engine::next_fire_time(&tree, &demo, after, &utc()).await.unwrap().unwrap();
        assert!(next > after);
        let instant = chrono::DateTime::from_timestamp_millis(next as i64).unwrap();
        assert!(!window.contains(&instant), "{instant}");
        after = next;
    }
}

#[tokio::test]
async fn schedule_evaluates_in_the_job_time_zone() {
    let tree = tree_at(MARCH_1);
    job(&tree, "daily", &[("cron", "0 0 9 * * ?"), ("timeZone", "Asia/Shanghai")]);

    let next = jd_engine::next_fire_time(&tree, &name("daily"), MARCH_1, &utc()).await.unwrap();

    // 09:00 in Shanghai is 01:00 UTC
    assert_eq!(next, Some(MARCH_1 + HOUR));
}

#[tokio::test]
async fn schedule_that_is_always_paused_has_no_next_fire() {
    let tree = tree_at(MARCH_1);
    job(&tree, "never", &[("cron", "0 0 12 * * ?"), ("timeZone", "UTC"), ("pausePeriodTime", "0:00-23:59")]);

    let next = jd_engine::next_fire_time(&tree, &name("never"), MARCH_1, &utc()).await.unwrap();

    assert_eq!(next, None);
}
