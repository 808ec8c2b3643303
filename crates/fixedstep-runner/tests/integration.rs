//! Integration tests for the fixed-step runner.
//!
//! Wall-clock assertions use periods large enough to tolerate scheduler
//! noise on shared CI machines, with explicit tolerances. Guaranteed
//! overruns are induced with sleeping work: sleep never wakes early, so the
//! miss classification is deterministic.

use fixedstep_runner::prelude::*;
use std::time::{Duration, Instant};

const fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn runner(period: Duration) -> FixedStepRunner {
    FixedStepRunner::new(period).expect("positive period")
}

fn worst(stats: &RunStats) -> f64 {
    stats.worst_slack_s().expect("run recorded at least one tick")
}

#[test]
fn tick_count_is_floor_of_duration_over_period() {
    let mut r = runner(ms(10));
    for (total, expected) in [
        (Duration::ZERO, 0),
        (ms(5), 0),
        (ms(10), 1),
        (ms(35), 3),
        (ms(100), 10),
    ] {
        let stats = r.run(total, &mut work_fn(|_| {})).clone();
        assert_eq!(stats.ticks, expected, "total {total:?}");
    }
}

#[test]
fn tick_count_is_independent_of_work_time() {
    // Each tick's work blows through two and a half periods; the planned
    // tick count must not change.
    let mut r = runner(ms(10));
    let stats = r
        .run(ms(50), &mut work_fn(|_| std::thread::sleep(ms(25))))
        .clone();
    assert_eq!(stats.ticks, 5);
}

#[test]
fn noop_work_leaves_positive_slack() {
    let period = ms(25);
    let mut r = runner(period);
    let stats = r.run(ms(200), &mut work_fn(|_| {})).clone();

    assert_eq!(stats.ticks, 8);
    assert_eq!(stats.deadline_misses, 0);

    let avg = stats.avg_slack_s();
    let p = period.as_secs_f64();
    // Slack approaches the period minus loop overhead.
    assert!(avg > 0.5 * p, "avg slack {avg} vs period {p}");
    assert!(avg <= p, "avg slack {avg} vs period {p}");
    assert!(worst(&stats) > 0.0);
    assert!(worst(&stats) <= avg + 1e-12);
}

#[test]
fn scenario_ten_ticks_noop() {
    // period = 0.01s, duration = 0.1s, no-op work
    let mut r = runner(ms(10));
    let stats = r.run(ms(100), &mut work_fn(|_| {})).clone();

    assert_eq!(stats.ticks, 10);
    assert_eq!(stats.deadline_misses, 0);
    assert!(stats.avg_slack_s() > 0.0);
    assert!(stats.avg_slack_s() <= 0.010 + 1e-12);
    assert!(worst(&stats) > 0.0);
}

#[test]
fn scenario_every_tick_overruns() {
    // period = 0.01s, duration = 0.1s, work blocks well past the period
    let mut r = runner(ms(10));
    let stats = r
        .run(ms(100), &mut work_fn(|_| std::thread::sleep(ms(25))))
        .clone();

    assert_eq!(stats.ticks, 10);
    assert_eq!(stats.deadline_misses, 10);
    assert!(stats.avg_slack_s() < 0.0);
    assert!(worst(&stats) <= stats.avg_slack_s() + 1e-12);
    assert!((stats.miss_rate() - 1.0).abs() < 1e-12);
}

#[test]
fn deadlines_stay_aligned_to_baseline_across_overruns() {
    // With every tick overrunning by a constant amount, baseline-aligned
    // deadlines mean each tick falls further behind than the last; a
    // scheduler that silently re-anchored deadlines to the actual finish
    // times would show constant slack instead.
    let period = ms(10);
    let pause = ms(25);
    let mut finishes: Vec<Instant> = Vec::new();

    let mut r = runner(period);
    let approx_baseline = Instant::now();
    let stats = r
        .run(
            ms(100),
            &mut work_fn(|_| {
                std::thread::sleep(pause);
                finishes.push(Instant::now());
            }),
        )
        .clone();

    assert_eq!(stats.ticks, 10);
    assert_eq!(finishes.len(), 10);

    // Reconstruct per-tick slack against the theoretical deadline sequence.
    let p = period.as_secs_f64();
    let reconstructed: Vec<f64> = finishes
        .iter()
        .enumerate()
        .map(|(n, end)| (n as f64 + 1.0) * p - end.duration_since(approx_baseline).as_secs_f64())
        .collect();

    // Every tick missed, and each fell further behind than the one before.
    for pair in reconstructed.windows(2) {
        assert!(pair[0] < 0.0);
        assert!(pair[1] < pair[0] + 1e-3, "slack did not degrade: {pair:?}");
    }
    let first = reconstructed.first().copied().unwrap_or(0.0);
    let last = reconstructed.last().copied().unwrap_or(0.0);
    assert!(
        first - last > 0.100,
        "expected ~135ms of cumulative drift behind the baseline, got {}",
        first - last
    );

    // The runner's average matches the independently reconstructed mean.
    let mean = reconstructed.iter().sum::<f64>() / reconstructed.len() as f64;
    assert!(
        (stats.avg_slack_s() - mean).abs() < 0.005,
        "runner avg {} vs reconstructed mean {}",
        stats.avg_slack_s(),
        mean
    );
}

#[test]
fn run_consumes_approximately_the_requested_duration() {
    let mut r = runner(ms(20));
    let start = Instant::now();
    r.run(ms(100), &mut work_fn(|_| {}));
    let elapsed = start.elapsed();

    // Five ticks, each waited out to its deadline.
    assert!(elapsed >= ms(95), "elapsed {elapsed:?}");
    assert!(elapsed < ms(200), "elapsed {elapsed:?}");
}

#[test]
fn rerun_resets_statistics() {
    let mut r = runner(ms(10));

    let first = r.run(ms(50), &mut work_fn(|_| {})).clone();
    assert_eq!(first.ticks, 5);

    let second = r.run(ms(30), &mut work_fn(|_| {})).clone();
    assert_eq!(second.ticks, 3, "second run must not accumulate the first");
    assert_eq!(second.deadline_misses, 0);

    let third = r.run(Duration::ZERO, &mut work_fn(|_| {})).clone();
    assert!(third.is_empty());
    assert!(third.worst_slack_s().is_none());
}

#[test]
fn zero_duration_leaves_reset_state() {
    let mut r = runner(ms(10));
    let stats = r.run(Duration::ZERO, &mut work_fn(|_| {})).clone();

    assert_eq!(stats.ticks, 0);
    assert_eq!(stats.deadline_misses, 0);
    assert!(stats.avg_slack_s().abs() < f64::EPSILON);
    assert!(stats.worst_slack_s().is_none());
}

#[test]
fn panicking_work_leaves_partial_statistics() {
    let mut r = runner(ms(5));
    let mut calls = 0u32;

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        r.run(
            ms(100),
            &mut work_fn(|_| {
                calls += 1;
                if calls == 3 {
                    panic!("injected fault");
                }
            }),
        );
    }));

    assert!(outcome.is_err());
    assert_eq!(calls, 3);
    // Only fully completed ticks are recorded.
    assert_eq!(r.stats().ticks, 2);
}

#[test]
fn rt_setup_composes_with_run() {
    let mut r = runner(ms(10));
    r.apply_rt_setup(&RtSetup::minimal()).expect("minimal setup");

    let stats = r.run(ms(30), &mut work_fn(|_| {})).clone();
    assert_eq!(stats.ticks, 3);
}
