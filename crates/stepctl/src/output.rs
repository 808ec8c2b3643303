//! Final-report formatting for stepctl.

use fixedstep_runner::RunStats;
use serde::Serialize;
use std::time::Duration;

/// Summary of one completed run, ready for human or JSON output.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub period_ms: f64,
    pub duration_secs: f64,
    pub load_us: u64,
    pub ticks: u64,
    pub deadline_misses: u64,
    pub miss_rate: f64,
    pub avg_slack_ms: f64,
    /// `None` when zero ticks ran and no slack was ever observed.
    pub worst_slack_ms: Option<f64>,
}

impl RunReport {
    pub fn new(period: Duration, total: Duration, load_us: u64, stats: &RunStats) -> Self {
        Self {
            period_ms: period.as_secs_f64() * 1e3,
            duration_secs: total.as_secs_f64(),
            load_us,
            ticks: stats.ticks,
            deadline_misses: stats.deadline_misses,
            miss_rate: stats.miss_rate(),
            avg_slack_ms: stats.avg_slack_s() * 1e3,
            worst_slack_ms: stats.worst_slack_s().map(|s| s * 1e3),
        }
    }
}

pub fn print_human(report: &RunReport) {
    let worst = match report.worst_slack_ms {
        Some(ms) => format!("{ms:.3} ms"),
        None => "n/a".to_owned(),
    };
    println!(
        "DONE: ticks={}, misses={}, avg_slack={:.3} ms, worst_slack={}",
        report.ticks, report.deadline_misses, report.avg_slack_ms, worst
    );
}

pub fn print_json(report: &RunReport) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
