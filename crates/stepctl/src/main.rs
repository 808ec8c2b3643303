//! stepctl - fixed-step loop driver
//!
//! Runs the fixed-step runner at a configurable rate against a simulated
//! busy-work load and reports timing-quality statistics: ticks executed,
//! deadline misses, average and worst slack.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod output;

use anyhow::{Context, Result, bail};
use clap::Parser;
use fixedstep_runner::prelude::*;
use fixedstep_workload::BusySpin;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "stepctl")]
#[command(about = "Run a fixed-rate loop and report deadline slack statistics")]
#[command(version)]
struct Cli {
    /// Target tick rate in Hz
    #[arg(long, default_value_t = 500.0, conflicts_with = "period_ms")]
    rate_hz: f64,

    /// Nominal period in milliseconds (alternative to --rate-hz)
    #[arg(long)]
    period_ms: Option<f64>,

    /// Total run duration in seconds; negative values run zero ticks
    #[arg(long, default_value_t = 3.0, allow_negative_numbers = true)]
    duration_secs: f64,

    /// Simulated per-tick load in microseconds
    #[arg(long, default_value_t = 200)]
    load_us: u64,

    /// Emit a heartbeat log line every N ticks (0 disables)
    #[arg(long, default_value_t = 100)]
    heartbeat: u64,

    /// Apply real-time thread setup (priority, memory locking) before running
    #[arg(long)]
    rt: bool,

    /// Output the final report as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut runner = match cli.period_ms {
        Some(ms) => {
            let period = parse_period_ms(ms)?;
            FixedStepRunner::new(period).context("invalid period")?
        }
        None => FixedStepRunner::from_rate_hz(cli.rate_hz).context("invalid rate")?,
    };

    if cli.rt {
        runner
            .apply_rt_setup(&RtSetup::default())
            .context("real-time setup failed")?;
    }

    let total = parse_duration_secs(cli.duration_secs)?;
    let load = Duration::from_micros(cli.load_us);

    tracing::info!(
        period_ms = runner.period_secs() * 1e3,
        duration_secs = total.as_secs_f64(),
        load_us = cli.load_us,
        planned_ticks = ticks_for(total, runner.period()),
        "starting run"
    );

    let mut spin = BusySpin::new(load);
    let heartbeat_every = cli.heartbeat;
    let mut tick: u64 = 0;
    let stats = runner
        .run(
            total,
            &mut work_fn(|period| {
                spin.tick(period);
                if heartbeat_every > 0 && tick % heartbeat_every == 0 {
                    tracing::info!(tick, "heartbeat");
                }
                tick += 1;
            }),
        )
        .clone();

    let report = output::RunReport::new(runner.period(), total, cli.load_us, &stats);
    if cli.json {
        output::print_json(&report)?;
    } else {
        output::print_human(&report);
    }
    Ok(())
}

/// Parse `--period-ms`, rejecting values the runner cannot represent.
fn parse_period_ms(ms: f64) -> Result<Duration> {
    if !ms.is_finite() || ms <= 0.0 {
        bail!("--period-ms must be positive and finite, got {ms}");
    }
    Duration::try_from_secs_f64(ms / 1_000.0)
        .ok()
        .filter(|period| !period.is_zero())
        .with_context(|| format!("--period-ms out of range: {ms}"))
}

/// Parse `--duration-secs`. Negative durations bound zero ticks rather
/// than failing, keeping the run contract total.
fn parse_duration_secs(secs: f64) -> Result<Duration> {
    if !secs.is_finite() {
        bail!("--duration-secs must be finite, got {secs}");
    }
    Duration::try_from_secs_f64(secs.max(0.0))
        .map_err(|_| anyhow::anyhow!("--duration-secs out of range: {secs}"))
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default_directive = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
