//! The fixed-step execution loop.

use crate::error::{RunnerError, RunnerResult};
use crate::rt_setup::RtSetup;
use crate::stats::RunStats;
use crate::work::Work;
use std::time::{Duration, Instant};

#[cfg(target_os = "linux")]
use crate::linux::PlatformSleep;

#[cfg(not(target_os = "linux"))]
use crate::fallback::PlatformSleep;

/// Number of whole periods that fit in `total`.
///
/// This is the tick count a [`FixedStepRunner`] executes for a run of
/// `total`: the integer floor of `total / period`, computed in nanosecond
/// arithmetic so no floating-point rounding can gain or lose a tick.
/// Returns 0 for a zero period.
#[must_use]
pub fn ticks_for(total: Duration, period: Duration) -> u64 {
    if period.is_zero() {
        return 0;
    }
    let ticks = total.as_nanos() / period.as_nanos();
    ticks.min(u128::from(u64::MAX)) as u64
}

/// Fixed-rate execution loop with deadline slack accounting.
///
/// The runner owns a fixed nominal period and, for each run, drives a
/// sequence of equally-spaced deadlines derived from a baseline captured
/// once before the first tick:
///
/// 1. Invoke the work synchronously
/// 2. Measure `slack = deadline − finish_time` (negative on overrun)
/// 3. Classify the tick (on-time or deadline miss) and fold the slack
///    into [`RunStats`]
/// 4. Suspend until the deadline — a no-op if it already passed; the loop
///    never skips or compresses ticks to catch up
/// 5. Advance the deadline by exactly one period, so deadlines stay
///    aligned to the baseline no matter how many ticks overran
///
/// The tick count is fixed before the loop begins as
/// [`ticks_for(total, period)`](ticks_for) and is never recomputed from
/// elapsed time.
///
/// # Concurrency
///
/// Single-threaded, synchronous, blocking: the calling thread executes the
/// entire tick sequence including the suspend-until-deadline wait.
/// `run` takes `&mut self`, so overlapping runs on one instance cannot be
/// expressed.
///
/// # Example
///
/// ```no_run
/// use fixedstep_runner::prelude::*;
/// use std::time::Duration;
///
/// let mut runner = FixedStepRunner::from_rate_hz(500.0)?;
/// runner.run(Duration::from_secs(3), &mut work_fn(|_period| {
///     // bounded per-tick work
/// }));
/// let stats = runner.stats();
/// println!(
///     "ticks={} misses={} avg_slack={:.3}ms",
///     stats.ticks,
///     stats.deadline_misses,
///     stats.avg_slack_s() * 1e3,
/// );
/// # Ok::<(), fixedstep_runner::RunnerError>(())
/// ```
pub struct FixedStepRunner {
    /// Nominal period, fixed for the runner's lifetime.
    period: Duration,

    /// Statistics of the last (or in-progress) run.
    stats: RunStats,

    /// Platform-specific precise sleep.
    sleep: PlatformSleep,

    /// Real-time setup applied flag.
    rt_setup_applied: bool,
}

impl FixedStepRunner {
    /// Create a runner with the given nominal period.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::InvalidPeriod`] if `period` is zero.
    pub fn new(period: Duration) -> RunnerResult<Self> {
        if period.is_zero() {
            return Err(RunnerError::InvalidPeriod(period));
        }
        Ok(Self {
            period,
            stats: RunStats::new(),
            sleep: PlatformSleep::new(),
            rt_setup_applied: false,
        })
    }

    /// Create a runner from a target rate in Hz.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::InvalidRate`] if `rate_hz` is not a positive,
    /// finite frequency or if the implied period is not representable.
    pub fn from_rate_hz(rate_hz: f64) -> RunnerResult<Self> {
        if !rate_hz.is_finite() || rate_hz <= 0.0 {
            return Err(RunnerError::InvalidRate(rate_hz));
        }
        let period = Duration::try_from_secs_f64(rate_hz.recip())
            .map_err(|_| RunnerError::InvalidRate(rate_hz))?;
        if period.is_zero() {
            return Err(RunnerError::InvalidRate(rate_hz));
        }
        Self::new(period)
    }

    /// Apply real-time setup to the calling thread.
    ///
    /// Call once before the run loop; repeated calls are no-ops. Failure to
    /// elevate priority is non-fatal (the process may lack the privilege).
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::RtSetupFailed`] if the platform layer rejects
    /// the setup outright.
    pub fn apply_rt_setup(&mut self, setup: &RtSetup) -> RunnerResult {
        if self.rt_setup_applied {
            return Ok(());
        }
        self.sleep.apply_rt_setup(setup)?;
        self.rt_setup_applied = true;
        Ok(())
    }

    /// Execute `ticks_for(total, period)` ticks at the nominal period,
    /// invoking `work` once per tick.
    ///
    /// Statistics are reset at the start of every call; each invocation
    /// recomputes them from scratch. A zero `total` executes zero ticks and
    /// leaves the statistics empty.
    ///
    /// If `work` panics, the panic propagates and the statistics reflect
    /// only the fully completed ticks; such a partial run should not be
    /// presented as a completed one (compare [`RunStats::ticks`] against
    /// the expected total).
    pub fn run<W: Work + ?Sized>(&mut self, total: Duration, work: &mut W) -> &RunStats {
        self.stats.reset();
        let planned = ticks_for(total, self.period);
        tracing::debug!(planned_ticks = planned, period = ?self.period, "fixed-step run starting");

        let baseline = Instant::now();
        let mut deadline = baseline + self.period;

        for _ in 0..planned {
            work.tick(self.period);
            let end = Instant::now();

            // Slack = time remaining until the deadline; negative on overrun.
            let slack_s = if end <= deadline {
                deadline.duration_since(end).as_secs_f64()
            } else {
                -end.duration_since(deadline).as_secs_f64()
            };
            self.stats.record_slack(slack_s);

            // Realign to the deadline even after an overrun (no-op if it
            // already passed), then advance by exactly one period so the
            // deadline sequence never drifts from the baseline.
            self.sleep.sleep_until(deadline);
            deadline += self.period;
        }

        tracing::debug!(
            ticks = self.stats.ticks,
            misses = self.stats.deadline_misses,
            avg_slack_s = self.stats.avg_slack_s(),
            worst_slack_s = self.stats.worst_slack_s(),
            "fixed-step run complete"
        );
        &self.stats
    }

    /// Statistics of the last completed run, or the empty state if no run
    /// has completed.
    #[must_use]
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// The configured nominal period.
    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// The configured nominal period in seconds.
    #[must_use]
    pub fn period_secs(&self) -> f64 {
        self.period.as_secs_f64()
    }

    /// Check if real-time setup has been applied.
    #[must_use]
    pub fn is_rt_setup_applied(&self) -> bool {
        self.rt_setup_applied
    }
}
