//! Fixed-rate execution loop with per-tick deadline slack accounting.
//!
//! This crate drives a caller-supplied unit of work at a constant target
//! period and measures, for every tick, how much timing margin ("slack")
//! remained before the tick's deadline. After a bounded run it exposes
//! aggregate timing-quality statistics:
//!
//! - **[`FixedStepRunner`]**: the scheduling loop itself — baseline-derived
//!   deadlines, on-time/overrun classification, drift-free resynchronization
//! - **[`RunStats`]**: tick count, deadline misses, worst and average slack
//! - **[`Work`]**: the seam between the runner and the per-tick work
//! - **[`RtSetup`]**: optional real-time thread configuration
//!
//! # Timing Guarantees
//!
//! - Deadlines are derived from a wall-clock baseline captured once before
//!   the first tick; they never drift, even across many overruns
//! - An overrunning tick never shortens or skips subsequent ticks — the
//!   loop realigns to the next baseline-derived deadline and keeps going
//! - The number of ticks is fixed up front as `floor(total / period)` and
//!   is independent of how long each tick's work actually takes
//! - Statistics are four scalar accumulators; the hot loop allocates nothing
//!
//! # Example
//!
//! ```no_run
//! use fixedstep_runner::prelude::*;
//! use std::time::Duration;
//!
//! // 500 Hz control loop for three seconds.
//! let mut runner = FixedStepRunner::new(Duration::from_millis(2))?;
//! let stats = runner.run(Duration::from_secs(3), &mut work_fn(|_period| {
//!     // per-tick control work, budgeted against the period
//! }));
//! println!("misses: {}/{}", stats.deadline_misses, stats.ticks);
//! # Ok::<(), fixedstep_runner::RunnerError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![deny(unused_must_use)]

pub mod error;
pub mod rt_setup;
pub mod runner;
pub mod stats;
pub mod work;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(not(target_os = "linux"))]
mod fallback;

pub mod prelude;

pub use error::{RunnerError, RunnerResult};
pub use rt_setup::RtSetup;
pub use runner::{FixedStepRunner, ticks_for};
pub use stats::RunStats;
pub use work::{Work, WorkFn, work_fn};

use std::time::Duration;

/// Period for 1 kHz operation (1 ms).
pub const PERIOD_1KHZ: Duration = Duration::from_millis(1);

/// Period for 500 Hz operation (2 ms), a common control-loop rate.
pub const PERIOD_500HZ: Duration = Duration::from_micros(2_000);
