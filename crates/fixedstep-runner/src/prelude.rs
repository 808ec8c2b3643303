//! Prelude module for common runner types.
//!
//! This module provides a convenient way to import the most commonly used
//! types from the runner crate.

pub use crate::error::{RunnerError, RunnerResult};
pub use crate::rt_setup::RtSetup;
pub use crate::runner::{FixedStepRunner, ticks_for};
pub use crate::stats::RunStats;
pub use crate::work::{Work, WorkFn, work_fn};
pub use crate::{PERIOD_1KHZ, PERIOD_500HZ};
