//! Error types for the runner crate.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when configuring a fixed-step runner.
///
/// All variants are programmer errors surfaced at construction or setup
/// time. The run loop itself has no error conditions: deadline misses are
/// measured outcomes, never faults.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RunnerError {
    /// The nominal period must be strictly positive.
    #[error("period must be strictly positive, got {0:?}")]
    InvalidPeriod(Duration),

    /// The requested rate does not describe a positive, finite frequency.
    #[error("rate must be a positive, finite frequency, got {0} Hz")]
    InvalidRate(f64),

    /// Real-time thread setup could not be applied.
    #[error("failed to apply real-time setup: {0}")]
    RtSetupFailed(&'static str),
}

/// A specialized `Result` type for runner configuration.
pub type RunnerResult<T = ()> = Result<T, RunnerError>;
