//! Swappable workload simulations for exercising a fixed-step loop.
//!
//! Each workload implements the runner's [`Work`] seam so it can be
//! injected into [`fixedstep_runner::FixedStepRunner::run`] — the runner
//! stays independent of any particular workload shape.
//!
//! - [`BusySpin`]: burns CPU for a fixed wall-clock duration per tick
//! - [`FixedSleep`]: blocks for a fixed duration per tick (deterministic
//!   overrun induction)
//! - [`NoOp`]: returns immediately

#![deny(clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![deny(unused_must_use)]

use fixedstep_runner::Work;
use std::time::{Duration, Instant};

/// Burns CPU for a fixed amount of wall-clock time per tick.
///
/// The spin polls a monotonic clock while pushing floating-point work
/// through [`std::hint::black_box`]. Its one contract: it always consumes
/// real wall-clock time and is never optimized away, which makes it a
/// faithful stand-in for control or I/O load when measuring loop timing.
#[derive(Debug, Clone)]
pub struct BusySpin {
    load: Duration,
}

impl BusySpin {
    /// Create a workload that burns `load` of wall-clock time per tick.
    #[must_use]
    pub fn new(load: Duration) -> Self {
        Self { load }
    }

    /// The configured per-tick load.
    #[must_use]
    pub fn load(&self) -> Duration {
        self.load
    }
}

impl Work for BusySpin {
    fn tick(&mut self, _period: Duration) {
        let start = Instant::now();
        let mut sink = 0.0_f64;
        while start.elapsed() < self.load {
            sink += std::hint::black_box(42.0_f64).sqrt();
        }
        std::hint::black_box(sink);
    }
}

/// Blocks the calling thread for a fixed duration per tick.
///
/// Sleep never wakes early, so pairing a pause longer than the loop period
/// deterministically overruns every tick — useful for demos and tests that
/// need guaranteed deadline misses.
#[derive(Debug, Clone)]
pub struct FixedSleep {
    pause: Duration,
}

impl FixedSleep {
    /// Create a workload that sleeps for `pause` per tick.
    #[must_use]
    pub fn new(pause: Duration) -> Self {
        Self { pause }
    }

    /// The configured per-tick pause.
    #[must_use]
    pub fn pause(&self) -> Duration {
        self.pause
    }
}

impl Work for FixedSleep {
    fn tick(&mut self, _period: Duration) {
        std::thread::sleep(self.pause);
    }
}

/// Does nothing, instantly.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOp;

impl Work for NoOp {
    fn tick(&mut self, _period: Duration) {}
}
