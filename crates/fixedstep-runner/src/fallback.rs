//! Portable sleep implementation for non-Linux platforms.

use crate::error::RunnerResult;
use crate::rt_setup::RtSetup;
use std::time::{Duration, Instant};

/// Length of the busy-spin tail appended to every timed sleep.
const SPIN_TAIL: Duration = Duration::from_micros(80);

/// Portable sleep: `std::thread::sleep` for the bulk of the wait, busy-spin
/// for the final stretch.
pub struct PlatformSleep;

impl PlatformSleep {
    /// Create new platform sleep instance.
    pub fn new() -> Self {
        Self
    }

    /// Apply real-time setup (no-op on this platform).
    pub fn apply_rt_setup(&mut self, _setup: &RtSetup) -> RunnerResult {
        Ok(())
    }

    /// Block until wall-clock time reaches `target`; a past target returns
    /// immediately.
    pub fn sleep_until(&mut self, target: Instant) {
        let now = Instant::now();
        let Some(remaining) = target.checked_duration_since(now) else {
            return;
        };

        let coarse = remaining.saturating_sub(SPIN_TAIL);
        if !coarse.is_zero() {
            std::thread::sleep(coarse);
        }
        while Instant::now() < target {
            std::hint::spin_loop();
        }
    }
}

impl Default for PlatformSleep {
    fn default() -> Self {
        Self::new()
    }
}
