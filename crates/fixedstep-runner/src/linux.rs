//! Linux platform layer: precise sleep and real-time thread setup.

use crate::error::RunnerResult;
use crate::rt_setup::RtSetup;
use core::time::Duration;
use libc::{
    CLOCK_MONOTONIC, MCL_CURRENT, MCL_FUTURE, SCHED_FIFO, clock_nanosleep, mlockall, sched_param,
    sched_setscheduler, timespec,
};
use std::time::Instant;

/// Length of the busy-spin tail appended to every kernel sleep.
const SPIN_TAIL: Duration = Duration::from_micros(80);

/// Waits shorter than this skip the kernel sleep entirely.
const SPIN_ONLY_THRESHOLD: Duration = Duration::from_micros(100);

/// Linux sleep implementation: `clock_nanosleep` for the bulk of the wait,
/// busy-spin for the final stretch.
pub struct PlatformSleep;

impl PlatformSleep {
    /// Create new platform sleep instance.
    pub fn new() -> Self {
        Self
    }

    /// Apply Linux-specific real-time setup to the calling thread.
    pub fn apply_rt_setup(&mut self, setup: &RtSetup) -> RunnerResult {
        if setup.high_priority {
            let param = sched_param { sched_priority: 80 };
            unsafe {
                // Non-fatal: fails without CAP_SYS_NICE
                sched_setscheduler(0, SCHED_FIFO, &param);
            }
        }

        if setup.lock_memory {
            unsafe {
                mlockall(MCL_CURRENT | MCL_FUTURE);
            }
        }

        Ok(())
    }

    /// Block until wall-clock time reaches `target`.
    ///
    /// A target that has already passed returns immediately; the caller is
    /// expected to proceed without attempting to catch up.
    pub fn sleep_until(&mut self, target: Instant) {
        let now = Instant::now();
        let Some(remaining) = target.checked_duration_since(now) else {
            return;
        };

        if remaining < SPIN_ONLY_THRESHOLD {
            spin_to(target);
            return;
        }

        let coarse = remaining.saturating_sub(SPIN_TAIL);
        let ts = timespec {
            tv_sec: coarse.as_secs() as i64,
            tv_nsec: i64::from(coarse.subsec_nanos()),
        };
        unsafe {
            // Interruption is harmless: the spin tail still enforces `target`.
            clock_nanosleep(CLOCK_MONOTONIC, 0, &ts, std::ptr::null_mut());
        }

        spin_to(target);
    }
}

fn spin_to(target: Instant) {
    while Instant::now() < target {
        std::hint::spin_loop();
    }
}

impl Default for PlatformSleep {
    fn default() -> Self {
        Self::new()
    }
}
