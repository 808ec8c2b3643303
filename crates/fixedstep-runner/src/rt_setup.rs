//! Real-time thread setup configuration.

/// Real-time parameters applied to the loop thread before a run.
///
/// On Linux, high priority means `SCHED_FIFO` and memory locking means
/// `mlockall`; on other platforms both are no-ops.
#[derive(Debug, Clone)]
pub struct RtSetup {
    /// Elevate the thread to a real-time scheduling class.
    ///
    /// Elevation failures are non-fatal: the loop still runs, just without
    /// priority over other threads.
    pub high_priority: bool,

    /// Lock current and future memory pages to avoid page faults during
    /// the run.
    pub lock_memory: bool,
}

impl Default for RtSetup {
    fn default() -> Self {
        Self {
            high_priority: true,
            lock_memory: true,
        }
    }
}

impl RtSetup {
    /// Create a setup with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a minimal setup (no special configuration).
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            high_priority: false,
            lock_memory: false,
        }
    }

    /// Set high-priority scheduling.
    #[must_use]
    pub fn with_high_priority(mut self, enabled: bool) -> Self {
        self.high_priority = enabled;
        self
    }

    /// Set memory locking.
    #[must_use]
    pub fn with_lock_memory(mut self, enabled: bool) -> Self {
        self.lock_memory = enabled;
        self
    }

    /// Check if any real-time features are enabled.
    #[must_use]
    pub fn has_rt_features(&self) -> bool {
        self.high_priority || self.lock_memory
    }
}
