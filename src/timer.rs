use std::time::{Duration, Instant};

/// Monotonic millisecond stopwatch.
///
/// Timers never block or schedule anything: callers poll [`Timer::step`] once
/// per frame and only apply their update when enough wall-clock time has
/// passed since the last accepted step.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    started: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self { started: Instant::now() }
    }

    /// A timer that reports `elapsed` as already gone by.
    pub fn started_ago(elapsed: Duration) -> Self {
        let now = Instant::now();
        Self { started: now.checked_sub(elapsed).unwrap_or(now) }
    }

    pub fn reset(&mut self) {
        self.started = Instant::now();
    }

    /// Milliseconds since construction or the last `reset`.
    pub fn ticks(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Timer-gated step: returns `true` and resets when more than
    /// `threshold_ms` have elapsed, `false` otherwise.
    pub fn step(&mut self, threshold_ms: u64) -> bool {
        if self.ticks() > threshold_ms {
            self.reset();
            true
        } else {
            false
        }
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
