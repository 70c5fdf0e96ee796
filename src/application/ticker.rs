use std::time::Duration;

/// Fixed-delay repeating timer driven by elapsed time supplied by the host.
///
/// The host feeds frame or sleep durations through [`Ticker::advance`]; the
/// ticker fires at most once per call and restarts its delay from zero after
/// firing, so a long stall never produces a burst of catch-up ticks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ticker {
    interval: Duration,
    elapsed: Duration,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
        }
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the delay; time already accumulated still counts
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Accumulate `delta`; returns true when the delay has passed
    pub fn advance(&mut self, delta: Duration) -> bool {
        self.elapsed = self.elapsed.saturating_add(delta);
        if self.elapsed >= self.interval {
            self.elapsed = Duration::ZERO;
            true
        } else {
            false
        }
    }
}
