use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Milliseconds on the arena clock.
pub type Timestamp = u64;

/// Arena clock. Advanced only by the simulator tick with real elapsed time,
/// so cooldown math does not depend on how often ticks are polled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameClock {
    now_ms: Timestamp,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Timestamp {
        self.now_ms
    }

    /// Moves the clock forward, returning the elapsed seconds.
    pub fn advance(&mut self, elapsed: Duration) -> f64 {
        self.now_ms += elapsed.as_millis() as u64;
        elapsed.as_secs_f64()
    }

    /// True once `interval_ms` has passed since `since`. Never-set timers are ready.
    pub fn has_elapsed(&self, since: Option<Timestamp>, interval_ms: u64) -> bool {
        match since {
            Some(at) => self.now_ms.saturating_sub(at) >= interval_ms,
            None => true,
        }
    }
}
