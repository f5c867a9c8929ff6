//! Simulated device round-trip.
//!
//! Devices are not reached over a real transport; instead every committed
//! action waits for a fixed delay standing in for the round trip. The delay
//! is a suspension point between validation and commit, which is exactly
//! where concurrent actions could interleave if they were not serialized.

use std::time::Duration;

/// Round-trip delay of the emulated device firmware.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(300);

/// Fixed delay applied before every committed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedLatency(Duration);

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self(DEFAULT_LATENCY)
    }
}

impl SimulatedLatency {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self(delay)
    }

    /// No delay. The round trip still yields to the scheduler, so other
    /// tasks get a chance to run between validation and commit.
    #[must_use]
    pub const fn none() -> Self {
        Self(Duration::ZERO)
    }

    #[must_use]
    pub fn delay(self) -> Duration {
        self.0
    }

    /// Wait for one device round trip.
    pub async fn round_trip(self) {
        if self.0.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.0).await;
        }
    }
}
