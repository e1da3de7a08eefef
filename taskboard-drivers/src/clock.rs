//! Monotonic clock backed by the embassy time driver

use taskboard_core::time::{Clock, Instant};

/// Reads `embassy_time::Instant::now()`
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now(&self) -> Instant {
        Instant::from_micros(embassy_time::Instant::now().as_micros())
    }
}
