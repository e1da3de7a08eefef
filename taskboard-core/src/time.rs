//! Monotonic microsecond time source
//!
//! Every timestamp in the task core comes from one [`Clock`]. There is no
//! wall-clock or timezone dependency.

use core::cell::Cell;

/// A point on the monotonic clock, in microseconds since boot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Instant(u64);

impl Instant {
    /// Clock origin
    pub const ZERO: Self = Self(0);

    /// Create an instant from a raw microsecond count
    pub const fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    /// Create an instant from a millisecond count
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis * 1000)
    }

    /// Raw microsecond count
    pub const fn as_micros(&self) -> u64 {
        self.0
    }

    /// Microseconds elapsed since `earlier`
    ///
    /// Saturates to zero if `earlier` is in the future.
    pub const fn micros_since(&self, earlier: Instant) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// Monotonic time source
///
/// Implementations must never go backwards. Takes `&self` so a single clock
/// can be shared by every task and step on the board.
pub trait Clock {
    /// Current time
    fn now(&self) -> Instant;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Manually advanced clock
///
/// Used for host-side simulation and tests, where the tick loop decides
/// exactly how much time passes between ticks.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_us: Cell<u64>,
}

impl ManualClock {
    /// Create a clock starting at zero
    pub const fn new() -> Self {
        Self { now_us: Cell::new(0) }
    }

    /// Create a clock starting at the given instant
    pub const fn starting_at(start: Instant) -> Self {
        Self {
            now_us: Cell::new(start.as_micros()),
        }
    }

    /// Advance by a number of microseconds
    pub fn advance_us(&self, us: u64) {
        self.now_us.set(self.now_us.get().saturating_add(us));
    }

    /// Advance by a number of milliseconds
    pub fn advance_ms(&self, ms: u64) {
        self.advance_us(ms.saturating_mul(1000));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        Instant(self.now_us.get())
    }
}
