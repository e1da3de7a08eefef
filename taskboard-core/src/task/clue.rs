//! Clue trigger state machine
//!
//! Decides whether a step's clue is visible. A clue without a gating sensor
//! is always visible. With a gate, the clue is visible while the gate reads
//! true and for a grace window of `timeout` after it was last seen true, so
//! a user wobbling a trigger around its threshold does not make the clue
//! flicker.
//!
//! ```text
//!            first evaluation / gate true
//!   Unarmed ─────────────────────────────▶ Visible ◀──┐
//!                                           │  ▲      │ gate true
//!               gate false, elapsed ≥ timeout│  │      │
//!                                           ▼  │      │
//!                                        Suppressed ──┘
//! ```

use crate::time::Instant;
use crate::traits::SensorReader;

/// Visibility state of a clue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClueState {
    /// Never evaluated since construction or reset
    Unarmed,
    /// Clue currently shown
    Visible,
    /// Gate released and grace window elapsed
    Suppressed,
}

/// What the screen should do for this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClueAction {
    /// Render the clue
    Show,
    /// Clear all task clues
    Clear,
    /// Leave the screen untouched (misconfiguration, nothing to hint)
    Skipped,
}

/// Per-step clue trigger
#[derive(Clone, Copy)]
pub struct ClueTrigger<'a> {
    gate: Option<&'a dyn SensorReader>,
    timeout_us: u64,
    /// `None` until the first gated evaluation
    armed_at: Option<Instant>,
    state: ClueState,
}

impl Default for ClueTrigger<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ClueTrigger<'a> {
    /// Create an ungated trigger (clue always visible)
    pub const fn new() -> Self {
        Self {
            gate: None,
            timeout_us: 0,
            armed_at: None,
            state: ClueState::Unarmed,
        }
    }

    /// Gate the clue on a boolean sensor with a grace window
    pub fn set_timeout(&mut self, gate: &'a dyn SensorReader, timeout_ms: u64) {
        self.gate = Some(gate);
        self.timeout_us = timeout_ms.saturating_mul(1000);
        self.reset();
    }

    /// Gating sensor, if any
    pub fn gate(&self) -> Option<&'a dyn SensorReader> {
        self.gate
    }

    /// Grace window in microseconds
    pub fn timeout_us(&self) -> u64 {
        self.timeout_us
    }

    /// Current visibility state
    pub fn state(&self) -> ClueState {
        self.state
    }

    /// Return to the unarmed state
    pub fn reset(&mut self) {
        self.armed_at = None;
        self.state = ClueState::Unarmed;
    }

    /// Advance the state machine for one tick
    ///
    /// Re-arms the window on every tick the gate reads true, not only on
    /// the rising edge, so the window slides while the gate is held.
    pub fn evaluate(&mut self, now: Instant) -> ClueAction {
        let Some(gate) = self.gate else {
            self.state = ClueState::Visible;
            return ClueAction::Show;
        };

        gate.start_read();
        let gate_on = match gate.read().as_boolean() {
            Ok(value) => value,
            Err(_) => {
                error!("Clue trigger {} must be a boolean sensor", gate.name());
                return ClueAction::Skipped;
            }
        };

        let armed_at = *self.armed_at.get_or_insert(now);

        let action = if gate_on || now.micros_since(armed_at) < self.timeout_us {
            self.state = ClueState::Visible;
            ClueAction::Show
        } else {
            self.state = ClueState::Suppressed;
            ClueAction::Clear
        };

        if gate_on {
            self.armed_at = Some(now);
        }

        action
    }
}
