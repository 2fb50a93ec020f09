//! Cyclic mode selection with a transition lockout.
//!
//! A cycle signal moves one step forward or backward through the mode list.
//! After an accepted step the sequencer stays locked for a settle window so
//! noisy input (a trackpad fling, a spinning wheel) can only advance once
//! while the particles are still easing toward the new layout.

use crate::layout::Mode;

/// How long the sequencer stays locked after a mode change.
pub const SETTLE_MS: f64 = 1200.0;

/// Signals with a smaller magnitude are ignored.
pub const CYCLE_THRESHOLD: f32 = 10.0;

/// Direction of a mode change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// A request to move to the next or previous mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleSignal {
    pub direction: Direction,
    pub magnitude: f32,
}

impl CycleSignal {
    pub fn new(direction: Direction, magnitude: f32) -> Self {
        Self { direction, magnitude }
    }

    /// Interpret a vertical scroll delta in pixels (positive = scroll down = forward).
    pub fn from_scroll(delta_y: f32) -> Self {
        let direction = if delta_y > 0.0 {
            Direction::Forward
        } else {
            Direction::Backward
        };
        Self::new(direction, delta_y.abs())
    }
}

/// What the sequencer did with a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The mode changed to the contained one.
    Advanced(Mode),
    /// Magnitude below the threshold, or not a finite number.
    TooSmall,
    /// A previous change is still settling.
    Locked,
}

/// Ordered, cyclic list of modes and the lockout state.
#[derive(Debug, Clone)]
pub struct ModeSequencer {
    modes: Vec<Mode>,
    index: usize,
    settle_ms: f64,
    threshold: f32,
    unlock_at: Option<f64>,
}

impl ModeSequencer {
    /// Create a sequencer starting at the first mode.
    ///
    /// An empty list falls back to [`Mode::ALL`].
    pub fn new(modes: Vec<Mode>) -> Self {
        let modes = if modes.is_empty() { Mode::ALL.to_vec() } else { modes };
        Self {
            modes,
            index: 0,
            settle_ms: SETTLE_MS,
            threshold: CYCLE_THRESHOLD,
            unlock_at: None,
        }
    }

    pub fn with_settle_ms(mut self, settle_ms: f64) -> Self {
        self.settle_ms = settle_ms.max(0.0);
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold.max(0.0);
        self
    }

    /// The active mode.
    #[inline]
    pub fn current(&self) -> Mode {
        self.modes[self.index]
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn modes(&self) -> &[Mode] {
        &self.modes
    }

    /// Whether a change at `now_ms` would be rejected by the lockout.
    pub fn is_locked(&self, now_ms: f64) -> bool {
        self.unlock_at.is_some_and(|deadline| now_ms < deadline)
    }

    /// Release an expired lockout.
    pub fn poll(&mut self, now_ms: f64) {
        if self.unlock_at.is_some() && !self.is_locked(now_ms) {
            self.unlock_at = None;
        }
    }

    /// Apply a cycle signal received at `now_ms`.
    pub fn cycle(&mut self, signal: CycleSignal, now_ms: f64) -> CycleOutcome {
        self.poll(now_ms);
        if self.unlock_at.is_some() {
            return CycleOutcome::Locked;
        }
        if !signal.magnitude.is_finite() || signal.magnitude < self.threshold {
            return CycleOutcome::TooSmall;
        }

        let len = self.modes.len();
        self.index = match signal.direction {
            Direction::Forward => (self.index + 1) % len,
            Direction::Backward => (self.index + len - 1) % len,
        };
        self.unlock_at = Some(now_ms + self.settle_ms);
        CycleOutcome::Advanced(self.current())
    }

    /// Drop any pending unlock. The sequencer is left unlocked.
    pub fn cancel_lockout(&mut self) {
        self.unlock_at = None;
    }
}

impl Default for ModeSequencer {
    fn default() -> Self {
        Self::new(Mode::ALL.to_vec())
    }
}
