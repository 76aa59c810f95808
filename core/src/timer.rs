//! Tick-counted countdowns shared by every simulated actor.
//!
//! Two flavours exist. A [`RepeatingTimer`] reports completion for exactly
//! one tick per cycle and silently begins the next cycle on the following
//! tick. A [`FixedTimer`] latches once it completes and never resets.

use std::num::NonZeroU32;

use thiserror::Error;

/// Reasons a countdown cannot be constructed.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum TimerError {
    /// A countdown must last at least one tick.
    #[error("timer duration must be at least one tick")]
    ZeroDuration,
}

/// Converts a tick count into a duration usable in `const` contexts.
///
/// Evaluating this with zero inside a constant is a compile-time error.
#[must_use]
pub const fn ticks(value: u32) -> NonZeroU32 {
    match NonZeroU32::new(value) {
        Some(duration) => duration,
        None => panic!("timer durations must be positive"),
    }
}

/// Common contract of all tick-driven countdowns.
pub trait Countdown {
    /// Advances the countdown by a single tick.
    fn tick(&mut self);

    /// Reports whether the countdown reached its duration.
    fn is_finished(&self) -> bool;
}

/// Countdown that starts a fresh cycle on the tick after it finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepeatingTimer {
    duration: NonZeroU32,
    elapsed: u32,
}

impl RepeatingTimer {
    /// Creates a repeating timer that finishes every `duration` ticks.
    #[must_use]
    pub const fn new(duration: NonZeroU32) -> Self {
        Self {
            duration,
            elapsed: 0,
        }
    }

    /// Creates a repeating timer from a runtime tick count.
    pub fn try_new(duration: u32) -> Result<Self, TimerError> {
        NonZeroU32::new(duration)
            .map(Self::new)
            .ok_or(TimerError::ZeroDuration)
    }

    /// Number of ticks in a single cycle.
    #[must_use]
    pub const fn duration(&self) -> u32 {
        self.duration.get()
    }

    /// Ticks accumulated in the current cycle.
    #[must_use]
    pub const fn elapsed(&self) -> u32 {
        self.elapsed
    }
}

impl Countdown for RepeatingTimer {
    fn tick(&mut self) {
        if self.is_finished() {
            self.elapsed = 0;
        }
        self.elapsed += 1;
    }

    fn is_finished(&self) -> bool {
        self.elapsed >= self.duration.get()
    }
}

/// One-shot countdown that stays finished once it completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedTimer {
    duration: NonZeroU32,
    elapsed: u32,
}

impl FixedTimer {
    /// Creates a one-shot timer that finishes after `duration` ticks.
    #[must_use]
    pub const fn new(duration: NonZeroU32) -> Self {
        Self {
            duration,
            elapsed: 0,
        }
    }

    /// Creates a one-shot timer from a runtime tick count.
    pub fn try_new(duration: u32) -> Result<Self, TimerError> {
        NonZeroU32::new(duration)
            .map(Self::new)
            .ok_or(TimerError::ZeroDuration)
    }

    /// Total lifetime of the timer in ticks.
    #[must_use]
    pub const fn duration(&self) -> u32 {
        self.duration.get()
    }

    /// Ticks accumulated so far, saturating at the duration.
    #[must_use]
    pub const fn elapsed(&self) -> u32 {
        self.elapsed
    }
}

impl Countdown for FixedTimer {
    fn tick(&mut self) {
        if !self.is_finished() {
            self.elapsed += 1;
        }
    }

    fn is_finished(&self) -> bool {
        self.elapsed >= self.duration.get()
    }
}
