//! Frame-level debounce of quantized inputs
//!
//! A frame is accepted only when every channel classifies to a level. One
//! ambiguous channel discards the whole frame and the previous state vector
//! stays in place, so a partially-settled switch never leaks into the output.

use embassy_time::{Duration, Instant};

use crate::quantizer::{Classification, Level, LevelQuantizer};

/// Validated levels of all channels, indexed by channel
pub type StateVector<const N: usize> = [Level; N];

/// Tracks when the state vector last changed
#[derive(Debug, Clone, Copy)]
pub struct IdleClock {
    last_changed: Instant,
}

impl IdleClock {
    pub const fn new(now: Instant) -> Self {
        Self { last_changed: now }
    }

    pub const fn last_changed(&self) -> Instant {
        self.last_changed
    }

    /// Mark a change at `now`
    ///
    /// The anchor never moves backwards.
    pub fn touch(&mut self, now: Instant) {
        if now > self.last_changed {
            self.last_changed = now;
        }
    }

    /// Time elapsed since the last change
    pub fn idle(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_changed)
    }
}

/// What happened to the frame fed to [`StateDebouncer::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameVerdict {
    /// All channels valid, same levels as before
    Unchanged,
    /// All channels valid, at least one level differs
    Changed,
    /// At least one channel was ambiguous, frame dropped
    Discarded,
}

/// Debounce result for one poll cycle
#[derive(Debug, Clone, Copy)]
pub struct DebounceOutput<const N: usize> {
    /// Current (new or retained) state vector
    pub state: StateVector<N>,
    /// Time since the last confirmed change
    pub idle: Duration,
    pub verdict: FrameVerdict,
}

/// Combines per-channel classifications into a validated state vector
#[derive(Debug, Clone)]
pub struct StateDebouncer<const N: usize> {
    state: StateVector<N>,
    clock: IdleClock,
}

impl<const N: usize> StateDebouncer<N> {
    /// Create a debouncer with every channel at level 0
    pub const fn new(now: Instant) -> Self {
        Self {
            state: [Level::new(0); N],
            clock: IdleClock::new(now),
        }
    }

    pub const fn state(&self) -> &StateVector<N> {
        &self.state
    }

    pub const fn clock(&self) -> &IdleClock {
        &self.clock
    }

    /// Re-anchor the idle clock without touching the state vector
    pub fn restart_clock(&mut self, now: Instant) {
        self.clock.touch(now);
    }

    /// Feed one sample per channel
    pub fn update(
        &mut self,
        quantizer: &LevelQuantizer,
        samples: &[u16; N],
        now: Instant,
    ) -> DebounceOutput<N> {
        let mut candidate = [Level::default(); N];
        for (slot, &sample) in candidate.iter_mut().zip(samples) {
            match quantizer.classify(sample) {
                Classification::Level(level) => *slot = level,
                Classification::Invalid => return self.output(now, FrameVerdict::Discarded),
            }
        }

        if candidate == self.state {
            return self.output(now, FrameVerdict::Unchanged);
        }

        self.state = candidate;
        self.clock.touch(now);
        self.output(now, FrameVerdict::Changed)
    }

    fn output(&self, now: Instant, verdict: FrameVerdict) -> DebounceOutput<N> {
        DebounceOutput {
            state: self.state,
            idle: self.clock.idle(now),
            verdict,
        }
    }
}
