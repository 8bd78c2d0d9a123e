//! Idle-driven power policy
//!
//! The device walks through three modes as the inputs stay untouched:
//!
//! - `Normal`: live state is shown on the lamps
//! - `Standby`: one lamp pulses to warn about the coming shutdown
//! - `Shutdown`: lamps dark, power rail released, device halted
//!
//! Both timeouts are measured from the same idle anchor. Shutdown is
//! terminal; once entered the controller never leaves it.

use embassy_time::Duration;

use crate::error::ConfigError;

/// Default idle time before standby (5 minutes)
pub const DEFAULT_STANDBY_TIMEOUT: Duration = Duration::from_secs(300);

/// Default idle time before shutdown
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(400);

/// Operating mode of the device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PowerMode {
    #[default]
    Normal,
    Standby,
    Shutdown,
}

/// Idle thresholds for the power policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerTimeouts {
    pub standby: Duration,
    pub shutdown: Duration,
}

impl Default for PowerTimeouts {
    fn default() -> Self {
        Self {
            standby: DEFAULT_STANDBY_TIMEOUT,
            shutdown: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }
}

impl PowerTimeouts {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.standby >= self.shutdown {
            return Err(ConfigError::TimeoutOrder);
        }
        Ok(())
    }

    /// Mode implied by the idle duration alone
    pub fn classify(&self, idle: Duration) -> PowerMode {
        if idle >= self.shutdown {
            PowerMode::Shutdown
        } else if idle >= self.standby {
            PowerMode::Standby
        } else {
            PowerMode::Normal
        }
    }
}

/// Constants of the standby pulse animation
///
/// Each step raises the counter to `exponent`; once it reaches `ceiling` it
/// restarts at `floor`. The lamp intensity is `counter / divisor`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseConfig {
    pub floor: f32,
    pub ceiling: f32,
    pub exponent: f32,
    pub divisor: f32,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            floor: 1.1,
            ceiling: 10.0,
            exponent: 1.05,
            divisor: 100.0,
        }
    }
}

impl PulseConfig {
    /// Counter must grow on every step and the resulting intensity must stay
    /// within 0.0-1.0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid = self.floor > 1.0
            && self.ceiling > self.floor
            && self.exponent > 1.0
            && self.divisor >= self.ceiling
            && self.ceiling.is_finite()
            && self.exponent.is_finite()
            && self.divisor.is_finite();
        if valid {
            Ok(())
        } else {
            Err(ConfigError::InvalidPulse)
        }
    }
}

/// Phase of the standby pulse, kept inside `[floor, ceiling)`
#[derive(Debug, Clone, Copy)]
pub struct PulseCounter {
    value: f32,
    config: PulseConfig,
}

impl PulseCounter {
    pub const fn new(config: PulseConfig) -> Self {
        Self {
            value: config.floor,
            config,
        }
    }

    /// Start the counter at an arbitrary phase
    ///
    /// Values outside `[floor, ceiling)` restart at the floor.
    #[must_use]
    pub fn starting_at(mut self, value: f32) -> Self {
        self.value = if value >= self.config.floor && value < self.config.ceiling {
            value
        } else {
            self.config.floor
        };
        self
    }

    pub const fn value(&self) -> f32 {
        self.value
    }

    /// Lamp intensity for the current phase
    pub fn intensity(&self) -> f32 {
        self.value / self.config.divisor
    }

    /// Advance one animation step and return the new value
    pub fn advance(&mut self) -> f32 {
        let next = libm::powf(self.value, self.config.exponent);
        self.value = if next >= self.config.ceiling || !next.is_finite() {
            self.config.floor
        } else {
            next
        };
        self.value
    }
}

/// Three-state power machine driven by idle time
#[derive(Debug, Clone)]
pub struct PowerModeController {
    mode: PowerMode,
    timeouts: PowerTimeouts,
    pulse: PulseCounter,
}

impl PowerModeController {
    pub fn new(timeouts: PowerTimeouts, pulse: PulseConfig) -> Result<Self, ConfigError> {
        timeouts.validate()?;
        pulse.validate()?;
        Ok(Self {
            mode: PowerMode::Normal,
            timeouts,
            pulse: PulseCounter::new(pulse),
        })
    }

    pub const fn mode(&self) -> PowerMode {
        self.mode
    }

    pub const fn timeouts(&self) -> PowerTimeouts {
        self.timeouts
    }

    pub const fn pulse(&self) -> &PulseCounter {
        &self.pulse
    }

    /// Decide the mode for this cycle
    ///
    /// The pulse advances once per cycle spent in standby. It is not reset on
    /// leaving standby, so the animation resumes where it stopped.
    pub fn update(&mut self, idle: Duration) -> PowerMode {
        if self.mode == PowerMode::Shutdown {
            return self.mode;
        }

        self.mode = self.timeouts.classify(idle);
        if self.mode == PowerMode::Standby {
            self.pulse.advance();
        }
        self.mode
    }
}
