#![no_std]

pub mod color;
pub mod config;
pub mod controller;
pub mod debouncer;
pub mod error;
pub mod poll_scheduler;
pub mod power;
pub mod quantizer;
pub mod renderer;
pub mod segment;

pub use config::{ControllerConfig, StartupConfig};
pub use controller::{Controller, CycleOutcome, CycleReport};
pub use debouncer::{DebounceOutput, FrameVerdict, IdleClock, StateDebouncer, StateVector};
pub use error::ConfigError;
pub use poll_scheduler::{PollResult, PollScheduler};
pub use power::{PowerMode, PowerModeController, PowerTimeouts, PulseConfig, PulseCounter};
pub use quantizer::{Classification, Level, LevelQuantizer};
pub use renderer::{IntensityTable, LampRenderer, StandbyLamp};
pub use segment::LampSegment;

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Analog level inputs
///
/// Implement this trait on top of the platform ADC.
pub trait SampleSource {
    /// Read one raw count from `channel`
    fn read_sample(&mut self, channel: usize) -> u16;
}

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}

/// Power rail and low-power halt
pub trait PowerControl {
    /// Assert or release the device power-enable output
    fn set_power_rail(&mut self, enabled: bool);

    /// Enter the low-power halt state
    ///
    /// On hardware this does not return.
    fn halt(&mut self);
}
