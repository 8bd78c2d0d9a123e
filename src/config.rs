//! Controller configuration and the reference device tables
//!
//! All tables are borrowed here and copied into bounded storage when the
//! controller is built, so a configuration can live in flash as a `const`.

use embassy_time::Duration;

use crate::color::Rgb;
use crate::error::ConfigError;
use crate::power::{PowerTimeouts, PulseConfig};
use crate::renderer::StandbyLamp;
use crate::segment::LampSegment;

/// Default delay between poll cycles
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Band centers of the reference rotary inputs, highest first
pub const REFERENCE_BANDS: [u16; 4] = [4096, 2700, 1300, 0];

/// Acceptance half-width around each band center
pub const REFERENCE_TOLERANCE: u16 = 100;

/// Lamp intensity per level, level 0 (lowest band) first; the top band is dark
pub const REFERENCE_INTENSITIES: [f32; 4] = [0.3, 0.1, 0.02, 0.0];

/// Number of level inputs on the reference device
pub const REFERENCE_CHANNELS: usize = 5;

/// Number of LEDs on the reference lamp chain
pub const REFERENCE_LEDS: usize = 34;

const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

/// Lamp segments of the reference chain, one per input
pub const REFERENCE_SEGMENTS: [LampSegment; REFERENCE_CHANNELS] = [
    LampSegment::new(0, 6, RED),
    LampSegment::new(6, 7, RED),
    LampSegment::new(13, 7, RED),
    LampSegment::new(20, 7, RED),
    LampSegment::new(27, 7, WHITE),
];

/// Splash shown before the power rail is enabled
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartupConfig {
    /// Segment lit during the splash
    pub segment: usize,
    /// Splash intensity, clamped to 0.0-1.0
    pub intensity: f32,
    /// How long the splash is held before the rail comes up
    pub hold: Duration,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            segment: 0,
            intensity: 0.5,
            hold: Duration::from_millis(500),
        }
    }
}

/// Full controller configuration
#[derive(Debug, Clone)]
pub struct ControllerConfig<'a> {
    /// Band centers, highest first
    pub bands: &'a [u16],
    pub tolerance: u16,
    /// Lamp intensity per level, level 0 first, one entry per band
    pub intensities: &'a [f32],
    /// Lamp segments in chain order, segment `i` shows channel `i`
    pub segments: &'a [LampSegment],
    pub standby: StandbyLamp,
    pub timeouts: PowerTimeouts,
    pub pulse: PulseConfig,
    pub poll_interval: Duration,
    pub startup: StartupConfig,
}

impl ControllerConfig<'static> {
    /// Configuration of the reference device
    pub fn reference() -> Self {
        Self {
            bands: &REFERENCE_BANDS,
            tolerance: REFERENCE_TOLERANCE,
            intensities: &REFERENCE_INTENSITIES,
            segments: &REFERENCE_SEGMENTS,
            standby: StandbyLamp {
                segment: 0,
                color: GREEN,
            },
            timeouts: PowerTimeouts::default(),
            pulse: PulseConfig::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            startup: StartupConfig::default(),
        }
    }
}

impl ControllerConfig<'_> {
    /// Checks spanning more than one table
    ///
    /// Table-local checks (band ordering, segment tiling, ...) are done by the
    /// components that own the tables.
    pub(crate) fn check_layout(&self, channels: usize) -> Result<(), ConfigError> {
        if self.segments.len() != channels {
            return Err(ConfigError::ChannelSegmentMismatch {
                channels,
                segments: self.segments.len(),
            });
        }
        if self.intensities.len() != self.bands.len() {
            return Err(ConfigError::IntensityLevelMismatch {
                levels: self.bands.len(),
                intensities: self.intensities.len(),
            });
        }
        if self.startup.segment >= self.segments.len() {
            return Err(ConfigError::SegmentOutOfRange {
                index: self.startup.segment,
            });
        }
        Ok(())
    }
}
