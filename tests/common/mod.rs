//! Shared mocks for the integration tests

#![allow(dead_code)]

use standby_lamp_controller::config::{REFERENCE_CHANNELS, REFERENCE_LEDS};
use standby_lamp_controller::{
    Controller, ControllerConfig, Instant, OutputDriver, PowerControl, Rgb, SampleSource,
};

pub type ReferenceController = Controller<REFERENCE_CHANNELS, REFERENCE_LEDS>;

/// Raw counts at the reference band centers, level 3 down to level 0
pub const TOP: u16 = 4096;
pub const UPPER: u16 = 2700;
pub const LOWER: u16 = 1300;
pub const BOTTOM: u16 = 0;

/// Halfway between the two middle bands
pub const GAP: u16 = 2000;

pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
pub const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

pub fn reference_controller(now: Instant) -> ReferenceController {
    ReferenceController::new(&ControllerConfig::reference(), now).unwrap()
}

/// Sample source returning whatever is currently stored per channel
pub struct FixedSource<const N: usize> {
    pub samples: [u16; N],
    pub reads: usize,
}

impl<const N: usize> FixedSource<N> {
    pub const fn new(samples: [u16; N]) -> Self {
        Self { samples, reads: 0 }
    }
}

impl<const N: usize> SampleSource for FixedSource<N> {
    fn read_sample(&mut self, channel: usize) -> u16 {
        self.reads += 1;
        self.samples[channel]
    }
}

/// LED driver keeping every transmitted frame
#[derive(Default)]
pub struct RecordingDriver {
    pub frames: Vec<Vec<Rgb>>,
}

impl RecordingDriver {
    pub fn last(&self) -> &[Rgb] {
        self.frames.last().map(Vec::as_slice).unwrap_or(&[])
    }
}

impl OutputDriver for RecordingDriver {
    fn write(&mut self, colors: &[Rgb]) {
        self.frames.push(colors.to_vec());
    }
}

/// Power control recording rail changes and halt calls
#[derive(Default)]
pub struct RecordingPower {
    pub rail: Vec<bool>,
    pub halts: usize,
}

impl PowerControl for RecordingPower {
    fn set_power_rail(&mut self, enabled: bool) {
        self.rail.push(enabled);
    }

    fn halt(&mut self) {
        self.halts += 1;
    }
}
