//! Lamp rendering into a fixed frame buffer
//!
//! Each input channel owns one lamp segment. In normal mode a segment shows
//! its channel's level as an intensity of the segment's base color. In
//! standby only the standby segment is redrawn with the pulse, everything
//! else keeps the last normal frame. Shutdown clears the whole buffer.
//!
//! The buffer is written in place and never reallocated; the caller ships it
//! to the LED driver.

use heapless::Vec;

use crate::color::{OFF, Rgb, scale_color};
use crate::error::ConfigError;
use crate::quantizer::Level;
use crate::segment::{LampSegment, SegmentTable, bounded};

/// Maximum number of entries in the intensity table
pub const MAX_LEVELS: usize = 8;

/// Per-level lamp intensity, level 0 first
#[derive(Debug, Clone)]
pub struct IntensityTable {
    levels: Vec<f32, MAX_LEVELS>,
}

impl IntensityTable {
    pub fn new(intensities: &[f32]) -> Result<Self, ConfigError> {
        let levels = Vec::from_slice(intensities).map_err(|()| {
            ConfigError::TooManyIntensities {
                capacity: MAX_LEVELS,
            }
        })?;
        if let Some(index) = levels.iter().position(|v| !(0.0..=1.0).contains(v)) {
            return Err(ConfigError::IntensityOutOfRange { index });
        }
        Ok(Self { levels })
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Intensity for `level`, dark if the table has no entry for it
    pub fn get(&self, level: Level) -> f32 {
        self.levels.get(level.index()).copied().unwrap_or(0.0)
    }
}

/// Lamp used for the standby pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandbyLamp {
    /// Index into the segment table
    pub segment: usize,
    /// Pulse color, replaces the segment's base color while pulsing
    pub color: Rgb,
}

/// Renders levels and animations into a fixed frame buffer
///
/// Channel `i` drives segment `i`. The buffer is written in place; only the
/// segments touched by a render call change, everything else keeps its last
/// value.
pub struct LampRenderer<const LEDS: usize> {
    segments: SegmentTable,
    intensities: IntensityTable,
    standby: StandbyLamp,
    frame_buffer: [Rgb; LEDS],
}

impl<const LEDS: usize> LampRenderer<LEDS> {
    pub fn new(
        segments: &[LampSegment],
        intensities: IntensityTable,
        standby: StandbyLamp,
    ) -> Result<Self, ConfigError> {
        let segments = SegmentTable::new(segments, LEDS)?;
        if segments.get(standby.segment).is_none() {
            return Err(ConfigError::SegmentOutOfRange {
                index: standby.segment,
            });
        }
        Ok(Self {
            segments,
            intensities,
            standby,
            frame_buffer: [OFF; LEDS],
        })
    }

    pub const fn segments(&self) -> &SegmentTable {
        &self.segments
    }

    /// Last rendered frame
    pub fn frame(&self) -> &[Rgb] {
        &self.frame_buffer
    }

    /// Render each channel's level on its segment in the segment's base color
    pub fn render_levels(&mut self, state: &[Level]) -> &[Rgb] {
        for (index, &level) in state.iter().enumerate() {
            let Some(segment) = self.segments.get(index) else {
                break;
            };
            let intensity = self.intensities.get(level);
            self.fill(segment, segment.color, intensity);
        }
        &self.frame_buffer
    }

    /// Render the standby pulse, leaving other segments frozen
    pub fn render_standby(&mut self, intensity: f32) -> &[Rgb] {
        if let Some(segment) = self.segments.get(self.standby.segment) {
            self.fill(segment, self.standby.color, intensity);
        }
        &self.frame_buffer
    }

    /// Light a single segment in its base color, leaving the rest untouched
    pub fn render_segment(&mut self, index: usize, intensity: f32) -> &[Rgb] {
        if let Some(segment) = self.segments.get(index) {
            self.fill(segment, segment.color, intensity);
        }
        &self.frame_buffer
    }

    /// Drive every segment to zero intensity
    ///
    /// Segments tile the whole buffer, so this is a plain clear.
    pub fn render_dark(&mut self) -> &[Rgb] {
        self.frame_buffer.fill(OFF);
        &self.frame_buffer
    }

    fn fill(&mut self, segment: LampSegment, color: Rgb, intensity: f32) {
        let pixel = scale_color(color, intensity);
        for led in bounded(&mut self.frame_buffer, segment) {
            *led = pixel;
        }
    }
}
