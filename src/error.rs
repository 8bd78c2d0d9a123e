//! Configuration errors
//!
//! The controller has no runtime error path: ambiguous readings are absorbed
//! by the debouncer and shutdown is a regular outcome. Everything that can go
//! wrong is caught when the tables are loaded.

use core::fmt;

/// Rejected controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Band table has no centers
    EmptyBandTable,
    /// More band centers than the quantizer can hold
    TooManyBands { capacity: usize },
    /// Tolerance window of zero counts matches nothing
    ZeroTolerance,
    /// Band center at `index` is not below its predecessor
    BandsNotDecreasing { index: usize },
    /// Tolerance window of band `index` overlaps its predecessor
    OverlappingBands { index: usize },
    /// Intensity table length differs from the number of quantized levels
    IntensityLevelMismatch { levels: usize, intensities: usize },
    /// More intensities than the renderer can hold
    TooManyIntensities { capacity: usize },
    /// Intensity at `index` is outside 0.0-1.0
    IntensityOutOfRange { index: usize },
    /// Every channel needs exactly one lamp segment
    ChannelSegmentMismatch { channels: usize, segments: usize },
    /// More segments than the renderer can hold
    TooManySegments { capacity: usize },
    /// Segment at `index` has no LEDs
    EmptySegment { index: usize },
    /// Segment at `index` leaves LEDs unowned before it
    SegmentGap { index: usize },
    /// Segment at `index` starts inside its predecessor
    SegmentOverlap { index: usize },
    /// Segments do not add up to the frame buffer length
    FrameLengthMismatch { expected: usize, actual: usize },
    /// Referenced segment does not exist
    SegmentOutOfRange { index: usize },
    /// Standby timeout must be strictly shorter than shutdown timeout
    TimeoutOrder,
    /// Pulse constants cannot keep the counter inside `[floor, ceiling)`
    InvalidPulse,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBandTable => write!(f, "band table must have at least one center"),
            Self::TooManyBands { capacity } => {
                write!(f, "band table exceeds capacity of {capacity}")
            }
            Self::ZeroTolerance => write!(f, "band tolerance must be non-zero"),
            Self::BandsNotDecreasing { index } => {
                write!(f, "band {index} is not below the previous band")
            }
            Self::OverlappingBands { index } => {
                write!(f, "tolerance window of band {index} overlaps the previous band")
            }
            Self::IntensityLevelMismatch {
                levels,
                intensities,
            } => write!(
                f,
                "{levels} levels need exactly as many intensities, got {intensities}"
            ),
            Self::TooManyIntensities { capacity } => {
                write!(f, "intensity table exceeds capacity of {capacity}")
            }
            Self::IntensityOutOfRange { index } => {
                write!(f, "intensity {index} is outside 0.0-1.0")
            }
            Self::ChannelSegmentMismatch { channels, segments } => write!(
                f,
                "{channels} channels need as many lamp segments, got {segments}"
            ),
            Self::TooManySegments { capacity } => {
                write!(f, "segment table exceeds capacity of {capacity}")
            }
            Self::EmptySegment { index } => write!(f, "segment {index} has no LEDs"),
            Self::SegmentGap { index } => {
                write!(f, "LEDs before segment {index} are not owned by any segment")
            }
            Self::SegmentOverlap { index } => {
                write!(f, "segment {index} overlaps the previous segment")
            }
            Self::FrameLengthMismatch { expected, actual } => write!(
                f,
                "segments cover {actual} LEDs but the frame buffer holds {expected}"
            ),
            Self::SegmentOutOfRange { index } => write!(f, "segment {index} does not exist"),
            Self::TimeoutOrder => {
                write!(f, "standby timeout must be shorter than shutdown timeout")
            }
            Self::InvalidPulse => write!(f, "pulse constants must satisfy 1 < floor < ceiling"),
        }
    }
}
