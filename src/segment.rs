//! Lamp segments and the frame buffer layout they tile

use heapless::Vec;

use crate::color::Rgb;
use crate::error::ConfigError;

/// Maximum number of lamp segments on one chain
pub const MAX_SEGMENTS: usize = 16;

/// Contiguous run of LEDs sharing a base color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LampSegment {
    pub start: u16,
    pub len: u16,
    pub color: Rgb,
}

impl LampSegment {
    pub const fn new(start: u16, len: u16, color: Rgb) -> Self {
        Self { start, len, color }
    }

    /// Index one past the last LED of the segment
    pub const fn end(self) -> usize {
        self.start as usize + self.len as usize
    }
}

/// Get a slice of the LEDs owned by the segment
pub(crate) fn bounded(leds: &mut [Rgb], segment: LampSegment) -> &mut [Rgb] {
    &mut leds[segment.start as usize..segment.end()]
}

/// Segment table that tiles a chain of `leds` LEDs
///
/// Segments are listed in chain order. Each one must start exactly where the
/// previous ended, so every LED belongs to exactly one segment.
#[derive(Debug, Clone)]
pub struct SegmentTable {
    segments: Vec<LampSegment, MAX_SEGMENTS>,
}

impl SegmentTable {
    pub fn new(segments: &[LampSegment], leds: usize) -> Result<Self, ConfigError> {
        let segments = Vec::from_slice(segments).map_err(|()| ConfigError::TooManySegments {
            capacity: MAX_SEGMENTS,
        })?;

        let mut cursor = 0;
        for (index, segment) in segments.iter().enumerate() {
            let start = segment.start as usize;
            if segment.len == 0 {
                return Err(ConfigError::EmptySegment { index });
            }
            if start > cursor {
                return Err(ConfigError::SegmentGap { index });
            }
            if start < cursor {
                return Err(ConfigError::SegmentOverlap { index });
            }
            cursor = segment.end();
        }

        if cursor != leds {
            return Err(ConfigError::FrameLengthMismatch {
                expected: leds,
                actual: cursor,
            });
        }

        Ok(Self { segments })
    }

    pub fn get(&self, index: usize) -> Option<LampSegment> {
        self.segments.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = LampSegment> + '_ {
        self.segments.iter().copied()
    }
}
