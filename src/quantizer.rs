//! Band classifier for analog level inputs
//!
//! Maps a raw ADC count onto one of a sparse set of band centers. Bands are
//! separated by gaps; a sample landing in a gap (a switch caught between
//! detents, contact bounce) is reported as [`Classification::Invalid`] rather
//! than snapped to the nearest band.

use heapless::Vec;

use crate::error::ConfigError;

/// Maximum number of bands in one table
pub const MAX_BANDS: usize = 8;

/// Discrete level of one input
///
/// The highest band center maps to the highest level, the lowest center to
/// level 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(u8);

impl Level {
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Result of classifying a single sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Sample lies within tolerance of a band center
    Level(Level),
    /// Sample lies between bands
    Invalid,
}

impl Classification {
    pub const fn level(self) -> Option<Level> {
        match self {
            Self::Level(level) => Some(level),
            Self::Invalid => None,
        }
    }

    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Level(_))
    }
}

/// Classifies raw samples against a descending table of band centers
#[derive(Debug, Clone)]
pub struct LevelQuantizer {
    /// Band centers, highest first
    centers: Vec<u16, MAX_BANDS>,
    /// Half-width of each band's acceptance window (exclusive)
    tolerance: u16,
}

impl LevelQuantizer {
    /// Create a quantizer from band centers listed highest first
    ///
    /// Centers must be strictly decreasing and their tolerance windows must
    /// not overlap, so a sample can never match two bands.
    pub fn new(centers: &[u16], tolerance: u16) -> Result<Self, ConfigError> {
        if centers.is_empty() {
            return Err(ConfigError::EmptyBandTable);
        }
        if tolerance == 0 {
            return Err(ConfigError::ZeroTolerance);
        }
        let centers = Vec::from_slice(centers)
            .map_err(|()| ConfigError::TooManyBands { capacity: MAX_BANDS })?;

        for (offset, pair) in centers.windows(2).enumerate() {
            let index = offset + 1;
            let (upper, lower) = (pair[0], pair[1]);
            if upper <= lower {
                return Err(ConfigError::BandsNotDecreasing { index });
            }
            // Windows are open intervals, so touching edges are still disjoint.
            if u32::from(upper - lower) < 2 * u32::from(tolerance) {
                return Err(ConfigError::OverlappingBands { index });
            }
        }

        Ok(Self { centers, tolerance })
    }

    /// Number of distinct levels this quantizer can produce
    pub fn level_count(&self) -> usize {
        self.centers.len()
    }

    pub const fn tolerance(&self) -> u16 {
        self.tolerance
    }

    /// Classify one raw sample
    ///
    /// Scans from the highest band down and returns the first band whose
    /// center lies strictly within tolerance of the sample.
    #[allow(clippy::cast_possible_truncation)]
    pub fn classify(&self, sample: u16) -> Classification {
        let top = self.centers.len() - 1;
        self.centers
            .iter()
            .position(|&center| sample.abs_diff(center) < self.tolerance)
            .map_or(Classification::Invalid, |position| {
                Classification::Level(Level::new((top - position) as u8))
            })
    }
}
