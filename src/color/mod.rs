//! Color type and intensity scaling

use smart_leds::RGB8;

pub type Rgb = RGB8;

/// Fully dark pixel
pub const OFF: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Scale every channel of `color` by `intensity` (0.0-1.0)
///
/// Fractions are truncated, matching how the lamp chain quantizes
/// floating-point intensities.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn scale_color(color: Rgb, intensity: f32) -> Rgb {
    let intensity = intensity.clamp(0.0, 1.0);
    let scale = |channel: u8| (f32::from(channel) * intensity) as u8;
    Rgb {
        r: scale(color.r),
        g: scale(color.g),
        b: scale(color.b),
    }
}
