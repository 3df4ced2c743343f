//! Confetti particle field parameters.

use std::ops::Range;

/// Linear RGBA color in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Opaque color from a 0xRRGGBB literal
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Gold, tomato, deep sky blue, lime green, hot pink
pub const CONFETTI_PALETTE: [Rgba; 5] = [
    Rgba::from_hex(0xFFD700),
    Rgba::from_hex(0xFF6347),
    Rgba::from_hex(0x00BFFF),
    Rgba::from_hex(0x32CD32),
    Rgba::from_hex(0xFF69B4),
];

/// Particle allocation and initial-state ranges
///
/// Distances are in surface pixels, angles in radians. Every range is
/// half-open and sampled uniformly.
#[derive(Debug, Clone)]
pub struct ConfettiParams {
    /// Number of particles allocated per mount
    pub particle_count: usize,

    /// Strip radius (pixels); line width is half of it
    pub radius_px: Range<f32>,

    /// Cosine input for the per-particle fall speed (dimensionless)
    pub density: Range<f32>,

    /// Initial tilt (pixels of horizontal skew, floored to whole pixels)
    pub initial_tilt_px: Range<f32>,

    /// Tilt angle advance per frame (radians)
    pub tilt_angle_increment: Range<f32>,

    /// Amplitude of the tilt sway (pixels)
    pub tilt_sway_px: f32,

    /// Phase offset between neighbouring particles is index / this
    pub sway_phase_divisor: f32,

    /// Extra distance below the surface still counted as on screen (pixels)
    pub offscreen_margin_px: f32,

    /// Colors picked uniformly per particle
    pub palette: Vec<Rgba>,
}

impl Default for ConfettiParams {
    fn default() -> Self {
        Self {
            particle_count: 150,
            radius_px: 5.0..15.0,
            density: 10.0..160.0,
            initial_tilt_px: -10.0..0.0,
            tilt_angle_increment: 0.05..0.12,
            tilt_sway_px: 15.0,
            sway_phase_divisor: 3.0,
            offscreen_margin_px: 20.0,
            palette: CONFETTI_PALETTE.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_channels() {
        let gold = Rgba::from_hex(0xFFD700);
        assert_eq!(gold.r, 1.0);
        assert!((gold.g - 215.0 / 255.0).abs() < 1e-6);
        assert_eq!(gold.b, 0.0);
        assert_eq!(gold.a, 1.0);
    }
}
