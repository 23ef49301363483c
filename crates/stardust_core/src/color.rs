use serde::{Deserialize, Serialize};

use crate::constants::STAR_BIRTH_DURATION;

/// 8-bit sRGB color, engine independent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a 0xRRGGBB literal
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Channel-wise linear blend, `t` clamped to [0, 1], rounded to nearest
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }

    /// Channels as floats in [0, 1]
    pub fn to_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

const DARK_GRAY: Rgb = Rgb::from_hex(0x404040);
const GRAY: Rgb = Rgb::from_hex(0x808080);
const BLUE: Rgb = Rgb::from_hex(0x4169e1);
const GREEN: Rgb = Rgb::from_hex(0x228b22);
const BEIGE: Rgb = Rgb::from_hex(0xf5e6b8);
const YELLOW: Rgb = Rgb::from_hex(0xffd700);
const WHITE: Rgb = Rgb::from_hex(0xffffff);

/// Banded color ramp by mass:
/// dust (<3) dark gray to gray, rocky/ocean worlds (<60) blue to green to beige,
/// gas giants (<300) beige to yellow, stars yellow to white.
pub fn color_for_mass(mass: f64) -> Rgb {
    if mass < 3.0 {
        DARK_GRAY.lerp(GRAY, (mass / 3.0).min(1.0))
    } else if mass < 60.0 {
        let factor = (mass - 3.0) / 57.0;
        if factor < 0.5 {
            BLUE.lerp(GREEN, factor * 2.0)
        } else {
            GREEN.lerp(BEIGE, (factor - 0.5) * 2.0)
        }
    } else if mass < 300.0 {
        BEIGE.lerp(YELLOW, (mass - 60.0) / 240.0)
    } else {
        YELLOW.lerp(WHITE, ((mass - 300.0) / 200.0).min(1.0))
    }
}

/// Luminosity multiplier for a star's glow.
///
/// Returns 1.0 for stars without a recorded birth or whose flare is over.
/// During the first [`STAR_BIRTH_DURATION`] seconds the glow ramps in with an
/// ease-out cubic while an extra boost decays from 7x down to 1x.
pub fn star_glow_multiplier(birth_time: Option<f64>, now: f64) -> f64 {
    let Some(birth) = birth_time else {
        return 1.0;
    };
    let since = now - birth;
    if !(0.0..STAR_BIRTH_DURATION).contains(&since) {
        return 1.0;
    }
    let progress = since / STAR_BIRTH_DURATION;
    let ramp = 1.0 - (1.0 - progress).powi(3);
    ramp * (1.0 + (1.0 - progress) * 6.0)
}
