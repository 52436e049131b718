//! Color value types and the conversions between RGB, HSV and hex text.
//!
//! Everything in here is pure. Alpha never takes part in an HSV conversion;
//! it rides along next to the color as an independent 0-255 channel.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// True when all three channels are equal, i.e. the hue carries no information.
    pub fn is_achromatic(&self) -> bool {
        self.r == self.g && self.g == self.b
    }

    pub fn with_alpha(self, a: u8) -> Rgba {
        Rgba::new(self.r, self.g, self.b, a)
    }
}

/// 8-bit sRGB color plus straight alpha. This is what the picker hands to its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Rgba {
    fn default() -> Self {
        Self::new(0, 0, 0, 0xff)
    }
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// Random color channels, fully opaque.
    pub fn random_opaque<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(rng.gen(), rng.gen(), rng.gen(), 0xff)
    }
}

/// HSV with `h` in degrees `[0, 360)` and `s`, `v` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }
}

fn to_channel(unit: f64) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let Hsv { h, s, v } = hsv;
    let channel = |n: f64| {
        let k = (n + h / 60.0).rem_euclid(6.0);
        to_channel(v - v * s * k.min(4.0 - k).min(1.0).clamp(0.0, 1.0))
    };
    Rgb::new(channel(5.0), channel(3.0), channel(1.0))
}

/// Converts to HSV. Achromatic input yields `h = 0` and `s = 0`; keeping a
/// previously chosen hue across gray colors is up to the caller.
pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let (r, g, b) = (
        f64::from(rgb.r) / 255.0,
        f64::from(rgb.g) / 255.0,
        f64::from(rgb.b) / 255.0,
    );
    let v = r.max(g).max(b);
    let c = v - r.min(g).min(b);

    if rgb.is_achromatic() {
        return Hsv::new(0.0, 0.0, v);
    }

    // Branch on the integer channels so the max test is exact.
    let max = rgb.r.max(rgb.g).max(rgb.b);
    let sector = if rgb.r == max {
        (g - b) / c
    } else if rgb.g == max {
        2.0 + (b - r) / c
    } else {
        4.0 + (r - g) / c
    };

    let mut h = 60.0 * sector.rem_euclid(6.0);
    if h >= 360.0 {
        h = 0.0;
    }
    let s = if v > 0.0 { c / v } else { 0.0 };
    Hsv::new(h, s, v)
}

/// The fully saturated, full value color of a hue.
pub fn hue_color(h: f64) -> Rgb {
    hsv_to_rgb(Hsv::new(h, 1.0, 1.0))
}

pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb.r, rgb.g, rgb.b)
}

pub fn rgba_to_hex(rgba: Rgba) -> String {
    format!("#{:02X}{:02X}{:02X}{:02X}", rgba.r, rgba.g, rgba.b, rgba.a)
}

/// Parses `#RRGGBB`. Only the three digit pairs after the `#` are read.
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let pair = |at: usize| hex.get(at..at + 2).and_then(|p| u8::from_str_radix(p, 16).ok());
    Some(Rgb::new(pair(1)?, pair(3)?, pair(5)?))
}
