//! Human readable renderings of the current color.

use palette::{FromColor, Hsl, Hsv, Srgb};

use crate::color::{rgb_to_hex, rgba_to_hex, Rgba};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readouts {
    pub hex: String,
    pub hex8: String,
    pub rgb: String,
    pub rgba: String,
    pub hsl: String,
    pub hsv: String,
}

fn degrees(hue: f32) -> u32 {
    (hue.round() as u32) % 360
}

impl Readouts {
    pub fn of(color: Rgba) -> Self {
        let Rgba { r, g, b, a } = color;
        let srgb = Srgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
        let hsl: Hsl = Hsl::from_color(srgb);
        let hsv: Hsv = Hsv::from_color(srgb);

        Self {
            hex: rgb_to_hex(color.rgb()),
            hex8: rgba_to_hex(color),
            rgb: format!("rgb({}, {}, {})", r, g, b),
            rgba: format!("rgba({}, {}, {}, {:.2})", r, g, b, a as f32 / 255.0),
            hsl: format!(
                "hsl({}, {:.0}%, {:.0}%)",
                degrees(hsl.hue.into_positive_degrees()),
                hsl.saturation * 100.0,
                hsl.lightness * 100.0
            ),
            hsv: format!(
                "hsv({}, {:.0}%, {:.0}%)",
                degrees(hsv.hue.into_positive_degrees()),
                hsv.saturation * 100.0,
                hsv.value * 100.0
            ),
        }
    }
}
