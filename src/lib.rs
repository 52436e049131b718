//! Color picker core: HSV/RGB/hex conversion and the state that keeps a
//! drag square, hue slider, alpha slider and hex field in agreement.

pub mod color;
pub mod config;
pub mod events;
pub mod hex;
pub mod picker;
pub mod readout;
pub mod surface;
pub mod widget;

pub use color::{hex_to_rgb, hsv_to_rgb, rgb_to_hex, rgb_to_hsv, Hsv, Rgb, Rgba};
pub use events::Subscription;
pub use hex::{normalize_hex, HexColor, HexError, HexInput};
pub use picker::{Picker, PickerState, Position, YAxis};
pub use widget::{ColorPickerWidget, PickerView};
