//! The picker's canonical state and the rules for editing it.
//!
//! [`PickerState`] is a plain value: hue, alpha and the knob position on the
//! saturation/value square. Every input surface maps to a pure transition on
//! it. [`Picker`] owns one, remembers the last resolved [`Rgba`], and tells
//! its subscribers whenever a user edit changes that value.

use log::{debug, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::{hsv_to_rgb, rgb_to_hex, rgb_to_hsv, Hsv, Rgb, Rgba};
use crate::events::{Listeners, Subscription};
use crate::hex::{normalize_hex, HexColor, HexError};

pub const HUE_MAX: i32 = 359;

/// Which edge of the square is full brightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum YAxis {
    /// `y = 0` is `v = 1`, like a screen where the black gradient sits at the bottom.
    #[default]
    TopBright,
    BottomBright,
}

/// Knob position on the square, in percent of its width/height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

fn clamp_percent(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 100.0)
    }
}

impl Position {
    pub fn clamped(x: f64, y: f64) -> Self {
        Self {
            x: clamp_percent(x),
            y: clamp_percent(y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickerState {
    hue: f64,
    alpha: u8,
    position: Position,
    y_axis: YAxis,
}

impl PickerState {
    /// Derives hue, saturation/value and alpha from a color. A gray color starts at hue 0.
    pub fn from_rgba(color: Rgba, y_axis: YAxis) -> Self {
        let hsv = rgb_to_hsv(color.rgb());
        Self {
            hue: hsv.h,
            alpha: color.a,
            position: Self::position_for(hsv, y_axis),
            y_axis,
        }
    }

    fn position_for(hsv: Hsv, y_axis: YAxis) -> Position {
        let y = match y_axis {
            YAxis::TopBright => 1.0 - hsv.v,
            YAxis::BottomBright => hsv.v,
        };
        Position::clamped(hsv.s * 100.0, y * 100.0)
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn y_axis(&self) -> YAxis {
        self.y_axis
    }

    pub fn saturation(&self) -> f64 {
        self.position.x / 100.0
    }

    pub fn value(&self) -> f64 {
        let y = self.position.y / 100.0;
        match self.y_axis {
            YAxis::TopBright => 1.0 - y,
            YAxis::BottomBright => y,
        }
    }

    pub fn hsv(&self) -> Hsv {
        Hsv::new(self.hue, self.saturation(), self.value())
    }

    pub fn rgb(&self) -> Rgb {
        hsv_to_rgb(self.hsv())
    }

    pub fn rgba(&self) -> Rgba {
        self.rgb().with_alpha(self.alpha)
    }

    pub fn dragged(self, x: f64, y: f64) -> Self {
        Self {
            position: Position::clamped(x, y),
            ..self
        }
    }

    pub fn with_hue(self, hue: i32) -> Self {
        Self {
            hue: f64::from(hue.clamp(0, HUE_MAX)),
            ..self
        }
    }

    pub fn with_alpha(self, alpha: i32) -> Self {
        Self {
            alpha: alpha.clamp(0, 255) as u8,
            ..self
        }
    }

    /// Moves the knob to the color's saturation/value. The hue follows only
    /// for chromatic colors; grays keep whatever hue was held before.
    pub fn with_rgb(self, rgb: Rgb) -> Self {
        let hsv = rgb_to_hsv(rgb);
        Self {
            hue: if rgb.is_achromatic() { self.hue } else { hsv.h },
            position: Self::position_for(hsv, self.y_axis),
            ..self
        }
    }
}

/// Owns the canonical state and the change listeners.
///
/// User edits go through the `on_*` methods and notify subscribers with the
/// resolved color. [`Picker::on_external_color_set`] is for the owner pushing
/// a value in and notifies nobody, so an owner that forwards every change
/// back into the picker cannot loop.
pub struct Picker {
    state: PickerState,
    value: Rgba,
    listeners: Listeners<Rgba>,
}

impl Picker {
    pub fn new(initial: Rgba, y_axis: YAxis) -> Self {
        Self {
            state: PickerState::from_rgba(initial, y_axis),
            value: initial,
            listeners: Listeners::new(),
        }
    }

    /// Standalone mode: random opaque starting color.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, y_axis: YAxis) -> Self {
        Self::new(Rgba::random_opaque(rng), y_axis)
    }

    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe(&self, f: impl FnMut(Rgba) + 'static) -> Subscription {
        self.listeners.subscribe(f)
    }

    pub fn state(&self) -> PickerState {
        self.state
    }

    /// The last resolved color, as most recently emitted or pushed in.
    pub fn value(&self) -> Rgba {
        self.value
    }

    pub fn hex(&self) -> String {
        rgb_to_hex(self.value.rgb())
    }

    fn emit(&mut self, value: Rgba) -> Rgba {
        self.value = value;
        trace!("picker emits {:?}", value);
        self.listeners.emit(value);
        value
    }

    pub fn on_drag(&mut self, x: f64, y: f64) -> Rgba {
        self.state = self.state.dragged(x, y);
        self.emit(self.state.rgba())
    }

    pub fn on_hue_change(&mut self, hue: i32) -> Rgba {
        self.state = self.state.with_hue(hue);
        self.emit(self.state.rgba())
    }

    /// Only the alpha channel of the value changes.
    pub fn on_alpha_change(&mut self, alpha: i32) -> Rgba {
        self.state = self.state.with_alpha(alpha);
        let value = self.value.rgb().with_alpha(self.state.alpha);
        self.emit(value)
    }

    /// Applies committed hex text, notifying at most once. An alpha pair
    /// is taken along with the color; when neither the color nor the alpha
    /// changes the commit is a no-op. Invalid text leaves the state
    /// untouched and is reported only to the caller.
    pub fn on_hex_commit(&mut self, text: &str) -> Result<HexColor, HexError> {
        let hex = normalize_hex(text)?;

        let mut next = self.state;
        if let Some(alpha) = hex.alpha {
            next = next.with_alpha(i32::from(alpha));
        }
        let same_rgb = hex.rgb == self.value.rgb();
        if !same_rgb {
            next = next.with_rgb(hex.rgb);
        }
        if same_rgb && next.alpha == self.value.a {
            return Ok(hex);
        }

        self.state = next;
        self.emit(hex.rgb.with_alpha(next.alpha));
        Ok(hex)
    }

    /// The owner changed the controlled value. Adopted without notifying.
    pub fn on_external_color_set(&mut self, color: Rgba) {
        if color == self.value {
            return;
        }
        debug!("picker adopts external color {:?}", color);
        self.state = self.state.with_rgb(color.rgb()).with_alpha(i32::from(color.a));
        self.value = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn from_rgba_places_knob() {
        let state = PickerState::from_rgba(Rgba::new(255, 0, 0, 10), YAxis::TopBright);
        assert_eq!(state.hue(), 0.0);
        assert_eq!(state.alpha(), 10);
        assert_eq!(state.position(), Position { x: 100.0, y: 0.0 });

        let state = PickerState::from_rgba(Rgba::new(255, 0, 0, 10), YAxis::BottomBright);
        assert_eq!(state.position(), Position { x: 100.0, y: 100.0 });
    }

    #[test]
    fn y_axis_directions_agree_on_color() {
        let top = PickerState::from_rgba(Rgba::default(), YAxis::TopBright).dragged(50.0, 25.0);
        let bottom =
            PickerState::from_rgba(Rgba::default(), YAxis::BottomBright).dragged(50.0, 75.0);
        assert!(approx(top.value(), 0.75));
        assert_eq!(top.rgb(), bottom.rgb());
    }

    #[test]
    fn drag_clamps() {
        let state = PickerState::from_rgba(Rgba::default(), YAxis::TopBright);
        assert_eq!(state.dragged(-20.0, 250.0).position(), Position { x: 0.0, y: 100.0 });
        assert_eq!(state.dragged(f64::NAN, f64::INFINITY).position(), Position { x: 0.0, y: 100.0 });
    }

    #[test]
    fn hue_and_alpha_clamp() {
        let state = PickerState::from_rgba(Rgba::default(), YAxis::TopBright);
        assert_eq!(state.with_hue(400).hue(), 359.0);
        assert_eq!(state.with_hue(-5).hue(), 0.0);
        assert_eq!(state.with_alpha(300).alpha(), 255);
        assert_eq!(state.with_alpha(-1).alpha(), 0);
    }

    #[test]
    fn gray_keeps_hue() {
        let state = PickerState::from_rgba(Rgba::new(255, 0, 0, 255), YAxis::TopBright).with_hue(200);
        let gray = state.with_rgb(Rgb::new(128, 128, 128));
        assert_eq!(gray.hue(), 200.0);
        assert_eq!(gray.saturation(), 0.0);
        assert_eq!(gray.rgb(), Rgb::new(128, 128, 128));

        // Dragging back out of the gray column restores a color of the old hue.
        assert_eq!(gray.dragged(100.0, 0.0).rgb(), Rgb::new(0, 170, 255));
    }

    #[test]
    fn alpha_change_keeps_exact_rgb() {
        let mut picker = Picker::new(Rgba::new(10, 20, 30, 255), YAxis::TopBright);
        assert_eq!(picker.on_alpha_change(7), Rgba::new(10, 20, 30, 7));
    }

    #[test]
    fn hex_commit_of_current_color_is_noop() {
        let mut picker = Picker::new(Rgba::new(255, 0, 170, 255), YAxis::TopBright);
        let before = picker.state();
        assert!(picker.on_hex_commit("#ff00aa").is_ok());
        assert_eq!(picker.state(), before);
    }

    #[test]
    fn eight_digit_commit_notifies_once() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut picker = Picker::new(Rgba::new(128, 128, 128, 255), YAxis::TopBright);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = picker.subscribe(move |c| sink.borrow_mut().push(c));

        picker.on_hex_commit("FF00AA80").unwrap();
        assert_eq!(*seen.borrow(), vec![Rgba::new(255, 0, 170, 128)]);
        assert_eq!(picker.state().alpha(), 128);

        // Same color and alpha again: nothing to report.
        picker.on_hex_commit("FF00AA80").unwrap();
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn bottom_bright_puts_black_on_top() {
        let state = PickerState::from_rgba(Rgba::new(255, 0, 0, 255), YAxis::BottomBright);
        assert_eq!(state.dragged(100.0, 0.0).rgb(), Rgb::new(0, 0, 0));
        assert_eq!(state.dragged(100.0, 100.0).rgb(), Rgb::new(255, 0, 0));
    }

    #[test]
    fn external_set_adopts_everything() {
        let mut picker = Picker::new(Rgba::default(), YAxis::TopBright);
        picker.on_external_color_set(Rgba::new(0, 0, 255, 40));
        assert_eq!(picker.state().hue(), 240.0);
        assert_eq!(picker.state().alpha(), 40);
        assert_eq!(picker.state().position(), Position { x: 100.0, y: 0.0 });
        assert_eq!(picker.value(), Rgba::new(0, 0, 255, 40));
    }
}
