//! All four input surfaces wired to one picker.
//!
//! A toolkit shell forwards raw events here and renders from [`PickerView`].

use crate::color::{hue_color, Rgb, Rgba};
use crate::events::Subscription;
use crate::hex::HexInput;
use crate::picker::{Picker, Position, YAxis};
use crate::readout::Readouts;
use crate::surface::{Bounds, DragSurface};

/// What a renderer needs to draw the widget.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerView {
    pub knob: Position,
    pub hue: f64,
    /// Background of the square: the hue at full saturation and value.
    pub hue_color: Rgb,
    pub alpha: u8,
    pub value: Rgba,
    pub hex_draft: String,
    pub hex_invalid: bool,
}

pub struct ColorPickerWidget {
    picker: Picker,
    surface: DragSurface,
    hex_input: HexInput,
}

impl ColorPickerWidget {
    pub fn new(initial: Rgba, y_axis: YAxis, bounds: Bounds) -> Self {
        let picker = Picker::new(initial, y_axis);
        let hex_input = HexInput::new(picker.hex());
        Self {
            picker,
            surface: DragSurface::new(bounds),
            hex_input,
        }
    }

    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe(&self, f: impl FnMut(Rgba) + 'static) -> Subscription {
        self.picker.subscribe(f)
    }

    pub fn picker(&self) -> &Picker {
        &self.picker
    }

    pub fn value(&self) -> Rgba {
        self.picker.value()
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.surface.set_bounds(bounds);
    }

    fn sync_hex(&mut self) {
        let hex = self.picker.hex();
        self.hex_input.sync(&hex);
    }

    fn drag_to(&mut self, percent: Option<(f64, f64)>) -> Option<Rgba> {
        let (x, y) = percent?;
        let value = self.picker.on_drag(x, y);
        self.sync_hex();
        Some(value)
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) -> Option<Rgba> {
        let percent = self.surface.pointer_down(x, y);
        self.drag_to(percent)
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<Rgba> {
        let percent = self.surface.pointer_move(x, y);
        self.drag_to(percent)
    }

    /// Global release. Call it for every pointer-up, wherever it happened.
    pub fn pointer_up(&mut self) {
        self.surface.pointer_up();
    }

    pub fn hue_input(&mut self, hue: i32) -> Rgba {
        let value = self.picker.on_hue_change(hue);
        self.sync_hex();
        value
    }

    pub fn alpha_input(&mut self, alpha: i32) -> Rgba {
        self.picker.on_alpha_change(alpha)
    }

    pub fn hex_keystroke(&mut self, text: &str) {
        self.hex_input.on_input(text);
    }

    pub fn hex_commit(&mut self) -> bool {
        let accepted = self.hex_input.commit(&mut self.picker);
        self.sync_hex();
        accepted
    }

    /// Controlled update from the owner. Subscribers are not notified.
    pub fn set_value(&mut self, color: Rgba) {
        self.picker.on_external_color_set(color);
        self.sync_hex();
    }

    pub fn readouts(&self) -> Readouts {
        Readouts::of(self.picker.value())
    }

    pub fn view(&self) -> PickerView {
        let state = self.picker.state();
        PickerView {
            knob: state.position(),
            hue: state.hue(),
            hue_color: hue_color(state.hue()),
            alpha: state.alpha(),
            value: self.picker.value(),
            hex_draft: self.hex_input.draft().to_owned(),
            hex_invalid: self.hex_input.is_invalid(),
        }
    }
}
