slint::include_modules!();

use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use arboard::{Clipboard, SetExtLinux};
use log::{error, info, warn};
use slint::{Color, Timer, TimerMode};

use color_picker::config::{config_path, load_config, PickerConfig};
use color_picker::surface::Bounds;
use color_picker::{ColorPickerWidget, Rgb, Rgba, YAxis};

// The UI sends square coordinates already in percent.
const SQUARE: Bounds = Bounds {
    left: 0.0,
    top: 0.0,
    width: 100.0,
    height: 100.0,
};

fn rgb_color(c: Rgb) -> Color {
    Color::from_rgb_u8(c.r, c.g, c.b)
}

fn rgba_color(c: Rgba) -> Color {
    Color::from_argb_u8(c.a, c.r, c.g, c.b)
}

fn refresh(ui: &AppWindow, widget: &ColorPickerWidget) {
    let view = widget.view();
    let readouts = widget.readouts();

    ui.set_hue_color(rgb_color(view.hue_color));
    ui.set_current_color(rgba_color(view.value));
    ui.set_knob_x(view.knob.x as f32);
    ui.set_knob_y(view.knob.y as f32);
    ui.set_hue(view.hue.round() as f32);
    ui.set_alpha(f32::from(view.alpha));
    ui.set_hex_text(view.hex_draft.into());
    ui.set_hex_invalid(view.hex_invalid);

    ui.set_val_hex8(readouts.hex8.into());
    ui.set_val_rgb(readouts.rgba.into());
    ui.set_val_hsl(readouts.hsl.into());
    ui.set_val_hsv(readouts.hsv.into());
}

fn starting_color(cfg: &PickerConfig) -> Rgba {
    match cfg.initial_color() {
        Ok(Some(color)) => color,
        Ok(None) => Rgba::random_opaque(&mut rand::thread_rng()),
        Err(err) => {
            warn!("config: {}, starting from a random color", err);
            Rgba::random_opaque(&mut rand::thread_rng())
        }
    }
}

fn main() -> Result<(), slint::PlatformError> {
    env_logger::init();

    let path = config_path();
    let cfg = load_config(&path).unwrap_or_else(|err| {
        warn!("config: {}, using defaults", err);
        PickerConfig::default()
    });
    info!("config loaded from {}", path.display());

    let ui = AppWindow::new()?;
    let ui_handle = ui.as_weak();
    ui.set_bottom_bright(cfg.y_axis == YAxis::BottomBright);

    let initial = starting_color(&cfg);
    let widget = Rc::new(RefCell::new(ColorPickerWidget::new(initial, cfg.y_axis, SQUARE)));

    // The window plays the owning application: it follows every change.
    ui.set_app_background(rgba_color(initial));
    let owner_ui = ui_handle.clone();
    let _subscription = widget.borrow().subscribe(move |color| {
        if let Some(ui) = owner_ui.upgrade() {
            ui.set_app_background(rgba_color(color));
        }
    });
    refresh(&ui, &widget.borrow());

    let (ui_weak, state) = (ui_handle.clone(), widget.clone());
    ui.on_square_pressed(move |x, y| {
        if let Some(ui) = ui_weak.upgrade() {
            let mut widget = state.borrow_mut();
            if widget.pointer_down(f64::from(x), f64::from(y)).is_some() {
                refresh(&ui, &widget);
            }
        }
    });

    let (ui_weak, state) = (ui_handle.clone(), widget.clone());
    ui.on_square_moved(move |x, y| {
        if let Some(ui) = ui_weak.upgrade() {
            let mut widget = state.borrow_mut();
            if widget.pointer_move(f64::from(x), f64::from(y)).is_some() {
                refresh(&ui, &widget);
            }
        }
    });

    let state = widget.clone();
    ui.on_square_released(move || state.borrow_mut().pointer_up());

    let (ui_weak, state) = (ui_handle.clone(), widget.clone());
    ui.on_hue_changed(move |hue| {
        if let Some(ui) = ui_weak.upgrade() {
            let mut widget = state.borrow_mut();
            widget.hue_input(hue.round() as i32);
            refresh(&ui, &widget);
        }
    });

    let (ui_weak, state) = (ui_handle.clone(), widget.clone());
    ui.on_alpha_changed(move |alpha| {
        if let Some(ui) = ui_weak.upgrade() {
            let mut widget = state.borrow_mut();
            widget.alpha_input(alpha.round() as i32);
            refresh(&ui, &widget);
        }
    });

    let (ui_weak, state) = (ui_handle.clone(), widget.clone());
    ui.on_hex_edited(move |text| {
        if let Some(ui) = ui_weak.upgrade() {
            let mut widget = state.borrow_mut();
            widget.hex_keystroke(&text);
            // Only rewrite the field when the echo differs, to leave the cursor alone.
            let draft = widget.view().hex_draft;
            if draft != text.as_str() {
                ui.set_hex_text(draft.into());
            }
        }
    });

    let (ui_weak, state) = (ui_handle.clone(), widget.clone());
    ui.on_hex_accepted(move |text| {
        if let Some(ui) = ui_weak.upgrade() {
            let mut widget = state.borrow_mut();
            widget.hex_keystroke(&text);
            widget.hex_commit();
            refresh(&ui, &widget);
        }
    });

    let (ui_weak, state) = (ui_handle.clone(), widget.clone());
    ui.on_random_color(move || {
        if let Some(ui) = ui_weak.upgrade() {
            let color = Rgba::random_opaque(&mut rand::thread_rng());
            let mut widget = state.borrow_mut();
            // A controlled update: the picker stays silent, so the owner applies it itself.
            widget.set_value(color);
            ui.set_app_background(rgba_color(color));
            refresh(&ui, &widget);
        }
    });

    let copied_timer = Timer::default();
    let copied_for = Duration::from_millis(cfg.copied_indicator_ms);
    let (ui_weak, state) = (ui_handle.clone(), widget.clone());
    ui.on_copy_hex(move || {
        let text = state.borrow().readouts().hex;
        thread::spawn(move || match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set().wait().text(text) {
                    error!("clipboard: {}", e);
                }
            }
            Err(e) => error!("clipboard: {}", e),
        });

        if let Some(ui) = ui_weak.upgrade() {
            ui.set_copied(true);
        }
        // Restarting cancels a pending reset from an earlier copy.
        let ui_reset = ui_weak.clone();
        copied_timer.start(TimerMode::SingleShot, copied_for, move || {
            if let Some(ui) = ui_reset.upgrade() {
                ui.set_copied(false);
            }
        });
    });

    ui.run()
}
