//! Hex text entry: normalizing whatever the user typed, and the draft/invalid
//! state of the text field itself.

use std::fmt;

use log::debug;
use thiserror::Error;

use crate::color::{hex_to_rgb, rgb_to_hex, Rgb};
use crate::picker::Picker;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("expected 3, 4, 6 or 8 hex digits, found {len}")]
    InvalidLength { len: usize },
}

/// A validated hex entry. `alpha` is only present for 8-digit (or 4-digit shorthand) input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor {
    pub rgb: Rgb,
    pub alpha: Option<u8>,
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&rgb_to_hex(self.rgb))
    }
}

/// Uppercases, drops every character that is not a hex digit, expands 3/4
/// digit shorthand by doubling, then splits a trailing alpha pair off 8 digits.
///
/// `"ZZZ123"` strips to `"123"` and therefore reads as `#112233`.
pub fn normalize_hex(text: &str) -> Result<HexColor, HexError> {
    let mut digits: String = text
        .chars()
        .filter(char::is_ascii_hexdigit)
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if matches!(digits.len(), 3 | 4) {
        digits = digits.chars().flat_map(|c| [c, c]).collect();
    }

    let mut alpha = None;
    if digits.len() == 8 {
        alpha = u8::from_str_radix(&digits[6..], 16).ok();
        digits.truncate(6);
    }

    let len = digits.len();
    if len != 6 {
        return Err(HexError::InvalidLength { len });
    }

    let rgb = hex_to_rgb(&format!("#{digits}")).ok_or(HexError::InvalidLength { len })?;
    Ok(HexColor { rgb, alpha })
}

/// The hex text field. Keeps the unvalidated draft the user is typing and
/// whether the last commit was rejected. Neither ever reaches the picker.
#[derive(Debug, Clone)]
pub struct HexInput {
    draft: String,
    invalid: bool,
    shown: String,
}

impl HexInput {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            draft: value.clone(),
            invalid: false,
            shown: value,
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// Keystroke echo, display only.
    pub fn on_input(&mut self, text: &str) {
        self.draft = text.to_uppercase();
    }

    /// Follows the committed color. Only an actual change of value overwrites
    /// the draft and clears the invalid marker.
    pub fn sync(&mut self, value: &str) {
        if self.shown != value {
            self.shown = value.to_owned();
            self.draft = value.to_owned();
            self.invalid = false;
        }
    }

    /// Validates the draft and hands it to the picker. Returns whether it was accepted.
    pub fn commit(&mut self, picker: &mut Picker) -> bool {
        match picker.on_hex_commit(&self.draft) {
            Ok(hex) => {
                self.draft = hex.to_string();
                self.invalid = false;
                true
            }
            Err(err) => {
                debug!("rejected hex draft {:?}: {}", self.draft, err);
                self.invalid = true;
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::picker::YAxis;

    #[test]
    fn six_digits() {
        let hex = normalize_hex("#ff00aa").unwrap();
        assert_eq!(hex.rgb, Rgb::new(255, 0, 170));
        assert_eq!(hex.alpha, None);
        assert_eq!(hex.to_string(), "#FF00AA");
    }

    #[test]
    fn shorthand_expands() {
        assert_eq!(normalize_hex("F0A"), normalize_hex("FF00AA"));
        assert_eq!(normalize_hex("F0A8"), normalize_hex("FF00AA88"));
        assert_eq!(normalize_hex("F0A8").unwrap().alpha, Some(0x88));
    }

    #[test]
    fn eight_digits_carry_alpha() {
        let hex = normalize_hex("FF00AA80").unwrap();
        assert_eq!(hex.rgb, Rgb::new(255, 0, 170));
        assert_eq!(hex.alpha, Some(128));
    }

    #[test]
    fn junk_is_stripped_before_length_check() {
        assert_eq!(normalize_hex("ZZZ123").unwrap().rgb, Rgb::new(0x11, 0x22, 0x33));
        assert_eq!(normalize_hex(" # 12-34-56 ").unwrap().rgb, Rgb::new(0x12, 0x34, 0x56));
    }

    #[test]
    fn bad_lengths() {
        assert_eq!(normalize_hex(""), Err(HexError::InvalidLength { len: 0 }));
        assert_eq!(normalize_hex("#12345"), Err(HexError::InvalidLength { len: 5 }));
        assert_eq!(normalize_hex("1234567"), Err(HexError::InvalidLength { len: 7 }));
        assert_eq!(normalize_hex("zzzz"), Err(HexError::InvalidLength { len: 0 }));
        assert_eq!(normalize_hex("123456789"), Err(HexError::InvalidLength { len: 9 }));
    }

    #[test]
    fn draft_echo_is_uppercase() {
        let mut input = HexInput::new("#000000");
        input.on_input("#abc");
        assert_eq!(input.draft(), "#ABC");
        assert!(!input.is_invalid());
    }

    #[test]
    fn invalid_commit_keeps_draft_and_color() {
        let mut picker = Picker::new(Rgba::new(1, 2, 3, 255), YAxis::default());
        let mut input = HexInput::new(picker.hex());
        input.on_input("#12345");
        assert!(!input.commit(&mut picker));
        assert!(input.is_invalid());
        assert_eq!(input.draft(), "#12345");
        assert_eq!(picker.value(), Rgba::new(1, 2, 3, 255));

        // Same value again does not clear the marker.
        input.sync(&picker.hex());
        assert!(input.is_invalid());
    }

    #[test]
    fn valid_commit_canonicalizes_draft() {
        let mut picker = Picker::new(Rgba::new(1, 2, 3, 255), YAxis::default());
        let mut input = HexInput::new(picker.hex());
        input.on_input("f0a");
        assert!(input.commit(&mut picker));
        assert_eq!(input.draft(), "#FF00AA");
        assert_eq!(picker.value(), Rgba::new(255, 0, 170, 255));
    }

    #[test]
    fn new_value_clears_invalid() {
        let mut input = HexInput::new("#000000");
        let mut picker = Picker::new(Rgba::default(), YAxis::default());
        input.on_input("nope");
        input.commit(&mut picker);
        assert!(input.is_invalid());

        input.sync("#FFFFFF");
        assert!(!input.is_invalid());
        assert_eq!(input.draft(), "#FFFFFF");
    }
}
