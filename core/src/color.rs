//! Hex color parsing and normalization
//!
//! Accepts `#RGB`, `#RGBA`, `#RRGGBB` and `#RRGGBBAA`. Everything downstream
//! works with the canonical 8-digit form.

use std::fmt;

/// An RGBA color with 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba { r: 0, g: 0, b: 0, a: 0xFF };
    pub const WHITE: Rgba = Rgba { r: 0xFF, g: 0xFF, b: 0xFF, a: 0xFF };

    /// Parse any of the four accepted hex forms.
    ///
    /// Returns `None` for anything else, including a missing `#`.
    pub fn parse(input: &str) -> Option<Self> {
        let hex = input.strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).chain("FF".chars()).collect(),
            4 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => format!("{hex}FF"),
            8 => hex.to_string(),
            _ => return None,
        };

        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: channel(6)?,
        })
    }

    /// `#RRGGBB` without alpha, for SVG attributes
    pub fn rgb_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Alpha as a 0.0..=1.0 opacity
    pub fn opacity(&self) -> f32 {
        self.a as f32 / 255.0
    }

    pub fn to_pixel(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, self.a])
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

/// True when `input` is one of the accepted hex forms.
pub fn is_valid_hex(input: &str) -> bool {
    Rgba::parse(input).is_some()
}

/// Normalize a hex color to `#RRGGBBAA`.
///
/// Invalid input falls back to opaque black. Validation rejects malformed
/// colors before this runs, so reaching the fallback is logged.
pub fn normalize_hex(input: &str) -> String {
    normalize(input).to_string()
}

/// Same as [`normalize_hex`] but returns the parsed color.
pub fn normalize(input: &str) -> Rgba {
    Rgba::parse(input).unwrap_or_else(|| {
        tracing::warn!("unrecognized color {:?}, falling back to black", input);
        Rgba::BLACK
    })
}
