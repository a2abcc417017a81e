//! Primitive normalization: colors to canonical hex, font weight/style
//! inference from font names and style flags.
//!
//! All functions here are pure and infallible; unrecognized inputs fall
//! back to sensible defaults rather than erroring.

use serde::{Deserialize, Deserializer, Serialize};

/// Style-flag bit indicating italic text.
pub const ITALIC_FLAG: u32 = 0b10;

/// Style-flag bit indicating bold text.
pub const BOLD_FLAG: u32 = 0b1_0000;

/// A raw color value as reported by the PDF extraction collaborator.
///
/// PDF sources report colors in several shapes: RGB float triples in
/// `[0, 1]`, packed 24-bit integers, or a single grayscale float. The
/// untagged serde representation maps raw JSON onto the right variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    /// RGB components, each in `[0, 1]`
    Rgb([f32; 3]),
    /// Packed 24-bit `0xRRGGBB` integer
    Packed(u32),
    /// Grayscale value in `[0, 1]`
    Gray(f32),
}

impl Default for Color {
    fn default() -> Self {
        Color::Packed(0)
    }
}

/// Deserialize a color, mapping unrecognized encodings to black.
///
/// A bad color is a local defect; it must never fail the surrounding
/// span or page.
pub fn color_or_black<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
    Ok(Color::deserialize(deserializer).unwrap_or_default())
}

/// Deserialize an optional color, mapping unrecognized encodings to black.
pub fn opt_color_or_black<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Color>, D::Error> {
    Ok(Option::<Color>::deserialize(deserializer).unwrap_or(Some(Color::default())))
}

/// Convert a raw color to a canonical `#rrggbb` hex string.
///
/// Components outside `[0, 1]` are clamped; NaN maps to zero. The result
/// is always a valid lowercase hex color.
pub fn color_to_hex(color: Color) -> String {
    match color {
        Color::Rgb([r, g, b]) => {
            format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
        }
        Color::Packed(v) => format!("#{:06x}", v & 0xFF_FFFF),
        Color::Gray(v) => {
            let c = channel(v);
            format!("#{:02x}{:02x}{:02x}", c, c, c)
        }
    }
}

/// Convert an optional raw color, preserving absence (e.g. unfilled shapes).
pub fn opt_color_to_hex(color: Option<Color>) -> Option<String> {
    color.map(color_to_hex)
}

/// Validate and canonicalize an existing hex color string.
///
/// Lowercases a well-formed `#rrggbb` value; anything else maps to
/// `#000000`. Idempotent on canonical input.
pub fn normalize_hex(s: &str) -> String {
    let s = s.trim();
    if s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit()) {
        s.to_ascii_lowercase()
    } else {
        "#000000".to_string()
    }
}

fn channel(v: f32) -> u8 {
    if v.is_nan() {
        0
    } else {
        (v.clamp(0.0, 1.0) * 255.0) as u8
    }
}

/// Infer CSS font weight from a font name and style flags.
///
/// Bold if the name carries a bold/heavy/black marker (case-insensitive)
/// or the bold flag bit is set.
pub fn font_weight(font_name: &str, flags: u32) -> &'static str {
    let name = font_name.to_lowercase();
    if name.contains("bold") || name.contains("heavy") || name.contains("black") {
        return "bold";
    }
    if flags & BOLD_FLAG != 0 {
        return "bold";
    }
    "normal"
}

/// Infer CSS font style from a font name and style flags.
pub fn font_style(font_name: &str, flags: u32) -> &'static str {
    let name = font_name.to_lowercase();
    if name.contains("italic") || name.contains("oblique") {
        return "italic";
    }
    if flags & ITALIC_FLAG != 0 {
        return "italic";
    }
    "normal"
}
