//! A single named color of the palette.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hue::Hue;

/// One named entry of the color table.
///
/// Records are immutable. `rgba` and the channel accessors are derived from
/// `rgb` on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorRecord {
    name: String,
    hue: Hue,
    lightness: i32,
    hex: String,
    rgb: (u8, u8, u8),
}

impl ColorRecord {
    /// Creates a record. Tables built from records validate them on load.
    pub fn new(
        name: impl Into<String>,
        hue: Hue,
        lightness: i32,
        hex: impl Into<String>,
        rgb: (u8, u8, u8),
    ) -> Self {
        ColorRecord {
            name: name.into(),
            hue,
            lightness,
            hex: hex.into(),
            rgb,
        }
    }

    /// Unique name, e.g. `red-400` or `paper`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hue(&self) -> Hue {
        self.hue
    }

    pub fn lightness(&self) -> i32 {
        self.lightness
    }

    /// Hex string with leading `#`, e.g. `#D14D41`.
    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        self.rgb
    }

    /// RGB with a fully opaque alpha channel.
    ///
    /// Alpha is on the same `0..=255` scale as the color channels, so opaque
    /// is `255`, not the `1` of libraries that use a unit alpha.
    pub fn rgba(&self) -> (u8, u8, u8, u8) {
        let (r, g, b) = self.rgb;
        (r, g, b, u8::MAX)
    }

    pub fn r(&self) -> u8 {
        self.rgb.0
    }

    pub fn g(&self) -> u8 {
        self.rgb.1
    }

    pub fn b(&self) -> u8 {
        self.rgb.2
    }

    /// Returns `true` if this record sits at `(hue, lightness)`.
    pub fn is_at(&self, hue: Hue, lightness: i32) -> bool {
        self.hue == hue && self.lightness == lightness
    }

    /// Returns a copy of this record under another name.
    pub(crate) fn renamed(&self, name: impl Into<String>) -> Self {
        ColorRecord {
            name: name.into(),
            ..self.clone()
        }
    }
}

impl fmt::Display for ColorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.hex)
    }
}

/// Parses `#RRGGBB` into its channels.
pub(crate) fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_400() -> ColorRecord {
        ColorRecord::new("red-400", Hue::Red, 400, "#D14D41", (209, 77, 65))
    }

    #[test]
    fn derived_channels() {
        let red = red_400();
        assert_eq!(red.r(), 209);
        assert_eq!(red.g(), 77);
        assert_eq!(red.b(), 65);
        assert_eq!(red.rgba(), (209, 77, 65, 255));
    }

    #[test]
    fn display_shows_name_and_hex() {
        assert_eq!(red_400().to_string(), "red-400 (#D14D41)");
    }

    #[test]
    fn renamed_keeps_coordinates() {
        let red = red_400().renamed("red");
        assert_eq!(red.name(), "red");
        assert!(red.is_at(Hue::Red, 400));
        assert_eq!(red.hex(), "#D14D41");
    }

    #[test]
    fn parse_hex_values() {
        assert_eq!(parse_hex("#D14D41"), Some((209, 77, 65)));
        assert_eq!(parse_hex("#fffcf0"), Some((255, 252, 240)));
        assert_eq!(parse_hex("D14D41"), None);
        assert_eq!(parse_hex("#D14D4"), None);
        assert_eq!(parse_hex("#GGGGGG"), None);
    }

    #[test]
    fn deserializes_from_yaml() {
        let record: ColorRecord = serde_yaml::from_str(
            "{ name: cyan-400, hue: c, lightness: 400, hex: \"#3AA99F\", rgb: [58, 169, 159] }",
        )
        .unwrap();
        assert_eq!(record.hue(), Hue::Cyan);
        assert_eq!(record.rgb(), (58, 169, 159));
    }
}
