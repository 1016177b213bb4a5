//! Error types for the flexoki crate.

use thiserror::Error;

/// Errors that can occur when selecting colors or changing the active theme.
///
/// Every variant carries the offending input. None of them are transient:
/// retrying the same call fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlexokiError {
    /// A hue token is neither a hue code nor a hue name.
    #[error("invalid hue '{0}': expected one of the codes k, r, o, y, g, c, b, p, m or a hue name")]
    InvalidHueToken(String),

    /// An explicit lightness value is not one of the canonical levels.
    #[error("invalid lightness value {0}: expected 0, 50, 100, 150, 200, 300-800 in steps of 100, 850, 900, 950 or 1000")]
    InvalidLightnessValue(i32),

    /// Axis order string is not recognized.
    #[error("invalid axis order '{0}': expected 'h_l' or 'l_h'")]
    InvalidAxisOrder(String),

    /// Output shape string is not recognized.
    #[error("invalid output shape '{0}': expected 'palette', 'colors', 'hexes', 'rgb' or 'rgba'")]
    InvalidOutputShape(String),

    /// The selectors are valid but no color sits at any of their coordinates.
    #[error("no colors match hue {hue} and lightness {lightness}")]
    NoMatch { hue: String, lightness: String },

    /// Lightness cannot be made active (sentinels and unknown levels).
    #[error("lightness {0} cannot be made active: expected a level between 50 and 950")]
    InvalidLightness(i32),

    /// Theme name is not a known preset.
    #[error("unknown theme '{0}': expected 'light' or 'dark'")]
    InvalidTheme(String),

    /// The color table could not be read or parsed.
    #[error("failed to load color table: {0}")]
    TableLoad(String),

    /// The color table was parsed but breaks a table invariant.
    #[error("invalid color table: {0}")]
    InvalidTable(String),

    /// Theme configuration is malformed or inconsistent.
    #[error("invalid theme configuration: {0}")]
    Config(String),
}

/// Result type for flexoki operations.
pub type Result<T> = std::result::Result<T, FlexokiError>;

impl From<serde_yaml::Error> for FlexokiError {
    fn from(err: serde_yaml::Error) -> Self {
        FlexokiError::TableLoad(err.to_string())
    }
}
