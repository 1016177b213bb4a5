//! Hue axis: canonical hue codes and the hue selector.
//!
//! The palette has eight chromatic hues plus one achromatic hue (`base`).
//! Each hue has a single-character code and a long name, and either form is
//! accepted wherever a hue is expected:
//!
//! | Code | Name      |
//! |------|-----------|
//! | `k`  | `base`    |
//! | `r`  | `red`     |
//! | `o`  | `orange`  |
//! | `y`  | `yellow`  |
//! | `g`  | `green`   |
//! | `c`  | `cyan`    |
//! | `b`  | `blue`    |
//! | `p`  | `purple`  |
//! | `m`  | `magenta` |
//!
//! [`HueSelector`] is what callers pass to a filter. It is normalized once
//! into an ordered list of [`Hue`] values, keeping caller order and
//! duplicates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FlexokiError, Result};

/// A canonical hue of the palette.
///
/// Serialized as its single-character code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Hue {
    /// The achromatic scale, from paper to black.
    #[serde(rename = "k")]
    Base,
    #[serde(rename = "r")]
    Red,
    #[serde(rename = "o")]
    Orange,
    #[serde(rename = "y")]
    Yellow,
    #[serde(rename = "g")]
    Green,
    #[serde(rename = "c")]
    Cyan,
    #[serde(rename = "b")]
    Blue,
    #[serde(rename = "p")]
    Purple,
    #[serde(rename = "m")]
    Magenta,
}

impl Hue {
    /// All hues in table order (achromatic first).
    pub const ALL: [Hue; 9] = [
        Hue::Base,
        Hue::Red,
        Hue::Orange,
        Hue::Yellow,
        Hue::Green,
        Hue::Cyan,
        Hue::Blue,
        Hue::Purple,
        Hue::Magenta,
    ];

    /// Returns the single-character code of this hue.
    pub fn code(self) -> char {
        match self {
            Hue::Base => 'k',
            Hue::Red => 'r',
            Hue::Orange => 'o',
            Hue::Yellow => 'y',
            Hue::Green => 'g',
            Hue::Cyan => 'c',
            Hue::Blue => 'b',
            Hue::Purple => 'p',
            Hue::Magenta => 'm',
        }
    }

    /// Returns the long name of this hue.
    pub fn name(self) -> &'static str {
        match self {
            Hue::Base => "base",
            Hue::Red => "red",
            Hue::Orange => "orange",
            Hue::Yellow => "yellow",
            Hue::Green => "green",
            Hue::Cyan => "cyan",
            Hue::Blue => "blue",
            Hue::Purple => "purple",
            Hue::Magenta => "magenta",
        }
    }

    /// Returns `true` for the achromatic hue.
    pub fn is_achromatic(self) -> bool {
        matches!(self, Hue::Base)
    }

    /// Looks up a hue by its code, ignoring case.
    pub fn from_code(code: char) -> Option<Hue> {
        let code = code.to_ascii_lowercase();
        Hue::ALL.into_iter().find(|hue| hue.code() == code)
    }

    /// Looks up a hue by its long name, ignoring case.
    pub fn from_name(name: &str) -> Option<Hue> {
        Hue::ALL
            .into_iter()
            .find(|hue| hue.name().eq_ignore_ascii_case(name))
    }

    /// Resolves a single token that is either a code or a long name.
    pub fn from_token(token: &str) -> Option<Hue> {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => Hue::from_code(code),
            _ => Hue::from_name(token),
        }
    }
}

impl fmt::Display for Hue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Hue {
    type Err = FlexokiError;

    fn from_str(s: &str) -> Result<Self> {
        Hue::from_token(s).ok_or_else(|| FlexokiError::InvalidHueToken(s.to_string()))
    }
}

/// Which hues a filter selects, and in what order.
///
/// Build one from the natural Rust value with `into()`:
///
/// ```
/// use flexoki::{Hue, HueSelector};
///
/// let single: HueSelector = "red".into();
/// let codes: HueSelector = "rgb".into();
/// let many: HueSelector = vec!["blue", "y"].into();
/// let typed: HueSelector = Hue::Cyan.into();
///
/// assert_eq!(codes.normalize().unwrap(), Some(vec![Hue::Red, Hue::Green, Hue::Blue]));
/// assert_eq!(many.normalize().unwrap(), Some(vec![Hue::Blue, Hue::Yellow]));
/// # let _ = (single, typed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HueSelector {
    /// No hue filter.
    #[default]
    All,
    /// A code, a long name, or a run of codes such as `"rgb"`.
    Token(String),
    /// Each entry is a code or a long name.
    Many(Vec<String>),
}

impl HueSelector {
    /// Normalizes the selector into canonical hues.
    ///
    /// Returns `None` for [`HueSelector::All`]. Order follows the input and
    /// duplicates are kept.
    ///
    /// # Errors
    ///
    /// Returns [`FlexokiError::InvalidHueToken`] naming the first token (or,
    /// inside a run of codes, the first character) that is not a hue.
    pub fn normalize(&self) -> Result<Option<Vec<Hue>>> {
        match self {
            HueSelector::All => Ok(None),
            HueSelector::Token(token) => parse_token(token).map(Some),
            HueSelector::Many(tokens) => tokens
                .iter()
                .map(|token| token.parse::<Hue>())
                .collect::<Result<Vec<_>>>()
                .map(Some),
        }
    }

    /// Normalizes the selector, expanding [`HueSelector::All`] to every hue
    /// in table order.
    pub fn resolve(&self) -> Result<Vec<Hue>> {
        Ok(self.normalize()?.unwrap_or_else(|| Hue::ALL.to_vec()))
    }

    /// Returns `true` if this selector does not filter by hue.
    pub fn is_all(&self) -> bool {
        matches!(self, HueSelector::All)
    }
}

// A lone token is tried as code or name first, then as a run of codes.
fn parse_token(token: &str) -> Result<Vec<Hue>> {
    if let Some(hue) = Hue::from_token(token) {
        return Ok(vec![hue]);
    }
    if token.is_empty() {
        return Err(FlexokiError::InvalidHueToken(String::new()));
    }
    token
        .chars()
        .map(|c| Hue::from_code(c).ok_or_else(|| FlexokiError::InvalidHueToken(c.to_string())))
        .collect()
}

impl fmt::Display for HueSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HueSelector::All => f.write_str("*"),
            HueSelector::Token(token) => f.write_str(token),
            HueSelector::Many(tokens) => write!(f, "[{}]", tokens.join(", ")),
        }
    }
}

impl From<&str> for HueSelector {
    fn from(token: &str) -> Self {
        HueSelector::Token(token.to_string())
    }
}

impl From<String> for HueSelector {
    fn from(token: String) -> Self {
        HueSelector::Token(token)
    }
}

impl From<char> for HueSelector {
    fn from(code: char) -> Self {
        HueSelector::Token(code.to_string())
    }
}

impl From<Hue> for HueSelector {
    fn from(hue: Hue) -> Self {
        HueSelector::Token(hue.code().to_string())
    }
}

impl From<Vec<String>> for HueSelector {
    fn from(tokens: Vec<String>) -> Self {
        HueSelector::Many(tokens)
    }
}

impl From<Vec<&str>> for HueSelector {
    fn from(tokens: Vec<&str>) -> Self {
        HueSelector::Many(tokens.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for HueSelector {
    fn from(tokens: &[&str]) -> Self {
        HueSelector::Many(tokens.iter().map(|t| t.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for HueSelector {
    fn from(tokens: [&str; N]) -> Self {
        HueSelector::Many(tokens.iter().map(|t| t.to_string()).collect())
    }
}

impl From<Vec<Hue>> for HueSelector {
    fn from(hues: Vec<Hue>) -> Self {
        HueSelector::from(hues.as_slice())
    }
}

impl From<&[Hue]> for HueSelector {
    fn from(hues: &[Hue]) -> Self {
        HueSelector::Many(hues.iter().map(|h| h.code().to_string()).collect())
    }
}

impl<const N: usize> From<[Hue; N]> for HueSelector {
    fn from(hues: [Hue; N]) -> Self {
        HueSelector::from(hues.as_slice())
    }
}

impl<T: Into<HueSelector>> From<Option<T>> for HueSelector {
    fn from(selector: Option<T>) -> Self {
        selector.map_or(HueSelector::All, Into::into)
    }
}
