//! Lightness axis: canonical levels and the lightness selector.
//!
//! Every hue shares the same thirteen levels, from `50` (lightest) to `950`
//! (darkest). The achromatic hue additionally owns two sentinels, `0` (paper)
//! and `1000` (black). [`DOMAIN`] is the full ordered set and is the only
//! source of truth for expansion; it is a constant and is never reordered in
//! place.

use std::fmt;
use std::ops::RangeInclusive;

use crate::error::{FlexokiError, Result};

/// The lightest sentinel, carried only by the achromatic hue.
pub const PAPER_LEVEL: i32 = 0;

/// The darkest sentinel, carried only by the achromatic hue.
pub const BLACK_LEVEL: i32 = 1000;

/// The thirteen levels shared by every hue, lightest first.
pub const LEVELS: [i32; 13] = [50, 100, 150, 200, 300, 400, 500, 600, 700, 800, 850, 900, 950];

/// Every valid lightness value, sentinels included, lightest first.
pub const DOMAIN: [i32; 15] = [
    PAPER_LEVEL,
    50,
    100,
    150,
    200,
    300,
    400,
    500,
    600,
    700,
    800,
    850,
    900,
    950,
    BLACK_LEVEL,
];

/// Returns `true` if `value` is a valid lightness (sentinels included).
pub fn is_level(value: i32) -> bool {
    DOMAIN.contains(&value)
}

/// Returns `true` if `value` is one of the shared levels (sentinels excluded).
pub fn is_shared_level(value: i32) -> bool {
    LEVELS.contains(&value)
}

/// Direction of a lightness range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Lightest first.
    #[default]
    Asc,
    /// Darkest first.
    Desc,
}

impl Dir {
    /// Returns the direction implied by a pair of range endpoints.
    ///
    /// A range whose first endpoint is greater than its second runs
    /// descending; everything else (equal endpoints included) ascends.
    pub fn of(from: i32, to: i32) -> Self {
        if from > to {
            Dir::Desc
        } else {
            Dir::Asc
        }
    }

    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which lightness levels a filter selects, and in what order.
///
/// ```
/// use flexoki::LightnessSelector;
///
/// let down = LightnessSelector::range(600, 50);
/// assert_eq!(
///     down.normalize().unwrap(),
///     Some(vec![600, 500, 400, 300, 200, 150, 100, 50]),
/// );
///
/// let explicit: LightnessSelector = vec![950, 50].into();
/// assert_eq!(explicit.normalize().unwrap(), Some(vec![950, 50]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LightnessSelector {
    /// No lightness filter.
    #[default]
    All,
    /// One explicit level.
    Single(i32),
    /// Explicit levels, in caller order.
    Many(Vec<i32>),
    /// Every level between the two bounds, inclusive. The bounds need not be
    /// levels themselves; `from > to` yields descending order.
    Range { from: i32, to: i32 },
}

impl LightnessSelector {
    /// Creates a directional range selector.
    pub fn range(from: i32, to: i32) -> Self {
        LightnessSelector::Range { from, to }
    }

    /// Normalizes the selector into canonical levels.
    ///
    /// Returns `None` for [`LightnessSelector::All`]. A range that contains no
    /// level normalizes to an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`FlexokiError::InvalidLightnessValue`] for the first explicit
    /// value outside [`DOMAIN`]. Range bounds are never rejected.
    pub fn normalize(&self) -> Result<Option<Vec<i32>>> {
        match self {
            LightnessSelector::All => Ok(None),
            LightnessSelector::Single(value) => validate(*value).map(|v| Some(vec![v])),
            LightnessSelector::Many(values) => values
                .iter()
                .map(|v| validate(*v))
                .collect::<Result<Vec<_>>>()
                .map(Some),
            LightnessSelector::Range { from, to } => Ok(Some(expand_range(*from, *to))),
        }
    }

    /// Normalizes the selector, expanding [`LightnessSelector::All`] to the
    /// whole [`DOMAIN`] in table order.
    pub fn resolve(&self) -> Result<Vec<i32>> {
        Ok(self.normalize()?.unwrap_or_else(|| DOMAIN.to_vec()))
    }

    /// Returns `true` if this selector does not filter by lightness.
    pub fn is_all(&self) -> bool {
        matches!(self, LightnessSelector::All)
    }
}

fn validate(value: i32) -> Result<i32> {
    if is_level(value) {
        Ok(value)
    } else {
        Err(FlexokiError::InvalidLightnessValue(value))
    }
}

fn expand_range(from: i32, to: i32) -> Vec<i32> {
    let (low, high) = if from <= to { (from, to) } else { (to, from) };
    let inside = DOMAIN.iter().copied().filter(|l| (low..=high).contains(l));
    match Dir::of(from, to) {
        Dir::Asc => inside.collect(),
        Dir::Desc => inside.rev().collect(),
    }
}

impl fmt::Display for LightnessSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LightnessSelector::All => f.write_str("*"),
            LightnessSelector::Single(value) => write!(f, "{}", value),
            LightnessSelector::Many(values) => {
                let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            LightnessSelector::Range { from, to } => write!(f, "{}:{}", from, to),
        }
    }
}

impl From<i32> for LightnessSelector {
    fn from(value: i32) -> Self {
        LightnessSelector::Single(value)
    }
}

impl From<Vec<i32>> for LightnessSelector {
    fn from(values: Vec<i32>) -> Self {
        LightnessSelector::Many(values)
    }
}

impl From<&[i32]> for LightnessSelector {
    fn from(values: &[i32]) -> Self {
        LightnessSelector::Many(values.to_vec())
    }
}

impl<const N: usize> From<[i32; N]> for LightnessSelector {
    fn from(values: [i32; N]) -> Self {
        LightnessSelector::Many(values.to_vec())
    }
}

impl From<RangeInclusive<i32>> for LightnessSelector {
    fn from(range: RangeInclusive<i32>) -> Self {
        LightnessSelector::range(*range.start(), *range.end())
    }
}

impl<T: Into<LightnessSelector>> From<Option<T>> for LightnessSelector {
    fn from(selector: Option<T>) -> Self {
        selector.map_or(LightnessSelector::All, Into::into)
    }
}
