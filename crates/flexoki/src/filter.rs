//! Filter builder and executor.
//!
//! A [`Filter`] pairs a hue selector with a lightness selector, an axis
//! order and an optional output shape. Running it against a
//! [`ColorTable`](crate::ColorTable) walks the two normalized axes as nested
//! loops and collects the records found at each `(hue, lightness)` pair.
//!
//! # Axis order
//!
//! ```text
//! HueMajor:        for hue in hues { for level in levels { visit(hue, level) } }
//! LightnessMajor:  for level in levels { for hue in hues { visit(hue, level) } }
//! ```
//!
//! Both orders visit the same pairs, so they return the same records; only
//! the sequence differs.
//!
//! # Sentinels
//!
//! The achromatic hue has two records at each end of its scale (`paper` and
//! `base-0`, `base-1000` and `black`). Visiting those coordinates yields only
//! `paper` or `black`.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::trace;

use crate::error::{FlexokiError, Result};
use crate::hue::{Hue, HueSelector};
use crate::lightness::{LightnessSelector, BLACK_LEVEL, PAPER_LEVEL};
use crate::palette::Palette;
use crate::record::ColorRecord;
use crate::table::ColorTable;

/// Which axis is the outer loop when combining selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AxisOrder {
    /// Hue outer, lightness inner.
    #[default]
    HueMajor,
    /// Lightness outer, hue inner.
    LightnessMajor,
}

impl AxisOrder {
    /// Returns the short name of this order.
    pub fn as_str(self) -> &'static str {
        match self {
            AxisOrder::HueMajor => "h_l",
            AxisOrder::LightnessMajor => "l_h",
        }
    }
}

impl fmt::Display for AxisOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AxisOrder {
    type Err = FlexokiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "h_l" | "hue-major" => Ok(AxisOrder::HueMajor),
            "l_h" | "lightness-major" => Ok(AxisOrder::LightnessMajor),
            _ => Err(FlexokiError::InvalidAxisOrder(s.to_string())),
        }
    }
}

/// The shape a filter result is returned in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// A [`Palette`], even for a single match.
    Palette,
    /// A plain list of records.
    Colors,
    /// Hex strings.
    Hexes,
    /// RGB triples.
    Rgb,
    /// RGBA quadruples with full opacity.
    Rgba,
}

impl Shape {
    /// Returns the name of this shape.
    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Palette => "palette",
            Shape::Colors => "colors",
            Shape::Hexes => "hexes",
            Shape::Rgb => "rgb",
            Shape::Rgba => "rgba",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Shape {
    type Err = FlexokiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "palette" => Ok(Shape::Palette),
            "colors" | "colours" => Ok(Shape::Colors),
            "hexes" => Ok(Shape::Hexes),
            "rgb" => Ok(Shape::Rgb),
            "rgba" => Ok(Shape::Rgba),
            _ => Err(FlexokiError::InvalidOutputShape(s.to_string())),
        }
    }
}

/// The result of running a [`Filter`].
///
/// Without an explicit [`Shape`] a filter returns [`Selection::Single`] when
/// exactly one record matches and [`Selection::Palette`] otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Selection {
    Single(ColorRecord),
    Palette(Palette),
    Colors(Vec<ColorRecord>),
    Hexes(Vec<String>),
    Rgb(Vec<(u8, u8, u8)>),
    Rgba(Vec<(u8, u8, u8, u8)>),
}

impl Selection {
    /// Number of entries in the result.
    pub fn len(&self) -> usize {
        match self {
            Selection::Single(_) => 1,
            Selection::Palette(palette) => palette.len(),
            Selection::Colors(colors) => colors.len(),
            Selection::Hexes(hexes) => hexes.len(),
            Selection::Rgb(rgb) => rgb.len(),
            Selection::Rgba(rgba) => rgba.len(),
        }
    }

    /// Returns `true` if the selection has no entries.
    ///
    /// A selection returned by a filter is never empty; an empty result is
    /// reported as [`FlexokiError::NoMatch`] instead.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the record of a single-match selection.
    pub fn as_single(&self) -> Option<&ColorRecord> {
        match self {
            Selection::Single(record) => Some(record),
            _ => None,
        }
    }

    /// Returns the palette of a palette selection.
    pub fn as_palette(&self) -> Option<&Palette> {
        match self {
            Selection::Palette(palette) => Some(palette),
            _ => None,
        }
    }

    /// Returns the hex strings of a hex selection.
    pub fn as_hexes(&self) -> Option<&[String]> {
        match self {
            Selection::Hexes(hexes) => Some(hexes),
            _ => None,
        }
    }
}

/// A hue/lightness query over a color table.
///
/// # Example
///
/// ```
/// use flexoki::{AxisOrder, ColorTable, Filter, LightnessSelector, Shape};
///
/// let table = ColorTable::builtin();
/// let hexes = Filter::new()
///     .hue(["red", "b"])
///     .lightness(LightnessSelector::range(600, 400))
///     .order(AxisOrder::LightnessMajor)
///     .returns(Shape::Hexes)
///     .run(&table)
///     .unwrap();
///
/// assert_eq!(hexes.len(), 6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Filter {
    hue: HueSelector,
    lightness: LightnessSelector,
    order: AxisOrder,
    shape: Option<Shape>,
}

impl Filter {
    /// Creates a filter that selects every record.
    pub fn new() -> Self {
        Filter::default()
    }

    // ========================================================================
    // Builders
    // ========================================================================

    /// Sets the hue selector.
    pub fn hue(mut self, hue: impl Into<HueSelector>) -> Self {
        self.hue = hue.into();
        self
    }

    /// Sets the lightness selector.
    pub fn lightness(mut self, lightness: impl Into<LightnessSelector>) -> Self {
        self.lightness = lightness.into();
        self
    }

    /// Sets which axis is iterated first.
    pub fn order(mut self, order: AxisOrder) -> Self {
        self.order = order;
        self
    }

    /// Sets the output shape.
    pub fn returns(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    pub fn hue_selector(&self) -> &HueSelector {
        &self.hue
    }

    pub fn lightness_selector(&self) -> &LightnessSelector {
        &self.lightness
    }

    pub fn axis_order(&self) -> AxisOrder {
        self.order
    }

    pub fn shape(&self) -> Option<Shape> {
        self.shape
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Returns the matching records in iteration order.
    ///
    /// # Errors
    ///
    /// Selector normalization errors, or [`FlexokiError::NoMatch`] when the
    /// selectors are valid but nothing matches.
    pub fn records(&self, table: &ColorTable) -> Result<Vec<ColorRecord>> {
        let hues = self.hue.resolve()?;
        let levels = self.lightness.resolve()?;

        let mut found = Vec::new();
        match self.order {
            AxisOrder::HueMajor => {
                for &hue in &hues {
                    for &level in &levels {
                        collect_at(table, hue, level, &mut found);
                    }
                }
            }
            AxisOrder::LightnessMajor => {
                for &level in &levels {
                    for &hue in &hues {
                        collect_at(table, hue, level, &mut found);
                    }
                }
            }
        }

        trace!(
            hue = %self.hue,
            lightness = %self.lightness,
            order = %self.order,
            matches = found.len(),
            "filter"
        );

        if found.is_empty() {
            return Err(FlexokiError::NoMatch {
                hue: self.hue.to_string(),
                lightness: self.lightness.to_string(),
            });
        }
        Ok(found.into_iter().cloned().collect())
    }

    /// Runs the filter and shapes the result.
    pub fn run(&self, table: &ColorTable) -> Result<Selection> {
        let records = self.records(table)?;
        Ok(shape(records, self.shape))
    }

    /// Counts the matching records without shaping them.
    pub fn count(&self, table: &ColorTable) -> Result<usize> {
        self.records(table).map(|records| records.len())
    }
}

/// Appends the records visited at `(hue, level)`, collapsing the sentinels.
fn collect_at<'t>(table: &'t ColorTable, hue: Hue, level: i32, out: &mut Vec<&'t ColorRecord>) {
    if hue.is_achromatic() && level == PAPER_LEVEL {
        out.push(table.paper());
    } else if hue.is_achromatic() && level == BLACK_LEVEL {
        out.push(table.black());
    } else {
        out.extend(table.at(hue, level));
    }
}

fn shape(records: Vec<ColorRecord>, shape: Option<Shape>) -> Selection {
    match shape {
        None if records.len() == 1 => match records.into_iter().next() {
            Some(record) => Selection::Single(record),
            None => Selection::Palette(Palette::default()),
        },
        None | Some(Shape::Palette) => Selection::Palette(Palette::new(records)),
        Some(Shape::Colors) => Selection::Colors(records),
        Some(Shape::Hexes) => Selection::Hexes(records.iter().map(|r| r.hex().to_string()).collect()),
        Some(Shape::Rgb) => Selection::Rgb(records.iter().map(ColorRecord::rgb).collect()),
        Some(Shape::Rgba) => Selection::Rgba(records.iter().map(ColorRecord::rgba).collect()),
    }
}
