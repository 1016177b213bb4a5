//! Flexoki - Query engine for the Flexoki color palette.
//!
//! Flexoki is a fixed table of named colors laid out on two axes: a hue
//! (eight chromatic hues plus the achromatic `base`) and a lightness level
//! from `0` to `1000`. This crate provides:
//!
//! - Selector normalization: hue codes, names and collections, lightness
//!   values, lists and directional ranges
//! - A filter engine that walks both axes in a chosen order and returns the
//!   matching colors as one record, a palette, hexes or channel tuples
//! - A shared theme state with `light`/`dark` presets and the default color
//!   of every hue at the active lightness
//!
//! # Quick Start
//!
//! ```rust
//! use flexoki::{ColorTable, Filter, LightnessSelector, Shape};
//!
//! let table = ColorTable::builtin();
//!
//! // One coordinate yields one record
//! let red = flexoki::filter("r", 400).unwrap();
//! assert_eq!(red.as_single().unwrap().hex(), "#D14D41");
//!
//! // Ranges follow their direction
//! let hexes = Filter::new()
//!     .hue("b")
//!     .lightness(LightnessSelector::range(600, 400))
//!     .returns(Shape::Hexes)
//!     .run(&table)
//!     .unwrap();
//! assert_eq!(hexes.as_hexes().unwrap(), ["#205EA6", "#3171B2", "#4385BE"]);
//! ```
//!
//! # Selectors
//!
//! | Axis | Accepted forms |
//! |------|----------------|
//! | Hue | code (`"r"`), name (`"red"`), code run (`"rgb"`), list of codes/names, `*` |
//! | Lightness | level (`400`), list of levels, range (`600:50`), `*` |
//!
//! Selectors normalize to ordered lists before any lookup; invalid tokens and
//! levels are reported as [`FlexokiError`]s.
//!
//! # Output Shapes
//!
//! Without an explicit shape a filter matching one record returns that
//! record and anything else returns a [`Palette`]. [`Shape`] forces a list
//! form: palette, hex strings, RGB or RGBA tuples.

mod error;
mod filter;
mod hue;
mod lightness;
mod palette;
mod record;
mod table;
mod theme;

// Re-export public API
pub use error::{FlexokiError, Result};
pub use filter::{AxisOrder, Filter, Selection, Shape};
pub use hue::{Hue, HueSelector};
pub use lightness::{
    is_level, is_shared_level, Dir, LightnessSelector, BLACK_LEVEL, DOMAIN, LEVELS, PAPER_LEVEL,
};
pub use palette::Palette;
pub use record::ColorRecord;
pub use table::{ColorTable, BLACK, PAPER};
pub use theme::{Preset, ThemeConfig, ThemeSnapshot, ThemeState, DEFAULT_HUES, UNSET};

/// Runs a filter with default order and shape against the built-in table.
pub fn filter(
    hue: impl Into<HueSelector>,
    lightness: impl Into<LightnessSelector>,
) -> Result<Selection> {
    Filter::new()
        .hue(hue)
        .lightness(lightness)
        .run(&ColorTable::builtin())
}
