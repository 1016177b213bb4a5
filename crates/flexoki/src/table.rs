//! The color table: every named record, loaded once and never mutated.
//!
//! The built-in Flexoki table ships as an embedded YAML asset and is parsed
//! on first use. Alternative tables with the same layout can be loaded with
//! [`ColorTable::from_yaml`] or [`ColorTable::from_file`]; loading checks the
//! same invariants the built-in table satisfies:
//!
//! - names are unique
//! - every `hex` is `#RRGGBB` and agrees with `rgb`
//! - every lightness is a canonical level, and the sentinels `0`/`1000` only
//!   appear on the achromatic hue
//! - `(hue, lightness)` is unique, except that the sentinel coordinates may
//!   carry an alias next to the `paper` and `black` records, which must exist

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::error::{FlexokiError, Result};
use crate::filter::{AxisOrder, Filter, Selection, Shape};
use crate::hue::{Hue, HueSelector};
use crate::lightness::{self, LightnessSelector, BLACK_LEVEL, PAPER_LEVEL};
use crate::record::{parse_hex, ColorRecord};

/// Name of the record returned for the lightest achromatic coordinate.
pub const PAPER: &str = "paper";

/// Name of the record returned for the darkest achromatic coordinate.
pub const BLACK: &str = "black";

const BUILTIN_YAML: &str = include_str!("../data/flexoki.yaml");

static BUILTIN: Lazy<Arc<ColorTable>> = Lazy::new(|| {
    Arc::new(ColorTable::from_yaml(BUILTIN_YAML).expect("embedded flexoki table is valid"))
});

/// An immutable, ordered mapping from color name to record.
#[derive(Debug, Clone)]
pub struct ColorTable {
    records: Vec<ColorRecord>,
    index: HashMap<String, usize>,
    paper: usize,
    black: usize,
}

impl ColorTable {
    /// Returns the shared built-in Flexoki table.
    pub fn builtin() -> Arc<ColorTable> {
        Arc::clone(&BUILTIN)
    }

    /// Parses a table from YAML: a list of records with `name`, `hue`,
    /// `lightness`, `hex` and `rgb` keys.
    ///
    /// # Errors
    ///
    /// [`FlexokiError::TableLoad`] if the YAML does not parse, or
    /// [`FlexokiError::InvalidTable`] if a table invariant is broken.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let records: Vec<ColorRecord> = serde_yaml::from_str(yaml)?;
        Self::from_records(records)
    }

    /// Loads a table from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            FlexokiError::TableLoad(format!("failed to read {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "loading color table");
        Self::from_yaml(&content)
    }

    /// Builds a table from records, in the given order.
    pub fn from_records(records: Vec<ColorRecord>) -> Result<Self> {
        let mut index = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            check_record(record)?;
            if index.insert(record.name().to_string(), i).is_some() {
                return Err(invalid(format!("duplicate name '{}'", record.name())));
            }
        }
        check_coordinates(&records)?;

        let paper = sentinel_index(&records, &index, PAPER, PAPER_LEVEL)?;
        let black = sentinel_index(&records, &index, BLACK, BLACK_LEVEL)?;

        debug!(records = records.len(), "color table ready");
        Ok(ColorTable {
            records,
            index,
            paper,
            black,
        })
    }

    /// Looks up a record by name.
    pub fn get(&self, name: &str) -> Option<&ColorRecord> {
        self.index.get(name).map(|&i| &self.records[i])
    }

    /// Returns `true` if a record with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All records in table order.
    pub fn records(&self) -> &[ColorRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColorRecord> {
        self.records.iter()
    }

    /// All names in table order.
    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The lightest achromatic endpoint.
    pub fn paper(&self) -> &ColorRecord {
        &self.records[self.paper]
    }

    /// The darkest achromatic endpoint.
    pub fn black(&self) -> &ColorRecord {
        &self.records[self.black]
    }

    /// Every record at exactly `(hue, lightness)`, aliases included.
    pub fn at(&self, hue: Hue, lightness: i32) -> impl Iterator<Item = &ColorRecord> + '_ {
        self.records.iter().filter(move |r| r.is_at(hue, lightness))
    }

    /// Runs a filter against this table.
    ///
    /// Shorthand for building a [`Filter`]; `None` for `order` or `shape`
    /// means the default.
    pub fn filter(
        &self,
        hue: impl Into<HueSelector>,
        lightness: impl Into<LightnessSelector>,
        order: Option<AxisOrder>,
        shape: Option<Shape>,
    ) -> Result<Selection> {
        let mut filter = Filter::new()
            .hue(hue)
            .lightness(lightness)
            .order(order.unwrap_or_default());
        if let Some(shape) = shape {
            filter = filter.returns(shape);
        }
        filter.run(self)
    }
}

impl<'a> IntoIterator for &'a ColorTable {
    type Item = &'a ColorRecord;
    type IntoIter = std::slice::Iter<'a, ColorRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn invalid(message: String) -> FlexokiError {
    FlexokiError::InvalidTable(message)
}

fn sentinel_name(level: i32) -> &'static str {
    if level == PAPER_LEVEL {
        PAPER
    } else {
        BLACK
    }
}

fn check_record(record: &ColorRecord) -> Result<()> {
    let name = record.name();
    if name.is_empty() {
        return Err(invalid("record with empty name".to_string()));
    }
    match parse_hex(record.hex()) {
        Some(rgb) if rgb == record.rgb() => {}
        Some(_) => {
            return Err(invalid(format!(
                "'{}': hex {} does not match rgb {:?}",
                name,
                record.hex(),
                record.rgb()
            )))
        }
        None => {
            return Err(invalid(format!(
                "'{}': hex '{}' is not #RRGGBB",
                name,
                record.hex()
            )))
        }
    }
    let level = record.lightness();
    if !lightness::is_level(level) {
        return Err(invalid(format!("'{}': unknown lightness {}", name, level)));
    }
    if !record.hue().is_achromatic() && !lightness::is_shared_level(level) {
        return Err(invalid(format!(
            "'{}': lightness {} is reserved for the achromatic hue",
            name, level
        )));
    }
    Ok(())
}

fn check_coordinates(records: &[ColorRecord]) -> Result<()> {
    let mut coordinates: HashMap<(Hue, i32), Vec<&str>> = HashMap::new();
    for record in records {
        coordinates
            .entry((record.hue(), record.lightness()))
            .or_default()
            .push(record.name());
    }

    for ((hue, level), names) in &coordinates {
        let sentinel = hue.is_achromatic() && (*level == PAPER_LEVEL || *level == BLACK_LEVEL);
        if names.len() > 1 && !sentinel {
            return Err(invalid(format!(
                "{} share hue '{}' and lightness {}",
                names.join(", "),
                hue.code(),
                level
            )));
        }
        if names.len() > 2 {
            return Err(invalid(format!(
                "at most one alias may share lightness {} with '{}'",
                level,
                sentinel_name(*level)
            )));
        }
    }
    Ok(())
}

fn sentinel_index(
    records: &[ColorRecord],
    index: &HashMap<String, usize>,
    name: &str,
    level: i32,
) -> Result<usize> {
    let i = *index
        .get(name)
        .ok_or_else(|| invalid(format!("missing '{}' record", name)))?;
    if !records[i].is_at(Hue::Base, level) {
        return Err(invalid(format!(
            "'{}' must sit at hue 'k' and lightness {}",
            name, level
        )));
    }
    Ok(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r##"
- { name: paper, hue: k, lightness: 0, hex: "#FFFCF0", rgb: [255, 252, 240] }
- { name: base-500, hue: k, lightness: 500, hex: "#878580", rgb: [135, 133, 128] }
- { name: black, hue: k, lightness: 1000, hex: "#100F0F", rgb: [16, 15, 15] }
- { name: red-400, hue: r, lightness: 400, hex: "#D14D41", rgb: [209, 77, 65] }
"##;

    #[test]
    fn builtin_table_loads() {
        let table = ColorTable::builtin();
        // 17 achromatic records (two aliases) plus 8 hues x 13 levels.
        assert_eq!(table.len(), 17 + 8 * 13);
        assert_eq!(table.records()[0].name(), "paper");
        assert_eq!(table.paper().hex(), "#FFFCF0");
        assert_eq!(table.black().hex(), "#100F0F");
    }

    #[test]
    fn builtin_is_shared() {
        assert!(Arc::ptr_eq(&ColorTable::builtin(), &ColorTable::builtin()));
    }

    #[test]
    fn builtin_has_every_shared_level_per_hue() {
        let table = ColorTable::builtin();
        for hue in Hue::ALL {
            for level in lightness::LEVELS {
                assert_eq!(table.at(hue, level).count(), 1, "{} {}", hue, level);
            }
        }
    }

    #[test]
    fn sentinel_aliases_share_coordinates() {
        let table = ColorTable::builtin();
        let light: Vec<&str> = table.at(Hue::Base, 0).map(|r| r.name()).collect();
        assert_eq!(light, vec!["paper", "base-0"]);
        let dark: Vec<&str> = table.at(Hue::Base, 1000).map(|r| r.name()).collect();
        assert_eq!(dark, vec!["base-1000", "black"]);
    }

    #[test]
    fn lookup_by_name() {
        let table = ColorTable::builtin();
        let red = table.get("red-400").unwrap();
        assert_eq!(red.hex(), "#D14D41");
        assert!(table.contains("magenta-950"));
        assert!(table.get("red-450").is_none());
    }

    #[test]
    fn small_table_from_yaml() {
        let table = ColorTable::from_yaml(SMALL).unwrap();
        assert_eq!(table.names(), vec!["paper", "base-500", "black", "red-400"]);
    }

    #[test]
    fn rejects_bad_yaml() {
        let err = ColorTable::from_yaml("- { name: paper").unwrap_err();
        assert!(matches!(err, FlexokiError::TableLoad(_)));
    }

    #[test]
    fn rejects_duplicate_names() {
        let yaml = format!(
            "{}- {{ name: red-400, hue: r, lightness: 500, hex: \"#C03E35\", rgb: [192, 62, 53] }}\n",
            SMALL
        );
        let err = ColorTable::from_yaml(&yaml).unwrap_err();
        assert!(matches!(err, FlexokiError::InvalidTable(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn rejects_shared_chromatic_coordinate() {
        let yaml = format!(
            "{}- {{ name: tomato, hue: r, lightness: 400, hex: \"#D14D41\", rgb: [209, 77, 65] }}\n",
            SMALL
        );
        let err = ColorTable::from_yaml(&yaml).unwrap_err();
        assert!(matches!(err, FlexokiError::InvalidTable(msg) if msg.contains("share")));
    }

    #[test]
    fn rejects_sentinel_on_chromatic_hue() {
        let yaml = format!(
            "{}- {{ name: red-0, hue: r, lightness: 0, hex: \"#FFFFFF\", rgb: [255, 255, 255] }}\n",
            SMALL
        );
        let err = ColorTable::from_yaml(&yaml).unwrap_err();
        assert!(matches!(err, FlexokiError::InvalidTable(msg) if msg.contains("reserved")));
    }

    #[test]
    fn rejects_hex_rgb_mismatch() {
        let yaml = SMALL.replace("[209, 77, 65]", "[209, 77, 66]");
        let err = ColorTable::from_yaml(&yaml).unwrap_err();
        assert!(matches!(err, FlexokiError::InvalidTable(msg) if msg.contains("does not match")));
    }

    #[test]
    fn requires_paper_and_black() {
        let yaml = SMALL.replace("name: black", "name: ink");
        let err = ColorTable::from_yaml(&yaml).unwrap_err();
        assert_eq!(
            err,
            FlexokiError::InvalidTable("missing 'black' record".to_string())
        );
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.yaml");
        std::fs::write(&path, SMALL).unwrap();

        let table = ColorTable::from_file(&path).unwrap();
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = ColorTable::from_file("/nonexistent/flexoki.yaml").unwrap_err();
        assert!(matches!(err, FlexokiError::TableLoad(msg) if msg.contains("failed to read")));
    }
}
