//! Ordered collections of records returned by filters.

use serde::Serialize;

use crate::record::ColorRecord;

/// An ordered list of colors.
///
/// Order is the order the filter visited them in; a palette is never
/// deduplicated or re-sorted behind the caller's back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<ColorRecord>,
}

impl Palette {
    pub fn new(colors: Vec<ColorRecord>) -> Self {
        Palette { colors }
    }

    /// Names of the colors, in order.
    pub fn names(&self) -> Vec<&str> {
        self.colors.iter().map(ColorRecord::name).collect()
    }

    /// Hex strings of the colors, in order.
    pub fn hexes(&self) -> Vec<&str> {
        self.colors.iter().map(ColorRecord::hex).collect()
    }

    pub fn rgb(&self) -> Vec<(u8, u8, u8)> {
        self.colors.iter().map(ColorRecord::rgb).collect()
    }

    pub fn rgba(&self) -> Vec<(u8, u8, u8, u8)> {
        self.colors.iter().map(ColorRecord::rgba).collect()
    }

    /// Returns the palette in reverse order.
    pub fn reversed(mut self) -> Self {
        self.colors.reverse();
        self
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ColorRecord> {
        self.colors.get(index)
    }

    pub fn first(&self) -> Option<&ColorRecord> {
        self.colors.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColorRecord> {
        self.colors.iter()
    }

    pub fn records(&self) -> &[ColorRecord] {
        &self.colors
    }

    pub fn into_records(self) -> Vec<ColorRecord> {
        self.colors
    }
}

impl From<Vec<ColorRecord>> for Palette {
    fn from(colors: Vec<ColorRecord>) -> Self {
        Palette::new(colors)
    }
}

impl FromIterator<ColorRecord> for Palette {
    fn from_iter<I: IntoIterator<Item = ColorRecord>>(iter: I) -> Self {
        Palette::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Palette {
    type Item = ColorRecord;
    type IntoIter = std::vec::IntoIter<ColorRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.into_iter()
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a ColorRecord;
    type IntoIter = std::slice::Iter<'a, ColorRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hue::Hue;

    fn sample() -> Palette {
        Palette::new(vec![
            ColorRecord::new("red-400", Hue::Red, 400, "#D14D41", (209, 77, 65)),
            ColorRecord::new("blue-400", Hue::Blue, 400, "#4385BE", (67, 133, 190)),
        ])
    }

    #[test]
    fn projections_keep_order() {
        let palette = sample();
        assert_eq!(palette.names(), vec!["red-400", "blue-400"]);
        assert_eq!(palette.hexes(), vec!["#D14D41", "#4385BE"]);
        assert_eq!(palette.rgb(), vec![(209, 77, 65), (67, 133, 190)]);
        assert_eq!(palette.rgba()[1], (67, 133, 190, 255));
    }

    #[test]
    fn reversed_flips_order() {
        let palette = sample().reversed();
        assert_eq!(palette.names(), vec!["blue-400", "red-400"]);
    }

    #[test]
    fn serializes_as_list() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["name"], "red-400");
        assert_eq!(json[1]["hue"], "b");
    }

    #[test]
    fn collects_from_iterator() {
        let palette: Palette = sample().into_iter().rev().collect();
        assert_eq!(palette.first().map(ColorRecord::name), Some("blue-400"));
    }
}
