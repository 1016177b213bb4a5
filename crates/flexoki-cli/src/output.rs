//! Plain-text and JSON rendering of query results.

use console::{Color, Style};
use flexoki::{ColorRecord, Hue, Selection, ThemeSnapshot, DOMAIN, LEVELS};
use serde::Serialize;

/// Width of the name column; fits `magenta-950`.
const NAME_WIDTH: usize = 12;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Aligned text, styled when `color` is set.
    Plain { color: bool },
    Json,
}

impl Format {
    pub fn detect(json: bool) -> Self {
        if json {
            Format::Json
        } else {
            Format::Plain {
                color: console::Term::stdout().features().colors_supported(),
            }
        }
    }
}

pub fn selection(result: &Selection, format: Format) -> anyhow::Result<String> {
    let color = match format {
        Format::Json => return Ok(serde_json::to_string_pretty(result)?),
        Format::Plain { color } => color,
    };
    let lines: Vec<String> = match result {
        Selection::Single(record) => vec![record_line(record, color)],
        Selection::Palette(palette) => palette.iter().map(|r| record_line(r, color)).collect(),
        Selection::Colors(colors) => colors.iter().map(|r| record_line(r, color)).collect(),
        Selection::Hexes(hexes) => hexes.clone(),
        Selection::Rgb(rgb) => rgb
            .iter()
            .map(|(r, g, b)| format!("{}, {}, {}", r, g, b))
            .collect(),
        Selection::Rgba(rgba) => rgba
            .iter()
            .map(|(r, g, b, a)| format!("{}, {}, {}, {}", r, g, b, a))
            .collect(),
    };
    Ok(lines.join("\n"))
}

#[derive(Serialize)]
struct DefaultsView<'a> {
    theme: &'static str,
    lightness: i32,
    defaults: &'a [ColorRecord],
}

pub fn defaults(snapshot: &ThemeSnapshot, short_names: bool, format: Format) -> anyhow::Result<String> {
    let records = snapshot.defaults(short_names);
    match format {
        Format::Json => Ok(serde_json::to_string_pretty(&DefaultsView {
            theme: snapshot.theme_label(),
            lightness: snapshot.lightness(),
            defaults: &records,
        })?),
        Format::Plain { color } => {
            let header = format!(
                "theme: {} (lightness {})",
                snapshot.theme_label(),
                snapshot.lightness()
            );
            let mut lines = vec![heading(&header, color)];
            lines.extend(records.iter().map(|r| record_line(r, color)));
            Ok(lines.join("\n"))
        }
    }
}

pub fn hues(format: Format) -> anyhow::Result<String> {
    #[derive(Serialize)]
    struct HueView {
        code: char,
        name: &'static str,
    }

    match format {
        Format::Json => {
            let view: Vec<HueView> = Hue::ALL
                .iter()
                .map(|h| HueView {
                    code: h.code(),
                    name: h.name(),
                })
                .collect();
            Ok(serde_json::to_string_pretty(&view)?)
        }
        Format::Plain { .. } => Ok(Hue::ALL
            .iter()
            .map(|h| format!("{}  {}", h.code(), h.name()))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

pub fn levels(format: Format) -> anyhow::Result<String> {
    match format {
        Format::Json => Ok(serde_json::to_string(&DOMAIN)?),
        Format::Plain { .. } => Ok(DOMAIN
            .iter()
            .map(|level| {
                if LEVELS.contains(level) {
                    level.to_string()
                } else {
                    format!("{} (base only)", level)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

fn heading(text: &str, color: bool) -> String {
    if color {
        Style::new().bold().force_styling(true).apply_to(text).to_string()
    } else {
        text.to_string()
    }
}

fn record_line(record: &ColorRecord, color: bool) -> String {
    let name = format!("{:<width$}", record.name(), width = NAME_WIDTH);
    if !color {
        return format!("{} {}", name, record.hex());
    }
    format!(
        "{} {} {}",
        swatch(record.rgb()),
        Style::new().bold().force_styling(true).apply_to(name),
        Style::new().dim().force_styling(true).apply_to(record.hex())
    )
}

fn swatch(rgb: (u8, u8, u8)) -> String {
    Style::new()
        .bg(Color::Color256(rgb_to_ansi256(rgb)))
        .force_styling(true)
        .apply_to("  ")
        .to_string()
}

/// Converts an RGB triplet to the nearest ANSI 256-color palette index.
fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let red = (r as u16 * 5 / 255) as u8;
        let green = (g as u16 * 5 / 255) as u8;
        let blue = (b as u16 * 5 / 255) as u8;
        16 + 36 * red + 6 * green + blue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexoki::{ColorTable, Filter, Shape, ThemeState};

    const PLAIN: Format = Format::Plain { color: false };

    #[test]
    fn single_record_line() {
        let result = flexoki::filter("r", 400).unwrap();
        assert_eq!(selection(&result, PLAIN).unwrap(), "red-400      #D14D41");
    }

    #[test]
    fn palette_lines_in_order() {
        let result = flexoki::filter("k", [0, 1000]).unwrap();
        assert_eq!(
            selection(&result, PLAIN).unwrap(),
            "paper        #FFFCF0\nblack        #100F0F"
        );
    }

    #[test]
    fn channel_shapes() {
        let table = ColorTable::builtin();
        let rgba = Filter::new()
            .hue("b")
            .lightness(400)
            .returns(Shape::Rgba)
            .run(&table)
            .unwrap();
        assert_eq!(selection(&rgba, PLAIN).unwrap(), "67, 133, 190, 255");
    }

    #[test]
    fn colored_line_carries_swatch() {
        let result = flexoki::filter("r", 400).unwrap();
        let line = selection(&result, Format::Plain { color: true }).unwrap();
        assert!(line.starts_with(&swatch((209, 77, 65))));
        assert!(line.contains("red-400"));
        assert!(line.contains("#D14D41"));
    }

    #[test]
    fn swatch_is_a_console_background() {
        let expected = Style::new()
            .bg(Color::Color256(167))
            .force_styling(true)
            .apply_to("  ")
            .to_string();
        assert_eq!(swatch((209, 77, 65)), expected);
    }

    #[test]
    fn ansi256_mapping() {
        assert_eq!(rgb_to_ansi256((255, 0, 0)), 196);
        assert_eq!(rgb_to_ansi256((0, 255, 0)), 46);
        assert_eq!(rgb_to_ansi256((209, 77, 65)), 167);
        // Grays use the grayscale ramp.
        assert_eq!(rgb_to_ansi256((0, 0, 0)), 16);
        assert_eq!(rgb_to_ansi256((255, 255, 255)), 231);
        assert_eq!(rgb_to_ansi256((128, 128, 128)), 243);
    }

    #[test]
    fn json_selection() {
        let result = flexoki::filter("r", 400).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&selection(&result, Format::Json).unwrap()).unwrap();
        assert_eq!(json["hex"], "#D14D41");
        assert_eq!(json["rgb"], serde_json::json!([209, 77, 65]));
    }

    #[test]
    fn defaults_plain_and_json() {
        let state = ThemeState::builtin().unwrap();
        state.set_theme("dark").unwrap();
        let snapshot = state.snapshot();

        let plain = defaults(&snapshot, true, PLAIN).unwrap();
        let mut lines = plain.lines();
        assert_eq!(lines.next(), Some("theme: dark (lightness 600)"));
        assert_eq!(lines.next(), Some("red          #AF3029"));
        assert_eq!(plain.lines().count(), 10);

        let json: serde_json::Value =
            serde_json::from_str(&defaults(&snapshot, false, Format::Json).unwrap()).unwrap();
        assert_eq!(json["theme"], "dark");
        assert_eq!(json["defaults"].as_array().map(Vec::len), Some(9));
        assert_eq!(json["defaults"][8]["name"], "base-600");
    }

    #[test]
    fn listings() {
        assert!(hues(PLAIN).unwrap().starts_with("k  base\nr  red"));
        let levels = levels(PLAIN).unwrap();
        assert!(levels.starts_with("0 (base only)\n50\n"));
        assert!(levels.ends_with("950\n1000 (base only)"));
    }
}
