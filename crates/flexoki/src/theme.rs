//! Active theme and the default colors derived from it.
//!
//! A [`ThemeState`] tracks which lightness level is active and which preset,
//! if any, that level corresponds to. Every change re-runs a filter over the
//! color table to derive the nine default colors (one per hue) at the new
//! level.
//!
//! ## Presets
//!
//! | Preset  | Lightness |
//! |---------|-----------|
//! | `light` | 400       |
//! | `dark`  | 600       |
//!
//! Levels are configurable through [`ThemeConfig`]. Any other level can be
//! made active with [`ThemeState::set_lightness`]; the preset is then unset.
//!
//! ## Consistency
//!
//! Lightness, preset and defaults are published together as one
//! [`ThemeSnapshot`]. A reader holding a snapshot always sees defaults that
//! were derived for that snapshot's lightness, however many updates race
//! with it.
//!
//! ```
//! use flexoki::{ColorTable, Preset, ThemeState};
//!
//! let state = ThemeState::new(ColorTable::builtin()).unwrap();
//! assert_eq!(state.theme(), Some(Preset::Light));
//!
//! state.set_lightness(500).unwrap();
//! assert_eq!(state.theme_label(), "unset");
//! assert!(state.defaults(false).iter().all(|c| c.lightness() == 500));
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FlexokiError, Result};
use crate::filter::Filter;
use crate::hue::Hue;
use crate::lightness::is_shared_level;
use crate::palette::Palette;
use crate::record::ColorRecord;
use crate::table::{ColorTable, BLACK, PAPER};

/// Hues of the default colors, in the order they are returned.
pub const DEFAULT_HUES: [Hue; 9] = [
    Hue::Red,
    Hue::Orange,
    Hue::Yellow,
    Hue::Green,
    Hue::Cyan,
    Hue::Blue,
    Hue::Purple,
    Hue::Magenta,
    Hue::Base,
];

/// Label reported when the active lightness matches no preset.
pub const UNSET: &str = "unset";

/// A named lightness preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Light,
    Dark,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::Light, Preset::Dark];

    pub fn as_str(self) -> &'static str {
        match self {
            Preset::Light => "light",
            Preset::Dark => "dark",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = FlexokiError;

    fn from_str(s: &str) -> Result<Self> {
        Preset::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| FlexokiError::InvalidTheme(s.to_string()))
    }
}

/// Preset levels and the preset a new [`ThemeState`] starts in.
///
/// Missing keys fall back to the defaults when loading from YAML:
///
/// ```
/// use flexoki::{Preset, ThemeConfig};
///
/// let config = ThemeConfig::from_yaml("initial: dark").unwrap();
/// assert_eq!(config.level(Preset::Dark), 600);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Lightness of the `light` preset.
    pub light: i32,
    /// Lightness of the `dark` preset.
    pub dark: i32,
    /// Preset made active on construction.
    pub initial: Preset,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            light: 400,
            dark: 600,
            initial: Preset::Light,
        }
    }
}

impl ThemeConfig {
    /// Parses and validates a configuration from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: ThemeConfig =
            serde_yaml::from_str(yaml).map_err(|e| FlexokiError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that both presets name distinct, settable levels.
    pub fn validate(&self) -> Result<()> {
        for preset in Preset::ALL {
            let level = self.level(preset);
            if !is_shared_level(level) {
                return Err(FlexokiError::Config(format!(
                    "preset '{}' uses lightness {}, which cannot be made active",
                    preset, level
                )));
            }
        }
        if self.light == self.dark {
            return Err(FlexokiError::Config(format!(
                "presets 'light' and 'dark' share lightness {}",
                self.light
            )));
        }
        Ok(())
    }

    /// Lightness of a preset.
    pub fn level(&self, preset: Preset) -> i32 {
        match preset {
            Preset::Light => self.light,
            Preset::Dark => self.dark,
        }
    }

    /// Preset whose lightness is `level`, if any.
    pub fn preset_for(&self, level: i32) -> Option<Preset> {
        Preset::ALL.into_iter().find(|&p| self.level(p) == level)
    }
}

/// An immutable view of the theme at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSnapshot {
    lightness: i32,
    preset: Option<Preset>,
    defaults: Palette,
}

impl ThemeSnapshot {
    pub fn lightness(&self) -> i32 {
        self.lightness
    }

    pub fn preset(&self) -> Option<Preset> {
        self.preset
    }

    /// Preset name, or `"unset"`.
    pub fn theme_label(&self) -> &'static str {
        self.preset.map_or(UNSET, Preset::as_str)
    }

    /// The default colors under their table names.
    pub fn palette(&self) -> &Palette {
        &self.defaults
    }

    /// The default colors, optionally renamed to their hue names.
    ///
    /// With short names the achromatic default is called `base`, except at
    /// the levels next to the sentinels: `paper` at 50 and `black` at 950.
    pub fn defaults(&self, short_names: bool) -> Vec<ColorRecord> {
        if !short_names {
            return self.defaults.records().to_vec();
        }
        self.defaults
            .iter()
            .map(|record| record.renamed(short_name(record)))
            .collect()
    }
}

fn short_name(record: &ColorRecord) -> &'static str {
    match (record.hue(), record.lightness()) {
        (Hue::Base, 50) => PAPER,
        (Hue::Base, 950) => BLACK,
        (hue, _) => hue.name(),
    }
}

/// The active lightness and its derived default colors.
///
/// Owned by the application and shared by reference; it is `Send + Sync`.
/// Setters take `&self` and either publish a complete new snapshot or
/// change nothing.
pub struct ThemeState {
    table: Arc<ColorTable>,
    config: ThemeConfig,
    current: ArcSwap<ThemeSnapshot>,
}

impl ThemeState {
    /// Creates a state over `table` using the default presets.
    pub fn new(table: Arc<ColorTable>) -> Result<Self> {
        Self::with_config(table, ThemeConfig::default())
    }

    /// Creates a state over the built-in table using the default presets.
    pub fn builtin() -> Result<Self> {
        Self::new(ColorTable::builtin())
    }

    /// Creates a state with custom presets, starting in `config.initial`.
    ///
    /// # Errors
    ///
    /// [`FlexokiError::Config`] for an invalid configuration, or
    /// [`FlexokiError::InvalidTable`] if the table lacks a default color at
    /// the initial level.
    pub fn with_config(table: Arc<ColorTable>, config: ThemeConfig) -> Result<Self> {
        config.validate()?;
        let snapshot = derive(&table, &config, config.level(config.initial))?;
        Ok(ThemeState {
            table,
            config,
            current: ArcSwap::from_pointee(snapshot),
        })
    }

    /// Makes `level` the active lightness and re-derives the defaults.
    ///
    /// # Errors
    ///
    /// [`FlexokiError::InvalidLightness`] unless `level` is one of the levels
    /// between the two sentinels. State is unchanged on error.
    pub fn set_lightness(&self, level: i32) -> Result<()> {
        if !is_shared_level(level) {
            return Err(FlexokiError::InvalidLightness(level));
        }
        let snapshot = derive(&self.table, &self.config, level)?;
        debug!(
            lightness = level,
            theme = snapshot.theme_label(),
            "active lightness changed"
        );
        self.current.store(Arc::new(snapshot));
        Ok(())
    }

    /// Activates a preset by name (`"light"` or `"dark"`).
    ///
    /// # Errors
    ///
    /// [`FlexokiError::InvalidTheme`] for an unknown name. State is unchanged
    /// on error.
    pub fn set_theme(&self, name: &str) -> Result<()> {
        let preset = name.parse::<Preset>()?;
        self.set_preset(preset)
    }

    /// Activates a preset.
    pub fn set_preset(&self, preset: Preset) -> Result<()> {
        self.set_lightness(self.config.level(preset))
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> Arc<ThemeSnapshot> {
        self.current.load_full()
    }

    pub fn lightness(&self) -> i32 {
        self.current.load().lightness
    }

    /// Active preset, if the active lightness matches one.
    pub fn theme(&self) -> Option<Preset> {
        self.current.load().preset
    }

    /// Active preset name, or `"unset"`.
    pub fn theme_label(&self) -> &'static str {
        self.current.load().theme_label()
    }

    /// The nine default colors at the active lightness.
    pub fn defaults(&self, short_names: bool) -> Vec<ColorRecord> {
        self.current.load().defaults(short_names)
    }

    pub fn table(&self) -> &Arc<ColorTable> {
        &self.table
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }
}

impl fmt::Debug for ThemeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let current = self.current.load();
        f.debug_struct("ThemeState")
            .field("lightness", &current.lightness)
            .field("preset", &current.preset)
            .field("config", &self.config)
            .finish()
    }
}

fn derive(table: &ColorTable, config: &ThemeConfig, level: i32) -> Result<ThemeSnapshot> {
    let defaults = Filter::new()
        .hue(DEFAULT_HUES)
        .lightness(level)
        .records(table)?;
    if defaults.len() != DEFAULT_HUES.len() {
        return Err(FlexokiError::InvalidTable(format!(
            "expected {} default colors at lightness {}, found {}",
            DEFAULT_HUES.len(),
            level,
            defaults.len()
        )));
    }
    Ok(ThemeSnapshot {
        lightness: level,
        preset: config.preset_for(level),
        defaults: Palette::new(defaults),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ThemeState {
        ThemeState::builtin().unwrap()
    }

    #[test]
    fn starts_in_light_preset() {
        let state = state();
        assert_eq!(state.lightness(), 400);
        assert_eq!(state.theme(), Some(Preset::Light));
        assert_eq!(state.theme_label(), "light");
    }

    #[test]
    fn presets_follow_lightness() {
        let state = state();
        state.set_lightness(600).unwrap();
        assert_eq!(state.theme(), Some(Preset::Dark));
        state.set_lightness(400).unwrap();
        assert_eq!(state.theme(), Some(Preset::Light));
        state.set_lightness(700).unwrap();
        assert_eq!(state.theme(), None);
        assert_eq!(state.theme_label(), "unset");
    }

    #[test]
    fn set_theme_by_name() {
        let state = state();
        state.set_theme("dark").unwrap();
        assert_eq!(state.lightness(), 600);
        state.set_theme("Light").unwrap();
        assert_eq!(state.lightness(), 400);
    }

    #[test]
    fn defaults_track_lightness() {
        let state = state();
        state.set_lightness(500).unwrap();
        let defaults = state.defaults(false);
        assert_eq!(defaults.len(), 9);
        assert!(defaults.iter().all(|c| c.lightness() == 500));
        let hues: Vec<Hue> = defaults.iter().map(ColorRecord::hue).collect();
        assert_eq!(hues, DEFAULT_HUES.to_vec());
        assert_eq!(defaults[0].name(), "red-500");
        assert_eq!(defaults[8].name(), "base-500");
    }

    #[test]
    fn short_names() {
        let state = state();
        let names: Vec<String> = state
            .defaults(true)
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(
            names,
            ["red", "orange", "yellow", "green", "cyan", "blue", "purple", "magenta", "base"]
        );
    }

    #[test]
    fn short_base_name_next_to_sentinels() {
        let state = state();
        state.set_lightness(50).unwrap();
        let base = state.defaults(true).pop().unwrap();
        assert_eq!(base.name(), "paper");
        assert_eq!(base.hex(), "#F2F0E5");

        state.set_lightness(950).unwrap();
        let base = state.defaults(true).pop().unwrap();
        assert_eq!(base.name(), "black");
        assert_eq!(base.hex(), "#1C1B1A");
    }

    #[test]
    fn rejects_sentinels_and_unknown_levels() {
        let state = state();
        state.set_lightness(500).unwrap();
        for level in [0, 1000, 450, -50] {
            assert_eq!(
                state.set_lightness(level).unwrap_err(),
                FlexokiError::InvalidLightness(level)
            );
        }
        assert_eq!(state.lightness(), 500);
        assert!(state.defaults(false).iter().all(|c| c.lightness() == 500));
    }

    #[test]
    fn rejects_unknown_theme() {
        let state = state();
        let before = state.snapshot();
        assert_eq!(
            state.set_theme("sepia").unwrap_err(),
            FlexokiError::InvalidTheme("sepia".to_string())
        );
        assert_eq!(*state.snapshot(), *before);
    }

    #[test]
    fn snapshot_outlives_updates() {
        let state = state();
        let before = state.snapshot();
        state.set_lightness(800).unwrap();
        assert_eq!(before.lightness(), 400);
        assert!(before.palette().iter().all(|c| c.lightness() == 400));
        assert_eq!(state.snapshot().lightness(), 800);
    }

    #[test]
    fn custom_config() {
        let config = ThemeConfig {
            light: 300,
            dark: 700,
            initial: Preset::Dark,
        };
        let state = ThemeState::with_config(ColorTable::builtin(), config).unwrap();
        assert_eq!(state.lightness(), 700);
        assert_eq!(state.theme(), Some(Preset::Dark));
        state.set_lightness(400).unwrap();
        assert_eq!(state.theme(), None);
    }

    #[test]
    fn config_from_yaml() {
        let config = ThemeConfig::from_yaml("light: 300\ndark: 800\n").unwrap();
        assert_eq!(config.initial, Preset::Light);
        assert_eq!(config.preset_for(800), Some(Preset::Dark));
        assert_eq!(config.preset_for(600), None);
    }

    #[test]
    fn config_rejects_bad_levels() {
        let err = ThemeConfig::from_yaml("light: 0").unwrap_err();
        assert!(matches!(err, FlexokiError::Config(msg) if msg.contains("'light'")));

        let err = ThemeConfig::from_yaml("light: 600").unwrap_err();
        assert!(matches!(err, FlexokiError::Config(msg) if msg.contains("share")));

        let err = ThemeConfig::from_yaml("mode: auto").unwrap_err();
        assert!(matches!(err, FlexokiError::Config(_)));
    }

    #[test]
    fn readers_never_see_mixed_snapshots() {
        let state = state();
        std::thread::scope(|scope| {
            scope.spawn(|| {
                for level in [50, 300, 600, 950].iter().cycle().take(200) {
                    state.set_lightness(*level).unwrap();
                }
            });
            for _ in 0..2 {
                scope.spawn(|| {
                    for _ in 0..200 {
                        let snapshot = state.snapshot();
                        let level = snapshot.lightness();
                        assert!(snapshot.palette().iter().all(|c| c.lightness() == level));
                        assert_eq!(snapshot.preset(), state.config().preset_for(level));
                    }
                });
            }
        });
    }

    #[test]
    fn preset_parsing() {
        assert_eq!("DARK".parse::<Preset>().unwrap(), Preset::Dark);
        assert!(matches!(
            "".parse::<Preset>(),
            Err(FlexokiError::InvalidTheme(_))
        ));
    }
}
