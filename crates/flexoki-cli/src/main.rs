//! flexoki - query the Flexoki color palette from the command line.
//!
//! ```text
//! flexoki filter --hue r --lightness 400
//! flexoki filter --hue rgb --range 600:50 --returns hexes
//! flexoki defaults --theme dark --short
//! ```

mod output;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Args, Parser, Subcommand};
use flexoki::{
    AxisOrder, ColorTable, Filter, HueSelector, LightnessSelector, Preset, Shape, ThemeConfig,
    ThemeState,
};
use tracing::{debug, Level};

use crate::output::Format;

/// Query the Flexoki color palette
#[derive(Parser)]
#[command(name = "flexoki")]
#[command(version)]
#[command(about = "Query the Flexoki color palette by hue and lightness")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Load the color table from a YAML file instead of the built-in one
    #[arg(long, global = true, value_name = "PATH")]
    table: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select colors by hue and lightness
    Filter(FilterArgs),

    /// Show the default color of every hue at a lightness
    Defaults(DefaultsArgs),

    /// List hue codes and names
    Hues(ListArgs),

    /// List lightness levels
    Levels(ListArgs),
}

#[derive(Args)]
#[command(group(ArgGroup::new("levels").args(["lightness", "range"])))]
struct FilterArgs {
    /// Hue code, name or run of codes; repeat for a list
    #[arg(short = 'H', long, value_name = "HUE")]
    hue: Vec<String>,

    /// Lightness level; repeat for a list
    #[arg(short, long, value_name = "LEVEL")]
    lightness: Vec<i32>,

    /// Lightness range, descending when FROM > TO
    #[arg(short, long, value_name = "FROM:TO", value_parser = parse_range)]
    range: Option<(i32, i32)>,

    /// Outer axis: h_l (hue-major) or l_h (lightness-major)
    #[arg(short, long, default_value = "h_l")]
    order: AxisOrder,

    /// Output shape: palette, colors, hexes, rgb or rgba
    #[arg(long, value_name = "SHAPE")]
    returns: Option<Shape>,

    /// Print JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
#[command(group(ArgGroup::new("active").args(["lightness", "theme"])))]
struct DefaultsArgs {
    /// Make this lightness active
    #[arg(short, long, value_name = "LEVEL")]
    lightness: Option<i32>,

    /// Activate a preset: light, dark, or auto to follow the OS
    #[arg(short, long, value_name = "THEME")]
    theme: Option<String>,

    /// Theme configuration file with preset levels
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Name defaults by hue instead of by table name
    #[arg(short, long)]
    short: bool,

    /// Print JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ListArgs {
    /// Print JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let rendered = match &cli.command {
        Commands::Filter(args) => run_filter(args, load_table(cli.table.as_deref())?)?,
        Commands::Defaults(args) => run_defaults(args, load_table(cli.table.as_deref())?)?,
        Commands::Hues(args) => output::hues(Format::detect(args.json))?,
        Commands::Levels(args) => output::levels(Format::detect(args.json))?,
    };
    println!("{}", rendered);
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_table(path: Option<&Path>) -> Result<Arc<ColorTable>> {
    match path {
        Some(path) => {
            let table = ColorTable::from_file(path)
                .with_context(|| format!("loading color table from {}", path.display()))?;
            Ok(Arc::new(table))
        }
        None => Ok(ColorTable::builtin()),
    }
}

fn run_filter(args: &FilterArgs, table: Arc<ColorTable>) -> Result<String> {
    let mut filter = Filter::new()
        .hue(hue_selector(&args.hue))
        .lightness(lightness_selector(&args.lightness, args.range))
        .order(args.order);
    if let Some(shape) = args.returns {
        filter = filter.returns(shape);
    }
    debug!(
        hue = %filter.hue_selector(),
        lightness = %filter.lightness_selector(),
        "running filter"
    );

    let result = filter.run(&table)?;
    output::selection(&result, Format::detect(args.json))
}

fn run_defaults(args: &DefaultsArgs, table: Arc<ColorTable>) -> Result<String> {
    let config = match &args.config {
        Some(path) => {
            let yaml = std::fs::read_to_string(path)
                .with_context(|| format!("reading theme configuration {}", path.display()))?;
            ThemeConfig::from_yaml(&yaml)?
        }
        None => ThemeConfig::default(),
    };
    let state = ThemeState::with_config(table, config)?;

    if let Some(level) = args.lightness {
        state.set_lightness(level)?;
    }
    match args.theme.as_deref() {
        Some("auto") => state.set_preset(os_preset())?,
        Some(name) => state.set_theme(name)?,
        None => {}
    }

    output::defaults(&state.snapshot(), args.short, Format::detect(args.json))
}

fn hue_selector(tokens: &[String]) -> HueSelector {
    match tokens {
        [] => HueSelector::All,
        [token] => HueSelector::Token(token.clone()),
        tokens => HueSelector::Many(tokens.to_vec()),
    }
}

fn lightness_selector(levels: &[i32], range: Option<(i32, i32)>) -> LightnessSelector {
    if let Some((from, to)) = range {
        return LightnessSelector::range(from, to);
    }
    match levels {
        [] => LightnessSelector::All,
        [level] => LightnessSelector::Single(*level),
        levels => LightnessSelector::Many(levels.to_vec()),
    }
}

fn parse_range(s: &str) -> Result<(i32, i32)> {
    let Some((from, to)) = s.split_once(':') else {
        bail!("expected FROM:TO, got '{}'", s);
    };
    let bound = |v: &str| {
        v.trim()
            .parse::<i32>()
            .with_context(|| format!("invalid range bound '{}'", v))
    };
    Ok((bound(from)?, bound(to)?))
}

fn os_preset() -> Preset {
    match dark_light::detect() {
        Ok(dark_light::Mode::Dark) => Preset::Dark,
        Ok(_) => Preset::Light,
        Err(err) => {
            debug!(error = %err, "OS theme detection failed, using light");
            Preset::Light
        }
    }
}
