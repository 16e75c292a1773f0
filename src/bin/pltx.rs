use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, error, info};

use pltx::config::{schema_json_pretty, StyleOptions};
use pltx::plotting::{AxisSetup, LegendFormat, ReferenceLines, Recorder};
use pltx::style::{available_palettes, progression, Category, Color, Palette, Preset, RcParams};
use pltx::StyleContext;

#[derive(Parser)]
#[command(name = "pltx")]
#[command(
    about = "Publication-style plot styling",
    long_about = "Inspect palettes, line width progressions and style presets, and preview the drawing calls produced by the styled plotting wrappers."
)]
struct Cli {
    /// Log verbosity level
    #[arg(long, global = true, default_value = "warn")]
    log_level: LogLevel,
    /// Write log output to a file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the colors of a palette
    Palette {
        /// Palette name, e.g. "viridis", "tab10" or "mako_r"
        name: String,
        /// Number of colors to sample
        #[arg(long, default_value_t = 10)]
        size: usize,
        /// Intensity factor in (0, 1]; lower values blend towards white
        #[arg(long, default_value_t = 1.0)]
        intensity: f64,
        /// Opacity in [0, 1]
        #[arg(long)]
        alpha: Option<f64>,
    },
    /// Print a line width progression
    Widths {
        /// Width of the first line
        #[arg(long, default_value_t = 2.0)]
        base: f64,
        /// Multiplier per line
        #[arg(long, default_value_t = 1.3)]
        factor: f64,
        /// Number of widths to print
        #[arg(long, default_value_t = 5)]
        count: usize,
    },
    /// Print a preset's parameter table as JSON
    Preset {
        /// One of default, nature, presentation, poster
        name: String,
        /// Parameter override as KEY=JSON (e.g. "text.usetex=true"); repeatable
        #[arg(long = "set", value_name = "KEY=JSON")]
        overrides: Vec<String>,
    },
    /// List known palettes by category
    Palettes,
    /// Print the JSON schema of the style options file
    Schema,
    /// Draw a demo figure against a recorder and print the calls as JSON
    Demo {
        /// Style options JSON file
        #[arg(long)]
        config: Option<String>,
        /// Preset applied after the options
        #[arg(long)]
        preset: Option<String>,
        /// Number of curves to draw
        #[arg(long, default_value_t = 3)]
        lines: usize,
    },
}

fn main() {
    let cli = Cli::parse();

    let mut log_builder = env_logger::Builder::from_default_env();
    log_builder
        .filter_level(cli.log_level.to_level_filter())
        .format_module_path(false);
    if let Some(ref path) = cli.log_file {
        match std::fs::File::create(path) {
            Ok(file) => {
                log_builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => {
                eprintln!("Could not open log file '{}': {}", path, e);
                std::process::exit(2);
            }
        }
    }
    log_builder.init();

    if let Err(e) = run(&cli.command) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(command: &Commands) -> Result<()> {
    match command {
        Commands::Palette {
            name,
            size,
            intensity,
            alpha,
        } => {
            let colors = palette_colors(name, *size, *intensity, *alpha)
                .with_context(|| format!("Could not resolve palette '{}'", name))?;
            for (i, color) in colors.iter().enumerate() {
                println!(
                    "{}\t{}\t{:.4}\t{:.4}\t{:.4}\t{:.2}",
                    i,
                    color.to_hex(),
                    color.r,
                    color.g,
                    color.b,
                    color.alpha()
                );
            }
        }
        Commands::Widths { base, factor, count } => {
            for (i, width) in progression(*count, *base, *factor)?.iter().enumerate() {
                println!("{}\t{:.2}", i, width);
            }
        }
        Commands::Preset { name, overrides } => {
            let config = Preset::from_name(name)?
                .config()
                .with_overrides(&parse_overrides(overrides)?)?;
            println!("{}", serde_json::to_string_pretty(&config.rc_params)?);
        }
        Commands::Palettes => {
            let palettes = available_palettes();
            for category in [Category::Sequential, Category::Diverging, Category::Categorical] {
                println!("{:?}:", category);
                for info in palettes.iter().filter(|p| p.category == category) {
                    let note = if info.available { "" } else { " (unavailable)" };
                    println!("  {}{}", info.name, note);
                }
            }
        }
        Commands::Schema => {
            println!("{}", schema_json_pretty()?);
        }
        Commands::Demo {
            config,
            preset,
            lines,
        } => {
            let options = match config {
                Some(path) => StyleOptions::load(path)
                    .with_context(|| format!("Error loading style options {}", path))?,
                None => StyleOptions::default(),
            };
            let mut ctx = StyleContext::from_options(&options)?;
            if let Some(preset) = preset {
                ctx.apply_preset(preset)?;
            }
            let recorder = draw_demo(&mut ctx, *lines)?;
            info!("Recorded {} drawing calls", recorder.len());
            println!("{}", recorder.to_json_pretty()?);
        }
    }
    Ok(())
}

fn palette_colors(name: &str, size: usize, intensity: f64, alpha: Option<f64>) -> Result<Vec<Color>> {
    let palette = Palette::cached(name, size)?;
    palette
        .iter()
        .map(|color| -> Result<Color> {
            let color = if intensity != 1.0 {
                color.with_intensity(intensity)?
            } else {
                *color
            };
            Ok(match alpha {
                Some(alpha) => color.with_alpha(alpha)?,
                None => color,
            })
        })
        .collect()
}

fn parse_overrides(raw: &[String]) -> Result<RcParams> {
    let mut overrides = RcParams::new();
    for item in raw {
        let Some((key, value)) = item.split_once('=') else {
            bail!("Override '{}' is not of the form KEY=JSON", item);
        };
        let value = serde_json::from_str::<serde_json::Value>(value)
            .or_else(|_| serde_json::to_value(value))
            .with_context(|| format!("Invalid value for '{}'", key))?;
        debug!("Override {} = {}", key, value);
        overrides.insert(key.to_string(), value);
    }
    Ok(overrides)
}

fn draw_demo(ctx: &mut StyleContext, lines: usize) -> Result<Recorder> {
    let mut rec = Recorder::new();
    let x: Vec<f64> = (0..50).map(|i| i as f64 * 0.2).collect();
    for n in 0..lines {
        let phase = n as f64 * 0.5;
        let y: Vec<f64> = x.iter().map(|v| (v + phase).sin()).collect();
        ctx.plot_styled(&mut rec, &x, y)
            .label(format!("series {}", n + 1))
            .build()?;
    }
    ctx.add_reference_line(&mut rec, &ReferenceLines::new().horizontal(0.0))?;
    ctx.setup_axis(
        &mut rec,
        &AxisSetup::new()
            .xlim(0.0, 10.0)
            .ylim(-1.5, 1.5)
            .xlabel("x")
            .ylabel("sin(x + phase)")
            .grid(0.3),
    )?;
    ctx.format_legend(&mut rec, &LegendFormat::new())?;
    Ok(rec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pltx::StyleError;

    fn style_error(err: &anyhow::Error) -> &StyleError {
        err.downcast_ref::<StyleError>().unwrap()
    }

    #[test]
    fn test_palette_colors() {
        let colors = palette_colors("tab10", 3, 1.0, Some(0.5)).unwrap();
        assert_eq!(colors.len(), 3);
        assert!(colors.iter().all(|c| c.alpha() == 0.5));

        let plain = palette_colors("tab10", 3, 1.0, None).unwrap();
        let lighter = palette_colors("tab10", 3, 0.5, None).unwrap();
        assert_eq!(lighter[0], plain[0].with_intensity(0.5).unwrap());
    }

    #[test]
    fn test_palette_colors_rejects_bad_requests() {
        let err = palette_colors("viridis", 0, 1.0, None).unwrap_err();
        assert!(style_error(&err).is_invalid_argument());

        assert!(palette_colors("no-such-map", 0, 1.0, None).is_err());
        let err = palette_colors("no-such-map", 4, 1.0, None).unwrap_err();
        assert!(style_error(&err).is_configuration());

        let err = palette_colors("viridis", 4, 1.0, Some(2.0)).unwrap_err();
        assert!(style_error(&err).is_invalid_argument());
    }

    #[test]
    fn test_parse_overrides() {
        let overrides = parse_overrides(&["text.usetex=true".to_string(), "font.family=serif".to_string()]).unwrap();
        assert_eq!(overrides["text.usetex"], serde_json::json!(true));
        assert_eq!(overrides["font.family"], serde_json::json!("serif"));
        assert!(parse_overrides(&["font.size".to_string()]).is_err());
    }
}
