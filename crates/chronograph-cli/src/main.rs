//! `chronograph` CLI: lay out calendar events from a JSON file.
//!
//! ## Usage
//!
//! ```sh
//! # Today's timeline for events on stdin
//! cat events.json | chronograph day --tz Europe/London
//!
//! # This week's grid, opaque, measured at 1170px wide
//! chronograph week -i events.json --privacy opaque --width 1170
//!
//! # A custom range as a list, without empty days
//! chronograph list -i events.json --from 2026-03-01T00:00:00Z --to 2026-03-08T00:00:00Z --collapse-empty
//!
//! # The export filename seed
//! chronograph filename --range last7Days
//!
//! # Pixel sizes for exporting a 1170x1000pt grid from a 3x display
//! chronograph export-size --content-width 1170 --content-height 1000 --scale 3
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Read};

use chronograph_layout::export::filename_seed;
use chronograph_layout::grid::layout_week;
use chronograph_layout::list::group_by_day;
use chronograph_layout::time::{parse_instant, parse_timezone};
use chronograph_layout::timeline::layout_day_view;
use chronograph_layout::{
    bucketize, resolve, DateRangeSelector, Event, Language, LanguagePreference, LayoutConfig,
    PrivacyMode,
};

#[derive(Parser)]
#[command(
    name = "chronograph",
    version,
    about = "Lay out calendar events into privacy-redacted visual models"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log layout decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-day timelines for the selected range
    Day {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// The seven-column grid for the week around the selected range
    Week {
        #[command(flatten)]
        view: ViewArgs,
        /// Measured grid width in points
        #[arg(long, default_value_t = 1170.0)]
        width: f64,
    },
    /// Events grouped by local start day
    List {
        #[command(flatten)]
        view: ViewArgs,
        /// Omit the placeholder for days without events
        #[arg(long)]
        collapse_empty: bool,
    },
    /// Print the export filename seed for the selected range
    Filename {
        #[command(flatten)]
        range: RangeArgs,
        /// TOML layout configuration
        #[arg(long)]
        config: Option<String>,
    },
    /// Render scale and pixel sizes for exporting laid-out content
    ExportSize {
        /// Content width in points
        #[arg(long)]
        content_width: f64,
        /// Content height in points
        #[arg(long)]
        content_height: f64,
        /// Display scale of the exporting device
        #[arg(long, default_value_t = 1.0)]
        scale: f64,
        /// TOML layout configuration
        #[arg(long)]
        config: Option<String>,
    },
}

#[derive(Args)]
struct RangeArgs {
    /// Range identifier (today, tomorrow, last7Days, thisWeek, nextWeek)
    #[arg(long, default_value = "today", conflicts_with_all = ["from", "to"])]
    range: String,
    /// Custom range start (RFC 3339)
    #[arg(long, requires = "to")]
    from: Option<String>,
    /// Custom range end, exclusive (RFC 3339)
    #[arg(long, requires = "from")]
    to: Option<String>,
    /// IANA time zone for local days
    #[arg(long, default_value = "UTC")]
    tz: String,
    /// Reference instant (RFC 3339, defaults to the current time)
    #[arg(long)]
    now: Option<String>,
}

#[derive(Args)]
struct ViewArgs {
    #[command(flatten)]
    range: RangeArgs,
    /// Events JSON file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
    /// Privacy mode (opaque, partial, full)
    #[arg(long, default_value = "partial")]
    privacy: String,
    /// Display language (system, en, zh-Hans)
    #[arg(long, default_value = "system")]
    lang: String,
    /// TOML layout configuration
    #[arg(long)]
    config: Option<String>,
}

/// Everything a view subcommand needs, parsed and validated.
struct ViewContext {
    events: Vec<Event>,
    selector: DateRangeSelector,
    now: DateTime<Utc>,
    tz: Tz,
    privacy: PrivacyMode,
    language: Language,
    config: LayoutConfig,
}

impl RangeArgs {
    fn selector(&self) -> Result<DateRangeSelector> {
        match (&self.from, &self.to) {
            (Some(from), Some(to)) => Ok(DateRangeSelector::Custom {
                start: parse_instant(from).context("Invalid --from")?,
                end_exclusive: parse_instant(to).context("Invalid --to")?,
            }),
            _ => self
                .range
                .parse()
                .with_context(|| format!("Unknown range '{}'", self.range)),
        }
    }

    fn now(&self) -> Result<DateTime<Utc>> {
        match &self.now {
            Some(raw) => parse_instant(raw).context("Invalid --now"),
            None => Ok(Utc::now()),
        }
    }

    fn tz(&self) -> Result<Tz> {
        parse_timezone(&self.tz).context("Invalid --tz")
    }
}

impl ViewArgs {
    fn load(&self) -> Result<ViewContext> {
        let json = read_input(self.input.as_deref())?;
        let events: Vec<Event> =
            serde_json::from_str(&json).context("Failed to parse events JSON")?;
        log::info!("loaded {} events", events.len());

        Ok(ViewContext {
            events,
            selector: self.range.selector()?,
            now: self.range.now()?,
            tz: self.range.tz()?,
            privacy: self
                .privacy
                .parse()
                .with_context(|| format!("Unknown privacy mode '{}'", self.privacy))?,
            language: parse_language(&self.lang)?,
            config: load_config(self.config.as_deref())?,
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Day { view } => {
            let ctx = view.load()?;
            let interval = resolve(&ctx.selector, ctx.now, &ctx.tz);
            let days: Vec<_> = bucketize(&ctx.events, &interval, &ctx.tz)
                .iter()
                .map(|bucket| {
                    layout_day_view(
                        bucket,
                        &ctx.config.timeline,
                        ctx.privacy,
                        ctx.language,
                        &ctx.tz,
                    )
                })
                .collect();
            write_json(view.output.as_deref(), &days)?;
        }
        Commands::Week { view, width } => {
            let ctx = view.load()?;
            let interval = resolve(&ctx.selector, ctx.now, &ctx.tz);
            let geometry = ctx.config.grid;
            let grid = layout_week(
                &ctx.events,
                &interval,
                &ctx.tz,
                &geometry,
                geometry.solve(width),
                ctx.privacy,
                ctx.language,
            );
            write_json(view.output.as_deref(), &grid)?;
        }
        Commands::List {
            view,
            collapse_empty,
        } => {
            let ctx = view.load()?;
            let interval = resolve(&ctx.selector, ctx.now, &ctx.tz);
            let days = group_by_day(
                &ctx.events,
                &interval,
                ctx.now,
                &ctx.tz,
                ctx.privacy,
                ctx.language,
                collapse_empty,
            );
            write_json(view.output.as_deref(), &days)?;
        }
        Commands::Filename { range, config } => {
            let config = load_config(config.as_deref())?;
            let seed = filename_seed(&config.app_name, &range.selector()?, range.now()?, &range.tz()?);
            println!("{}", seed);
        }
        Commands::ExportSize {
            content_width,
            content_height,
            scale,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let plan = config.export.plan(content_width, content_height, scale);
            write_json(None, &plan)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();
}

/// `system` follows `LANG`; anything else must be a supported identifier.
fn parse_language(raw: &str) -> Result<Language> {
    let preference = LanguagePreference::from_identifier(raw)
        .with_context(|| format!("Unknown language '{}'. Available: system, en, zh-Hans", raw))?;
    let locale = std::env::var("LANG").unwrap_or_default();
    Ok(preference.effective(&[locale.as_str()]))
}

fn load_config(path: Option<&str>) -> Result<LayoutConfig> {
    let Some(path) = path else {
        return Ok(LayoutConfig::default());
    };
    LayoutConfig::from_path(path).with_context(|| format!("Failed to load config: {}", path))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_json<T: Serialize>(path: Option<&str>, value: &T) -> Result<()> {
    let pretty = serde_json::to_string_pretty(value).context("Failed to serialize layout")?;
    match path {
        Some(path) => {
            std::fs::write(path, pretty).with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", pretty);
        }
    }
    Ok(())
}
