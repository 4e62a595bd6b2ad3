use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cron_timeline::config::WindowConfig;
use cron_timeline::{parse_timestamp, Config, TimeWindow};

/// Config file picked up from the working directory when `--config` is not given.
const DEFAULT_CONFIG: &str = "cron_timeline.toml";

#[derive(Parser)]
#[command(
    name = "cron_timeline",
    version,
    about = "Expand a crontab into timeline events for a time window"
)]
struct Cli {
    /// Crontab file to read, or "-" for stdin
    #[arg(default_value = "crontab")]
    crontab: PathBuf,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start of the window, "YYYY-MM-DD HH:MM" (default: today 00:00)
    #[arg(long)]
    earliest: Option<String>,

    /// End of the window, "YYYY-MM-DD HH:MM" (default: today 23:59)
    #[arg(long)]
    latest: Option<String>,

    /// Worker threads used to enumerate jobs
    #[arg(long)]
    threads: Option<usize>,

    /// Write the timeline JSON here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr, stdout carries the JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cron_timeline=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref(), Path::new(DEFAULT_CONFIG))?;
    if let Some(threads) = cli.threads {
        config.threads = threads;
    }

    let window = resolve_window(
        cli.earliest.as_deref(),
        cli.latest.as_deref(),
        config.window.as_ref(),
        Local::now().date_naive(),
    )?;
    tracing::info!(%window, threads = config.threads, "expanding crontab");

    let mut crontab = config.crontab(window);
    if cli.crontab.as_os_str() == "-" {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("reading crontab from stdin")?;
        crontab.load_str(&input)?;
    } else {
        crontab.load_path(&cli.crontab)?;
    }

    let json = if cli.pretty {
        crontab.to_json_pretty()?
    } else {
        crontab.to_json()?
    };

    match &cli.output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

/// An explicit path must load. Otherwise `fallback` is used when it exists,
/// and a broken fallback is an error too.
fn load_config(explicit: Option<&Path>, fallback: &Path) -> anyhow::Result<Config> {
    let path = match explicit {
        Some(path) => path,
        None if fallback.exists() => fallback,
        None => return Ok(Config::default()),
    };
    Config::load(path).with_context(|| format!("loading config {}", path.display()))
}

/// Flags win over the config file, bound by bound; a bound set by neither
/// falls back to `today` 00:00 or 23:59.
fn resolve_window(
    earliest: Option<&str>,
    latest: Option<&str>,
    configured: Option<&WindowConfig>,
    today: NaiveDate,
) -> anyhow::Result<TimeWindow> {
    let earliest = match earliest.or(configured.map(|w| w.earliest.as_str())) {
        Some(value) => parse_timestamp(value)?,
        None => today
            .and_hms_opt(0, 0, 0)
            .context("building start of today")?,
    };
    let latest = match latest.or(configured.map(|w| w.latest.as_str())) {
        Some(value) => parse_timestamp(value)?,
        None => today
            .and_hms_opt(23, 59, 0)
            .context("building end of today")?,
    };

    Ok(TimeWindow::new(earliest, latest)?)
}
