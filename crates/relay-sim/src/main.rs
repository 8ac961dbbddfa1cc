//! Paced command-line runner for the Relay baton-ring simulation.
//!
//! Wires the deterministic engine to a terminal: a legend plus an ASCII
//! frame per tick under a chosen pacing mode, or a line-delimited JSON
//! stream for machine consumers.
//!
//! # Startup Sequence
//!
//! 1. Parse CLI arguments
//! 2. Initialize structured logging (tracing)
//! 3. Resolve the pacing mode and delay
//! 4. Load configuration from `--config` or `relay-config.yaml`, apply
//!    CLI overrides, validate the result
//! 5. Construct the engine
//! 6. Print the legend and the initial frame
//! 7. Drive the paced tick loop and log the result

mod render;

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use relay_core::config::SimConfig;
use relay_core::engine::Engine;
use relay_types::Direction;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Config file consulted when `--config` is not given.
const DEFAULT_CONFIG_PATH: &str = "relay-config.yaml";

/// Pacing between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Wait for Enter before each tick.
    Step,
    /// Sleep a fixed delay before each tick.
    Sleep,
    /// Run without pausing.
    Fast,
}

#[derive(Parser)]
#[command(name = "relay-sim")]
#[command(version)]
#[command(about = "Baton-ring simulation with jump/act/escalate dynamics")]
struct Cli {
    /// Number of ticks to simulate
    #[arg(long)]
    steps: Option<u64>,

    /// Pacing mode: step=press Enter, sleep=delay per tick, fast=no delay
    #[arg(long, default_value = "step")]
    mode: String,

    /// Seconds per tick for --mode sleep
    #[arg(long, default_value = "0.4")]
    delay: f64,

    /// Shadow latch level on mirror success
    #[arg(long)]
    hshadow: Option<u8>,

    /// Hesitation shadow cap (and overall shadow cap)
    #[arg(long)]
    emax: Option<u8>,

    /// Number of successful ACT/MIRROR events to perform
    #[arg(long)]
    ttl: Option<u32>,

    /// Consecutive failures before an escalation
    #[arg(long)]
    fails: Option<u32>,

    /// Parked ticks per escalation
    #[arg(long)]
    park: Option<u32>,

    /// Initial travel direction: cw or ccw
    #[arg(long)]
    direction: Option<String>,

    /// Path to a YAML config file (default: ./relay-config.yaml when present)
    #[arg(long, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Emit one JSON object per tick instead of frames (implies --mode fast)
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Initialize structured logging. Logs go to stderr; stdout carries
    //    the frames and the JSON stream.
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("relay-sim starting");

    // 2. Resolve pacing. A JSON stream always runs unpaced.
    let mode = parse_mode(&cli.mode)?;
    let mode = if cli.json { Mode::Fast } else { mode };
    let delay = parse_delay(cli.delay)?;

    // 3. Load configuration and apply CLI overrides.
    let config = load_config(&cli)?;
    debug!(?config, "Effective configuration");

    // 4. Construct the engine.
    let engine = Engine::new(config).context("failed to construct the engine")?;
    let total_ticks = engine.config().ticks;
    let hesitation_cap = engine.config().hesitation_cap;

    // 5. Print the legend and the initial frame.
    if !cli.json {
        println!("{}", render::legend(hesitation_cap));
        println!("{}", render::frame(&engine.snapshot()));
        println!("{}", "=".repeat(72));
    }

    // 6. Drive the paced tick loop.
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut ticks = engine.run();
    for upcoming in 1..=total_ticks {
        pace(mode, delay, upcoming, &mut stdin).await?;

        let Some(result) = ticks.next() else { break };
        let report = result.with_context(|| format!("tick {upcoming} aborted"))?;

        if cli.json {
            let line =
                serde_json::to_string(&report).context("failed to serialize tick report")?;
            println!("{line}");
        } else {
            println!("\n{}", render::tick_header(&report));
            println!("{}", render::frame(&report.snapshot));
        }
    }

    info!("Run complete");
    Ok(())
}

/// Loads the base configuration and applies CLI overrides.
///
/// Base: the `--config` path when given, else `relay-config.yaml` in the
/// working directory when present, else built-in defaults. Explicit flags
/// win over file values; the merged result is validated again since an
/// override can break a cross-field rule.
fn load_config(cli: &Cli) -> Result<SimConfig> {
    let mut config = if let Some(path) = &cli.config {
        SimConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?
    } else {
        let config_path = Path::new(DEFAULT_CONFIG_PATH);
        if config_path.exists() {
            SimConfig::from_file(config_path)
                .with_context(|| format!("failed to load config from {DEFAULT_CONFIG_PATH}"))?
        } else {
            info!("Config file not found, using defaults");
            SimConfig::default()
        }
    };

    if let Some(steps) = cli.steps {
        config.ticks = steps;
    }
    if let Some(hshadow) = cli.hshadow {
        config.latch_floor = hshadow;
    }
    if let Some(emax) = cli.emax {
        config.hesitation_cap = emax;
    }
    if let Some(ttl) = cli.ttl {
        config.repeat_budget = ttl;
    }
    if let Some(fails) = cli.fails {
        config.fail_threshold = fails;
    }
    if let Some(park) = cli.park {
        config.park_duration = park;
    }
    if let Some(raw) = &cli.direction {
        config.initial_direction = parse_direction(raw)?;
    }

    config.validate().context("invalid effective configuration")?;
    Ok(config)
}

/// Blocks between ticks according to the pacing mode.
async fn pace(
    mode: Mode,
    delay: Duration,
    upcoming: u64,
    stdin: &mut Lines<BufReader<Stdin>>,
) -> Result<()> {
    match mode {
        Mode::Step => {
            print!("\nPress Enter for t={upcoming}...");
            std::io::stdout()
                .flush()
                .context("failed to flush the step prompt")?;
            stdin
                .next_line()
                .await
                .context("failed to read from stdin")?;
        }
        Mode::Sleep => tokio::time::sleep(delay).await,
        Mode::Fast => {}
    }
    Ok(())
}

fn parse_mode(raw: &str) -> Result<Mode> {
    match raw.to_lowercase().as_str() {
        "step" => Ok(Mode::Step),
        "sleep" => Ok(Mode::Sleep),
        "fast" => Ok(Mode::Fast),
        _ => anyhow::bail!("Unknown mode: {raw}. Valid: step, sleep, fast"),
    }
}

fn parse_direction(raw: &str) -> Result<Direction> {
    match raw.to_lowercase().as_str() {
        "cw" => Ok(Direction::Clockwise),
        "ccw" => Ok(Direction::CounterClockwise),
        _ => anyhow::bail!("Unknown direction: {raw}. Valid: cw, ccw"),
    }
}

// Rejects NaN, infinities, negatives, and values past Duration's range.
fn parse_delay(raw: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(raw)
        .with_context(|| format!("Invalid delay: {raw}. Must be a non-negative number of seconds"))
}
