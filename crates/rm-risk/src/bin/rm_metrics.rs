//! Compute portfolio metrics for an analyzer recommendation.
//!
//! Reads the recommendation JSON from a file or stdin and writes the metrics
//! as JSON to stdout. Logs go to stderr.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rm_risk::{BetaConvention, MetricsCalculator, MetricsConfig};
use rm_types::{validation_error, Recommendation};

/// Portfolio exposure, beta and capital requirements for a trade recommendation
#[derive(Parser)]
#[command(name = "rm-metrics")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Recommendation JSON file (stdin when omitted)
    input: Option<PathBuf>,

    /// Metrics configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base investment amount
    #[arg(long)]
    investment: Option<Decimal>,

    /// Margin requirement for shorts, as a fraction
    #[arg(long)]
    margin: Option<Decimal>,

    /// Beta weighting for shorts: signed or magnitude
    #[arg(long)]
    beta_convention: Option<BetaConvention>,

    /// Include the per-position breakdown
    #[arg(long)]
    breakdown: bool,

    /// Check exposure limits and include alerts
    #[arg(long)]
    alerts: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<MetricsConfig> {
    let mut config = match &cli.config {
        Some(path) => MetricsConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => MetricsConfig::default(),
    };
    config.apply_env_overrides()?;

    if let Some(amount) = cli.investment {
        config.investment_amount = amount;
    }
    if let Some(margin) = cli.margin {
        config.margin_requirement = margin;
    }
    if let Some(convention) = cli.beta_convention {
        config.beta_convention = convention;
    }
    config.validate()?;
    Ok(config)
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };
    if raw.trim().is_empty() {
        return Err(validation_error!("empty recommendation input").into());
    }
    Ok(raw)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = load_config(&cli)?;
    let raw = read_input(cli.input.as_ref())?;
    let recommendation: Recommendation =
        serde_json::from_str(&raw).context("parsing recommendation JSON")?;

    info!(
        longs = recommendation.longs().len(),
        shorts = recommendation.shorts().len(),
        derivatives = recommendation.derivatives().len(),
        investment = %config.investment_amount,
        convention = %config.beta_convention,
        "computing portfolio metrics"
    );

    let output = if cli.breakdown || cli.alerts {
        let report = MetricsCalculator::report(&recommendation, &config, cli.breakdown, cli.alerts);
        serde_json::to_string_pretty(&report)?
    } else {
        let metrics = MetricsCalculator::compute(&recommendation, &config);
        serde_json::to_string_pretty(&metrics)?
    };
    println!("{output}");

    Ok(())
}
