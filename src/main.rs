use std::env;
use std::fs;

use anyhow::Context;
use serde::Deserialize;
use technical_analyst::types::{RawCandle, RawVolume};
use technical_analyst::{analyze, Config};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Input document: already-fetched market data for one asset.
#[derive(Debug, Deserialize)]
struct AnalysisInput {
    #[serde(default)]
    symbol: Option<String>,
    ohlc: Vec<RawCandle>,
    #[serde(default)]
    volumes: Vec<RawVolume>,
}

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut flat = false;
    let mut path = None;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--flat" => flat = true,
            _ => path = Some(arg),
        }
    }

    let path = path
        .or_else(|| config.input_path.clone())
        .context("no input file: pass a path or set ANALYSIS_INPUT")?;

    let raw = fs::read_to_string(&path).with_context(|| format!("failed to read {}", path))?;
    let input: AnalysisInput =
        serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path))?;

    let symbol = input.symbol.as_deref().unwrap_or("unknown");
    info!(
        "Analysing {} ({} candles, {} volume samples)",
        symbol,
        input.ohlc.len(),
        input.volumes.len()
    );
    if input.volumes.is_empty() {
        warn!("No volume history for {}, falling back to candle volumes", symbol);
    }

    let report = analyze(&input.ohlc, &input.volumes, &config.indicators)
        .with_context(|| format!("analysis failed for {}", symbol))?;
    if let Some(as_of) = report.as_of_datetime() {
        info!("{} report as of {}", symbol, as_of.format("%Y-%m-%d %H:%M UTC"));
    }

    let output = if flat {
        serde_json::to_string_pretty(&report.to_flat_map())?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{}", output);

    Ok(())
}
