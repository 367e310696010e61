//! Assembly of a full [`AnalysisReport`].

use tracing::{debug, info};

use super::levels::detect_levels;
use super::series::prepare_series;
use super::signals::aggregate_signal;
use super::signals::indicators::{
    compute_indicators, BollingerBands, Indicator, Macd, Rsi, Sma,
};
use super::volume::analyze_volume;
use crate::config::IndicatorConfig;
use crate::error::{AnalysisError, Result};
use crate::types::{
    AnalysisReport, BandPosition, BollingerSnapshot, IndicatorSeries, IndicatorSet, MacdSnapshot,
    PriceSeries, RawCandle, RawVolume, RsiZone, VolumeSample,
};

/// Run the full analysis over raw upstream data.
///
/// When `volumes` is empty the candles' own volumes are used instead, if any.
pub fn analyze(
    candles: &[RawCandle],
    volumes: &[RawVolume],
    config: &IndicatorConfig,
) -> Result<AnalysisReport> {
    let series = prepare_series(candles)?;
    let volumes: Vec<VolumeSample> = if volumes.is_empty() {
        series.volume_samples()
    } else {
        volumes.iter().copied().map(VolumeSample::from).collect()
    };

    analyze_series(&series, &volumes, config)
}

/// Run the full analysis over an already prepared series.
pub fn analyze_series(
    series: &PriceSeries,
    volumes: &[VolumeSample],
    config: &IndicatorConfig,
) -> Result<AnalysisReport> {
    config.validate()?;

    let Some(latest) = series
        .last()
        .filter(|_| series.len() >= config.min_report_points)
    else {
        return Err(AnalysisError::insufficient(
            "analysis",
            config.min_report_points,
            series.len(),
        ));
    };
    let current_price = latest.close;

    let indicators = compute_indicators(series, config);
    let levels = detect_levels(series, config);
    let volume_trend = analyze_volume(volumes, config.volume_window)?;

    let signal = match aggregate_signal(series, &indicators, config) {
        Ok(signal) => Some(signal),
        Err(e) if e.is_insufficient_data() => {
            debug!("Signal omitted: {}", e);
            None
        }
        Err(e) => return Err(e),
    };

    let pending_indicators = pending_indicators(&indicators, config);
    let rsi = indicators.rsi.latest();
    let bollinger = BollingerSnapshot {
        upper: indicators.bollinger.upper.latest(),
        middle: indicators.bollinger.middle.latest(),
        lower: indicators.bollinger.lower.latest(),
        position: match (
            indicators.bollinger.upper.latest(),
            indicators.bollinger.middle.latest(),
            indicators.bollinger.lower.latest(),
        ) {
            (Some(u), Some(m), Some(l)) => Some(BandPosition::classify(current_price, u, m, l)),
            _ => None,
        },
    };

    let report = AnalysisReport {
        as_of: latest.time,
        points: series.len(),
        current_price,
        price_change_24h: change_from(series, 1),
        price_change_7d: change_from(series, 7),
        sma_short: indicators.sma_short.latest(),
        sma_long: indicators.sma_long.latest(),
        rsi,
        rsi_zone: rsi.map(RsiZone::classify),
        macd: MacdSnapshot {
            macd: indicators.macd.macd.latest(),
            signal: indicators.macd.signal.latest(),
            histogram: indicators.macd.histogram.latest(),
        },
        bollinger,
        levels,
        volume_trend,
        signal,
        pending_indicators,
    };

    info!(
        "Analysed {} points: price {:.6}, signal {}",
        report.points,
        report.current_price,
        report
            .signal
            .as_ref()
            .map_or("omitted", |s| s.action.label())
    );

    Ok(report)
}

/// Names of the indicators still undefined at the latest point.
fn pending_indicators(indicators: &IndicatorSet, config: &IndicatorConfig) -> Vec<String> {
    [
        pending(Sma::new(config.sma_short), &indicators.sma_short),
        pending(Sma::new(config.sma_long), &indicators.sma_long),
        pending(Rsi::new(config.rsi_period), &indicators.rsi),
        pending(
            Macd::new(
                config.macd_fast,
                config.macd_slow,
                config.macd_signal,
                config.ema_seed,
            ),
            &indicators.macd.signal,
        ),
        pending(
            BollingerBands::new(config.bollinger_period, config.bollinger_std_dev),
            &indicators.bollinger.lower,
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn pending<I: Indicator>(indicator: I, series: &IndicatorSeries) -> Option<String> {
    let name = indicator.name();
    match series.require_latest(&name, indicator.min_periods()) {
        Ok(_) => None,
        Err(e) => {
            debug!("{}", e);
            Some(name)
        }
    }
}

/// Percent change of the latest close against the close `back` steps earlier;
/// 0 when the series is not that long.
fn change_from(series: &PriceSeries, back: usize) -> f64 {
    match (series.close_back(0), series.close_back(back)) {
        (Some(current), Some(previous)) => (current - previous) / previous * 100.0,
        _ => 0.0,
    }
}
