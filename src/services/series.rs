//! Validation and normalisation of raw OHLC(V) payloads.

use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::types::{normalize_timestamp, PricePoint, PriceSeries, RawCandle};

/// Turn raw upstream tuples into a [`PriceSeries`].
///
/// Points are sorted by timestamp; when two tuples share a timestamp the one
/// appearing later in `raw` wins. Only structural validity is checked here,
/// consumers enforce their own minimum lengths.
pub fn prepare_series(raw: &[RawCandle]) -> Result<PriceSeries> {
    if raw.len() < 2 {
        return Err(AnalysisError::InvalidSeries(format!(
            "need at least 2 points, got {}",
            raw.len()
        )));
    }

    for (idx, candle) in raw.iter().enumerate() {
        validate_candle(idx, candle)?;
    }

    let mut points: Vec<PricePoint> = raw
        .iter()
        .map(|c| PricePoint {
            time: normalize_timestamp(c.timestamp),
            open: c.open,
            high: c.high,
            low: c.low,
            close: c.close,
            volume: c.volume,
        })
        .collect();

    // Stable sort keeps source order among equal timestamps.
    points.sort_by_key(|p| p.time);

    let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
    for point in points {
        match deduped.last_mut() {
            Some(last) if last.time == point.time => {
                debug!(
                    "Duplicate candle at {}, keeping the later one",
                    point
                        .datetime()
                        .map_or_else(|| point.time.to_string(), |at| at.to_rfc3339())
                );
                *last = point;
            }
            _ => deduped.push(point),
        }
    }

    if deduped.len() < 2 {
        return Err(AnalysisError::InvalidSeries(format!(
            "need at least 2 distinct timestamps, got {}",
            deduped.len()
        )));
    }

    Ok(PriceSeries::from_sorted(deduped))
}

fn validate_candle(idx: usize, candle: &RawCandle) -> Result<()> {
    if !candle.timestamp.is_finite() {
        return Err(AnalysisError::InvalidSeries(format!(
            "point {} has a non-finite timestamp",
            idx
        )));
    }

    if !candle.close.is_finite() || candle.close <= 0.0 {
        return Err(AnalysisError::InvalidSeries(format!(
            "point {} has invalid close {}",
            idx, candle.close
        )));
    }

    if ![candle.open, candle.high, candle.low]
        .iter()
        .all(|v| v.is_finite())
    {
        return Err(AnalysisError::InvalidSeries(format!(
            "point {} has a non-finite open/high/low",
            idx
        )));
    }

    Ok(())
}
