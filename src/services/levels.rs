//! Support/resistance detection from local extrema.

use tracing::debug;

use super::signals::indicators::rolling::{centered, max, min};
use crate::config::IndicatorConfig;
use crate::types::{IndicatorSeries, Level, LevelKind, PriceSeries, SupportResistance};

/// Find support and resistance levels near the latest close.
///
/// A bar's high is a resistance candidate when it equals the maximum of the
/// centered window around it; a bar's low is a support candidate when it
/// equals the window minimum. Candidates are deduplicated by price, kept only
/// inside `[band_low * close, band_high * close]`, sorted highest first and
/// truncated to `max_levels` per side.
pub fn detect_levels(series: &PriceSeries, config: &IndicatorConfig) -> SupportResistance {
    let Some(latest) = series.last() else {
        return SupportResistance::default();
    };

    if series.len() < config.level_window {
        debug!(
            "Series of {} points shorter than level window {}",
            series.len(),
            config.level_window
        );
        return SupportResistance::default();
    }

    let band = (
        latest.close * config.level_band_low,
        latest.close * config.level_band_high,
    );

    let highs = series.highs();
    let lows = series.lows();
    let times: Vec<i64> = series.points().iter().map(|p| p.time).collect();

    let resistance = collect_levels(
        &highs,
        &centered(&highs, config.level_window, max),
        &times,
        LevelKind::Resistance,
        band,
        config.max_levels,
    );
    let support = collect_levels(
        &lows,
        &centered(&lows, config.level_window, min),
        &times,
        LevelKind::Support,
        band,
        config.max_levels,
    );

    SupportResistance {
        support,
        resistance,
    }
}

fn collect_levels(
    prices: &[f64],
    extrema: &IndicatorSeries,
    times: &[i64],
    kind: LevelKind,
    (band_low, band_high): (f64, f64),
    max_levels: usize,
) -> Vec<Level> {
    let mut levels: Vec<Level> = Vec::new();

    for (i, &price) in prices.iter().enumerate() {
        if extrema.get(i) != Some(price) {
            continue;
        }
        match levels.iter_mut().find(|l| l.price == price) {
            Some(level) => {
                level.touches += 1;
                level.last_confirmed = level.last_confirmed.max(times[i]);
            }
            None => levels.push(Level {
                price,
                kind,
                touches: 1,
                last_confirmed: times[i],
            }),
        }
    }

    levels.retain(|l| band_low <= l.price && l.price <= band_high);
    levels.sort_by(|a, b| b.price.total_cmp(&a.price));
    levels.truncate(max_levels);
    levels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::prepare_series;
    use crate::types::RawCandle;

    fn series_from_hl(bars: &[(f64, f64)]) -> PriceSeries {
        let raw: Vec<RawCandle> = bars
            .iter()
            .enumerate()
            .map(|(i, (high, low))| {
                let close = (high + low) / 2.0;
                RawCandle::new(1_700_000_000_000.0 + i as f64 * 60_000.0, close, *high, *low, close)
            })
            .collect();
        prepare_series(&raw).unwrap()
    }

    fn wave(count: usize) -> PriceSeries {
        let bars: Vec<(f64, f64)> = (0..count)
            .map(|i| {
                let mid = 100.0 + (i as f64 * 0.5).sin() * 10.0;
                (mid + 1.0, mid - 1.0)
            })
            .collect();
        series_from_hl(&bars)
    }

    #[test]
    fn test_shorter_than_window_is_empty() {
        let series = wave(9);
        let levels = detect_levels(&series, &IndicatorConfig::default());
        assert!(levels.support.is_empty());
        assert!(levels.resistance.is_empty());
    }

    #[test]
    fn test_at_most_three_per_side_within_band() {
        let series = wave(120);
        let close = series.last().unwrap().close;
        let levels = detect_levels(&series, &IndicatorConfig::default());

        assert!(!levels.resistance.is_empty());
        assert!(!levels.support.is_empty());
        assert!(levels.resistance.len() <= 3);
        assert!(levels.support.len() <= 3);
        for level in levels.support.iter().chain(levels.resistance.iter()) {
            assert!(level.price >= close * 0.5 && level.price <= close * 1.5);
        }
    }

    #[test]
    fn test_sorted_descending() {
        let levels = detect_levels(&wave(120), &IndicatorConfig::default());
        for side in [&levels.support, &levels.resistance] {
            assert!(side.windows(2).all(|w| w[0].price >= w[1].price));
        }
    }

    #[test]
    fn test_out_of_band_levels_dropped() {
        // A spike to 400 followed by a long stretch near 100.
        let mut bars = vec![(101.0, 99.0); 30];
        bars[12] = (400.0, 99.0);
        let levels = detect_levels(&series_from_hl(&bars), &IndicatorConfig::default());
        assert!(levels.resistance.iter().all(|l| l.price < 400.0));
    }

    #[test]
    fn test_duplicate_extrema_counted_as_touches() {
        let bars = vec![(101.0, 99.0); 20];
        let levels = detect_levels(&series_from_hl(&bars), &IndicatorConfig::default());

        // Every evaluated window is flat, so each bar confirms the same level.
        assert_eq!(levels.resistance.len(), 1);
        assert_eq!(levels.support.len(), 1);
        assert_eq!(levels.resistance[0].price, 101.0);
        assert_eq!(levels.resistance[0].touches, 11);
        assert_eq!(levels.support[0].kind, LevelKind::Support);
    }
}
