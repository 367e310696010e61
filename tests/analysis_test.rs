//! End-to-end tests for the analysis pipeline

use technical_analyst::services::signals::indicators::{BollingerBands, Ema, Indicator, Rsi, Sma};
use technical_analyst::services::{
    aggregate_signal, analyze_volume, compute_indicators, detect_levels,
};
use technical_analyst::types::*;
use technical_analyst::{analyze, prepare_series, AnalysisError, EmaSeed, IndicatorConfig};

const DAY_MS: f64 = 86_400_000.0;
const START_MS: f64 = 1_700_000_000_000.0;

fn candles(closes: &[f64]) -> Vec<RawCandle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, c)| RawCandle::new(START_MS + i as f64 * DAY_MS, *c, c * 1.02, c * 0.98, *c))
        .collect()
}

fn rising(count: usize) -> Vec<f64> {
    (0..count).map(|i| 100.0 * 1.01f64.powi(i as i32)).collect()
}

fn choppy(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| {
            let t = i as f64;
            100.0 + (t * 0.45).sin() * 6.0 + (t * 1.7).cos() * 2.0 + t * 0.05
        })
        .collect()
}

// =========================================================================
// Indicator properties
// =========================================================================

#[test]
fn test_sma_definedness_boundary() {
    let closes = choppy(80);
    for period in [1, 5, 20, 50, 80] {
        let sma = Sma::new(period).compute(&closes);
        for (i, value) in sma.values().iter().enumerate() {
            assert_eq!(value.is_some(), i + 1 >= period, "period {} index {}", period, i);
        }
    }
}

#[test]
fn test_rsi_bounded() {
    for closes in [choppy(200), rising(60), vec![50.0; 40]] {
        let rsi = Rsi::default().compute(&closes);
        assert!(rsi.values().iter().flatten().all(|v| (0.0..=100.0).contains(v)));
    }
}

#[test]
fn test_rsi_rising_series_saturates() {
    let rsi = Rsi::default().compute(&rising(30));
    assert_eq!(rsi.latest(), Some(100.0));
}

#[test]
fn test_ema_repeatable() {
    let closes = choppy(100);
    for seed in [EmaSeed::Adjusted, EmaSeed::Recursive] {
        let ema = Ema::new(26, seed);
        let first = ema.compute(&closes);
        let second = ema.compute(&closes);
        assert_eq!(first, second);
    }
}

#[test]
fn test_bollinger_bands_ordered() {
    for mult in [0.0, 1.0, 2.0, 3.5] {
        let bb = BollingerBands::new(20, mult).compute(&choppy(150));
        for i in 0..150 {
            if let (Some(u), Some(m), Some(l)) = (bb.upper.get(i), bb.middle.get(i), bb.lower.get(i)) {
                assert!(u >= m && m >= l, "index {}: {} {} {}", i, u, m, l);
            }
        }
    }
}

// =========================================================================
// Levels and volume
// =========================================================================

#[test]
fn test_levels_capped_and_in_band() {
    let config = IndicatorConfig::default();
    for count in [10, 25, 90, 250] {
        let series = prepare_series(&candles(&choppy(count))).unwrap();
        let close = series.last().unwrap().close;
        let levels = detect_levels(&series, &config);

        assert!(levels.support.len() <= 3);
        assert!(levels.resistance.len() <= 3);
        for level in levels.support.iter().chain(&levels.resistance) {
            assert!(level.price >= close * 0.5 && level.price <= close * 1.5);
        }
    }
}

#[test]
fn test_volume_trend_twenty_percent() {
    let samples: Vec<VolumeSample> = (0..30)
        .map(|i| VolumeSample {
            time: i * 86_400_000,
            volume: match i {
                0..=6 => 100.0,
                23..=29 => 120.0,
                _ => 500.0,
            },
        })
        .collect();

    let trend = analyze_volume(&samples, 7).unwrap();
    assert_eq!(trend.direction, VolumeDirection::Increasing);
    assert!((trend.percent_change - 20.0).abs() < 1e-9);
}

// =========================================================================
// Signal aggregation
// =========================================================================

#[test]
fn test_signal_requires_fifty_points() {
    let config = IndicatorConfig::default();
    let series = prepare_series(&candles(&rising(49))).unwrap();
    let indicators = compute_indicators(&series, &config);

    let err = aggregate_signal(&series, &indicators, &config).unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::InsufficientData {
            required: 50,
            available: 49,
            ..
        }
    ));
}

#[test]
fn test_flat_market_holds() {
    for price in [250.0, 0.1, 2.675] {
        let report = analyze(&candles(&[price; 60]), &[], &IndicatorConfig::default()).unwrap();
        let signal = report.signal.unwrap();

        assert_eq!(report.rsi, Some(50.0));
        assert_eq!(report.bollinger.lower, Some(price));
        assert_eq!(report.bollinger.upper, Some(price));
        assert_eq!(signal.action, SignalAction::Hold, "price {}", price);
        assert_eq!(signal.confidence, 0.5);
    }
}

#[test]
fn test_rising_one_percent_fixture() {
    let closes = rising(60);
    let config = IndicatorConfig::default();
    let report = analyze(&candles(&closes), &[], &config).unwrap();

    // RSI has no losses to average and pins at 100.
    assert_eq!(report.rsi, Some(100.0));

    // Close sits between the middle and upper band.
    let upper = report.bollinger.upper.unwrap();
    let middle = report.bollinger.middle.unwrap();
    assert!(report.current_price < upper);
    assert!(report.current_price > middle);
    assert_eq!(report.bollinger.position, Some(BandPosition::AboveMiddle));

    assert!(report.macd.macd.unwrap() > report.macd.signal.unwrap());
    assert!(report.current_price > report.sma_short.unwrap());
    assert!(report.sma_short.unwrap() > report.sma_long.unwrap());

    // Votes: RSI sell 0.7, MAs buy 0.6, MACD buy 0.6, no Bollinger vote.
    let signal = report.signal.unwrap();
    assert_eq!(signal.action, SignalAction::Buy);
    assert!((signal.confidence - 0.6).abs() < 1e-12);
    let reasons: Vec<&str> = signal.reasons.iter().map(|v| v.reason.as_str()).collect();
    assert_eq!(reasons, vec!["Price above MAs", "MACD bullish crossover"]);
}

#[test]
fn test_unsorted_input_matches_sorted() {
    let sorted = candles(&choppy(70));
    let mut shuffled = sorted.clone();
    shuffled.reverse();
    shuffled.swap(3, 40);

    let config = IndicatorConfig::default();
    assert_eq!(
        analyze(&sorted, &[], &config).unwrap(),
        analyze(&shuffled, &[], &config).unwrap()
    );
}

#[test]
fn test_invalid_input_is_typed_error() {
    let err = analyze(&candles(&[100.0]), &[], &IndicatorConfig::default()).unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidSeries(_)));
}

// =========================================================================
// Report output
// =========================================================================

#[test]
fn test_flat_map_round_trip() {
    let volumes: Vec<RawVolume> = (0..30)
        .map(|i| RawVolume {
            timestamp: START_MS + i as f64 * DAY_MS,
            volume: 1_000.0 + i as f64 * 13.7,
        })
        .collect();
    let report = analyze(&candles(&choppy(90)), &volumes, &IndicatorConfig::default()).unwrap();

    let text = serde_json::to_string(&report.to_flat_map()).unwrap();
    let parsed: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&text).unwrap();
    let num = |key: &str| parsed[key].as_f64();

    assert_eq!(num("currentPrice"), Some(report.current_price));
    assert_eq!(num("rsi"), report.rsi);
    assert_eq!(num("macd.macd"), report.macd.macd);
    assert_eq!(num("macd.signal"), report.macd.signal);
    assert_eq!(num("macd.histogram"), report.macd.histogram);
    assert_eq!(num("bollinger.upper"), report.bollinger.upper);
    assert_eq!(num("bollinger.middle"), report.bollinger.middle);
    assert_eq!(num("bollinger.lower"), report.bollinger.lower);
    assert_eq!(num("priceChange24h"), Some(report.price_change_24h));
    assert_eq!(num("priceChange7d"), Some(report.price_change_7d));
    assert_eq!(
        num("volume.percentChange"),
        Some(report.volume_trend.percent_change)
    );
    for (i, level) in report.levels.support.iter().enumerate() {
        assert_eq!(num(&format!("support.{}", i)), Some(level.price));
    }
    let signal = report.signal.as_ref().unwrap();
    assert_eq!(num("signal.confidence"), Some(signal.confidence));
}

#[test]
fn test_flat_map_marks_undefined_as_null() {
    let report = analyze(&candles(&choppy(30)), &[], &IndicatorConfig::default()).unwrap();
    let flat = report.to_flat_map();

    assert!(flat["smaLong"].is_null());
    assert!(flat["signal.action"].is_null());
    assert_eq!(flat["volume.direction"], "unknown");
}

#[test]
fn test_report_json_round_trip() {
    let report = analyze(&candles(&rising(60)), &[], &IndicatorConfig::default()).unwrap();
    let json = serde_json::to_string(&report).unwrap();
    let parsed: AnalysisReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, report);
}

// =========================================================================
// Concurrency
// =========================================================================

#[test]
fn test_concurrent_analyses_are_independent() {
    let config = IndicatorConfig::default();
    let inputs: Vec<Vec<RawCandle>> = (0..8)
        .map(|k| candles(&choppy(60 + k * 10)))
        .collect();
    let expected: Vec<AnalysisReport> = inputs
        .iter()
        .map(|c| analyze(c, &[], &config).unwrap())
        .collect();

    let results: Vec<AnalysisReport> = std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|c| scope.spawn(|| analyze(c, &[], &config).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results, expected);
}
