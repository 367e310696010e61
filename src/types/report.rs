use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{BandPosition, RsiZone, Signal, SupportResistance, VolumeTrend};

/// Latest MACD triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdSnapshot {
    pub macd: Option<f64>,
    pub signal: Option<f64>,
    pub histogram: Option<f64>,
}

/// Latest Bollinger triple and where the close sits in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerSnapshot {
    pub upper: Option<f64>,
    pub middle: Option<f64>,
    pub lower: Option<f64>,
    pub position: Option<BandPosition>,
}

/// Result of one analysis run.
///
/// Undefined indicator values stay `None` (`null` once serialized).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Unix timestamp (milliseconds) of the latest candle.
    pub as_of: i64,
    /// Number of candles analysed.
    pub points: usize,
    pub current_price: f64,
    /// Percent change from the previous close.
    pub price_change_24h: f64,
    /// Percent change from the close seven steps back.
    pub price_change_7d: f64,
    pub sma_short: Option<f64>,
    pub sma_long: Option<f64>,
    pub rsi: Option<f64>,
    pub rsi_zone: Option<RsiZone>,
    pub macd: MacdSnapshot,
    pub bollinger: BollingerSnapshot,
    pub levels: SupportResistance,
    pub volume_trend: VolumeTrend,
    /// Absent when the series is too short for signal aggregation.
    pub signal: Option<Signal>,
    /// Indicators with no value at the latest point, e.g. `SMA(50)` on 30 candles.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pending_indicators: Vec<String>,
}

impl AnalysisReport {
    pub fn as_of_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.as_of)
    }

    /// Flatten into dotted keys. Numbers are emitted unrounded.
    pub fn to_flat_map(&self) -> BTreeMap<String, Value> {
        let mut flat = BTreeMap::new();
        let mut put = |key: &str, value: Value| {
            flat.insert(key.to_string(), value);
        };

        put("asOf", Value::from(self.as_of));
        put("points", Value::from(self.points));
        put("currentPrice", number(self.current_price));
        put("priceChange24h", number(self.price_change_24h));
        put("priceChange7d", number(self.price_change_7d));
        put("smaShort", optional(self.sma_short));
        put("smaLong", optional(self.sma_long));
        put("rsi", optional(self.rsi));
        put(
            "rsiZone",
            self.rsi_zone.map_or(Value::Null, |z| Value::from(z.label())),
        );

        put("macd.macd", optional(self.macd.macd));
        put("macd.signal", optional(self.macd.signal));
        put("macd.histogram", optional(self.macd.histogram));

        put("bollinger.upper", optional(self.bollinger.upper));
        put("bollinger.middle", optional(self.bollinger.middle));
        put("bollinger.lower", optional(self.bollinger.lower));
        put(
            "bollinger.position",
            self.bollinger
                .position
                .map_or(Value::Null, |p| Value::from(p.label())),
        );

        for (i, level) in self.levels.support.iter().enumerate() {
            put(&format!("support.{}", i), number(level.price));
        }
        for (i, level) in self.levels.resistance.iter().enumerate() {
            put(&format!("resistance.{}", i), number(level.price));
        }

        put(
            "volume.direction",
            Value::from(self.volume_trend.direction.label()),
        );
        put(
            "volume.percentChange",
            number(self.volume_trend.percent_change),
        );

        match &self.signal {
            Some(signal) => {
                put("signal.action", Value::from(signal.action.label()));
                put("signal.confidence", number(signal.confidence));
                put("signal.reasonCount", Value::from(signal.reasons.len()));
                for (i, vote) in signal.reasons.iter().enumerate() {
                    put(&format!("signal.direction.{}", i), Value::from(vote.action.label()));
                    put(&format!("signal.reason.{}", i), Value::from(vote.reason.as_str()));
                    put(&format!("signal.weight.{}", i), number(vote.weight));
                }
            }
            None => put("signal.action", Value::Null),
        }

        for (i, name) in self.pending_indicators.iter().enumerate() {
            put(&format!("pending.{}", i), Value::from(name.as_str()));
        }

        flat
    }
}

fn number(value: f64) -> Value {
    Value::from(value)
}

fn optional(value: Option<f64>) -> Value {
    value.map_or(Value::Null, Value::from)
}
