use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Epoch values below this are taken to be seconds rather than milliseconds.
const SECONDS_CUTOFF: f64 = 1e11;

/// Convert an epoch timestamp in seconds or milliseconds to milliseconds.
pub fn normalize_timestamp(ts: f64) -> i64 {
    if ts.abs() < SECONDS_CUTOFF {
        (ts * 1000.0).round() as i64
    } else {
        ts.round() as i64
    }
}

/// One upstream OHLC(V) tuple, before validation.
///
/// Deserializes from `[ts, open, high, low, close]` or
/// `[ts, open, high, low, close, volume]`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub struct RawCandle {
    pub timestamp: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<f64>,
}

impl RawCandle {
    pub fn new(timestamp: f64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }
}

impl TryFrom<Vec<f64>> for RawCandle {
    type Error = String;

    fn try_from(fields: Vec<f64>) -> Result<Self, Self::Error> {
        match fields.as_slice() {
            [ts, o, h, l, c] => Ok(RawCandle::new(*ts, *o, *h, *l, *c)),
            [ts, o, h, l, c, v] => Ok(RawCandle::new(*ts, *o, *h, *l, *c).with_volume(*v)),
            other => Err(format!(
                "OHLC tuple must have 5 or 6 fields, got {}",
                other.len()
            )),
        }
    }
}

/// One upstream `(timestamp, total_volume)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub struct RawVolume {
    pub timestamp: f64,
    pub volume: f64,
}

impl TryFrom<Vec<f64>> for RawVolume {
    type Error = String;

    fn try_from(fields: Vec<f64>) -> Result<Self, Self::Error> {
        match fields.as_slice() {
            [ts, v] => Ok(RawVolume {
                timestamp: *ts,
                volume: *v,
            }),
            other => Err(format!(
                "volume pair must have 2 fields, got {}",
                other.len()
            )),
        }
    }
}

/// A validated volume sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeSample {
    /// Unix timestamp (milliseconds).
    pub time: i64,
    pub volume: f64,
}

impl From<RawVolume> for VolumeSample {
    fn from(raw: RawVolume) -> Self {
        Self {
            time: normalize_timestamp(raw.timestamp),
            volume: raw.volume,
        }
    }
}

/// OHLC (Open, High, Low, Close) data point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Unix timestamp (milliseconds).
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl PricePoint {
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.time)
    }
}

/// Price points ordered by strictly increasing timestamp.
///
/// Only built by [`prepare_series`](crate::services::prepare_series), so the
/// ordering holds for the lifetime of the value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub(crate) fn from_sorted(points: Vec<PricePoint>) -> Self {
        debug_assert!(
            points.windows(2).all(|w| w[0].time < w[1].time),
            "price points must be strictly increasing in time"
        );
        Self { points }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Close `back` steps before the latest one (`0` is the latest).
    pub fn close_back(&self, back: usize) -> Option<f64> {
        let idx = self.points.len().checked_sub(back + 1)?;
        Some(self.points[idx].close)
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.low).collect()
    }

    /// Volume samples from the candles that carry one.
    pub fn volume_samples(&self) -> Vec<VolumeSample> {
        self.points
            .iter()
            .filter_map(|p| {
                p.volume.map(|volume| VolumeSample {
                    time: p.time,
                    volume,
                })
            })
            .collect()
    }
}
