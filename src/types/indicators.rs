use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Indicator values aligned index-for-index with their source series.
///
/// `None` marks an index where the indicator is not yet computable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    values: Vec<Option<f64>>,
}

impl IndicatorSeries {
    pub fn new(values: Vec<Option<f64>>) -> Self {
        Self { values }
    }

    /// A series of `len` undefined values.
    pub fn undefined(len: usize) -> Self {
        Self {
            values: vec![None; len],
        }
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<f64> {
        self.values.get(idx).copied().flatten()
    }

    /// Value at the last index, if defined there.
    pub fn latest(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }

    /// Index of the first defined value.
    pub fn first_defined(&self) -> Option<usize> {
        self.values.iter().position(Option::is_some)
    }

    /// Latest value, or `InsufficientData` naming how many points it needs.
    pub fn require_latest(&self, indicator: &str, required: usize) -> Result<f64> {
        self.latest()
            .ok_or_else(|| AnalysisError::insufficient(indicator, required, self.values.len()))
    }

    /// Element-wise `self - other`; undefined wherever either side is.
    pub fn minus(&self, other: &IndicatorSeries) -> IndicatorSeries {
        debug_assert_eq!(self.len(), other.len());
        IndicatorSeries::new(
            self.values
                .iter()
                .zip(other.values.iter())
                .map(|(a, b)| Some((*a)? - (*b)?))
                .collect(),
        )
    }
}

/// MACD line, signal line and histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdSeries {
    pub macd: IndicatorSeries,
    pub signal: IndicatorSeries,
    pub histogram: IndicatorSeries,
}

/// Bollinger upper, middle and lower bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerSeries {
    pub upper: IndicatorSeries,
    pub middle: IndicatorSeries,
    pub lower: IndicatorSeries,
}

/// Every indicator the aggregator and report read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSet {
    pub sma_short: IndicatorSeries,
    pub sma_long: IndicatorSeries,
    pub rsi: IndicatorSeries,
    pub macd: MacdSeries,
    pub bollinger: BollingerSeries,
}

/// Reading of a single RSI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiZone {
    Overbought,
    Oversold,
    Bullish,
    Bearish,
}

impl RsiZone {
    pub fn classify(rsi: f64) -> Self {
        if rsi >= 70.0 {
            RsiZone::Overbought
        } else if rsi <= 30.0 {
            RsiZone::Oversold
        } else if rsi >= 50.0 {
            RsiZone::Bullish
        } else {
            RsiZone::Bearish
        }
    }

    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            RsiZone::Overbought => "Overbought",
            RsiZone::Oversold => "Oversold",
            RsiZone::Bullish => "Bullish",
            RsiZone::Bearish => "Bearish",
        }
    }
}

/// Where a price sits relative to the Bollinger Bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandPosition {
    AboveUpper,
    BelowLower,
    AboveMiddle,
    BelowMiddle,
}

impl BandPosition {
    pub fn classify(price: f64, upper: f64, middle: f64, lower: f64) -> Self {
        if price >= upper {
            BandPosition::AboveUpper
        } else if price <= lower {
            BandPosition::BelowLower
        } else if price > middle {
            BandPosition::AboveMiddle
        } else {
            BandPosition::BelowMiddle
        }
    }

    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            BandPosition::AboveUpper => "Above upper band (overbought)",
            BandPosition::BelowLower => "Below lower band (oversold)",
            BandPosition::AboveMiddle => "Above middle (bullish)",
            BandPosition::BelowMiddle => "Below middle (bearish)",
        }
    }
}
