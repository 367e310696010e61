//! Simple Moving Average (SMA) indicator.

use super::rolling::{mean, rolling};
use super::Indicator;
use crate::types::IndicatorSeries;

/// SMA (Simple Moving Average) indicator.
///
/// Arithmetic mean of the trailing `period` closes. Undefined for the first
/// `period - 1` indices.
#[derive(Debug, Clone, Copy)]
pub struct Sma {
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for Sma {
    type Output = IndicatorSeries;

    fn name(&self) -> String {
        format!("SMA({})", self.period)
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn compute(&self, closes: &[f64]) -> IndicatorSeries {
        rolling(closes, self.period, mean)
    }
}
