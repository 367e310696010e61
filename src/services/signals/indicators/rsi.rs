//! Relative Strength Index (RSI) indicator.

use super::rolling::{mean, rolling_defined};
use super::Indicator;
use crate::types::IndicatorSeries;

/// RSI (Relative Strength Index) indicator.
///
/// Measures momentum by comparing the magnitude of recent gains to recent losses.
/// Gains and losses are averaged with a simple rolling mean over `period`
/// deltas. Values range from 0-100:
/// - Below 30: Oversold (potential buy signal)
/// - Above 70: Overbought (potential sell signal)
///
/// A window without losses saturates at 100; a window with neither gains nor
/// losses reads 50.
#[derive(Debug, Clone, Copy)]
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    fn from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            return if avg_gain == 0.0 { 50.0 } else { 100.0 };
        }
        let rs = avg_gain / avg_loss;
        (100.0 - (100.0 / (1.0 + rs))).clamp(0.0, 100.0)
    }
}

impl Indicator for Rsi {
    type Output = IndicatorSeries;

    fn name(&self) -> String {
        format!("RSI({})", self.period)
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn compute(&self, closes: &[f64]) -> IndicatorSeries {
        let deltas: Vec<Option<f64>> = std::iter::once(None)
            .chain(closes.windows(2).map(|w| Some(w[1] - w[0])))
            .take(closes.len())
            .collect();

        let gains: Vec<Option<f64>> = deltas.iter().map(|d| d.map(|d| d.max(0.0))).collect();
        let losses: Vec<Option<f64>> = deltas.iter().map(|d| d.map(|d| (-d).max(0.0))).collect();

        let avg_gain = rolling_defined(&gains, self.period, mean);
        let avg_loss = rolling_defined(&losses, self.period, mean);

        IndicatorSeries::new(
            avg_gain
                .values()
                .iter()
                .zip(avg_loss.values())
                .map(|(g, l)| Some(Self::from_averages((*g)?, (*l)?)))
                .collect(),
        )
    }
}
