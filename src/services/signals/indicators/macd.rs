//! MACD (Moving Average Convergence Divergence) indicator.

use super::ema::Ema;
use super::Indicator;
use crate::config::EmaSeed;
use crate::types::MacdSeries;

/// MACD indicator.
///
/// Shows the relationship between two EMAs:
/// - MACD Line = EMA(12) - EMA(26)
/// - Signal Line = EMA(9) of MACD Line
/// - Histogram = MACD Line - Signal Line
///
/// All three EMAs share one seeding convention.
#[derive(Debug, Clone, Copy)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
    seed: EmaSeed,
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
            seed: EmaSeed::default(),
        }
    }
}

impl Macd {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize, seed: EmaSeed) -> Self {
        Self {
            fast_period,
            slow_period,
            signal_period,
            seed,
        }
    }
}

impl Indicator for Macd {
    type Output = MacdSeries;

    fn name(&self) -> String {
        format!(
            "MACD({}, {}, {})",
            self.fast_period, self.slow_period, self.signal_period
        )
    }

    fn min_periods(&self) -> usize {
        1
    }

    fn compute(&self, closes: &[f64]) -> MacdSeries {
        let fast = Ema::new(self.fast_period, self.seed).compute(closes);
        let slow = Ema::new(self.slow_period, self.seed).compute(closes);

        let macd = fast.minus(&slow);
        let signal = Ema::new(self.signal_period, self.seed).compute_series(macd.values());
        let histogram = macd.minus(&signal);

        MacdSeries {
            macd,
            signal,
            histogram,
        }
    }
}
