//! Bollinger Bands indicator.

use super::rolling::{mean, rolling, sample_std};
use super::Indicator;
use crate::types::{BollingerSeries, IndicatorSeries};

/// Bollinger Bands indicator.
///
/// Consists of:
/// - Middle band: SMA(20)
/// - Upper band: SMA + 2 * StdDev
/// - Lower band: SMA - 2 * StdDev
///
/// StdDev is the sample standard deviation of the same trailing window.
#[derive(Debug, Clone, Copy)]
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: 2.0,
        }
    }
}

impl BollingerBands {
    pub fn new(period: usize, std_dev_multiplier: f64) -> Self {
        Self {
            period,
            std_dev_multiplier,
        }
    }
}

impl Indicator for BollingerBands {
    type Output = BollingerSeries;

    fn name(&self) -> String {
        format!("BB({}, {})", self.period, self.std_dev_multiplier)
    }

    fn min_periods(&self) -> usize {
        self.period.max(2)
    }

    fn compute(&self, closes: &[f64]) -> BollingerSeries {
        let middle = rolling(closes, self.period, mean);
        let std_dev = rolling(closes, self.period, sample_std);
        let mult = self.std_dev_multiplier;

        let band = |sign: f64| {
            IndicatorSeries::new(
                middle
                    .values()
                    .iter()
                    .zip(std_dev.values())
                    .map(|(m, s)| {
                        let value = (*m)? + sign * mult * (*s)?;
                        value.is_finite().then_some(value)
                    })
                    .collect(),
            )
        };

        BollingerSeries {
            upper: band(1.0),
            lower: band(-1.0),
            middle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bollinger_ordering() {
        let closes: Vec<f64> = (0..80)
            .map(|i| 100.0 + (i as f64 * 0.9).sin() * 5.0 + (i % 7) as f64)
            .collect();
        let bb = BollingerBands::default().compute(&closes);

        for i in 0..closes.len() {
            match (bb.upper.get(i), bb.middle.get(i), bb.lower.get(i)) {
                (Some(u), Some(m), Some(l)) => assert!(u >= m && m >= l),
                (None, None, None) => assert!(i < 19),
                other => panic!("bands misaligned at {}: {:?}", i, other),
            }
        }
    }

    #[test]
    fn test_bollinger_flat_window_collapses() {
        let bb = BollingerBands::default().compute(&[7.0; 25]);
        assert_eq!(bb.upper.latest(), Some(7.0));
        assert_eq!(bb.middle.latest(), Some(7.0));
        assert_eq!(bb.lower.latest(), Some(7.0));
    }

    #[test]
    fn test_bollinger_flat_inexact_price_collapses() {
        let bb = BollingerBands::default().compute(&[0.1; 25]);
        assert_eq!(bb.upper.latest(), Some(0.1));
        assert_eq!(bb.middle.latest(), Some(0.1));
        assert_eq!(bb.lower.latest(), Some(0.1));
    }

    #[test]
    fn test_bollinger_known_window() {
        let closes = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let bb = BollingerBands::new(8, 2.0).compute(&closes);
        let std = 2.138089935299395;
        assert_eq!(bb.middle.latest(), Some(5.0));
        assert!((bb.upper.latest().unwrap() - (5.0 + 2.0 * std)).abs() < 1e-12);
        assert!((bb.lower.latest().unwrap() - (5.0 - 2.0 * std)).abs() < 1e-12);
    }
}
