//! Exponential Moving Average (EMA) indicator.

use super::Indicator;
use crate::config::EmaSeed;
use crate::types::IndicatorSeries;

/// EMA (Exponential Moving Average) indicator.
///
/// Smoothing factor `alpha = 2 / (span + 1)`. Defined from the first input
/// onward; the first output equals the first input. How the early outputs
/// are weighted depends on [`EmaSeed`]:
/// - `Adjusted`: weighted mean of every value so far with weights
///   `(1 - alpha)^k`.
/// - `Recursive`: `ema = alpha * x + (1 - alpha) * ema_prev`.
///
/// Both converge to the same value once enough bars have been seen.
#[derive(Debug, Clone, Copy)]
pub struct Ema {
    span: usize,
    seed: EmaSeed,
}

impl Ema {
    pub fn new(span: usize, seed: EmaSeed) -> Self {
        Self { span, seed }
    }

    fn alpha(&self) -> f64 {
        2.0 / (self.span as f64 + 1.0)
    }

    /// EMA over a series that may start undefined.
    ///
    /// Undefined inputs produce undefined outputs and leave the running state
    /// untouched.
    pub fn compute_series(&self, values: &[Option<f64>]) -> IndicatorSeries {
        if self.span == 0 {
            return IndicatorSeries::undefined(values.len());
        }

        let alpha = self.alpha();
        let decay = 1.0 - alpha;

        // Both conventions step toward the new value by a weight: `alpha` for
        // the plain recurrence, `1 / sum(decay^k)` for the adjusted mean. A
        // constant input therefore yields exactly that constant.
        let mut ema: Option<f64> = None;
        let mut denominator = 0.0;
        let out = values
            .iter()
            .map(|value| {
                let x = (*value)?;
                denominator = 1.0 + decay * denominator;
                let weight = match self.seed {
                    EmaSeed::Adjusted => 1.0 / denominator,
                    EmaSeed::Recursive => alpha,
                };
                let next = match ema {
                    Some(prev) => prev + (x - prev) * weight,
                    None => x,
                };
                ema = Some(next);
                ema
            })
            .collect();

        IndicatorSeries::new(out)
    }
}

impl Indicator for Ema {
    type Output = IndicatorSeries;

    fn name(&self) -> String {
        format!("EMA({})", self.span)
    }

    fn min_periods(&self) -> usize {
        1
    }

    fn compute(&self, closes: &[f64]) -> IndicatorSeries {
        let values: Vec<Option<f64>> = closes.iter().copied().map(Some).collect();
        self.compute_series(&values)
    }
}
