//! Technical indicator implementations.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rolling;
pub mod rsi;
pub mod sma;

pub use bollinger::BollingerBands;
pub use ema::Ema;
pub use macd::Macd;
pub use rsi::Rsi;
pub use sma::Sma;

use crate::config::IndicatorConfig;
use crate::types::{IndicatorSet, PriceSeries};

/// Trait for implementing technical indicators.
///
/// Implementations are stateless: the same closes always produce the same
/// output, aligned index-for-index with the input.
pub trait Indicator {
    type Output;

    /// Human-readable name, including the configured periods.
    fn name(&self) -> String;

    /// Number of closes needed before the latest value is defined.
    fn min_periods(&self) -> usize;

    fn compute(&self, closes: &[f64]) -> Self::Output;
}

/// Compute every indicator the aggregator reads.
pub fn compute_indicators(series: &PriceSeries, config: &IndicatorConfig) -> IndicatorSet {
    let closes = series.closes();

    IndicatorSet {
        sma_short: Sma::new(config.sma_short).compute(&closes),
        sma_long: Sma::new(config.sma_long).compute(&closes),
        rsi: Rsi::new(config.rsi_period).compute(&closes),
        macd: Macd::new(
            config.macd_fast,
            config.macd_slow,
            config.macd_signal,
            config.ema_seed,
        )
        .compute(&closes),
        bollinger: BollingerBands::new(config.bollinger_period, config.bollinger_std_dev)
            .compute(&closes),
    }
}
