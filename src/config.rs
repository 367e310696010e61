use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// How the first outputs of an EMA are weighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmaSeed {
    /// Cumulative-weighted mean over every value seen so far.
    #[default]
    Adjusted,
    /// Plain recurrence seeded with the first value.
    Recursive,
}

impl EmaSeed {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "adjusted" | "adjust" | "weighted" => Some(Self::Adjusted),
            "recursive" | "recurrence" | "simple" => Some(Self::Recursive),
            _ => None,
        }
    }
}

/// Periods, windows and thresholds for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndicatorConfig {
    /// Short moving average period (also the MA crossover fast leg).
    pub sma_short: usize,
    /// Long moving average period.
    pub sma_long: usize,
    pub ema_seed: EmaSeed,
    pub rsi_period: usize,
    /// RSI strictly below this votes buy.
    pub rsi_oversold: f64,
    /// RSI strictly above this votes sell.
    pub rsi_overbought: f64,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_period: usize,
    pub bollinger_std_dev: f64,
    /// Width of the centered window used to find local extrema.
    pub level_window: usize,
    /// Lower bound of the level band, as a fraction of the latest close.
    pub level_band_low: f64,
    /// Upper bound of the level band, as a fraction of the latest close.
    pub level_band_high: f64,
    /// Maximum levels kept per side.
    pub max_levels: usize,
    /// Samples averaged at each end of the volume history.
    pub volume_window: usize,
    /// Minimum series length for a report.
    pub min_report_points: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_short: 20,
            sma_long: 50,
            ema_seed: EmaSeed::Adjusted,
            rsi_period: 14,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
            level_window: 10,
            level_band_low: 0.5,
            level_band_high: 1.5,
            max_levels: 3,
            volume_window: 7,
            min_report_points: 20,
        }
    }
}

impl IndicatorConfig {
    /// Load overrides from `TA_*` environment variables on top of the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            sma_short: env_or("TA_SMA_SHORT", defaults.sma_short),
            sma_long: env_or("TA_SMA_LONG", defaults.sma_long),
            ema_seed: env::var("TA_EMA_SEED")
                .ok()
                .and_then(|v| EmaSeed::from_str(&v))
                .unwrap_or(defaults.ema_seed),
            rsi_period: env_or("TA_RSI_PERIOD", defaults.rsi_period),
            rsi_oversold: env_or("TA_RSI_OVERSOLD", defaults.rsi_oversold),
            rsi_overbought: env_or("TA_RSI_OVERBOUGHT", defaults.rsi_overbought),
            macd_fast: env_or("TA_MACD_FAST", defaults.macd_fast),
            macd_slow: env_or("TA_MACD_SLOW", defaults.macd_slow),
            macd_signal: env_or("TA_MACD_SIGNAL", defaults.macd_signal),
            bollinger_period: env_or("TA_BOLLINGER_PERIOD", defaults.bollinger_period),
            bollinger_std_dev: env_or("TA_BOLLINGER_STD_DEV", defaults.bollinger_std_dev),
            level_window: env_or("TA_LEVEL_WINDOW", defaults.level_window),
            level_band_low: env_or("TA_LEVEL_BAND_LOW", defaults.level_band_low),
            level_band_high: env_or("TA_LEVEL_BAND_HIGH", defaults.level_band_high),
            max_levels: env_or("TA_MAX_LEVELS", defaults.max_levels),
            volume_window: env_or("TA_VOLUME_WINDOW", defaults.volume_window),
            min_report_points: env_or("TA_MIN_REPORT_POINTS", defaults.min_report_points),
        }
    }

    /// Reject configurations the indicators cannot run with.
    pub fn validate(&self) -> Result<()> {
        let periods = [
            ("smaShort", self.sma_short),
            ("smaLong", self.sma_long),
            ("rsiPeriod", self.rsi_period),
            ("macdFast", self.macd_fast),
            ("macdSlow", self.macd_slow),
            ("macdSignal", self.macd_signal),
            ("bollingerPeriod", self.bollinger_period),
            ("levelWindow", self.level_window),
            ("volumeWindow", self.volume_window),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, p)| *p == 0) {
            return Err(AnalysisError::InvalidConfig(format!("{} must be > 0", name)));
        }

        if self.macd_fast >= self.macd_slow {
            return Err(AnalysisError::InvalidConfig(format!(
                "macdFast ({}) must be shorter than macdSlow ({})",
                self.macd_fast, self.macd_slow
            )));
        }

        if !(self.bollinger_std_dev.is_finite() && self.bollinger_std_dev >= 0.0) {
            return Err(AnalysisError::InvalidConfig(
                "bollingerStdDev must be finite and >= 0".to_string(),
            ));
        }

        if !(self.level_band_low.is_finite()
            && self.level_band_high.is_finite()
            && 0.0 <= self.level_band_low
            && self.level_band_low <= self.level_band_high)
        {
            return Err(AnalysisError::InvalidConfig(format!(
                "level band [{}, {}] is not a valid range",
                self.level_band_low, self.level_band_high
            )));
        }

        if !(0.0..=100.0).contains(&self.rsi_oversold)
            || !(0.0..=100.0).contains(&self.rsi_overbought)
            || self.rsi_oversold > self.rsi_overbought
        {
            return Err(AnalysisError::InvalidConfig(format!(
                "RSI thresholds {} / {} must lie in [0, 100] with oversold <= overbought",
                self.rsi_oversold, self.rsi_overbought
            )));
        }

        Ok(())
    }

    /// Minimum series length for signal aggregation: the longest window in use.
    pub fn signal_min_points(&self) -> usize {
        self.sma_long
            .max(self.sma_short)
            .max(self.bollinger_period)
            .max(self.rsi_period + 1)
    }
}

/// Runner configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the JSON input document, if not given on the command line.
    pub input_path: Option<String>,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_filter: String,
    pub indicators: IndicatorConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            input_path: env::var("ANALYSIS_INPUT").ok().filter(|p| !p.is_empty()),
            log_filter: env::var("ANALYSIS_LOG")
                .unwrap_or_else(|_| "technical_analyst=info".to_string()),
            indicators: IndicatorConfig::from_env(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // IndicatorConfig Tests
    // =========================================================================

    #[test]
    fn test_default_periods() {
        let config = IndicatorConfig::default();
        assert_eq!(config.sma_short, 20);
        assert_eq!(config.sma_long, 50);
        assert_eq!(config.rsi_period, 14);
        assert_eq!((config.macd_fast, config.macd_slow, config.macd_signal), (12, 26, 9));
        assert_eq!(config.bollinger_period, 20);
        assert_eq!(config.bollinger_std_dev, 2.0);
        assert_eq!(config.level_window, 10);
        assert_eq!(config.max_levels, 3);
        assert_eq!(config.volume_window, 7);
        assert_eq!(config.ema_seed, EmaSeed::Adjusted);
    }

    #[test]
    fn test_default_validates() {
        assert!(IndicatorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_signal_min_points_is_longest_window() {
        let config = IndicatorConfig::default();
        assert_eq!(config.signal_min_points(), 50);

        let config = IndicatorConfig {
            bollinger_period: 60,
            ..IndicatorConfig::default()
        };
        assert_eq!(config.signal_min_points(), 60);
    }

    #[test]
    fn test_zero_period_rejected() {
        let config = IndicatorConfig {
            rsi_period: 0,
            ..IndicatorConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InvalidConfig("rsiPeriod must be > 0".to_string())
        );
    }

    #[test]
    fn test_inverted_macd_rejected() {
        let config = IndicatorConfig {
            macd_fast: 26,
            macd_slow: 12,
            ..IndicatorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_level_band_rejected() {
        let config = IndicatorConfig {
            level_band_low: 1.5,
            level_band_high: 0.5,
            ..IndicatorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ema_seed_from_str() {
        assert_eq!(EmaSeed::from_str("adjusted"), Some(EmaSeed::Adjusted));
        assert_eq!(EmaSeed::from_str("Recursive"), Some(EmaSeed::Recursive));
        assert_eq!(EmaSeed::from_str("bogus"), None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: IndicatorConfig = serde_json::from_str(r#"{"rsiPeriod": 7}"#).unwrap();
        assert_eq!(config.rsi_period, 7);
        assert_eq!(config.sma_long, 50);
    }
}
