//! Technical analysis engine.
//!
//! Turns an OHLC(V) series into indicators (SMA, EMA, RSI, MACD, Bollinger
//! Bands), support/resistance levels and a volume trend, then reduces them to
//! one buy/sell/hold signal. Everything here is pure and synchronous: no I/O,
//! no shared state, deterministic for a given input.

pub mod config;
pub mod error;
pub mod services;
pub mod types;

pub use config::{Config, EmaSeed, IndicatorConfig};
pub use error::{AnalysisError, Result};
pub use services::{analyze, analyze_series, prepare_series};
pub use types::{AnalysisReport, RawCandle, RawVolume, Signal, SignalAction};
