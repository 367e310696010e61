//! Trading signals service module.
//!
//! Each indicator casts at most one fixed-weight vote; the direction with
//! strictly more votes wins.

pub mod indicators;

use tracing::debug;

use crate::config::IndicatorConfig;
use crate::error::{AnalysisError, Result};
use crate::types::{IndicatorSet, PriceSeries, Signal, SignalAction, SignalIndicator, Vote};

/// Confidence reported for a tie.
pub const HOLD_CONFIDENCE: f64 = 0.5;

/// Reduce the indicators to one buy/sell/hold decision.
///
/// Fails with `InsufficientData` when the series is shorter than the longest
/// window in use.
pub fn aggregate_signal(
    series: &PriceSeries,
    indicators: &IndicatorSet,
    config: &IndicatorConfig,
) -> Result<Signal> {
    let required = config.signal_min_points();
    let Some(latest) = series.last().filter(|_| series.len() >= required) else {
        return Err(AnalysisError::insufficient("signal", required, series.len()));
    };

    let votes = collect_votes(latest.close, indicators, config);
    Ok(tally(votes))
}

/// Votes cast by each indicator at the latest index.
///
/// An indicator whose latest value is undefined does not vote.
pub fn collect_votes(close: f64, indicators: &IndicatorSet, config: &IndicatorConfig) -> Vec<Vote> {
    let mut votes = Vec::with_capacity(4);

    if let Some(rsi) = indicators.rsi.latest() {
        if rsi < config.rsi_oversold {
            votes.push(Vote::new(SignalIndicator::Rsi, SignalAction::Buy));
        } else if rsi > config.rsi_overbought {
            votes.push(Vote::new(SignalIndicator::Rsi, SignalAction::Sell));
        }
    }

    if let (Some(short), Some(long)) = (indicators.sma_short.latest(), indicators.sma_long.latest()) {
        if close > short && short > long {
            votes.push(Vote::new(SignalIndicator::MovingAverages, SignalAction::Buy));
        } else if close < short && short < long {
            votes.push(Vote::new(SignalIndicator::MovingAverages, SignalAction::Sell));
        }
    }

    if let (Some(macd), Some(signal)) = (
        indicators.macd.macd.latest(),
        indicators.macd.signal.latest(),
    ) {
        let action = if macd > signal {
            SignalAction::Buy
        } else {
            SignalAction::Sell
        };
        votes.push(Vote::new(SignalIndicator::Macd, action));
    }

    if let (Some(upper), Some(lower)) = (
        indicators.bollinger.upper.latest(),
        indicators.bollinger.lower.latest(),
    ) {
        if close <= lower {
            votes.push(Vote::new(SignalIndicator::Bollinger, SignalAction::Buy));
        } else if close >= upper {
            votes.push(Vote::new(SignalIndicator::Bollinger, SignalAction::Sell));
        }
    }

    votes
}

/// Majority vote by count.
///
/// The winner's confidence is the mean weight of its votes and only its votes
/// are kept as reasons. Equal counts (including none at all) give `Hold` at
/// [`HOLD_CONFIDENCE`] with every vote kept.
// TODO: a weight-sum tally would stop two 0.5 votes outranking one 0.7 vote;
// switch once callers no longer depend on count-majority results.
pub fn tally(votes: Vec<Vote>) -> Signal {
    let buys = votes.iter().filter(|v| v.action == SignalAction::Buy).count();
    let sells = votes.iter().filter(|v| v.action == SignalAction::Sell).count();

    debug!("Signal tally: {} buy, {} sell", buys, sells);

    let winner = match buys.cmp(&sells) {
        std::cmp::Ordering::Greater => SignalAction::Buy,
        std::cmp::Ordering::Less => SignalAction::Sell,
        std::cmp::Ordering::Equal => {
            return Signal {
                action: SignalAction::Hold,
                confidence: HOLD_CONFIDENCE,
                reasons: votes,
            };
        }
    };

    let reasons: Vec<Vote> = votes.into_iter().filter(|v| v.action == winner).collect();
    let confidence = reasons.iter().map(|v| v.weight).sum::<f64>() / reasons.len() as f64;

    Signal {
        action: winner,
        confidence,
        reasons,
    }
}
