use serde::{Deserialize, Serialize};

/// Trading decision: Buy, Sell, or Hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalAction {
    Buy,
    Sell,
    Hold,
}

impl SignalAction {
    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            SignalAction::Buy => "Buy",
            SignalAction::Sell => "Sell",
            SignalAction::Hold => "Hold",
        }
    }
}

/// Indicator that can cast a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalIndicator {
    Rsi,
    MovingAverages,
    Macd,
    Bollinger,
}

impl SignalIndicator {
    /// Fixed confidence attached to every vote from this indicator.
    pub fn weight(&self) -> f64 {
        match self {
            SignalIndicator::Rsi => 0.7,
            SignalIndicator::MovingAverages => 0.6,
            SignalIndicator::Macd => 0.6,
            SignalIndicator::Bollinger => 0.5,
        }
    }

    /// Reason label for a vote in the given direction.
    pub fn reason(&self, action: SignalAction) -> &'static str {
        match (self, action) {
            (SignalIndicator::Rsi, SignalAction::Buy) => "RSI oversold",
            (SignalIndicator::Rsi, _) => "RSI overbought",
            (SignalIndicator::MovingAverages, SignalAction::Buy) => "Price above MAs",
            (SignalIndicator::MovingAverages, _) => "Price below MAs",
            (SignalIndicator::Macd, SignalAction::Buy) => "MACD bullish crossover",
            (SignalIndicator::Macd, _) => "MACD bearish crossover",
            (SignalIndicator::Bollinger, SignalAction::Buy) => "Price at lower Bollinger Band",
            (SignalIndicator::Bollinger, _) => "Price at upper Bollinger Band",
        }
    }
}

/// One indicator's vote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub action: SignalAction,
    pub indicator: SignalIndicator,
    pub reason: String,
    pub weight: f64,
}

impl Vote {
    pub fn new(indicator: SignalIndicator, action: SignalAction) -> Self {
        Self {
            action,
            indicator,
            reason: indicator.reason(action).to_string(),
            weight: indicator.weight(),
        }
    }
}

/// Aggregated decision for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub action: SignalAction,
    /// Confidence in [0, 1], derived from the fixed vote weights.
    pub confidence: f64,
    /// Winning votes, or every vote on a tie.
    pub reasons: Vec<Vote>,
}
