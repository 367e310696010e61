use thiserror::Error;

/// Analysis error types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Raw input is malformed or too short to form a series at all.
    #[error("Invalid series: {0}")]
    InvalidSeries(String),

    /// Series is valid but shorter than a consumer's minimum window.
    #[error("Insufficient data for {indicator}: need {required} points, have {available}")]
    InsufficientData {
        indicator: String,
        required: usize,
        available: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AnalysisError {
    pub fn insufficient(indicator: impl Into<String>, required: usize, available: usize) -> Self {
        AnalysisError::InsufficientData {
            indicator: indicator.into(),
            required,
            available,
        }
    }

    /// Whether the caller may still render partial indicators.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, AnalysisError::InsufficientData { .. })
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
