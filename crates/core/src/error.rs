use thiserror::Error;

/// Failures the scoring pipeline reports to its caller instead of panicking.
///
/// Missing fundamentals are never errors; they resolve to fallback sub-scores.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("invalid ticker: {0:?}")]
    InvalidTicker(String),

    #[error("investment amount must be at least {min} USD (got {got})")]
    InvalidInvestment { min: f64, got: f64 },

    #[error("insufficient price data")]
    InsufficientPriceData,

    #[error("invalid price data at index {index}: {reason}")]
    InvalidPriceData { index: usize, reason: String },
}

impl AnalysisError {
    /// Message shown to an end user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::InsufficientPriceData => {
                "Failed to load historical price data.".to_string()
            }
            other => format!("An error occurred: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_data_uses_dedicated_message() {
        let err = AnalysisError::InsufficientPriceData;
        assert_eq!(err.user_message(), "Failed to load historical price data.");
    }

    #[test]
    fn other_failures_use_generic_message() {
        let err = AnalysisError::InvalidTicker("".to_string());
        assert_eq!(err.user_message(), "An error occurred: invalid ticker: \"\"");
    }
}
