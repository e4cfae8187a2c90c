use crate::error::AnalysisError;

const MAX_TICKER_LEN: usize = 10;

/// Trims and upper-cases a ticker, rejecting anything a quote provider would not recognise.
pub fn normalize_ticker(raw: &str) -> Result<String, AnalysisError> {
    let ticker = raw.trim().to_ascii_uppercase();

    let valid = !ticker.is_empty()
        && ticker.len() <= MAX_TICKER_LEN
        && ticker
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='));

    if !valid {
        return Err(AnalysisError::InvalidTicker(raw.to_string()));
    }
    Ok(ticker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(normalize_ticker("  aapl ").unwrap(), "AAPL");
        assert_eq!(normalize_ticker("brk-b").unwrap(), "BRK-B");
        assert_eq!(normalize_ticker("^gspc").unwrap(), "^GSPC");
    }

    #[test]
    fn rejects_garbage() {
        assert!(normalize_ticker("").is_err());
        assert!(normalize_ticker("   ").is_err());
        assert!(normalize_ticker("AAPL; DROP").is_err());
        assert!(normalize_ticker("ABCDEFGHIJK").is_err());
    }
}
