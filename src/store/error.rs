use thiserror::Error;

use crate::content::ProviderError;

/// Failures surfaced by the dashboard store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A content fetch, search or trending request was rejected.
    ///
    /// The message is what the view shows verbatim.
    #[error("{0}")]
    FetchFailure(String),

    /// A mutation received input it cannot act on (e.g. an out-of-range
    /// reorder index). State is left untouched.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl From<ProviderError> for StoreError {
    fn from(err: ProviderError) -> Self {
        Self::FetchFailure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failure_keeps_provider_message() {
        let err: StoreError = ProviderError::fetch("news", "timeout").into();
        assert_eq!(err.to_string(), "Failed to fetch news: timeout");
    }

    #[test]
    fn test_invalid_operation_message() {
        let err = StoreError::InvalidOperation("source index 9 out of range".to_string());
        assert!(err.to_string().starts_with("Invalid operation"));
    }
}
