use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::store::StoreError;

/// Errors surfaced by every engine operation.
///
/// `NotFound` covers both "does not exist" and "exists but hidden from this
/// principal"; callers must not be able to tell the two apart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Not found")]
    NotFound,

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Conflict: {0}")]
    ConflictFailed(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        EngineError::ValidationFailed(message.into())
    }
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(message) => EngineError::ConflictFailed(message),
            StoreError::Unavailable(message) => EngineError::UpstreamUnavailable(message),
            StoreError::Rejected(message) => EngineError::ValidationFailed(message),
        }
    }
}

impl From<ExtractionError> for EngineError {
    fn from(err: ExtractionError) -> Self {
        EngineError::UpstreamUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_conflict_maps_to_conflict() {
        let err: EngineError = StoreError::Conflict("username taken".to_string()).into();
        assert_eq!(err, EngineError::ConflictFailed("username taken".to_string()));
    }

    #[test]
    fn test_store_unavailable_maps_to_upstream() {
        let err: EngineError = StoreError::Unavailable("pool exhausted".to_string()).into();
        assert!(matches!(err, EngineError::UpstreamUnavailable(_)));
    }

    #[test]
    fn test_store_rejection_maps_to_validation() {
        let err: EngineError = StoreError::Rejected("would create a cycle".to_string()).into();
        assert_eq!(err, EngineError::ValidationFailed("would create a cycle".to_string()));
    }

    #[test]
    fn test_extraction_failure_maps_to_upstream() {
        let err: EngineError = ExtractionError::RequestFailed("timeout".to_string()).into();
        assert_eq!(
            err,
            EngineError::UpstreamUnavailable("Extraction request failed: timeout".to_string())
        );
    }
}
