//! Error types for Agentline

use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Managed engine unavailable: {reason}")]
    EngineUnavailable { reason: String },

    #[error("Request to {endpoint} timed out after {timeout_seconds} seconds")]
    Timeout {
        endpoint: String,
        timeout_seconds: u64,
    },

    #[error("Model call to {endpoint} failed: {reason}")]
    ModelQueryFailed { endpoint: String, reason: String },

    /// Classifier output did not resolve to exactly one category.
    ///
    /// Never surfaced to callers: the router consumes this internally and
    /// falls back to the general specialist.
    #[error("Classification was ambiguous: {response:?}")]
    ClassificationAmbiguous { response: String },

    #[error("Stage '{stage}' failed: {source}")]
    StageFailed {
        stage: String,
        #[source]
        source: Box<AppError>,
    },
}

impl AppError {
    /// Wrap an error as a stage failure, naming the pipeline stage that
    /// produced it.
    pub fn at_stage(self, stage: impl Into<String>) -> Self {
        AppError::StageFailed {
            stage: stage.into(),
            source: Box::new(self),
        }
    }

    /// Name of the failing stage, if this is a stage failure.
    pub fn failed_stage(&self) -> Option<&str> {
        match self {
            AppError::StageFailed { stage, .. } => Some(stage),
            _ => None,
        }
    }
}

/// Convenience type alias for Results
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = AppError::Config("HTTP_TIMEOUT must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: HTTP_TIMEOUT must be positive"
        );
    }

    #[test]
    fn test_engine_unavailable_display() {
        let err = AppError::EngineUnavailable {
            reason: "runtime refused options".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Managed engine unavailable: runtime refused options"
        );
    }

    #[test]
    fn test_timeout_display() {
        let err = AppError::Timeout {
            endpoint: "http://localhost:11434".to_string(),
            timeout_seconds: 60,
        };
        assert_eq!(
            err.to_string(),
            "Request to http://localhost:11434 timed out after 60 seconds"
        );
    }

    #[test]
    fn test_stage_failed_names_stage() {
        let err = AppError::ModelQueryFailed {
            endpoint: "http://localhost:11434".to_string(),
            reason: "connection refused".to_string(),
        }
        .at_stage("analyst");

        assert_eq!(err.failed_stage(), Some("analyst"));
        assert!(err.to_string().starts_with("Stage 'analyst' failed"));
    }

    #[test]
    fn test_stage_failed_preserves_source() {
        let err = AppError::Timeout {
            endpoint: "http://localhost:11434".to_string(),
            timeout_seconds: 5,
        }
        .at_stage("researcher");

        let source = std::error::Error::source(&err).expect("stage failure carries a source");
        assert!(source.to_string().contains("timed out after 5 seconds"));
    }

    #[test]
    fn test_non_stage_errors_have_no_stage() {
        let err = AppError::Config("bad".to_string());
        assert_eq!(err.failed_stage(), None);
    }
}
