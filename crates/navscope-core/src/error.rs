use thiserror::Error;

/// Validation and contract errors exposed by `navscope-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("scheme code cannot be empty")]
    EmptySchemeCode,
    #[error("scheme code contains whitespace: '{value}'")]
    SchemeCodeWhitespace { value: String },

    #[error("nav date must match DD-MM-YYYY: '{value}'")]
    InvalidNavDate { value: String },
    #[error("nav value must be a finite decimal number: '{value}'")]
    InvalidNavValue { value: String },

    #[error("invalid provider '{value}', expected one of mfapi, fixture")]
    InvalidProvider { value: String },
    #[error("invalid page '{value}', expected one of investment, blog, insurance")]
    InvalidPage { value: String },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },

    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("fixture i/o error: {0}")]
    Io(#[from] std::io::Error),
}
