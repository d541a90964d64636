//! Model generation error types and retry classification.

/// Failure conditions when calling the external language model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// API key not found in environment
    #[display("{} environment variable not set", _0)]
    MissingApiKey(String),
    /// HTTP/network error
    #[display("HTTP error: {}", _0)]
    Http(String),
    /// API returned a non-success status
    #[display("API error (status {}): {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Error body returned by the API
        message: String,
    },
    /// Response body could not be parsed
    #[display("Response parsing failed: {}", _0)]
    ResponseParsing(String),
    /// Model returned no text output
    #[display("Model returned no text output")]
    EmptyResponse,
    /// Request could not be built
    #[display("Invalid request: {}", _0)]
    InvalidRequest(String),
}

impl GenerationErrorKind {
    /// Check if this error type should be retried.
    ///
    /// Transport failures and throttling/server statuses are transient;
    /// everything else needs a changed request to succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            GenerationErrorKind::Http(_) => true,
            GenerationErrorKind::Api { status, .. } => {
                matches!(*status, 408 | 429 | 500 | 502 | 503 | 504)
            }
            _ => false,
        }
    }
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use copyworx_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::Api {
///     status: 503,
///     message: "overloaded".to_string(),
/// });
/// assert!(err.is_retryable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new generation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether the caller may re-invoke the same request.
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}
