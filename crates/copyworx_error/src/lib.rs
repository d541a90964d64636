//! Error types for the CopyWorx library.
//!
//! Each concern has its own `*ErrorKind` enum and a location-tracking
//! `*Error` wrapper. All of them convert into [`CopyworxError`], which is the
//! error type returned across crate boundaries.

mod config;
mod generation;
mod session;
mod storage;
mod template;

pub use config::ConfigError;
pub use generation::{GenerationError, GenerationErrorKind};
pub use session::{SessionError, SessionErrorKind};
pub use storage::{StorageError, StorageErrorKind};
pub use template::{TemplateError, TemplateErrorKind};

/// Specific error conditions for CopyWorx operations.
#[derive(Debug, Clone, derive_more::Display, derive_more::From)]
pub enum CopyworxErrorKind {
    /// Configuration error
    #[display("{}", _0)]
    Config(ConfigError),
    /// Model call failed
    #[display("{}", _0)]
    Generation(GenerationError),
    /// Session transition rejected
    #[display("{}", _0)]
    Session(SessionError),
    /// Session persistence failed
    #[display("{}", _0)]
    Storage(StorageError),
    /// Section table invalid or unreadable
    #[display("{}", _0)]
    Template(TemplateError),
}

/// CopyWorx error with kind discrimination.
///
/// # Examples
///
/// ```
/// use copyworx_error::{CopyworxError, SessionError, SessionErrorKind};
///
/// let err: CopyworxError = SessionError::new(SessionErrorKind::EmptySession).into();
/// assert!(format!("{}", err).contains("no sections"));
/// ```
#[derive(Debug, Clone, derive_more::Display)]
#[display("CopyWorx Error: {}", _0)]
pub struct CopyworxError(Box<CopyworxErrorKind>);

impl CopyworxError {
    /// Create a new error from a kind.
    pub fn new(kind: CopyworxErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CopyworxErrorKind {
        &self.0
    }

    /// Whether re-invoking the failed operation may succeed.
    ///
    /// Only transient model failures qualify; session and storage errors need
    /// a different request.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), CopyworxErrorKind::Generation(e) if e.is_retryable())
    }
}

impl std::error::Error for CopyworxError {}

// Generic From implementation for any type that converts to CopyworxErrorKind
impl<T> From<T> for CopyworxError
where
    T: Into<CopyworxErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for CopyWorx operations.
pub type CopyworxResult<T> = std::result::Result<T, CopyworxError>;
