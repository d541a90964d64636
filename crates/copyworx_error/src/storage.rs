//! Session storage error types.

/// Ways session persistence can fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// No session stored under the given id
    #[display("Session not found: {}", _0)]
    NotFound(String),
    /// Reading or writing the session store failed
    #[display("I/O error: {}", _0)]
    Io(String),
    /// Session record could not be encoded or decoded
    #[display("Serialization error: {}", _0)]
    Serialization(String),
    /// Session id cannot be used as a storage key
    #[display("Invalid session id: {}", _0)]
    InvalidKey(String),
    /// Stored record belongs to a different session than its key
    #[display("Session file for '{}' holds session '{}'", requested, stored)]
    IdMismatch {
        /// Key the session was loaded under
        requested: String,
        /// Id recorded inside the session
        stored: String,
    },
}

/// Session persistence error with source location.
///
/// # Examples
///
/// ```
/// use copyworx_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::NotFound("abc".to_string()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// What went wrong
    pub kind: StorageErrorKind,
    /// Source line of the failing call
    pub line: u32,
    /// Source file of the failing call
    pub file: &'static str,
}

impl StorageError {
    /// Create a storage error at the caller's location.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
