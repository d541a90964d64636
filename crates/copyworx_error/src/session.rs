//! Generation session error types.

/// Specific error conditions for session transitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SessionErrorKind {
    /// No form inputs were supplied for the session
    #[display("Form inputs are required before generating")]
    MissingFormInputs,
    /// A form field is malformed (blank name)
    #[display("Invalid form input: {}", _0)]
    InvalidFormInput(String),
    /// The session has no sections to work on
    #[display("Session has no sections")]
    EmptySession,
    /// Section index is outside the session
    #[display("Section index {} out of range (session has {} sections)", index, len)]
    SectionOutOfRange {
        /// Requested index
        index: usize,
        /// Number of sections in the session
        len: usize,
    },
    /// Operation targeted a section other than the one awaiting work
    #[display("Section {} is not the current section (current: {})", index, current)]
    NotCurrentSection {
        /// Requested index
        index: usize,
        /// Index of the section awaiting work
        current: usize,
    },
    /// Status transition is not permitted
    #[display("Cannot {} section '{}' while it is {}", action, section, status)]
    InvalidTransition {
        /// Section id
        section: String,
        /// Current status of the section
        status: String,
        /// Attempted action
        action: &'static str,
    },
    /// Every section is already approved
    #[display("All sections are approved")]
    SessionComplete,
    /// Assembly requested before every section was approved
    #[display("Section '{}' is not approved", _0)]
    NotApproved(String),
    /// Session was built against a different section table
    #[display("Session template '{}' does not match table '{}'", session, table)]
    TemplateMismatch {
        /// Template recorded in the session
        session: String,
        /// Name of the table supplied
        table: String,
    },
    /// Stored session state violates a session invariant
    #[display("Inconsistent session state: {}", _0)]
    Inconsistent(String),
}

/// Error type for session operations.
///
/// # Examples
///
/// ```
/// use copyworx_error::{SessionError, SessionErrorKind};
///
/// let err = SessionError::new(SessionErrorKind::MissingFormInputs);
/// assert!(format!("{}", err).contains("Form inputs"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Session Error: {} at line {} in {}", kind, line, file)]
pub struct SessionError {
    /// The specific error condition
    pub kind: SessionErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl SessionError {
    /// Create a new SessionError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SessionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
