//! Section table error types.

/// Specific error conditions for loading and validating section tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum TemplateErrorKind {
    /// Failed to read template file
    #[display("Failed to read template file: {}", _0)]
    FileRead(String),
    /// Failed to parse TOML content
    #[display("Failed to parse TOML: {}", _0)]
    TomlParse(String),
    /// Table defines no sections
    #[display("Section table cannot be empty")]
    EmptyTable,
    /// The same section id appears more than once
    #[display("Section '{}' is defined more than once", _0)]
    DuplicateSection(String),
    /// Word bounds are zero or inverted
    #[display("Section '{}' has invalid word bounds {}-{}", section, min, max)]
    InvalidWordBounds {
        /// Section id
        section: String,
        /// Minimum word count
        min: u32,
        /// Maximum word count
        max: u32,
    },
    /// No built-in table with this name
    #[display("Unknown template: {}", _0)]
    UnknownTemplate(String),
}

/// Error type for section table operations.
///
/// # Examples
///
/// ```
/// use copyworx_error::{TemplateError, TemplateErrorKind};
///
/// let err = TemplateError::new(TemplateErrorKind::EmptyTable);
/// assert!(format!("{}", err).contains("empty"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Template Error: {} at line {} in {}", kind, line, file)]
pub struct TemplateError {
    /// The specific error condition
    pub kind: TemplateErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl TemplateError {
    /// Create a new TemplateError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: TemplateErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
