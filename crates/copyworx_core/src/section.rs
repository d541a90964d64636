//! Section definitions and per-section generation state.

use copyworx_error::{SessionError, SessionErrorKind};
use serde::{Deserialize, Serialize};

/// Kind of a content section, keyed by its id.
///
/// Known brochure sections have dedicated variants; any other id is carried
/// as [`SectionKind::Custom`] and receives generic guidance.
///
/// # Examples
///
/// ```
/// use copyworx_core::SectionKind;
///
/// assert_eq!(SectionKind::from_id("caseStudy"), SectionKind::CaseStudy);
/// assert_eq!(SectionKind::CaseStudy.id(), "caseStudy");
/// assert!(SectionKind::from_id("unknown-xyz").is_custom());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectionKind {
    Cover,
    Hero,
    Solutions,
    CaseStudy,
    Cta,
    Other,
    /// Section id with no built-in guidance
    Custom(String),
}

impl SectionKind {
    /// Maps a section id to its kind. Unrecognized ids become `Custom`.
    pub fn from_id(id: &str) -> Self {
        match id {
            "cover" => SectionKind::Cover,
            "hero" => SectionKind::Hero,
            "solutions" => SectionKind::Solutions,
            "caseStudy" => SectionKind::CaseStudy,
            "cta" => SectionKind::Cta,
            "other" => SectionKind::Other,
            custom => SectionKind::Custom(custom.to_string()),
        }
    }

    /// The wire id of this section.
    pub fn id(&self) -> &str {
        match self {
            SectionKind::Cover => "cover",
            SectionKind::Hero => "hero",
            SectionKind::Solutions => "solutions",
            SectionKind::CaseStudy => "caseStudy",
            SectionKind::Cta => "cta",
            SectionKind::Other => "other",
            SectionKind::Custom(id) => id,
        }
    }

    /// Whether this id has no built-in guidance.
    pub fn is_custom(&self) -> bool {
        matches!(self, SectionKind::Custom(_))
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl From<String> for SectionKind {
    fn from(id: String) -> Self {
        SectionKind::from_id(&id)
    }
}

impl From<SectionKind> for String {
    fn from(kind: SectionKind) -> Self {
        kind.id().to_string()
    }
}

/// One entry of a section table.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct SectionDefinition {
    /// Section id
    id: SectionKind,
    /// Display name
    name: String,
    /// Purpose and requirements handed to the model
    #[serde(default)]
    #[builder(default)]
    instructions: String,
    /// Lower word bound for generated content
    min_words: u32,
    /// Upper word bound for generated content
    max_words: u32,
}

impl SectionDefinition {
    /// Creates a definition from its parts.
    pub fn new(
        id: SectionKind,
        name: impl Into<String>,
        instructions: impl Into<String>,
        min_words: u32,
        max_words: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            instructions: instructions.into(),
            min_words,
            max_words,
        }
    }

    /// Returns a builder for constructing a SectionDefinition.
    pub fn builder() -> SectionDefinitionBuilder {
        SectionDefinitionBuilder::default()
    }
}

/// Generation status of a single section.
///
/// Ordered so that `Pending < Generated < Approved`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SectionStatus {
    #[default]
    Pending,
    Generated,
    Approved,
}

/// Generated content and status for one section.
///
/// Status changes only through the transition methods, which enforce
/// `pending -> generated -> approved` and `approved -> pending` on redo.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct SectionResult {
    /// Section this result belongs to
    section_id: SectionKind,
    /// Latest generated or edited markup
    #[serde(default)]
    html_content: String,
    /// Current status
    #[serde(default)]
    status: SectionStatus,
}

impl SectionResult {
    /// Creates a pending result with no content.
    pub fn pending(section_id: SectionKind) -> Self {
        Self {
            section_id,
            html_content: String::new(),
            status: SectionStatus::Pending,
        }
    }

    /// Whether the section has been approved.
    pub fn is_approved(&self) -> bool {
        self.status == SectionStatus::Approved
    }

    /// Stores freshly generated content.
    ///
    /// Valid from `pending` or `generated` (regeneration replaces content).
    ///
    /// # Errors
    ///
    /// Fails with [`SessionErrorKind::InvalidTransition`] on an approved section.
    #[track_caller]
    pub fn mark_generated(&mut self, html: impl Into<String>) -> Result<(), SessionError> {
        self.ensure_not(SectionStatus::Approved, "generate")?;
        self.html_content = html.into();
        self.status = SectionStatus::Generated;
        Ok(())
    }

    /// Replaces content with a user edit, keeping the `generated` status.
    ///
    /// # Errors
    ///
    /// Fails unless the section is `generated`.
    #[track_caller]
    pub fn edit(&mut self, html: impl Into<String>) -> Result<(), SessionError> {
        self.ensure_is(SectionStatus::Generated, "edit")?;
        self.html_content = html.into();
        Ok(())
    }

    /// Approves generated content.
    ///
    /// # Errors
    ///
    /// Fails unless the section is `generated`.
    #[track_caller]
    pub fn approve(&mut self) -> Result<(), SessionError> {
        self.ensure_is(SectionStatus::Generated, "approve")?;
        self.status = SectionStatus::Approved;
        Ok(())
    }

    /// Reopens an approved section. Content is kept as a reference draft.
    ///
    /// # Errors
    ///
    /// Fails unless the section is `approved`.
    #[track_caller]
    pub fn reopen(&mut self) -> Result<(), SessionError> {
        self.ensure_is(SectionStatus::Approved, "redo")?;
        self.status = SectionStatus::Pending;
        Ok(())
    }

    /// Returns a dependent section to `pending` after an earlier section was
    /// reopened. Pending sections are left alone.
    pub fn invalidate(&mut self) {
        self.status = SectionStatus::Pending;
    }

    /// Drops content and status back to a fresh pending result.
    pub fn clear(&mut self) {
        self.html_content.clear();
        self.status = SectionStatus::Pending;
    }

    #[track_caller]
    fn ensure_is(&self, expected: SectionStatus, action: &'static str) -> Result<(), SessionError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(self.transition_error(action))
        }
    }

    #[track_caller]
    fn ensure_not(&self, forbidden: SectionStatus, action: &'static str) -> Result<(), SessionError> {
        if self.status == forbidden {
            Err(self.transition_error(action))
        } else {
            Ok(())
        }
    }

    #[track_caller]
    fn transition_error(&self, action: &'static str) -> SessionError {
        SessionError::new(SessionErrorKind::InvalidTransition {
            section: self.section_id.to_string(),
            status: self.status.to_string(),
            action,
        })
    }
}
