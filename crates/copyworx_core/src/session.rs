//! Resumable multi-section generation session.
//!
//! A [`GenerationSession`] owns one [`SectionResult`] per section definition
//! and a cursor pointing at the next section to generate. All mutation goes
//! through the named transitions below so that persisted sessions can be
//! replayed and audited.

use crate::{FormInputs, SectionDefinition, SectionResult, SectionStatus};
use chrono::{DateTime, Utc};
use copyworx_error::{SessionError, SessionErrorKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// What happens to later sections when an approved section is redone.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RedoPolicy {
    /// Reopen only the requested section; the cursor stays where it is and
    /// later approved sections keep their status.
    #[default]
    KeepCursor,
    /// Reopen the requested section, move the cursor back to it, and return
    /// every later section to pending since their prompts used the old text.
    Rewind,
}

/// Stateful, serializable workflow for one multi-section document.
///
/// # Examples
///
/// ```
/// use copyworx_core::{FormInputs, GenerationSession, SectionDefinition, SectionKind};
///
/// let sections = vec![
///     SectionDefinition::builder()
///         .id(SectionKind::Hero)
///         .name("Hero")
///         .min_words(50u32)
///         .max_words(100u32)
///         .build()
///         .unwrap(),
/// ];
/// let inputs = FormInputs::new().with("goal", "launch");
///
/// let mut session = GenerationSession::start("doc-1", "brochure", &sections, inputs).unwrap();
/// session.record(0, "<h1>Launch</h1>").unwrap();
/// session.approve().unwrap();
///
/// assert_eq!(*session.cursor(), 1);
/// assert!(session.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(try_from = "StoredSession")]
pub struct GenerationSession {
    /// Storage key
    id: String,
    /// Name of the section table this session was started from
    template: String,
    /// Inputs captured when the session started
    form_inputs: FormInputs,
    /// One result per section, in generation order
    results: Vec<SectionResult>,
    /// Index of the next section to generate
    cursor: usize,
    /// When the session was started
    created_at: DateTime<Utc>,
    /// Last transition time
    updated_at: DateTime<Utc>,
}

/// Session fields as persisted, before the cursor invariants are checked.
#[derive(Deserialize)]
struct StoredSession {
    id: String,
    template: String,
    form_inputs: FormInputs,
    results: Vec<SectionResult>,
    cursor: usize,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<StoredSession> for GenerationSession {
    type Error = SessionError;

    fn try_from(stored: StoredSession) -> Result<Self, Self::Error> {
        if stored.results.is_empty() {
            return Err(SessionError::new(SessionErrorKind::EmptySession));
        }
        if stored.cursor > stored.results.len() {
            return Err(SessionError::new(SessionErrorKind::Inconsistent(format!(
                "cursor {} past the last of {} sections",
                stored.cursor,
                stored.results.len()
            ))));
        }
        if let Some(index) = stored
            .results
            .iter()
            .skip(stored.cursor)
            .position(SectionResult::is_approved)
        {
            return Err(SessionError::new(SessionErrorKind::Inconsistent(format!(
                "section {} approved at or after cursor {}",
                stored.cursor + index,
                stored.cursor
            ))));
        }

        Ok(Self {
            id: stored.id,
            template: stored.template,
            form_inputs: stored.form_inputs,
            results: stored.results,
            cursor: stored.cursor,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        })
    }
}

impl GenerationSession {
    /// Start a session with one pending result per section and the cursor at 0.
    ///
    /// # Errors
    ///
    /// Fails when `sections` is empty or the form inputs are missing or invalid.
    #[instrument(skip(sections, form_inputs), fields(sections = sections.len()))]
    pub fn start(
        id: impl Into<String> + std::fmt::Debug,
        template: impl Into<String> + std::fmt::Debug,
        sections: &[SectionDefinition],
        form_inputs: FormInputs,
    ) -> Result<Self, SessionError> {
        if sections.is_empty() {
            return Err(SessionError::new(SessionErrorKind::EmptySession));
        }
        form_inputs.validate()?;

        let now = Utc::now();
        let session = Self {
            id: id.into(),
            template: template.into(),
            form_inputs,
            results: sections
                .iter()
                .map(|definition| SectionResult::pending(definition.id().clone()))
                .collect(),
            cursor: 0,
            created_at: now,
            updated_at: now,
        };
        debug!(session_id = %session.id, "Session started");
        Ok(session)
    }

    /// Number of sections in the session.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the session holds no sections.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Index of the section the next generate/approve applies to.
    ///
    /// This is the earliest reopened section before the cursor if any,
    /// otherwise the cursor itself. `None` once every section is approved.
    pub fn current_target(&self) -> Option<usize> {
        self.results
            .iter()
            .take(self.cursor)
            .position(|result| !result.is_approved())
            .or_else(|| (self.cursor < self.results.len()).then_some(self.cursor))
    }

    /// Whether every section is approved.
    pub fn is_complete(&self) -> bool {
        !self.results.is_empty() && self.results.iter().all(SectionResult::is_approved)
    }

    /// Returns `(approved, total)` section counts.
    pub fn progress(&self) -> (usize, usize) {
        let approved = self.results.iter().filter(|r| r.is_approved()).count();
        (approved, self.results.len())
    }

    /// Approved results before `index`, in order.
    pub fn approved_before(&self, index: usize) -> Vec<&SectionResult> {
        self.results
            .iter()
            .take(index)
            .filter(|result| result.is_approved())
            .collect()
    }

    /// Record model output for the current target section.
    ///
    /// Regenerating a `generated` section replaces its content.
    ///
    /// # Errors
    ///
    /// Fails when the session is complete, `index` is out of range, or
    /// `index` is not the current target.
    #[instrument(skip(self, html), fields(session_id = %self.id, cursor = self.cursor))]
    pub fn record(&mut self, index: usize, html: impl Into<String>) -> Result<(), SessionError> {
        let target = self.target_for(index)?;
        self.results[target].mark_generated(html)?;
        self.touch();
        debug!(section = index, "Recorded generated content");
        Ok(())
    }

    /// Replace the content of a generated section with a user edit.
    ///
    /// # Errors
    ///
    /// Fails when `index` is out of range or the section is not `generated`.
    #[instrument(skip(self, html), fields(session_id = %self.id))]
    pub fn edit(&mut self, index: usize, html: impl Into<String>) -> Result<(), SessionError> {
        self.check_range(index)?;
        self.results[index].edit(html)?;
        self.touch();
        Ok(())
    }

    /// Approve the current target section.
    ///
    /// When the target is the cursor, the cursor advances by one. Approving a
    /// reopened earlier section leaves the cursor in place.
    ///
    /// Returns the index of the approved section.
    ///
    /// # Errors
    ///
    /// Fails when the session is complete or the target is not `generated`.
    #[instrument(skip(self), fields(session_id = %self.id, cursor = self.cursor))]
    pub fn approve(&mut self) -> Result<usize, SessionError> {
        let target = self
            .current_target()
            .ok_or_else(|| SessionError::new(SessionErrorKind::SessionComplete))?;
        self.results[target].approve()?;
        if target == self.cursor {
            self.cursor += 1;
        }
        self.touch();
        debug!(section = target, cursor = self.cursor, "Section approved");
        Ok(target)
    }

    /// Reopen an approved section so it can be generated again.
    ///
    /// # Errors
    ///
    /// Fails when `index` is out of range or the section is not approved.
    #[instrument(skip(self), fields(session_id = %self.id, cursor = self.cursor))]
    pub fn redo(&mut self, index: usize, policy: RedoPolicy) -> Result<(), SessionError> {
        self.check_range(index)?;
        self.results[index].reopen()?;

        if policy == RedoPolicy::Rewind {
            for result in self.results.iter_mut().skip(index + 1) {
                if *result.status() != SectionStatus::Pending {
                    result.invalidate();
                }
            }
            self.cursor = index;
        }

        self.touch();
        debug!(section = index, cursor = self.cursor, %policy, "Section reopened");
        Ok(())
    }

    /// Discard all results and return the cursor to 0, keeping the inputs.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn reset(&mut self) {
        for result in &mut self.results {
            result.clear();
        }
        self.cursor = 0;
        self.touch();
    }

    #[track_caller]
    fn check_range(&self, index: usize) -> Result<(), SessionError> {
        if index < self.results.len() {
            Ok(())
        } else {
            Err(SessionError::new(SessionErrorKind::SectionOutOfRange {
                index,
                len: self.results.len(),
            }))
        }
    }

    #[track_caller]
    fn target_for(&self, index: usize) -> Result<usize, SessionError> {
        self.check_range(index)?;
        let target = self
            .current_target()
            .ok_or_else(|| SessionError::new(SessionErrorKind::SessionComplete))?;
        if index != target {
            return Err(SessionError::new(SessionErrorKind::NotCurrentSection {
                index,
                current: target,
            }));
        }
        Ok(target)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
