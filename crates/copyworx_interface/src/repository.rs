//! Session persistence trait and query types.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use copyworx_core::GenerationSession;
use copyworx_error::CopyworxResult;
use serde::{Deserialize, Serialize};

/// Lightweight view of a stored session for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct SessionSummary {
    /// Session id
    id: String,
    /// Section table the session was started from
    template: String,
    /// Index of the next section to generate
    cursor: usize,
    /// Number of approved sections
    approved: usize,
    /// Number of sections
    total: usize,
    /// Last transition time
    updated_at: DateTime<Utc>,
}

impl SessionSummary {
    /// Whether every section is approved.
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.approved == self.total
    }
}

impl From<&GenerationSession> for SessionSummary {
    fn from(session: &GenerationSession) -> Self {
        let (approved, total) = session.progress();
        Self {
            id: session.id().clone(),
            template: session.template().clone(),
            cursor: *session.cursor(),
            approved,
            total,
            updated_at: *session.updated_at(),
        }
    }
}

/// Filter for listing stored sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionFilter {
    /// Only sessions started from this table
    pub template: Option<String>,
    /// Only complete (`true`) or in-progress (`false`) sessions
    pub complete: Option<bool>,
    /// Maximum number of results
    pub limit: Option<usize>,
    /// Number of results to skip
    pub offset: Option<usize>,
}

impl SessionFilter {
    /// Create a filter that matches every session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one section table.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Restrict by completion state.
    pub fn with_complete(mut self, complete: bool) -> Self {
        self.complete = Some(complete);
        self
    }

    /// Limit the number of results.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip the first `offset` results.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Whether a summary passes the template and completion filters.
    pub fn matches(&self, summary: &SessionSummary) -> bool {
        if let Some(ref template) = self.template
            && summary.template() != template
        {
            return false;
        }

        if let Some(complete) = self.complete
            && summary.is_complete() != complete
        {
            return false;
        }

        true
    }

    /// Sort by most recently updated (ties broken by id), then paginate.
    pub fn apply(&self, mut summaries: Vec<SessionSummary>) -> Vec<SessionSummary> {
        summaries.retain(|summary| self.matches(summary));
        summaries.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        let offset = self.offset.unwrap_or(0);
        let limit = self.limit.unwrap_or(usize::MAX);
        summaries.into_iter().skip(offset).take(limit).collect()
    }
}

/// Persistence for generation sessions, keyed by session id.
///
/// Saving an existing id overwrites the stored record so that a reload
/// resumes at the same cursor.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Store (or overwrite) a session.
    async fn save_session(&self, session: &GenerationSession) -> CopyworxResult<()>;

    /// Load a session by id.
    ///
    /// # Errors
    ///
    /// Returns a storage `NotFound` error when no session has this id.
    async fn load_session(&self, id: &str) -> CopyworxResult<GenerationSession>;

    /// List stored sessions matching the filter.
    async fn list_sessions(&self, filter: &SessionFilter) -> CopyworxResult<Vec<SessionSummary>>;

    /// Remove a session.
    ///
    /// # Errors
    ///
    /// Returns a storage `NotFound` error when no session has this id.
    async fn delete_session(&self, id: &str) -> CopyworxResult<()>;
}
