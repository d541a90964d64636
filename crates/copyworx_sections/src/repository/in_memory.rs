//! In-memory implementation of SessionRepository.
//!
//! Stores sessions in a HashMap behind an RwLock. All data is lost when the
//! repository is dropped; useful for tests and for embedding the workflow in
//! a process that owns persistence elsewhere.

use async_trait::async_trait;
use copyworx_core::GenerationSession;
use copyworx_error::{CopyworxResult, StorageError, StorageErrorKind};
use copyworx_interface::{SessionFilter, SessionRepository, SessionSummary};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory repository for generation sessions.
///
/// # Example
/// ```no_run
/// use copyworx_sections::InMemorySessionRepository;
/// use copyworx_interface::SessionRepository;
///
/// #[tokio::main]
/// async fn main() {
///     let repo = InMemorySessionRepository::new();
///     // Use repo.save_session(), load_session(), etc.
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<String, GenerationSession>>>,
}

impl InMemorySessionRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Check if the repository is empty.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Remove all sessions.
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn save_session(&self, session: &GenerationSession) -> CopyworxResult<()> {
        self.sessions
            .write()
            .await
            .insert(session.id().clone(), session.clone());
        Ok(())
    }

    async fn load_session(&self, id: &str) -> CopyworxResult<GenerationSession> {
        let sessions = self.sessions.read().await;
        sessions.get(id).cloned().ok_or_else(|| {
            StorageError::new(StorageErrorKind::NotFound(id.to_string())).into()
        })
    }

    async fn list_sessions(&self, filter: &SessionFilter) -> CopyworxResult<Vec<SessionSummary>> {
        let sessions = self.sessions.read().await;
        let summaries = sessions.values().map(SessionSummary::from).collect();
        Ok(filter.apply(summaries))
    }

    async fn delete_session(&self, id: &str) -> CopyworxResult<()> {
        self.sessions
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(id.to_string())).into())
    }
}
