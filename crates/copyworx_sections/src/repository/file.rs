//! File-backed implementation of SessionRepository.
//!
//! Each session is stored as pretty-printed JSON at `<dir>/<id>.json`.
//! Writes go to a temporary file first and are renamed into place so a crash
//! never leaves a half-written session behind.

use async_trait::async_trait;
use copyworx_core::GenerationSession;
use copyworx_error::{CopyworxResult, StorageError, StorageErrorKind};
use copyworx_interface::{SessionFilter, SessionRepository, SessionSummary};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

const EXTENSION: &str = "json";

/// Directory-backed repository for generation sessions.
#[derive(Debug, Clone)]
pub struct FileSessionRepository {
    dir: PathBuf,
}

impl FileSessionRepository {
    /// Create a repository rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the session files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, StorageError> {
        validate_id(id)?;
        Ok(self.dir.join(format!("{}.{}", id, EXTENSION)))
    }
}

/// Session ids become file names, so only a safe character set is accepted.
fn validate_id(id: &str) -> Result<(), StorageError> {
    let valid = !id.is_empty()
        && id.len() <= 128
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::new(StorageErrorKind::InvalidKey(id.to_string())))
    }
}

fn io_error(context: &str, path: &Path, err: std::io::Error) -> StorageError {
    StorageError::new(StorageErrorKind::Io(format!(
        "{} {}: {}",
        context,
        path.display(),
        err
    )))
}

#[async_trait]
impl SessionRepository for FileSessionRepository {
    #[instrument(skip(self, session), fields(session_id = %session.id()))]
    async fn save_session(&self, session: &GenerationSession) -> CopyworxResult<()> {
        let path = self.path_for(session.id())?;
        let json = serde_json::to_vec_pretty(session)
            .map_err(|e| StorageError::new(StorageErrorKind::Serialization(e.to_string())))?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| io_error("Failed to create", &self.dir, e))?;

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json)
            .await
            .map_err(|e| io_error("Failed to write", &tmp, e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| io_error("Failed to replace", &path, e))?;

        debug!(path = %path.display(), bytes = json.len(), "Session saved");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn load_session(&self, id: &str) -> CopyworxResult<GenerationSession> {
        let path = self.path_for(id)?;
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(id.to_string()))
            } else {
                io_error("Failed to read", &path, e)
            }
        })?;

        let session: GenerationSession = serde_json::from_slice(&bytes).map_err(|e| {
            StorageError::new(StorageErrorKind::Serialization(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        if session.id() != id {
            warn!(path = %path.display(), stored = %session.id(), "Session id does not match file name");
            return Err(StorageError::new(StorageErrorKind::IdMismatch {
                requested: id.to_string(),
                stored: session.id().clone(),
            })
            .into());
        }
        Ok(session)
    }

    #[instrument(skip(self))]
    async fn list_sessions(&self, filter: &SessionFilter) -> CopyworxResult<Vec<SessionSummary>> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error("Failed to list", &self.dir, e).into()),
        };

        let mut summaries = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| io_error("Failed to list", &self.dir, e))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }

            let parsed = tokio::fs::read(&path)
                .await
                .ok()
                .and_then(|bytes| serde_json::from_slice::<GenerationSession>(&bytes).ok());
            let stem = path.file_stem().and_then(|stem| stem.to_str());
            match parsed {
                Some(session) if stem == Some(session.id().as_str()) => {
                    summaries.push(SessionSummary::from(&session))
                }
                Some(session) => {
                    warn!(path = %path.display(), stored = %session.id(), "Skipping session file with mismatched id")
                }
                None => warn!(path = %path.display(), "Skipping unreadable session file"),
            }
        }

        Ok(filter.apply(summaries))
    }

    #[instrument(skip(self))]
    async fn delete_session(&self, id: &str) -> CopyworxResult<()> {
        let path = self.path_for(id)?;
        tokio::fs::remove_file(&path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(id.to_string()))
            } else {
                io_error("Failed to delete", &path, e)
            }
        })?;
        debug!(path = %path.display(), "Session deleted");
        Ok(())
    }
}
