//! Layered configuration for the CopyWorx front end.
//!
//! Values come from (lowest to highest precedence) built-in defaults, a TOML
//! file, and `COPYWORX__<TABLE>__<KEY>` environment variables, e.g.
//! `COPYWORX__MODEL__MODEL=gpt-4o` or `COPYWORX__SESSION__REDO_POLICY=rewind`.
//!
//! ```toml
//! [model]
//! base_url = "http://localhost:11434/v1/chat/completions"
//! model = "llama3.2"
//! api_key_env = ""
//! max_tokens = 1024
//!
//! [model.retry]
//! max_attempts = 5
//! initial_backoff = 1000
//!
//! [storage]
//! session_dir = "./sessions"
//!
//! [session]
//! redo_policy = "rewind"
//! ```

use copyworx_core::RedoPolicy;
use copyworx_error::{ConfigError, GenerationError, GenerationErrorKind};
use copyworx_models::RetryConfig;
use copyworx_sections::{BROCHURE_TEMPLATE, SectionTable};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "COPYWORX";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct CopyworxConfig {
    /// Language model endpoint
    model: ModelConfig,
    /// Session persistence
    storage: StorageConfig,
    /// Session workflow defaults
    session: SessionConfig,
}

/// Language model endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct ModelConfig {
    /// Chat completions endpoint URL
    base_url: String,
    /// Model identifier
    model: String,
    /// Environment variable holding the API key; empty for endpoints without auth
    api_key_env: String,
    /// Token cap per section
    max_tokens: Option<u32>,
    /// Sampling temperature
    temperature: Option<f32>,
    /// Backoff for transient HTTP failures
    retry: RetryConfig,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            max_tokens: Some(1024),
            temperature: Some(0.7),
            retry: RetryConfig::default(),
        }
    }
}

impl ModelConfig {
    /// Read the API key from the configured environment variable.
    ///
    /// Returns `Ok(None)` when no variable is configured.
    ///
    /// # Errors
    ///
    /// Fails with `MissingApiKey` when the variable is configured but unset.
    pub fn api_key(&self) -> Result<Option<String>, GenerationError> {
        if self.api_key_env.is_empty() {
            return Ok(None);
        }
        std::env::var(&self.api_key_env)
            .map(Some)
            .map_err(|_| GenerationError::new(GenerationErrorKind::MissingApiKey(self.api_key_env.clone())))
    }
}

/// Session persistence settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    session_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Directory holding session files.
    ///
    /// Defaults to `<data dir>/copyworx/sessions`, or `./copyworx/sessions`
    /// on platforms without a data directory.
    pub fn session_dir(&self) -> PathBuf {
        self.session_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("copyworx")
                .join("sessions")
        })
    }
}

/// Session workflow defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct SessionConfig {
    /// Built-in section table for new sessions
    template: String,
    /// Section table file; overrides `template` when set
    template_file: Option<PathBuf>,
    /// What redo does to the cursor
    redo_policy: RedoPolicy,
    /// Replacement for the default prompt preamble
    preamble: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            template: BROCHURE_TEMPLATE.to_string(),
            template_file: None,
            redo_policy: RedoPolicy::default(),
            preamble: None,
        }
    }
}

impl SessionConfig {
    /// Resolve the section table for new sessions.
    ///
    /// # Errors
    ///
    /// Fails when the table file is unreadable or invalid, or the built-in
    /// name is unknown.
    pub fn table(&self) -> Result<SectionTable, copyworx_error::TemplateError> {
        match &self.template_file {
            Some(path) => SectionTable::from_file(path),
            None => SectionTable::builtin(&self.template),
        }
    }
}

impl CopyworxConfig {
    /// Default config file location: `<config dir>/copyworx/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("copyworx").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one the default location is
    /// read if present. Environment overrides are always applied last.
    ///
    /// # Errors
    ///
    /// Fails when the file is missing (explicit path only), malformed, or a
    /// value has the wrong type.
    #[tracing::instrument(skip_all, fields(path = ?path))]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        match path {
            Some(path) => {
                builder = builder.add_source(config::File::from(path).required(true));
            }
            None => {
                if let Some(default) = Self::default_path() {
                    builder = builder.add_source(config::File::from(default).required(false));
                }
            }
        }

        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to load configuration: {}", e)))?;

        let config: Self = settings
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Invalid configuration: {}", e)))?;

        tracing::debug!(
            model = %config.model.model,
            session_dir = %config.storage.session_dir().display(),
            redo_policy = %config.session.redo_policy,
            "Configuration loaded"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn defaults() {
        let config = CopyworxConfig::default();
        assert_eq!(config.model().model(), "gpt-4o-mini");
        assert_eq!(*config.model().max_tokens(), Some(1024));
        assert_eq!(*config.session().redo_policy(), RedoPolicy::KeepCursor);
        assert_eq!(config.session().template(), BROCHURE_TEMPLATE);
        assert!(config.storage().session_dir().ends_with("copyworx/sessions"));
    }

    #[test]
    fn loads_file_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("copyworx.toml");
        std::fs::write(
            &path,
            r#"
[model]
model = "llama3.2"
api_key_env = ""

[model.retry]
max_attempts = 5
initial_backoff = 1000

[storage]
session_dir = "/tmp/copyworx-sessions"

[session]
redo_policy = "rewind"
"#,
        )
        .unwrap();

        let config = CopyworxConfig::load(Some(&path)).unwrap();
        assert_eq!(config.model().model(), "llama3.2");
        assert_eq!(
            config.model().base_url(),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(config.model().retry().max_attempts, 5);
        assert_eq!(
            config.model().retry().initial_backoff,
            Duration::from_millis(1000)
        );
        assert_eq!(config.model().api_key().unwrap(), None);
        assert_eq!(
            config.storage().session_dir(),
            PathBuf::from("/tmp/copyworx-sessions")
        );
        assert_eq!(*config.session().redo_policy(), RedoPolicy::Rewind);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CopyworxConfig::load(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(err.message.contains("Failed to load"));
    }

    #[test]
    fn invalid_redo_policy_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("copyworx.toml");
        std::fs::write(&path, "[session]\nredo_policy = \"sideways\"\n").unwrap();

        let err = CopyworxConfig::load(Some(&path)).unwrap_err();
        assert!(err.message.contains("Invalid configuration"));
    }

    #[test]
    fn missing_api_key_variable() {
        let config: ModelConfig =
            toml::from_str("api_key_env = \"COPYWORX_TEST_KEY_THAT_IS_NEVER_SET\"").unwrap();
        let err = config.api_key().unwrap_err();
        assert!(matches!(err.kind, GenerationErrorKind::MissingApiKey(_)));
    }

    #[test]
    fn resolves_builtin_table() {
        let table = SessionConfig::default().table().unwrap();
        assert_eq!(table.name(), BROCHURE_TEMPLATE);
        assert_eq!(table.len(), 6);
    }
}
