//! CopyWorx: section-by-section AI copywriting.
//!
//! A document (for example a product brochure) is generated one section at a
//! time. Every section's prompt carries the approved text of the sections
//! before it, and the session state is persisted after every step so work
//! can resume where it stopped.
//!
//! # Example
//!
//! ```no_run
//! use copyworx::{
//!     FormInputs, GenerationSession, OpenAICompatibleClient, SectionGenerator, SectionTable,
//!     assemble_session,
//! };
//!
//! # async fn run() -> copyworx::CopyworxResult<()> {
//! let table = SectionTable::brochure();
//! let inputs = FormInputs::new()
//!     .with("goal", "launch")
//!     .with("audience", "IT directors")
//!     .with("tone", "professional");
//! let mut session = GenerationSession::start("spring-launch", "brochure", table.sections(), inputs)?;
//!
//! let client = OpenAICompatibleClient::new(
//!     std::env::var("OPENAI_API_KEY").ok(),
//!     "gpt-4o-mini".to_string(),
//!     "https://api.openai.com/v1/chat/completions".to_string(),
//!     "openai",
//! )?;
//! let generator = SectionGenerator::new(client);
//!
//! while session.current_target().is_some() {
//!     generator.generate(&mut session, &table).await?;
//!     session.approve()?;
//! }
//!
//! let document = assemble_session(&session)?;
//! println!("{}", document);
//! # Ok(())
//! # }
//! ```

pub mod cli;
mod settings;

pub use settings::{CopyworxConfig, ModelConfig, SessionConfig, StorageConfig};

pub use copyworx_core::{
    FormInputs, GenerateRequest, GenerateResponse, GenerationSession, LogFormat, Message,
    RedoPolicy, Role, SectionDefinition, SectionKind, SectionResult, SectionStatus, init_tracing,
};
pub use copyworx_error::{
    ConfigError, CopyworxError, CopyworxErrorKind, CopyworxResult, GenerationError,
    GenerationErrorKind, SessionError, SessionErrorKind, StorageError, StorageErrorKind,
    TemplateError, TemplateErrorKind,
};
pub use copyworx_interface::{
    GenerationDriver, SessionFilter, SessionRepository, SessionSummary,
};
pub use copyworx_models::{OpenAICompatibleClient, RetryConfig};
pub use copyworx_sections::{
    BROCHURE_TEMPLATE, FileSessionRepository, GeneratedSection, InMemorySessionRepository,
    PreparedSection, PromptBuilder, SECTION_SEPARATOR, SectionGenerator, SectionTable, assemble,
    assemble_session, word_count,
};
