//! Section generation driver.
//!
//! Generates the section at the session's current target by building its
//! prompt and calling the model exactly once. Sections are strictly
//! sequential because each prompt includes the approved text before it.

use crate::{PromptBuilder, SectionTable, word_count};
use copyworx_core::{GenerateRequest, GenerationSession, Message, Role, SectionDefinition};
use copyworx_error::{
    CopyworxResult, GenerationError, GenerationErrorKind, SessionError, SessionErrorKind,
};
use copyworx_interface::GenerationDriver;
use tracing::{debug, info, instrument, warn};

/// Prompt and position of the section about to be generated.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct PreparedSection {
    /// Index of the section in the session
    index: usize,
    /// Definition of the section
    definition: SectionDefinition,
    /// Prompt that will be sent to the model
    prompt: String,
}

/// Outcome of a successful generation step.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct GeneratedSection {
    /// Index of the section in the session
    index: usize,
    /// Word count of the generated markup
    words: usize,
    /// Whether the word count falls within the section bounds
    within_bounds: bool,
}

/// Drives section generation against a model.
///
/// The generator does not retry; a failed call leaves the session untouched
/// and the caller may invoke [`generate`](SectionGenerator::generate) again.
#[derive(Debug, Clone)]
pub struct SectionGenerator<D: GenerationDriver> {
    driver: D,
    prompts: PromptBuilder,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl<D: GenerationDriver> SectionGenerator<D> {
    /// Create a generator with the given model driver and default prompts.
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            prompts: PromptBuilder::default(),
            max_tokens: None,
            temperature: None,
        }
    }

    /// Replace the prompt builder.
    pub fn with_prompt_builder(mut self, prompts: PromptBuilder) -> Self {
        self.prompts = prompts;
        self
    }

    /// Cap generated tokens per section.
    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Get a reference to the underlying model driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Build the prompt for the current target without calling the model.
    ///
    /// # Errors
    ///
    /// See [`prepare_section`].
    pub fn prepare(
        &self,
        session: &GenerationSession,
        table: &SectionTable,
    ) -> Result<PreparedSection, SessionError> {
        prepare_section(&self.prompts, session, table)
    }

    /// Generate the current target section and record it as `generated`.
    ///
    /// # Errors
    ///
    /// Precondition failures (see [`prepare`](Self::prepare)) are returned
    /// before any model call. Model failures are returned as generation
    /// errors; check [`CopyworxError::is_retryable`](copyworx_error::CopyworxError::is_retryable)
    /// before re-invoking.
    #[instrument(
        skip(self, session, table),
        fields(
            session_id = %session.id(),
            provider = self.driver.provider_name(),
            model = self.driver.model_name(),
        )
    )]
    pub async fn generate(
        &self,
        session: &mut GenerationSession,
        table: &SectionTable,
    ) -> CopyworxResult<GeneratedSection> {
        let prepared = self.prepare(session, table)?;
        let index = prepared.index;
        let definition = &prepared.definition;
        info!(section = %definition.id(), index, "Generating section");

        let request = GenerateRequest::builder()
            .messages(vec![Message::new(Role::User, prepared.prompt.as_str())])
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
            .build()
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::InvalidRequest(e.to_string()))
            })?;

        let response = self.driver.generate(&request).await.inspect_err(|e| {
            warn!(section = %definition.id(), error = %e, retryable = e.is_retryable(), "Section generation failed");
        })?;

        let html = response
            .joined_text()
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::EmptyResponse))?;

        let words = word_count(&html);
        let within_bounds =
            (*definition.min_words() as usize..=*definition.max_words() as usize).contains(&words);
        if !within_bounds {
            warn!(
                section = %definition.id(),
                words,
                min = definition.min_words(),
                max = definition.max_words(),
                "Generated content outside word bounds"
            );
        }
        if let Some(usage) = response.usage() {
            debug!(total_tokens = usage.total_tokens(), "Token usage");
        }

        session.record(index, html)?;
        info!(section = %definition.id(), index, words, "Section generated");

        Ok(GeneratedSection {
            index,
            words,
            within_bounds,
        })
    }
}

/// Select the current target of `session` and build its prompt.
///
/// # Errors
///
/// Fails when the session is complete, its form inputs are missing or
/// invalid, or it was not started from `table`.
pub fn prepare_section(
    prompts: &PromptBuilder,
    session: &GenerationSession,
    table: &SectionTable,
) -> Result<PreparedSection, SessionError> {
    check_table(session, table)?;
    session.form_inputs().validate()?;

    let index = session
        .current_target()
        .ok_or_else(|| SessionError::new(SessionErrorKind::SessionComplete))?;
    let definition = table.get(index).cloned().ok_or_else(|| {
        SessionError::new(SessionErrorKind::SectionOutOfRange {
            index,
            len: table.len(),
        })
    })?;

    let prior = session.approved_before(index);
    let prompt = prompts.build(session.form_inputs(), &definition, &prior);

    Ok(PreparedSection {
        index,
        definition,
        prompt,
    })
}

/// Verify the session lines up with the table it is generated against.
fn check_table(session: &GenerationSession, table: &SectionTable) -> Result<(), SessionError> {
    let mismatch = || {
        SessionError::new(SessionErrorKind::TemplateMismatch {
            session: session.template().clone(),
            table: table.name().clone(),
        })
    };

    if session.template() != table.name() || session.len() != table.len() {
        return Err(mismatch());
    }

    let aligned = session
        .results()
        .iter()
        .zip(table.sections())
        .all(|(result, definition)| result.section_id() == definition.id());
    if aligned { Ok(()) } else { Err(mismatch()) }
}
