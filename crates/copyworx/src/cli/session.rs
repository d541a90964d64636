//! Session command handlers.

use crate::CopyworxConfig;
use copyworx_core::{FormInputs, GenerationSession, RedoPolicy, SectionStatus};
use copyworx_error::{CopyworxError, CopyworxErrorKind, StorageErrorKind};
use copyworx_interface::{GenerationDriver, SessionFilter, SessionRepository};
use copyworx_models::OpenAICompatibleClient;
use copyworx_sections::{
    PromptBuilder, SectionGenerator, SectionTable, assemble_session, prepare_section,
};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

fn is_not_found(err: &CopyworxError) -> bool {
    matches!(
        err.kind(),
        CopyworxErrorKind::Storage(e) if matches!(e.kind, StorageErrorKind::NotFound(_))
    )
}

/// Executes session commands against a repository.
pub struct SessionCommands<R: SessionRepository> {
    config: CopyworxConfig,
    repository: R,
    template_file: Option<PathBuf>,
}

impl<R: SessionRepository> SessionCommands<R> {
    /// Create a handler. `template_file` overrides the configured table file.
    pub fn new(config: CopyworxConfig, repository: R, template_file: Option<PathBuf>) -> Self {
        Self {
            config,
            repository,
            template_file,
        }
    }

    /// Get a reference to the session repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Resolve a section table by name, preferring an explicit table file.
    pub fn table(&self, name: Option<&str>) -> anyhow::Result<SectionTable> {
        let session = self.config.session();
        let table = match (&self.template_file, name) {
            (Some(path), _) => SectionTable::from_file(path)?,
            (None, Some(name)) if session.template_file().is_none() => {
                SectionTable::builtin(name)?
            }
            (None, _) => session.table()?,
        };
        Ok(table)
    }

    fn prompts(&self) -> PromptBuilder {
        match self.config.session().preamble() {
            Some(preamble) => PromptBuilder::default().with_preamble(preamble.clone()),
            None => PromptBuilder::default(),
        }
    }

    fn generator<D: GenerationDriver>(&self, driver: D) -> SectionGenerator<D> {
        SectionGenerator::new(driver)
            .with_prompt_builder(self.prompts())
            .with_max_tokens(*self.config.model().max_tokens())
            .with_temperature(*self.config.model().temperature())
    }

    fn client(&self) -> anyhow::Result<OpenAICompatibleClient> {
        let model = self.config.model();
        let client = OpenAICompatibleClient::new(
            model.api_key()?,
            model.model().clone(),
            model.base_url().clone(),
            "openai",
        )?
        .with_retry(model.retry().clone());
        Ok(client)
    }

    /// Print the sections of a table.
    pub fn sections(&self, template: Option<&str>) -> anyhow::Result<()> {
        let table = self.table(template)?;
        println!("{} - {}", table.name(), table.description());
        for (index, definition) in table.sections().iter().enumerate() {
            println!(
                "{:>2}  {:<12} {:<20} {}-{} words",
                index,
                definition.id().id(),
                definition.name(),
                definition.min_words(),
                definition.max_words()
            );
        }
        Ok(())
    }

    /// Start and save a new session. Returns its id.
    ///
    /// An existing session with the same id is never replaced.
    #[instrument(skip(self, form_inputs), fields(fields = form_inputs.len()))]
    pub async fn start(
        &self,
        id: Option<String>,
        template: Option<&str>,
        form_inputs: FormInputs,
    ) -> anyhow::Result<String> {
        let table = self.table(template)?;
        let id = id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        match self.repository.load_session(&id).await {
            Ok(_) => anyhow::bail!(
                "Session '{}' already exists; delete or reset it instead",
                id
            ),
            Err(e) if is_not_found(&e) => {}
            Err(e) => return Err(e.into()),
        }

        let session = GenerationSession::start(
            id.as_str(),
            table.name().as_str(),
            table.sections(),
            form_inputs,
        )?;
        self.repository.save_session(&session).await?;

        info!(session_id = %id, template = %table.name(), "Session started");
        println!("{}", id);
        Ok(id)
    }

    /// Generate the current section with the configured model.
    pub async fn generate(&self, id: &str, approve: bool) -> anyhow::Result<()> {
        let client = self.client()?;
        self.generate_with(id, approve, client).await
    }

    /// Generate the current section with the given driver and save the session.
    #[instrument(skip(self, driver))]
    pub async fn generate_with<D: GenerationDriver>(
        &self,
        id: &str,
        approve: bool,
        driver: D,
    ) -> anyhow::Result<()> {
        let mut session = self.repository.load_session(id).await?;
        let table = self.table(Some(session.template().as_str()))?;
        let generator = self.generator(driver);

        let generated = match generator.generate(&mut session, &table).await {
            Ok(generated) => generated,
            Err(e) if e.is_retryable() => {
                anyhow::bail!("{} (transient failure, run generate again)", e)
            }
            Err(e) => return Err(e.into()),
        };

        let index = *generated.index();
        if !generated.within_bounds() {
            let definition = &table.sections()[index];
            eprintln!(
                "note: {} words, expected {}-{}",
                generated.words(),
                definition.min_words(),
                definition.max_words()
            );
        }
        if approve {
            session.approve()?;
        }
        self.repository.save_session(&session).await?;

        println!("{}", session.results()[index].html_content());
        Ok(())
    }

    /// Print session progress, the next prompt, or the raw session.
    pub async fn show(&self, id: &str, prompt: bool, json: bool) -> anyhow::Result<()> {
        let session = self.repository.load_session(id).await?;

        if json {
            println!("{}", serde_json::to_string_pretty(&session)?);
            return Ok(());
        }

        let table = self.table(Some(session.template().as_str()))?;
        if prompt {
            let prepared = prepare_section(&self.prompts(), &session, &table)?;
            println!("{}", prepared.prompt());
            return Ok(());
        }

        let (approved, total) = session.progress();
        println!("Session {} ({})", session.id(), session.template());
        println!(
            "Progress: {}/{} approved, cursor {}",
            approved,
            total,
            session.cursor()
        );

        let target = session.current_target();
        for (index, (result, definition)) in
            session.results().iter().zip(table.sections()).enumerate()
        {
            let marker = if target == Some(index) { ">" } else { " " };
            println!(
                "{} {:>2}  {:<20} {}",
                marker,
                index,
                definition.name(),
                result.status()
            );
            if *result.status() != SectionStatus::Pending {
                for line in result.html_content().lines() {
                    println!("        {}", line);
                }
            }
        }
        Ok(())
    }

    /// Replace the content of a generated section.
    #[instrument(skip(self, html))]
    pub async fn edit(&self, id: &str, index: usize, html: String) -> anyhow::Result<()> {
        let mut session = self.repository.load_session(id).await?;
        session.edit(index, html)?;
        self.repository.save_session(&session).await?;
        Ok(())
    }

    /// Approve the current section.
    #[instrument(skip(self))]
    pub async fn approve(&self, id: &str) -> anyhow::Result<()> {
        let mut session = self.repository.load_session(id).await?;
        let index = session.approve()?;
        self.repository.save_session(&session).await?;

        if session.is_complete() {
            println!("Approved section {}. All sections approved.", index);
        } else {
            println!("Approved section {}.", index);
        }
        Ok(())
    }

    /// Reopen an approved section.
    #[instrument(skip(self))]
    pub async fn redo(
        &self,
        id: &str,
        index: usize,
        policy: Option<RedoPolicy>,
    ) -> anyhow::Result<()> {
        let policy = policy.unwrap_or(*self.config.session().redo_policy());
        let mut session = self.repository.load_session(id).await?;
        session.redo(index, policy)?;
        self.repository.save_session(&session).await?;
        Ok(())
    }

    /// Clear all results of a session.
    #[instrument(skip(self))]
    pub async fn reset(&self, id: &str) -> anyhow::Result<()> {
        let mut session = self.repository.load_session(id).await?;
        session.reset();
        self.repository.save_session(&session).await?;
        Ok(())
    }

    /// Assemble the document and write it to `output` or stdout.
    #[instrument(skip(self))]
    pub async fn assemble(&self, id: &str, output: Option<&Path>) -> anyhow::Result<String> {
        let session = self.repository.load_session(id).await?;
        let document = assemble_session(&session)?;

        match output {
            Some(path) => {
                std::fs::write(path, &document)
                    .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path.display(), e))?;
                info!(path = %path.display(), bytes = document.len(), "Document written");
            }
            None => println!("{}", document),
        }
        Ok(document)
    }

    /// Print stored sessions, most recently updated first.
    pub async fn list(
        &self,
        template: Option<String>,
        complete: Option<bool>,
        limit: Option<usize>,
    ) -> anyhow::Result<()> {
        let filter = SessionFilter {
            template,
            complete,
            limit,
            offset: None,
        };
        for summary in self.repository.list_sessions(&filter).await? {
            println!(
                "{:<38} {:<10} {}/{}  {}",
                summary.id(),
                summary.template(),
                summary.approved(),
                summary.total(),
                summary.updated_at().format("%Y-%m-%d %H:%M")
            );
        }
        Ok(())
    }

    /// Remove a stored session.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> anyhow::Result<()> {
        self.repository.delete_session(id).await?;
        Ok(())
    }
}
