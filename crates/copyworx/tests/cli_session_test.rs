use async_trait::async_trait;
use copyworx::cli::SessionCommands;
use copyworx::{
    CopyworxConfig, CopyworxResult, FormInputs, GenerateRequest, GenerateResponse,
    GenerationDriver, InMemorySessionRepository, RedoPolicy, SECTION_SEPARATOR,
    SessionRepository, SectionStatus,
};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Answers every request with a numbered paragraph.
#[derive(Default)]
struct CountingDriver {
    calls: AtomicUsize,
}

#[async_trait]
impl GenerationDriver for CountingDriver {
    async fn generate(&self, _req: &GenerateRequest) -> CopyworxResult<GenerateResponse> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(GenerateResponse::text(format!("<p>section {}</p>", call)))
    }

    fn provider_name(&self) -> &'static str {
        "counting"
    }

    fn model_name(&self) -> &str {
        "counting-v1"
    }
}

fn commands() -> SessionCommands<InMemorySessionRepository> {
    SessionCommands::new(
        CopyworxConfig::default(),
        InMemorySessionRepository::new(),
        None,
    )
}

fn inputs() -> FormInputs {
    FormInputs::new()
        .with("goal", "launch")
        .with("audience", "IT directors")
        .with("tone", "professional")
}

#[tokio::test]
async fn test_brochure_flow_through_commands() {
    let commands = commands();
    let id = commands
        .start(Some("spring".to_string()), None, inputs())
        .await
        .unwrap();
    assert_eq!(id, "spring");

    for _ in 0..6 {
        commands
            .generate_with(&id, true, CountingDriver::default())
            .await
            .unwrap();
    }

    let session = commands.repository().load_session(&id).await.unwrap();
    assert!(session.is_complete());
    assert_eq!(*session.cursor(), 6);

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("brochure.html");
    let document = commands.assemble(&id, Some(&output)).await.unwrap();

    assert_eq!(document.matches(SECTION_SEPARATOR).count(), 5);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), document);
}

#[tokio::test]
async fn test_edit_approve_redo_through_commands() {
    let commands = commands();
    let id = commands
        .start(Some("edit-flow".to_string()), None, inputs())
        .await
        .unwrap();

    commands
        .generate_with(&id, false, CountingDriver::default())
        .await
        .unwrap();
    commands
        .edit(&id, 0, "<h1>Hand written</h1>".to_string())
        .await
        .unwrap();
    commands.approve(&id).await.unwrap();

    let session = commands.repository().load_session(&id).await.unwrap();
    assert_eq!(session.results()[0].html_content(), "<h1>Hand written</h1>");
    assert_eq!(*session.cursor(), 1);

    // Configured default policy keeps the cursor.
    commands.redo(&id, 0, None).await.unwrap();
    let session = commands.repository().load_session(&id).await.unwrap();
    assert_eq!(*session.results()[0].status(), SectionStatus::Pending);
    assert_eq!(*session.cursor(), 1);
    assert_eq!(session.current_target(), Some(0));

    commands
        .generate_with(&id, true, CountingDriver::default())
        .await
        .unwrap();
    commands
        .redo(&id, 0, Some(RedoPolicy::Rewind))
        .await
        .unwrap();
    let session = commands.repository().load_session(&id).await.unwrap();
    assert_eq!(*session.cursor(), 0);
}

#[tokio::test]
async fn test_assemble_incomplete_session_fails() {
    let commands = commands();
    let id = commands
        .start(Some("partial".to_string()), None, inputs())
        .await
        .unwrap();
    commands
        .generate_with(&id, true, CountingDriver::default())
        .await
        .unwrap();

    assert!(commands.assemble(&id, None).await.is_err());
}

#[tokio::test]
async fn test_start_rejects_empty_inputs_and_unknown_template() {
    let commands = commands();
    assert!(commands.start(None, None, FormInputs::new()).await.is_err());
    assert!(
        commands
            .start(None, Some("newsletter"), inputs())
            .await
            .is_err()
    );
    assert!(commands.repository().is_empty().await);
}

#[tokio::test]
async fn test_reset_and_delete() {
    let commands = commands();
    let id = commands.start(None, None, inputs()).await.unwrap();
    commands
        .generate_with(&id, true, CountingDriver::default())
        .await
        .unwrap();

    commands.reset(&id).await.unwrap();
    let session = commands.repository().load_session(&id).await.unwrap();
    assert_eq!(*session.cursor(), 0);
    assert_eq!(session.progress(), (0, 6));

    commands.delete(&id).await.unwrap();
    assert!(commands.repository().load_session(&id).await.is_err());
}

#[tokio::test]
async fn test_custom_table_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flyer.toml");
    std::fs::write(
        &path,
        r#"
[template]
name = "flyer"

[[sections]]
id = "headline"
name = "Headline"
instructions = "One punchy line."
min_words = 3
max_words = 12

[[sections]]
id = "cta"
name = "Call to Action"
min_words = 5
max_words = 20
"#,
    )
    .unwrap();

    let commands = SessionCommands::new(
        CopyworxConfig::default(),
        InMemorySessionRepository::new(),
        Some(path),
    );
    let id = commands.start(None, None, inputs()).await.unwrap();
    commands
        .generate_with(&id, true, CountingDriver::default())
        .await
        .unwrap();
    commands
        .generate_with(&id, true, CountingDriver::default())
        .await
        .unwrap();

    let document = commands.assemble(&id, None).await.unwrap();
    assert_eq!(
        document,
        format!("<p>section 1</p>{}<p>section 1</p>", SECTION_SEPARATOR)
    );
}

#[tokio::test]
async fn test_configured_table_file_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let table = dir.path().join("flyer.toml");
    std::fs::write(
        &table,
        r#"
[template]
name = "flyer"

[[sections]]
id = "headline"
name = "Headline"
min_words = 3
max_words = 12
"#,
    )
    .unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!("[session]\ntemplate_file = '{}'\n", table.display()),
    )
    .unwrap();

    let config = CopyworxConfig::load(Some(&config_path)).unwrap();
    let commands = SessionCommands::new(config, InMemorySessionRepository::new(), None);
    assert_eq!(commands.table(Some("brochure")).unwrap().name(), "flyer");

    let id = commands.start(None, None, inputs()).await.unwrap();
    let session = commands.repository().load_session(&id).await.unwrap();
    assert_eq!(session.template(), "flyer");
    assert_eq!(session.len(), 1);
}

#[tokio::test]
async fn test_start_refuses_to_replace_existing_session() {
    let commands = commands();
    let id = commands
        .start(Some("spring".to_string()), None, inputs())
        .await
        .unwrap();
    commands
        .generate_with(&id, true, CountingDriver::default())
        .await
        .unwrap();

    let err = commands
        .start(Some("spring".to_string()), None, inputs())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("already exists"), "{}", err);

    let session = commands.repository().load_session(&id).await.unwrap();
    assert_eq!(session.progress(), (1, 6));
    assert_eq!(*session.cursor(), 1);
}

#[tokio::test]
async fn test_run_dispatches_start_and_assemble() {
    use clap::Parser;
    use copyworx::cli::{Cli, run};

    let dir = tempfile::tempdir().unwrap();
    let sessions = dir.path().join("sessions");
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!("[storage]\nsession_dir = '{}'\n", sessions.display()),
    )
    .unwrap();
    let config = || CopyworxConfig::load(Some(&config_path)).unwrap();

    let start = Cli::parse_from(["copyworx", "start", "-i", "goal=launch", "--id", "fall"]);
    run(start, config()).await.unwrap();
    assert!(sessions.join("fall.json").exists());

    let again = Cli::parse_from(["copyworx", "start", "-i", "goal=launch", "--id", "fall"]);
    assert!(run(again, config()).await.is_err());

    let assemble = Cli::parse_from(["copyworx", "assemble", "fall"]);
    assert!(run(assemble, config()).await.is_err());
}
