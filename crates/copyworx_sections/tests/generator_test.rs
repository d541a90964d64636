mod test_utils;

use copyworx_core::{FormInputs, GenerationSession, RedoPolicy, SectionStatus};
use copyworx_error::{CopyworxErrorKind, GenerationErrorKind, SessionErrorKind};
use copyworx_sections::{SECTION_SEPARATOR, SectionGenerator, SectionTable, assemble_session};
use test_utils::{MockDriver, Reply, inputs, three_section_table};

fn start(table: &SectionTable) -> GenerationSession {
    GenerationSession::start("session-1", table.name().as_str(), table.sections(), inputs())
        .expect("Failed to start session")
}

#[tokio::test]
async fn test_generate_approve_redo_scenario() {
    let table = three_section_table();
    let mut session = start(&table);
    let generator = SectionGenerator::new(MockDriver::new());

    let generated = generator.generate(&mut session, &table).await.unwrap();
    assert_eq!(*generated.index(), 0);
    assert_eq!(*session.results()[0].status(), SectionStatus::Generated);
    assert_eq!(session.results()[0].html_content(), "<p>generated 1</p>");
    assert_eq!(*session.cursor(), 0);

    session.approve().unwrap();
    assert_eq!(*session.cursor(), 1);
    assert_eq!(*session.results()[0].status(), SectionStatus::Approved);

    session.redo(0, RedoPolicy::KeepCursor).unwrap();
    assert_eq!(*session.results()[0].status(), SectionStatus::Pending);
    assert_eq!(*session.cursor(), 1);
}

#[tokio::test]
async fn test_redo_rewind_scenario() {
    let table = three_section_table();
    let mut session = start(&table);
    let generator = SectionGenerator::new(MockDriver::new());

    generator.generate(&mut session, &table).await.unwrap();
    session.approve().unwrap();

    session.redo(0, RedoPolicy::Rewind).unwrap();
    assert_eq!(*session.results()[0].status(), SectionStatus::Pending);
    assert_eq!(*session.cursor(), 0);
}

#[tokio::test]
async fn test_later_prompts_include_approved_sections() {
    let table = three_section_table();
    let mut session = start(&table);
    let driver = MockDriver::with_replies(vec![
        Reply::Text("<h1>Hero copy</h1>".to_string()),
        Reply::Text("<ul><li>Benefit</li></ul>".to_string()),
    ]);
    let generator = SectionGenerator::new(driver);

    generator.generate(&mut session, &table).await.unwrap();
    session.approve().unwrap();
    generator.generate(&mut session, &table).await.unwrap();

    let prompts = generator.driver().prompts();
    assert_eq!(prompts.len(), 2);
    assert!(!prompts[0].contains("<h1>Hero copy</h1>"));
    assert!(prompts[1].contains("<h1>Hero copy</h1>"));
    assert!(prompts[1].contains("List benefits."));
}

#[tokio::test]
async fn test_unapproved_content_is_not_used_as_context() {
    let table = three_section_table();
    let mut session = start(&table);
    let generator = SectionGenerator::new(MockDriver::new());

    generator.generate(&mut session, &table).await.unwrap();
    session.approve().unwrap();
    session.redo(0, RedoPolicy::KeepCursor).unwrap();

    // Target is the reopened section; its stale draft must not feed its own prompt.
    let prepared = generator.prepare(&session, &table).unwrap();
    assert_eq!(*prepared.index(), 0);
    assert!(!prepared.prompt().contains("<p>generated 1</p>"));
}

#[tokio::test]
async fn test_failed_call_leaves_session_unchanged() {
    let table = three_section_table();
    let mut session = start(&table);
    let generator = SectionGenerator::new(MockDriver::with_replies(vec![Reply::Fail(
        GenerationErrorKind::Api {
            status: 503,
            message: "overloaded".to_string(),
        },
    )]));

    let before = session.clone();
    let err = generator.generate(&mut session, &table).await.unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(session, before);

    // Manual re-invoke succeeds.
    generator.generate(&mut session, &table).await.unwrap();
    assert_eq!(*session.results()[0].status(), SectionStatus::Generated);
    assert_eq!(generator.driver().calls(), 2);
}

#[tokio::test]
async fn test_missing_form_inputs_rejected_before_model_call() {
    let table = three_section_table();
    let mut value = serde_json::to_value(start(&table)).unwrap();
    value["form_inputs"] = serde_json::json!({});
    let mut session: GenerationSession = serde_json::from_value(value).unwrap();
    assert_eq!(*session.form_inputs(), FormInputs::new());

    let generator = SectionGenerator::new(MockDriver::new());
    let err = generator.generate(&mut session, &table).await.unwrap_err();

    match err.kind() {
        CopyworxErrorKind::Session(e) => assert_eq!(e.kind, SessionErrorKind::MissingFormInputs),
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(generator.driver().calls(), 0);
}

#[tokio::test]
async fn test_empty_model_output_is_an_error() {
    let table = three_section_table();
    let mut session = start(&table);
    let generator =
        SectionGenerator::new(MockDriver::with_replies(vec![Reply::Text("   ".to_string())]));

    let err = generator.generate(&mut session, &table).await.unwrap_err();
    match err.kind() {
        CopyworxErrorKind::Generation(e) => {
            assert_eq!(e.kind, GenerationErrorKind::EmptyResponse)
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(!err.is_retryable());
    assert_eq!(*session.results()[0].status(), SectionStatus::Pending);
}

#[tokio::test]
async fn test_table_mismatch_is_rejected() {
    let table = three_section_table();
    let mut session = start(&table);
    let generator = SectionGenerator::new(MockDriver::new());

    let err = generator
        .generate(&mut session, &SectionTable::brochure())
        .await
        .unwrap_err();
    assert!(matches!(
        err.kind(),
        CopyworxErrorKind::Session(e) if matches!(e.kind, SessionErrorKind::TemplateMismatch { .. })
    ));
    assert_eq!(generator.driver().calls(), 0);
}

#[tokio::test]
async fn test_full_run_assembles_document() {
    let table = three_section_table();
    let mut session = start(&table);
    let generator = SectionGenerator::new(MockDriver::new());

    while session.current_target().is_some() {
        generator.generate(&mut session, &table).await.unwrap();
        session.approve().unwrap();
    }

    assert!(session.is_complete());
    let document = assemble_session(&session).unwrap();
    assert_eq!(
        document,
        format!(
            "<p>generated 1</p>{sep}<p>generated 2</p>{sep}<p>generated 3</p>",
            sep = SECTION_SEPARATOR
        )
    );

    let err = generator.generate(&mut session, &table).await.unwrap_err();
    assert!(matches!(
        err.kind(),
        CopyworxErrorKind::Session(e) if e.kind == SessionErrorKind::SessionComplete
    ));
}

#[tokio::test]
async fn test_assembly_rejected_until_all_approved() {
    let table = three_section_table();
    let mut session = start(&table);
    let generator = SectionGenerator::new(MockDriver::new());

    generator.generate(&mut session, &table).await.unwrap();
    session.approve().unwrap();
    generator.generate(&mut session, &table).await.unwrap();

    let err = assemble_session(&session).unwrap_err();
    assert_eq!(err.kind, SessionErrorKind::NotApproved("solutions".to_string()));
}

#[tokio::test]
async fn test_regenerate_replaces_content_in_place() {
    let table = three_section_table();
    let mut session = start(&table);
    let generator = SectionGenerator::new(MockDriver::with_replies(vec![
        Reply::Text("<p>first</p>".to_string()),
        Reply::Text("<p>second</p>".to_string()),
    ]));

    generator.generate(&mut session, &table).await.unwrap();
    generator.generate(&mut session, &table).await.unwrap();

    assert_eq!(session.results()[0].html_content(), "<p>second</p>");
    assert_eq!(*session.results()[0].status(), SectionStatus::Generated);
    assert_eq!(*session.cursor(), 0);
}

#[tokio::test]
async fn test_word_bounds_reported() {
    let table = three_section_table();
    let mut session = start(&table);
    let long = format!("<p>{}</p>", vec!["word"; 60].join(" "));
    let generator = SectionGenerator::new(MockDriver::with_replies(vec![Reply::Text(long)]));

    let generated = generator.generate(&mut session, &table).await.unwrap();
    assert_eq!(*generated.words(), 60);
    assert!(!generated.within_bounds());
    // Content is recorded verbatim regardless of length.
    assert_eq!(*session.results()[0].status(), SectionStatus::Generated);
}
