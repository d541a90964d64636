use copyworx_core::{FormInputs, SectionDefinition, SectionKind, SectionResult};
use copyworx_sections::{GENERIC_SECTION_PURPOSE, PromptBuilder, SectionTable, section_purpose};

fn inputs() -> FormInputs {
    FormInputs::new()
        .with("goal", "launch")
        .with("tone", "professional")
}

fn approved(kind: SectionKind, html: &str) -> SectionResult {
    let mut result = SectionResult::pending(kind);
    result.mark_generated(html).unwrap();
    result.approve().unwrap();
    result
}

#[test]
fn test_cta_prompt_from_brochure_table() {
    let table = SectionTable::brochure();
    let (_, cta) = table.find("cta").expect("brochure has a cta section");

    let prompt = PromptBuilder::default().build(&inputs(), cta, &[]);

    assert!(prompt.contains(section_purpose(&SectionKind::Cta)));
    assert!(prompt.contains("75-125 words"));
    assert!(prompt.contains(cta.instructions().as_str()));
    assert!(prompt.contains("- goal: launch"));
    assert!(prompt.contains("- tone: professional"));
}

#[test]
fn test_every_brochure_prompt_carries_its_instructions() {
    let table = SectionTable::brochure();
    for definition in table.sections() {
        let prompt = PromptBuilder::default().build(&inputs(), definition, &[]);
        assert!(!prompt.is_empty());
        assert!(
            prompt.contains(definition.instructions().as_str()),
            "{}",
            definition.id()
        );
    }
}

#[test]
fn test_unknown_section_uses_generic_purpose() {
    let definition = SectionDefinition::new(
        SectionKind::from_id("unknown-xyz"),
        "Mystery",
        "Describe the mystery.",
        20,
        40,
    );

    let prompt = PromptBuilder::default().build(&inputs(), &definition, &[]);

    assert!(prompt.contains(GENERIC_SECTION_PURPOSE));
    assert!(prompt.contains("Describe the mystery."));
    assert!(prompt.contains("unknown-xyz"));
    assert!(prompt.contains("20-40 words"));
}

#[test]
fn test_prompt_is_deterministic() {
    let table = SectionTable::brochure();
    let solutions = table.get(2).unwrap();
    let hero = approved(SectionKind::Hero, "<h1>Ship faster</h1>");
    let cover = approved(SectionKind::Cover, "<h1>Acme</h1>");
    let prior = vec![&cover, &hero];

    let builder = PromptBuilder::default();
    let first = builder.build(&inputs(), solutions, &prior);
    let second = builder.build(&inputs(), solutions, &prior);
    assert_eq!(first, second);

    // Insertion order of form inputs does not matter.
    let reordered = FormInputs::new()
        .with("tone", "professional")
        .with("goal", "launch");
    assert_eq!(first, builder.build(&reordered, solutions, &prior));
}

#[test]
fn test_prior_sections_appear_in_order_before_current() {
    let table = SectionTable::brochure();
    let solutions = table.get(2).unwrap();
    let cover = approved(SectionKind::Cover, "<h1>Acme</h1>");
    let hero = approved(SectionKind::Hero, "<h1>Ship faster</h1>");

    let prompt = PromptBuilder::default().build(&inputs(), solutions, &[&cover, &hero]);

    let cover_at = prompt.find("<h1>Acme</h1>").unwrap();
    let hero_at = prompt.find("<h1>Ship faster</h1>").unwrap();
    let current_at = prompt.find("CURRENT SECTION: Solutions").unwrap();
    assert!(cover_at < hero_at);
    assert!(hero_at < current_at);
    assert!(prompt.contains("--- cover ---"));
    assert!(prompt.contains("--- hero ---"));
}
