//! Per-section prompt construction.
//!
//! Prompts are pure functions of the form inputs, the target section
//! definition, and the approved content of earlier sections. Identical
//! inputs always produce byte-identical prompts.

use copyworx_core::{FormInputs, SectionDefinition, SectionKind, SectionResult};
use std::fmt::Write;

/// Default role preamble placed at the top of every prompt.
pub const DEFAULT_PREAMBLE: &str = "You are an expert marketing copywriter creating a multi-section brochure. \
Write persuasive, concrete copy that matches the requested tone and speaks directly to the target audience.";

/// Purpose used for section ids without built-in guidance.
pub const GENERIC_SECTION_PURPOSE: &str = "Write compelling content for this section that supports the \
overall goal of the document and flows naturally from the sections before it.";

/// Closing instruction that keeps model output limited to section markup.
pub const OUTPUT_INSTRUCTION: &str = "Return only the HTML markup for this section. \
Do not include commentary, explanations, or markdown code fences.";

/// Built-in purpose statement for a section kind.
///
/// Custom sections fall back to [`GENERIC_SECTION_PURPOSE`].
pub fn section_purpose(kind: &SectionKind) -> &'static str {
    match kind {
        SectionKind::Cover => {
            "Create the brochure cover: a memorable title and subtitle that make the reader open it."
        }
        SectionKind::Hero => {
            "Hook the reader: state the problem they face and the transformation the offering delivers."
        }
        SectionKind::Solutions => {
            "Explain how the offering solves the problem, translating features into concrete benefits."
        }
        SectionKind::CaseStudy => {
            "Build credibility with proof: a real-world customer story with specific, measurable results."
        }
        SectionKind::Cta => {
            "Convert interest into action: tell the reader exactly what to do next and why to do it now."
        }
        SectionKind::Other => {
            "Answer the remaining questions and objections a reader has before committing."
        }
        SectionKind::Custom(_) => GENERIC_SECTION_PURPOSE,
    }
}

/// Composes section prompts.
///
/// # Examples
///
/// ```
/// use copyworx_core::{FormInputs, SectionDefinition, SectionKind};
/// use copyworx_sections::PromptBuilder;
///
/// let inputs = FormInputs::new().with("goal", "launch").with("tone", "professional");
/// let cta = SectionDefinition::new(SectionKind::Cta, "Call to Action", "Ask for a demo.", 75, 125);
///
/// let prompt = PromptBuilder::default().build(&inputs, &cta, &[]);
/// assert!(prompt.contains("Ask for a demo."));
/// assert!(prompt.contains("75-125 words"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptBuilder {
    preamble: String,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self {
            preamble: DEFAULT_PREAMBLE.to_string(),
        }
    }
}

impl PromptBuilder {
    /// Replaces the role preamble.
    pub fn with_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = preamble.into();
        self
    }

    /// The role preamble in use.
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Build the prompt for one section.
    ///
    /// `prior` holds the approved results of earlier sections, in order; they
    /// are included so the model keeps the narrative consistent.
    pub fn build(
        &self,
        inputs: &FormInputs,
        definition: &SectionDefinition,
        prior: &[&SectionResult],
    ) -> String {
        let mut prompt = String::with_capacity(2048);

        prompt.push_str(&self.preamble);
        prompt.push_str("\n\n");

        prompt.push_str("PROJECT DETAILS:\n");
        for (field, value) in inputs.iter() {
            let _ = writeln!(prompt, "- {}: {}", field, value);
        }
        prompt.push('\n');

        if !prior.is_empty() {
            prompt.push_str("PREVIOUSLY APPROVED SECTIONS (keep continuity, do not repeat them):\n");
            for result in prior {
                let _ = writeln!(prompt, "--- {} ---", result.section_id());
                prompt.push_str(result.html_content());
                prompt.push('\n');
            }
            prompt.push('\n');
        }

        let _ = writeln!(
            prompt,
            "CURRENT SECTION: {} ({})",
            definition.name(),
            definition.id()
        );
        let _ = writeln!(prompt, "PURPOSE: {}", section_purpose(definition.id()));
        if !definition.instructions().is_empty() {
            prompt.push_str("REQUIREMENTS:\n");
            prompt.push_str(definition.instructions());
            prompt.push('\n');
        }
        let _ = writeln!(
            prompt,
            "LENGTH: {}-{} words.",
            definition.min_words(),
            definition.max_words()
        );
        prompt.push('\n');

        prompt.push_str("OUTPUT: ");
        prompt.push_str(OUTPUT_INSTRUCTION);
        prompt.push('\n');

        prompt
    }
}
