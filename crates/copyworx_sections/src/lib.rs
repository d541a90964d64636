//! Section-by-section generation workflow.
//!
//! A document is generated one section at a time. Each section's prompt is
//! built from the session's form inputs, the section's definition, and the
//! approved text of the sections before it:
//!
//! 1. [`SectionTable`] lists the sections in generation order
//! 2. [`PromptBuilder`] composes the prompt for one section
//! 3. [`SectionGenerator`] calls the model once and records the result
//! 4. the user edits/approves via [`GenerationSession`](copyworx_core::GenerationSession)
//! 5. [`assemble`] joins the approved sections into the final document
//!
//! Sessions are persisted through a
//! [`SessionRepository`](copyworx_interface::SessionRepository) so work
//! resumes at the same cursor after a reload.

mod assembler;
mod generator;
mod prompt;
mod repository;
mod table;

pub use assembler::{SECTION_SEPARATOR, assemble, assemble_session, word_count};
pub use generator::{GeneratedSection, PreparedSection, SectionGenerator, prepare_section};
pub use prompt::{
    DEFAULT_PREAMBLE, GENERIC_SECTION_PURPOSE, OUTPUT_INSTRUCTION, PromptBuilder, section_purpose,
};
pub use repository::{FileSessionRepository, InMemorySessionRepository};
pub use table::{BROCHURE_TEMPLATE, SectionTable};
