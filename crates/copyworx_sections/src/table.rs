//! Ordered section definition tables.
//!
//! A table is loaded once and never mutated; its order is the generation
//! order. The built-in `brochure` table covers the standard product brochure.

use copyworx_core::{SectionDefinition, SectionKind};
use copyworx_error::{TemplateError, TemplateErrorKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

/// Name of the built-in brochure table.
pub const BROCHURE_TEMPLATE: &str = "brochure";

/// Validated, ordered list of section definitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_getters::Getters)]
pub struct SectionTable {
    /// Table name, recorded in every session started from it
    name: String,
    /// Human-readable description
    description: String,
    /// Sections in generation order
    sections: Vec<SectionDefinition>,
}

/// On-disk TOML layout.
#[derive(Debug, Deserialize)]
struct TableFile {
    template: TableMetadata,
    #[serde(default)]
    sections: Vec<SectionDefinition>,
}

#[derive(Debug, Deserialize)]
struct TableMetadata {
    name: String,
    #[serde(default)]
    description: String,
}

impl SectionTable {
    /// Create a table, validating its definitions.
    ///
    /// # Errors
    ///
    /// Fails when the table is empty, an id repeats, or word bounds are zero
    /// or inverted.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        sections: Vec<SectionDefinition>,
    ) -> Result<Self, TemplateError> {
        let table = Self {
            name: name.into(),
            description: description.into(),
            sections,
        };
        table.validate()?;
        Ok(table)
    }

    /// Look up a built-in table by name.
    ///
    /// # Errors
    ///
    /// Fails with `UnknownTemplate` for names other than `brochure`.
    pub fn builtin(name: &str) -> Result<Self, TemplateError> {
        match name {
            BROCHURE_TEMPLATE => Ok(Self::brochure()),
            other => Err(TemplateError::new(TemplateErrorKind::UnknownTemplate(
                other.to_string(),
            ))),
        }
    }

    /// Load a table from a TOML file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, parsed, or validated.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            TemplateError::new(TemplateErrorKind::FileRead(format!(
                "{}: {}",
                path.as_ref().display(),
                e
            )))
        })?;
        let table: Self = contents.parse()?;
        tracing::debug!(name = %table.name, sections = table.len(), "Loaded section table");
        Ok(table)
    }

    /// The standard multi-section product brochure.
    pub fn brochure() -> Self {
        Self {
            name: BROCHURE_TEMPLATE.to_string(),
            description: "Multi-section product brochure".to_string(),
            sections: vec![
                SectionDefinition::new(
                    SectionKind::Cover,
                    "Cover",
                    "Write a brochure title and a one-line subtitle that names the offering and the audience.",
                    10,
                    30,
                ),
                SectionDefinition::new(
                    SectionKind::Hero,
                    "Hero",
                    "Open with a bold headline and a short paragraph that states the core problem and the promised outcome.",
                    50,
                    100,
                ),
                SectionDefinition::new(
                    SectionKind::Solutions,
                    "Solutions",
                    "Present three to four key capabilities, each with a short heading and a benefit-focused description.",
                    150,
                    250,
                ),
                SectionDefinition::new(
                    SectionKind::CaseStudy,
                    "Case Study",
                    "Tell one customer story with the challenge, the solution applied, and measurable results.",
                    100,
                    200,
                ),
                SectionDefinition::new(
                    SectionKind::Cta,
                    "Call to Action",
                    "Close with a single clear next step, a reason to act now, and contact details placeholders.",
                    75,
                    125,
                ),
                SectionDefinition::new(
                    SectionKind::Other,
                    "Additional Content",
                    "Add supporting material such as FAQs, guarantees, or pricing notes that the reader still needs.",
                    50,
                    150,
                ),
            ],
        }
    }

    /// Check the table invariants.
    ///
    /// # Errors
    ///
    /// See [`SectionTable::new`].
    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.sections.is_empty() {
            return Err(TemplateError::new(TemplateErrorKind::EmptyTable));
        }

        let mut seen = HashSet::new();
        for definition in &self.sections {
            let id = definition.id().id();
            if !seen.insert(id) {
                return Err(TemplateError::new(TemplateErrorKind::DuplicateSection(
                    id.to_string(),
                )));
            }

            let (min, max) = (*definition.min_words(), *definition.max_words());
            if max == 0 || min > max {
                return Err(TemplateError::new(TemplateErrorKind::InvalidWordBounds {
                    section: id.to_string(),
                    min,
                    max,
                }));
            }
        }

        Ok(())
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the table has no sections (never true for a validated table).
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Definition at a position in generation order.
    pub fn get(&self, index: usize) -> Option<&SectionDefinition> {
        self.sections.get(index)
    }

    /// Position and definition of a section id.
    pub fn find(&self, id: &str) -> Option<(usize, &SectionDefinition)> {
        self.sections
            .iter()
            .enumerate()
            .find(|(_, definition)| definition.id().id() == id)
    }
}

impl FromStr for SectionTable {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let file: TableFile = toml::from_str(s)
            .map_err(|e| TemplateError::new(TemplateErrorKind::TomlParse(e.to_string())))?;
        Self::new(file.template.name, file.template.description, file.sections)
    }
}
