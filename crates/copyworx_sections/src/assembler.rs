//! Final document assembly.

use copyworx_core::{GenerationSession, SectionResult};
use copyworx_error::{SessionError, SessionErrorKind};

/// Token placed between consecutive sections in the assembled document.
pub const SECTION_SEPARATOR: &str = "\n<!-- section-break -->\n";

/// Join approved section markup in order, separated by [`SECTION_SEPARATOR`].
///
/// # Errors
///
/// Fails with `EmptySession` for an empty sequence and `NotApproved` for the
/// first section that is not approved.
///
/// # Examples
///
/// ```
/// use copyworx_core::{SectionKind, SectionResult};
/// use copyworx_sections::{SECTION_SEPARATOR, assemble};
///
/// let mut hero = SectionResult::pending(SectionKind::Hero);
/// hero.mark_generated("<h1>Hi</h1>").unwrap();
/// hero.approve().unwrap();
/// let mut cta = SectionResult::pending(SectionKind::Cta);
/// cta.mark_generated("<p>Call</p>").unwrap();
/// cta.approve().unwrap();
///
/// let doc = assemble(&[hero, cta]).unwrap();
/// assert_eq!(doc, format!("<h1>Hi</h1>{}<p>Call</p>", SECTION_SEPARATOR));
/// ```
pub fn assemble(results: &[SectionResult]) -> Result<String, SessionError> {
    if results.is_empty() {
        return Err(SessionError::new(SessionErrorKind::EmptySession));
    }

    if let Some(unapproved) = results.iter().find(|result| !result.is_approved()) {
        return Err(SessionError::new(SessionErrorKind::NotApproved(
            unapproved.section_id().to_string(),
        )));
    }

    let parts: Vec<&str> = results
        .iter()
        .map(|result| result.html_content().as_str())
        .collect();
    Ok(parts.join(SECTION_SEPARATOR))
}

/// Assemble every section of a session.
///
/// # Errors
///
/// See [`assemble`].
#[tracing::instrument(skip(session), fields(session_id = %session.id()))]
pub fn assemble_session(session: &GenerationSession) -> Result<String, SessionError> {
    let document = assemble(session.results())?;
    tracing::info!(bytes = document.len(), "Assembled document");
    Ok(document)
}

/// Count words in markup, ignoring tags.
///
/// Tags act as word boundaries, so `<p>one</p><p>two</p>` counts two words.
pub fn word_count(html: &str) -> usize {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => {
                in_tag = true;
                text.push(' ');
            }
            '>' if in_tag => {
                in_tag = false;
                text.push(' ');
            }
            _ if in_tag => {}
            _ => text.push(ch),
        }
    }
    text.split_whitespace().count()
}
