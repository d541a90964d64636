//! User-supplied form inputs for a generation session.

use copyworx_error::{SessionError, SessionErrorKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Form field values collected once per session (goal, audience, tone, ...).
///
/// Fields are kept in key order so that prompts built from the same inputs
/// are byte-identical.
///
/// # Examples
///
/// ```
/// use copyworx_core::FormInputs;
///
/// let inputs = FormInputs::new()
///     .with("tone", "professional")
///     .with("goal", "launch");
///
/// let keys: Vec<&str> = inputs.iter().map(|(k, _)| k).collect();
/// assert_eq!(keys, vec!["goal", "tone"]);
/// assert_eq!(inputs.get("goal"), Some("launch"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormInputs(BTreeMap<String, String>);

impl FormInputs {
    /// Creates an empty set of form inputs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, replacing any previous value.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    /// Sets a field, returning the previous value if one existed.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(field.into(), value.into())
    }

    /// Looks up a field value.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Iterates fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no fields were supplied.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks the inputs are usable for prompt construction.
    ///
    /// # Errors
    ///
    /// Returns [`SessionErrorKind::MissingFormInputs`] when no fields were
    /// supplied and [`SessionErrorKind::InvalidFormInput`] when a field name
    /// is blank.
    #[track_caller]
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.is_empty() {
            return Err(SessionError::new(SessionErrorKind::MissingFormInputs));
        }
        if self.0.keys().any(|k| k.trim().is_empty()) {
            return Err(SessionError::new(SessionErrorKind::InvalidFormInput(
                "field name cannot be blank".to_string(),
            )));
        }
        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for FormInputs
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
