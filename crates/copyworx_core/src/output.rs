//! Output types from model responses.

use serde::{Deserialize, Serialize};

/// Supported output types from the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text (or markup) output.
    Text(String),
}

/// Tokens billed for one section generation.
///
/// # Examples
///
/// ```
/// use copyworx_core::TokenUsage;
///
/// let usage = TokenUsage::new(150, 50, 200);
/// assert_eq!(*usage.input_tokens(), 150);
/// assert_eq!(*usage.total_tokens(), 200);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
)]
pub struct TokenUsage {
    /// Number of tokens in the prompt.
    input_tokens: u64,
    /// Tokens in the generated section.
    output_tokens: u64,
    /// Total as reported by the provider, which may not equal the sum.
    total_tokens: u64,
}

impl TokenUsage {
    /// Bundles provider-reported counts.
    pub fn new(input_tokens: u64, output_tokens: u64, total_tokens: u64) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}
