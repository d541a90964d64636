//! Request and response types for model generation.

use crate::{Message, Output, TokenUsage};
use serde::{Deserialize, Serialize};

/// Generic generation request sent to a model driver.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Default,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into), default)]
pub struct GenerateRequest {
    /// Conversation messages, oldest first
    messages: Vec<Message>,
    /// Upper bound on generated tokens
    max_tokens: Option<u32>,
    /// Sampling temperature
    temperature: Option<f32>,
    /// Model override; the driver's default is used when unset
    model: Option<String>,
}

impl GenerateRequest {
    /// Returns a builder for constructing a GenerateRequest.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// The unified response object.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Default,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into), default)]
pub struct GenerateResponse {
    /// Outputs produced by the model
    outputs: Vec<Output>,
    /// Token accounting, when the provider reports it
    usage: Option<TokenUsage>,
}

impl GenerateResponse {
    /// Creates a response holding a single text output.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            outputs: vec![Output::Text(text.into())],
            usage: None,
        }
    }

    /// Returns a builder for constructing a GenerateResponse.
    pub fn builder() -> GenerateResponseBuilder {
        GenerateResponseBuilder::default()
    }

    /// Concatenates all outputs with newlines between them.
    ///
    /// Returns `None` when the response carries no output.
    pub fn joined_text(&self) -> Option<String> {
        let texts: Vec<&str> = self
            .outputs
            .iter()
            .map(|output| match output {
                Output::Text(text) => text.as_str(),
            })
            .collect();

        if texts.is_empty() {
            None
        } else {
            Some(texts.join("\n"))
        }
    }
}
