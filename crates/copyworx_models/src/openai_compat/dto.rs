//! Wire format of the `/chat/completions` endpoint.
//!
//! Only the fields section generation needs are modelled; unknown response
//! fields are ignored so that providers with extensions still decode.

use copyworx_core::Role;
use serde::{Deserialize, Serialize};

/// One turn of the completion conversation.
///
/// [`Role`] already serializes as `"system"`, `"user"` or `"assistant"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionMessage {
    pub role: Role,
    pub content: String,
}

/// Request body.
#[derive(Debug, Clone, PartialEq, Serialize, derive_builder::Builder, derive_getters::Getters)]
#[builder(setter(into))]
pub struct CompletionRequest {
    model: String,
    messages: Vec<CompletionMessage>,
    /// Omitted from the body when unset so the provider default applies
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

impl CompletionRequest {
    /// Returns a builder for constructing a CompletionRequest.
    pub fn builder() -> CompletionRequestBuilder {
        CompletionRequestBuilder::default()
    }
}

/// One candidate completion.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionChoice {
    pub message: CompletionMessage,
    /// `"stop"` for a natural end, `"length"` when `max_tokens` cut it short
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl CompletionChoice {
    /// Whether the provider stopped because the token cap was reached.
    pub fn is_truncated(&self) -> bool {
        self.finish_reason.as_deref() == Some("length")
    }
}

/// Provider token accounting. Some local servers omit individual counters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompletionUsage {
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
}

/// Response body.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    /// Provider-assigned completion id, logged for support requests
    #[serde(default)]
    pub id: Option<String>,
    pub choices: Vec<CompletionChoice>,
    #[serde(default)]
    pub usage: Option<CompletionUsage>,
}
