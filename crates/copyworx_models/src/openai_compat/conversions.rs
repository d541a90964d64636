//! Mapping between [`GenerateRequest`]/[`GenerateResponse`] and the
//! completion wire format.

use crate::openai_compat::{CompletionMessage, CompletionRequest, CompletionResponse};
use copyworx_core::{GenerateRequest, GenerateResponse, Output, TokenUsage};
use copyworx_error::{GenerationError, GenerationErrorKind};
use tracing::warn;

/// Build the request body. A model set on `req` overrides `default_model`.
pub fn to_completion_request(
    req: &GenerateRequest,
    default_model: &str,
) -> Result<CompletionRequest, GenerationError> {
    if req.messages().is_empty() {
        return Err(GenerationError::new(GenerationErrorKind::InvalidRequest(
            "Request contains no messages".to_string(),
        )));
    }

    let messages: Vec<CompletionMessage> = req
        .messages()
        .iter()
        .map(|message| CompletionMessage {
            role: *message.role(),
            content: message.content().clone(),
        })
        .collect();

    CompletionRequest::builder()
        .model(req.model().as_deref().unwrap_or(default_model))
        .messages(messages)
        .max_tokens(*req.max_tokens())
        .temperature(*req.temperature())
        .build()
        .map_err(|e| GenerationError::new(GenerationErrorKind::InvalidRequest(e.to_string())))
}

/// Take the first choice as the section markup.
///
/// Usage is reported only when the provider sends all three counters.
pub fn from_completion_response(
    response: &CompletionResponse,
) -> Result<GenerateResponse, GenerationError> {
    let choice = response.choices.first().ok_or_else(|| {
        GenerationError::new(GenerationErrorKind::ResponseParsing(
            "Response has no choices".to_string(),
        ))
    })?;

    if choice.is_truncated() {
        warn!(
            completion_id = response.id.as_deref().unwrap_or("-"),
            "Completion hit the token cap; section text may be cut off"
        );
    }

    let usage = response.usage.as_ref().and_then(|usage| {
        Some(TokenUsage::new(
            usage.prompt_tokens?,
            usage.completion_tokens?,
            usage.total_tokens?,
        ))
    });

    GenerateResponse::builder()
        .outputs(vec![Output::Text(choice.message.content.clone())])
        .usage(usage)
        .build()
        .map_err(|e| GenerationError::new(GenerationErrorKind::ResponseParsing(e.to_string())))
}
