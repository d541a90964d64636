//! Generic OpenAI-compatible API client.
//!
//! Works with any endpoint that follows the OpenAI chat completions format.

mod client;
mod conversions;
mod dto;

pub use client::OpenAICompatibleClient;
pub use dto::{
    CompletionChoice, CompletionMessage, CompletionRequest, CompletionRequestBuilder,
    CompletionResponse, CompletionUsage,
};
