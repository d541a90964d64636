//! Language model drivers for CopyWorx.
//!
//! Each driver implements [`copyworx_interface::GenerationDriver`] and owns
//! its transport, timeout, and retry policy.

mod openai_compat;
mod retry;

pub use openai_compat::{
    CompletionChoice, CompletionMessage, CompletionRequest, CompletionRequestBuilder,
    CompletionResponse, CompletionUsage, OpenAICompatibleClient,
};
pub use retry::{RetryConfig, retry_with_backoff};
