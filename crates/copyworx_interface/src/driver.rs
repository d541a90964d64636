//! Model driver trait.

use async_trait::async_trait;
use copyworx_core::{GenerateRequest, GenerateResponse};
use copyworx_error::CopyworxResult;

/// A language model backend that turns a request into generated output.
///
/// Implementations own their timeout and retry policy; callers invoke
/// [`generate`](GenerationDriver::generate) once per section and treat the
/// returned text as opaque markup.
#[async_trait]
pub trait GenerationDriver: Send + Sync {
    /// Send one request to the model.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider call fails or the response cannot
    /// be decoded.
    async fn generate(&self, req: &GenerateRequest) -> CopyworxResult<GenerateResponse>;

    /// Provider identifier used in logs.
    fn provider_name(&self) -> &'static str;

    /// Model identifier used in logs.
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<D: GenerationDriver + ?Sized> GenerationDriver for Box<D> {
    async fn generate(&self, req: &GenerateRequest) -> CopyworxResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
