//! HTTP driver for OpenAI-compatible chat completion endpoints.

use crate::RetryConfig;
use crate::openai_compat::{CompletionResponse, conversions};
use crate::retry::retry_with_backoff;
use async_trait::async_trait;
use copyworx_core::{GenerateRequest, GenerateResponse};
use copyworx_error::{CopyworxResult, GenerationError, GenerationErrorKind};
use copyworx_interface::GenerationDriver;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Upper bound for one completion call. Long sections on slow local
/// models can take well over a minute.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Longest provider error body kept in an error message.
const MAX_ERROR_BODY: usize = 512;

/// Section generation driver for OpenAI, Groq, OpenRouter, Ollama and any
/// other server that speaks the `/chat/completions` format.
///
/// Transient failures (transport errors, 408/429/5xx) are retried according
/// to its [`RetryConfig`]; everything else is returned on the first attempt.
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    provider: &'static str,
    retry: RetryConfig,
}

impl OpenAICompatibleClient {
    /// Create a driver.
    ///
    /// * `api_key` - sent as a bearer token; `None` for servers without auth
    /// * `model` - used unless a request names its own model
    /// * `endpoint` - full URL of the chat completions endpoint
    /// * `provider` - label for logs
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be constructed.
    pub fn new(
        api_key: Option<String>,
        model: String,
        endpoint: String,
        provider: &'static str,
    ) -> CopyworxResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::Http(format!(
                    "Cannot build HTTP client: {}",
                    e
                )))
            })?;

        debug!(provider, model = %model, endpoint = %endpoint, authenticated = api_key.is_some(), "Model driver ready");

        Ok(Self {
            http,
            endpoint,
            model,
            api_key,
            provider,
            retry: RetryConfig::default(),
        })
    }

    /// Replaces the retry policy.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Returns the retry configuration.
    pub fn retry(&self) -> &RetryConfig {
        &self.retry
    }

    /// Chat completions URL this driver posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn complete_once(&self, req: &GenerateRequest) -> Result<GenerateResponse, GenerationError> {
        let body = conversions::to_completion_request(req, &self.model)?;
        debug!(messages = body.messages().len(), model = %body.model(), "Posting completion request");

        let mut request = self.http.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            warn!(provider = self.provider, error = %e, "Completion request did not reach the provider");
            GenerationError::new(GenerationErrorKind::Http(e.to_string()))
        })?;

        let status = response.status();
        if !status.is_success() {
            let mut message = response.text().await.unwrap_or_default();
            if message.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|&i| message.is_char_boundary(i))
                    .unwrap_or(0);
                message.truncate(cut);
            }
            warn!(provider = self.provider, status = status.as_u16(), body = %message, "Provider rejected completion");
            return Err(GenerationError::new(GenerationErrorKind::Api {
                status: status.as_u16(),
                message,
            }));
        }

        let completion: CompletionResponse = response.json().await.map_err(|e| {
            GenerationError::new(GenerationErrorKind::ResponseParsing(format!(
                "Unexpected completion body: {}",
                e
            )))
        })?;
        debug!(
            completion_id = completion.id.as_deref().unwrap_or("-"),
            choices = completion.choices.len(),
            "Completion received"
        );

        conversions::from_completion_response(&completion)
    }
}

#[async_trait]
impl GenerationDriver for OpenAICompatibleClient {
    #[instrument(skip_all, fields(provider = self.provider, model = %self.model))]
    async fn generate(&self, req: &GenerateRequest) -> CopyworxResult<GenerateResponse> {
        Ok(retry_with_backoff(&self.retry, move || self.complete_once(req)).await?)
    }

    fn provider_name(&self) -> &'static str {
        self.provider
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
