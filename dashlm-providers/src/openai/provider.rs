//! OpenAI-compatible provider implementation
//!
//! This module talks to any service exposing the OpenAI chat-completions
//! and embeddings endpoints, including DashScope compatible mode and the
//! iFlytek MaaS gateway. It implements the core `Provider` and
//! `EmbeddingProvider` traits using the converter/parser pipeline.

use crate::http::{create_headers, HttpClient, ReqwestClient};
use crate::openai::{
    config::OpenAIConfig, converter::OpenAIConverter, parser::OpenAIParser, stream::OpenAIStream,
};
use crate::traits::{RequestConverter, ResponseParser};
use crate::utils::provider_name;
use async_trait::async_trait;
use dashlm_core::{
    EmbeddingProvider, EmbeddingRequest, EmbeddingResponse, Error, Provider, Request, Response,
};
use reqwest::header::{HeaderMap, HeaderValue};
use std::sync::Arc;

/// Provider for OpenAI-compatible chat completions and embeddings
///
/// # Example
///
/// ```no_run
/// use dashlm_providers::OpenAI;
///
/// # fn example() -> Result<(), dashlm_core::Error> {
/// // DashScope compatible mode, key from DASHSCOPE_API_KEY
/// let provider = OpenAI::dashscope_from_env()?;
///
/// // Or with custom configuration and client
/// use dashlm_providers::openai::OpenAIConfig;
/// use dashlm_providers::http::ReqwestClient;
/// use std::sync::Arc;
///
/// let config = OpenAIConfig::new("your-api-key").with_base_url("http://localhost:8000/v1");
/// let provider = OpenAI::new(config, Arc::new(ReqwestClient::new()?));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct OpenAI {
    client: Arc<dyn HttpClient>,
    config: OpenAIConfig,
    converter: OpenAIConverter,
    parser: OpenAIParser,
}

impl OpenAI {
    /// Create a new provider with the given configuration and client
    pub fn new(config: OpenAIConfig, client: Arc<dyn HttpClient>) -> Self {
        let converter = OpenAIConverter {
            default_model: config.default_model.clone(),
            default_parameters: config.default_parameters.clone(),
        };
        Self {
            client,
            config,
            converter,
            parser: OpenAIParser,
        }
    }

    /// Create a provider from a configuration with the default HTTP client
    pub fn from_config(config: OpenAIConfig) -> Result<Self, Error> {
        Ok(Self::new(config, Arc::new(ReqwestClient::new()?)))
    }

    /// Create a provider for api.openai.com with just an API key
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self, Error> {
        Self::from_config(OpenAIConfig::new(api_key))
    }

    /// Create a provider for DashScope compatible mode
    pub fn dashscope(api_key: impl Into<String>) -> Result<Self, Error> {
        Self::from_config(OpenAIConfig::dashscope(api_key))
    }

    /// DashScope compatible mode with the key read from the environment
    pub fn dashscope_from_env() -> Result<Self, Error> {
        Self::from_config(OpenAIConfig::dashscope_from_env())
    }

    /// iFlytek MaaS with key and URL read from the environment
    pub fn xunfei_from_env() -> Result<Self, Error> {
        Self::from_config(OpenAIConfig::xunfei_from_env())
    }

    /// The active configuration
    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    fn headers(&self) -> Result<HeaderMap, Error> {
        let mut extra = HeaderMap::new();
        if let Some(org) = &self.config.organization_id {
            let value = HeaderValue::from_str(org)
                .map_err(|e| Error::Configuration(format!("Invalid organization id: {}", e)))?;
            extra.insert("OpenAI-Organization", value);
        }
        create_headers(&self.config.api_key, Some(extra))
    }
}

#[async_trait]
impl Provider for OpenAI {
    type Stream = OpenAIStream;

    async fn request(&self, request: Request) -> Result<Response, Error> {
        let mut body = self.converter.convert_request(request).await?;
        body["stream"] = serde_json::json!(false);
        tracing::debug!(model = %body["model"], "chat completion request");

        let response = self
            .client
            .post(&self.config.chat_url(), self.headers()?, body)
            .await?;

        self.parser.parse_response(response).await
    }

    async fn stream(&self, request: Request) -> Result<Self::Stream, Error> {
        let mut body = self.converter.convert_request(request).await?;
        body["stream"] = serde_json::json!(true);
        tracing::debug!(model = %body["model"], "streaming chat completion request");

        let raw = self
            .client
            .post_stream(&self.config.chat_url(), self.headers()?, body)
            .await?;

        Ok(OpenAIStream::new(raw))
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAI {
    fn name(&self) -> &str {
        "openai-compatible"
    }

    fn default_model(&self) -> &str {
        &self.config.embedding_model
    }

    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, Error> {
        if request.input.is_empty() {
            return Err(Error::Validation("No texts to embed".to_string()));
        }
        let url = self.config.embeddings_url();
        tracing::debug!(
            provider = %provider_name(&url),
            model = %request.model,
            texts = request.input.len(),
            "embedding request"
        );
        let body = self.converter.convert_embedding_request(&request);
        let value = self.client.post(&url, self.headers()?, body).await?;
        self.parser.parse_embeddings(value)
    }
}
