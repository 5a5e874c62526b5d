//! OpenAI-compatible provider configuration

use crate::constants::{
    DASHSCOPE_API_KEY_ENV, DASHSCOPE_COMPATIBLE_BASE_URL, DASHSCOPE_DEFAULT_EMBEDDING_MODEL,
    DASHSCOPE_DEFAULT_MODEL, OPENAI_DEFAULT_BASE_URL, XUNFEI_API_KEY_ENV, XUNFEI_API_URL_ENV,
    XUNFEI_DEFAULT_BASE_URL, XUNFEI_DEFAULT_MAX_TOKENS, XUNFEI_DEFAULT_MODEL,
    XUNFEI_DEFAULT_TEMPERATURE,
};
use crate::utils::join_url;
use dashlm_core::types::embedding::DEFAULT_EMBEDDING_MODEL;
use dashlm_core::types::request::DEFAULT_MODEL;
use dashlm_core::Parameters;
use std::env;

/// Configuration for an OpenAI-compatible chat-completions service
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the API (without the endpoint path)
    pub base_url: String,
    /// Optional organization ID
    pub organization_id: Option<String>,
    /// Chat model used when neither the request nor the client names one
    pub default_model: String,
    /// Parameters applied where a request leaves them unset
    pub default_parameters: Parameters,
    /// Model used for `/embeddings`
    pub embedding_model: String,
}

impl OpenAIConfig {
    /// Create a new configuration with an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: OPENAI_DEFAULT_BASE_URL.to_string(),
            organization_id: None,
            default_model: DEFAULT_MODEL.to_string(),
            default_parameters: Parameters::default(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
        }
    }

    /// DashScope compatible-mode preset
    pub fn dashscope(api_key: impl Into<String>) -> Self {
        Self::new(api_key)
            .with_base_url(DASHSCOPE_COMPATIBLE_BASE_URL)
            .with_default_model(DASHSCOPE_DEFAULT_MODEL)
            .with_embedding_model(DASHSCOPE_DEFAULT_EMBEDDING_MODEL)
    }

    /// iFlytek MaaS preset
    pub fn xunfei(api_key: impl Into<String>) -> Self {
        Self::new(api_key)
            .with_base_url(XUNFEI_DEFAULT_BASE_URL)
            .with_default_model(XUNFEI_DEFAULT_MODEL)
            .with_default_parameters(
                Parameters::builder()
                    .temperature(XUNFEI_DEFAULT_TEMPERATURE)
                    .max_tokens(XUNFEI_DEFAULT_MAX_TOKENS)
                    .build(),
            )
    }

    /// DashScope preset with the key read from `.env` / the environment
    ///
    /// A missing key is not an error here; the service rejects the first
    /// call instead.
    pub fn dashscope_from_env() -> Self {
        Self::dashscope(read_key(DASHSCOPE_API_KEY_ENV))
    }

    /// iFlytek preset with key and optional URL read from `.env` / the environment
    pub fn xunfei_from_env() -> Self {
        let config = Self::xunfei(read_key(XUNFEI_API_KEY_ENV));
        match env::var(XUNFEI_API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => config.with_base_url(url.trim()),
            _ => config,
        }
    }

    /// Set a custom base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the organization ID
    pub fn with_organization(mut self, org: impl Into<String>) -> Self {
        self.organization_id = Some(org.into());
        self
    }

    /// Set the default chat model
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Set the parameters used where a request leaves them unset
    pub fn with_default_parameters(mut self, parameters: Parameters) -> Self {
        self.default_parameters = parameters;
        self
    }

    /// Set the embedding model
    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }

    /// Get the URL for chat completions
    pub fn chat_url(&self) -> String {
        join_url(&self.base_url, "chat/completions")
    }

    /// Get the URL for embeddings
    pub fn embeddings_url(&self) -> String {
        join_url(&self.base_url, "embeddings")
    }
}

/// Load `.env` once and read a key, falling back to an empty string
pub(crate) fn read_key(var: &str) -> String {
    let _ = dotenvy::dotenv();
    match env::var(var) {
        Ok(key) => key,
        Err(_) => {
            tracing::warn!(var, "API key not set; requests will be rejected by the service");
            String::new()
        }
    }
}
