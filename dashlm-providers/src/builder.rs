//! Builder pattern for provider construction
//!
//! The builders follow a fluent interface where all configuration methods
//! return `self` and `build()` is the terminal method. Unlike the plain
//! config constructors, `build()` validates the base URL up front.
//!
//! # Examples
//!
//! ```no_run
//! use dashlm_providers::builder::{OpenAIBuilder, ProviderBuilder};
//!
//! # fn example() -> Result<(), dashlm_core::Error> {
//! let provider = OpenAIBuilder::dashscope("sk-...")
//!     .default_model("qwen-plus")
//!     .build()?;
//!
//! let local = OpenAIBuilder::new("unused")
//!     .base_url("http://localhost:8000/v1")
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use crate::dashscope::{DashScope, DashScopeConfig};
use crate::http::{HttpClient, ReqwestClient};
use crate::openai::{OpenAI, OpenAIConfig};
use crate::utils::validate_base_url;
use dashlm_core::Error;
use std::sync::Arc;
use std::time::Duration;

/// Common builder trait for all providers
pub trait ProviderBuilder: Sized {
    /// The provider type being built
    type Provider;

    /// Set a custom HTTP client
    ///
    /// Useful for testing or special networking requirements.
    fn with_client(self, client: Arc<dyn HttpClient>) -> Self;

    /// Build the provider, or fail if the configuration is invalid
    fn build(self) -> Result<Self::Provider, Error>;
}

fn resolve_client(
    client: Option<Arc<dyn HttpClient>>,
    timeout: Option<Duration>,
) -> Result<Arc<dyn HttpClient>, Error> {
    match (client, timeout) {
        (Some(client), _) => Ok(client),
        (None, Some(timeout)) => Ok(Arc::new(ReqwestClient::with_timeout(timeout)?)),
        (None, None) => Ok(Arc::new(ReqwestClient::new()?)),
    }
}

/// Builder for OpenAI-compatible providers
pub struct OpenAIBuilder {
    config: OpenAIConfig,
    timeout: Option<Duration>,
    client: Option<Arc<dyn HttpClient>>,
}

impl OpenAIBuilder {
    /// Start from the api.openai.com defaults
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_config(OpenAIConfig::new(api_key))
    }

    /// Start from the DashScope compatible-mode preset
    pub fn dashscope(api_key: impl Into<String>) -> Self {
        Self::from_config(OpenAIConfig::dashscope(api_key))
    }

    /// Start from the iFlytek MaaS preset
    pub fn xunfei(api_key: impl Into<String>) -> Self {
        Self::from_config(OpenAIConfig::xunfei(api_key))
    }

    /// Start from an existing configuration
    pub fn from_config(config: OpenAIConfig) -> Self {
        Self {
            config,
            timeout: None,
            client: None,
        }
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config = self.config.with_base_url(url);
        self
    }

    /// Set the organization ID
    pub fn organization(mut self, org: impl Into<String>) -> Self {
        self.config = self.config.with_organization(org);
        self
    }

    /// Set the default chat model
    pub fn default_model(mut self, model: impl Into<String>) -> Self {
        self.config = self.config.with_default_model(model);
        self
    }

    /// Set the embedding model
    pub fn embedding_model(mut self, model: impl Into<String>) -> Self {
        self.config = self.config.with_embedding_model(model);
        self
    }

    /// Override the HTTP timeout of the default client
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl ProviderBuilder for OpenAIBuilder {
    type Provider = OpenAI;

    fn with_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.client = Some(client);
        self
    }

    fn build(self) -> Result<Self::Provider, Error> {
        validate_base_url(&self.config.base_url)?;
        let client = resolve_client(self.client, self.timeout)?;
        Ok(OpenAI::new(self.config, client))
    }
}

/// Builder for the DashScope native embedding provider
pub struct DashScopeBuilder {
    config: DashScopeConfig,
    timeout: Option<Duration>,
    client: Option<Arc<dyn HttpClient>>,
}

impl DashScopeBuilder {
    /// Create a new builder with an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            config: DashScopeConfig::new(api_key),
            timeout: None,
            client: None,
        }
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config = self.config.with_base_url(url);
        self
    }

    /// Set the embedding model
    pub fn embedding_model(mut self, model: impl Into<String>) -> Self {
        self.config = self.config.with_embedding_model(model);
        self
    }

    /// Request a fixed output dimension
    pub fn dimension(mut self, dimension: u32) -> Self {
        self.config = self.config.with_dimension(dimension);
        self
    }

    /// Override the HTTP timeout of the default client
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl ProviderBuilder for DashScopeBuilder {
    type Provider = DashScope;

    fn with_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.client = Some(client);
        self
    }

    fn build(self) -> Result<Self::Provider, Error> {
        validate_base_url(&self.config.base_url)?;
        let client = resolve_client(self.client, self.timeout)?;
        Ok(DashScope::new(self.config, client))
    }
}
