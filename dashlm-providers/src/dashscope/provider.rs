//! DashScope native text-embedding provider

use crate::dashscope::config::DashScopeConfig;
use crate::error;
use crate::http::{create_headers, HttpClient, ReqwestClient};
use async_trait::async_trait;
use dashlm_core::{
    Embedding, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse, EmbeddingUsage, Error,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Embeddings through DashScope's native `text-embedding` service
///
/// # Example
///
/// ```no_run
/// use dashlm_core::EmbeddingProvider;
/// use dashlm_providers::DashScope;
///
/// # async fn example() -> Result<(), dashlm_core::Error> {
/// let embeddings = DashScope::from_env()?;
/// let vector = embeddings.embed_query("你好").await?;
/// println!("{} dimensions", vector.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DashScope {
    client: Arc<dyn HttpClient>,
    config: DashScopeConfig,
}

impl DashScope {
    /// Create a new provider with the given configuration and client
    pub fn new(config: DashScopeConfig, client: Arc<dyn HttpClient>) -> Self {
        Self { client, config }
    }

    /// Create a provider from a configuration with the default HTTP client
    pub fn from_config(config: DashScopeConfig) -> Result<Self, Error> {
        Ok(Self::new(config, Arc::new(ReqwestClient::new()?)))
    }

    /// Create a provider with just an API key
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self, Error> {
        Self::from_config(DashScopeConfig::new(api_key))
    }

    /// Create a provider with the key read from the environment
    pub fn from_env() -> Result<Self, Error> {
        Self::from_config(DashScopeConfig::from_env())
    }

    /// The active configuration
    pub fn config(&self) -> &DashScopeConfig {
        &self.config
    }

    fn request_body(&self, request: &EmbeddingRequest) -> Value {
        let mut body = json!({
            "model": request.model,
            "input": { "texts": request.input },
        });
        if let Some(dimension) = request.dimensions.or(self.config.dimension) {
            body["parameters"] = json!({ "dimension": dimension });
        }
        body
    }
}

#[async_trait]
impl EmbeddingProvider for DashScope {
    fn name(&self) -> &str {
        "dashscope"
    }

    fn default_model(&self) -> &str {
        &self.config.embedding_model
    }

    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, Error> {
        if request.input.is_empty() {
            return Err(Error::Validation("No texts to embed".to_string()));
        }
        tracing::debug!(
            model = %request.model,
            texts = request.input.len(),
            "dashscope embedding request"
        );

        let body = self.request_body(&request);
        let headers = create_headers(&self.config.api_key, None)?;
        let value = self
            .client
            .post(&self.config.embeddings_url(), headers, body)
            .await?;

        parse_embeddings(value, &request.model)
    }
}

fn parse_embeddings(value: Value, model: &str) -> Result<EmbeddingResponse, Error> {
    let response: NativeResponse =
        serde_json::from_value(value).map_err(error::serialization_error)?;

    let Some(output) = response.output else {
        let message = response
            .message
            .or(response.code)
            .unwrap_or_else(|| "Reply carried no output".to_string());
        return Err(error::to_core_error("dashscope", message, None));
    };

    let mut embeddings: Vec<Embedding> = output
        .embeddings
        .into_iter()
        .map(|e| Embedding {
            index: e.text_index,
            vector: e.embedding,
        })
        .collect();
    embeddings.sort_by_key(|e| e.index);

    Ok(EmbeddingResponse {
        embeddings,
        model: model.to_string(),
        usage: response.usage.map(|u| EmbeddingUsage {
            total_tokens: u.total_tokens,
        }),
    })
}

#[derive(Deserialize)]
struct NativeResponse {
    output: Option<NativeOutput>,
    usage: Option<NativeUsage>,
    code: Option<String>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct NativeOutput {
    embeddings: Vec<NativeEmbedding>,
}

#[derive(Deserialize)]
struct NativeEmbedding {
    text_index: usize,
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct NativeUsage {
    total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn provider() -> DashScope {
        DashScope::new(
            DashScopeConfig::new("k"),
            Arc::new(ReqwestClient::new().unwrap()),
        )
    }

    #[test]
    fn test_request_body() {
        let request = EmbeddingRequest::new("text-embedding-v3", vec!["你好".to_string()]);
        assert_eq!(
            provider().request_body(&request),
            json!({"model": "text-embedding-v3", "input": {"texts": ["你好"]}})
        );

        let request = request.with_dimensions(256);
        assert_eq!(
            provider().request_body(&request)["parameters"],
            json!({"dimension": 256})
        );
    }

    #[test]
    fn test_config_dimension_applies_when_request_has_none() {
        let provider = DashScope::new(
            DashScopeConfig::new("k").with_dimension(768),
            Arc::new(ReqwestClient::new().unwrap()),
        );
        let request = EmbeddingRequest::new("text-embedding-v3", vec!["a".to_string()]);
        assert_eq!(
            provider.request_body(&request)["parameters"]["dimension"],
            768
        );
    }

    #[test]
    fn test_parse_embeddings_orders_by_text_index() {
        let value = json!({
            "output": {"embeddings": [
                {"text_index": 1, "embedding": [0.3, 0.4]},
                {"text_index": 0, "embedding": [0.1, 0.2]}
            ]},
            "usage": {"total_tokens": 7},
            "request_id": "r-1"
        });
        let response = parse_embeddings(value, "text-embedding-v3").unwrap();
        assert_eq!(response.dimension(), Some(2));
        assert_eq!(response.usage.unwrap().total_tokens, 7);
        assert_eq!(
            response.into_vectors(),
            vec![vec![0.1, 0.2], vec![0.3, 0.4]]
        );
    }

    #[test]
    fn test_parse_error_reply() {
        let value = json!({"code": "InvalidParameter", "message": "texts must not be empty"});
        let error = parse_embeddings(value, "text-embedding-v3").unwrap_err();
        assert!(matches!(error, Error::Provider { ref message, .. } if message == "texts must not be empty"));
    }

    #[tokio::test]
    async fn test_empty_input_rejected_locally() {
        let request = EmbeddingRequest::new("text-embedding-v3", Vec::new());
        let error = provider().embed(request).await.unwrap_err();
        assert!(matches!(error, Error::Validation(_)));
    }
}
