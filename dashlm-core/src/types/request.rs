//! Request types for LLM interactions

use crate::types::message::Message;
use crate::types::structured::ResponseFormat;
use thiserror::Error;

/// Model used when neither the request, the client nor the provider names one
pub const DEFAULT_MODEL: &str = "qwen3-max";

/// A model identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model(pub String);

impl Model {
    /// Create a new model identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as sent on the wire
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Model {
    fn default() -> Self {
        Self(DEFAULT_MODEL.to_string())
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Model {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parameters for controlling LLM generation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Temperature for randomness (0.0 to 2.0)
    pub temperature: Option<f32>,
    /// Top-p nucleus sampling
    pub top_p: Option<f32>,
    /// Stop sequences
    pub stop: Option<Vec<String>>,
    /// Presence penalty (-2.0 to 2.0)
    pub presence_penalty: Option<f32>,
    /// Frequency penalty (-2.0 to 2.0)
    pub frequency_penalty: Option<f32>,
    /// Random seed for deterministic generation
    pub seed: Option<u64>,
}

impl Parameters {
    /// Create a new parameters builder
    pub fn builder() -> ParametersBuilder {
        ParametersBuilder::default()
    }

    /// Fill every unset field from `defaults`
    pub fn or(self, defaults: &Parameters) -> Parameters {
        Parameters {
            max_tokens: self.max_tokens.or(defaults.max_tokens),
            temperature: self.temperature.or(defaults.temperature),
            top_p: self.top_p.or(defaults.top_p),
            stop: self.stop.or_else(|| defaults.stop.clone()),
            presence_penalty: self.presence_penalty.or(defaults.presence_penalty),
            frequency_penalty: self.frequency_penalty.or(defaults.frequency_penalty),
            seed: self.seed.or(defaults.seed),
        }
    }
}

/// Builder for Parameters
#[derive(Default)]
pub struct ParametersBuilder {
    params: Parameters,
}

impl ParametersBuilder {
    /// Set maximum tokens
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.params.max_tokens = Some(tokens);
        self
    }

    /// Set temperature
    pub fn temperature(mut self, temp: f32) -> Self {
        self.params.temperature = Some(temp);
        self
    }

    /// Set top-p
    pub fn top_p(mut self, p: f32) -> Self {
        self.params.top_p = Some(p);
        self
    }

    /// Set stop sequences
    pub fn stop(mut self, sequences: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.params.stop = Some(sequences.into_iter().map(Into::into).collect());
        self
    }

    /// Set the random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.params.seed = Some(seed);
        self
    }

    /// Build the parameters
    pub fn build(self) -> Parameters {
        self.params
    }
}

/// A request to an LLM
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// The conversation messages, in turn order
    pub messages: Vec<Message>,
    /// The model to use; `None` leaves the choice to the client or provider
    pub model: Option<Model>,
    /// Generation parameters
    pub parameters: Parameters,
    /// Response format specification
    pub response_format: Option<ResponseFormat>,
}

impl Request {
    /// Create a new request builder
    pub fn builder() -> RequestBuilder {
        RequestBuilder::default()
    }

    /// Create a simple request with just messages
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            model: None,
            parameters: Parameters::default(),
            response_format: None,
        }
    }

    /// Whether the request asks for a JSON reply
    pub fn wants_json(&self) -> bool {
        matches!(self.response_format, Some(ResponseFormat::JsonObject))
    }
}

/// Builder for Request
#[derive(Default)]
pub struct RequestBuilder {
    messages: Vec<Message>,
    model: Option<Model>,
    parameters: Parameters,
    response_format: Option<ResponseFormat>,
}

impl RequestBuilder {
    /// Add a message
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Add multiple messages
    pub fn messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.messages.extend(messages);
        self
    }

    /// Set the model
    pub fn model(mut self, model: impl Into<Model>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set parameters
    pub fn parameters(mut self, params: Parameters) -> Self {
        self.parameters = params;
        self
    }

    /// Set temperature
    pub fn temperature(mut self, temp: f32) -> Self {
        self.parameters.temperature = Some(temp);
        self
    }

    /// Set max tokens
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.parameters.max_tokens = Some(tokens);
        self
    }

    /// Set the response format
    pub fn response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }

    /// Ask for a single JSON object reply
    pub fn json_mode(self) -> Self {
        self.response_format(ResponseFormat::JsonObject)
    }

    /// Build the request
    pub fn build(self) -> Request {
        Request {
            messages: self.messages,
            model: self.model,
            parameters: self.parameters,
            response_format: self.response_format,
        }
    }

    /// Try to build the request, returning an error if validation fails
    pub fn try_build(self) -> Result<Request, BuildError> {
        if self.messages.is_empty() {
            return Err(BuildError::NoMessages);
        }
        Ok(self.build())
    }
}

/// Errors that can occur when building a request
#[derive(Debug, Error)]
pub enum BuildError {
    /// Request must contain at least one message
    #[error("Request must contain at least one message")]
    NoMessages,
}

impl From<BuildError> for crate::Error {
    fn from(err: BuildError) -> Self {
        crate::Error::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::message::Message;

    #[test]
    fn test_model_creation() {
        let model = Model::new("qwen-max");
        assert_eq!(model.0, "qwen-max");

        let model: Model = "qwen3-max".into();
        assert_eq!(model.as_str(), "qwen3-max");

        let model = Model::from("xop3qwen1b7".to_string());
        assert_eq!(model.to_string(), "xop3qwen1b7");
    }

    #[test]
    fn test_model_default() {
        assert_eq!(Model::default().0, DEFAULT_MODEL);
    }

    #[test]
    fn test_parameters_builder() {
        let params = Parameters::builder()
            .max_tokens(2048)
            .temperature(0.7)
            .top_p(0.9)
            .stop(vec!["\n\n"])
            .seed(7)
            .build();

        assert_eq!(params.max_tokens, Some(2048));
        assert_eq!(params.temperature, Some(0.7));
        assert_eq!(params.top_p, Some(0.9));
        assert_eq!(params.stop, Some(vec!["\n\n".to_string()]));
        assert_eq!(params.seed, Some(7));
        assert_eq!(params.presence_penalty, None);
    }

    #[test]
    fn test_parameters_fall_back_to_defaults() {
        let defaults = Parameters::builder().temperature(0.7).max_tokens(2048).build();
        let params = Parameters::builder().temperature(0.1).build().or(&defaults);

        assert_eq!(params.temperature, Some(0.1));
        assert_eq!(params.max_tokens, Some(2048));
        assert_eq!(params.top_p, None);
    }

    #[test]
    fn test_request_new() {
        let request = Request::new(vec![Message::system("AI助理,简洁回答"), Message::user("我有100元")]);

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.model, None);
        assert_eq!(request.parameters, Parameters::default());
        assert!(request.response_format.is_none());
        assert!(!request.wants_json());
    }

    #[test]
    fn test_request_builder_keeps_turn_order() {
        let request = Request::builder()
            .message(Message::system("AI助理,简洁回答"))
            .messages(vec![
                Message::user("我有100元"),
                Message::assistant("ok"),
                Message::user("买苹果花了20"),
            ])
            .model("qwen3-max")
            .temperature(0.5)
            .max_tokens(100)
            .build();

        let roles: Vec<_> = request.messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "user", "assistant", "user"]);
        assert_eq!(request.model, Some(Model::new("qwen3-max")));
        assert_eq!(request.parameters.temperature, Some(0.5));
        assert_eq!(request.parameters.max_tokens, Some(100));
    }

    #[test]
    fn test_request_builder_parameters_then_override() {
        let params = Parameters::builder().temperature(0.8).max_tokens(500).build();

        let request = Request::builder()
            .message(Message::user("test"))
            .parameters(params)
            .temperature(0.9)
            .build();

        assert_eq!(request.parameters.temperature, Some(0.9));
        assert_eq!(request.parameters.max_tokens, Some(500));
    }

    #[test]
    fn test_request_builder_json_mode() {
        let request = Request::builder()
            .message(Message::user("test"))
            .json_mode()
            .build();

        assert_eq!(request.response_format, Some(ResponseFormat::JsonObject));
        assert!(request.wants_json());
    }

    #[test]
    fn test_request_builder_try_build_no_messages() {
        match Request::builder().try_build() {
            Err(BuildError::NoMessages) => {}
            _ => panic!("Expected NoMessages error"),
        }
    }

    #[test]
    fn test_build_error_into_core_error() {
        let error: crate::Error = BuildError::NoMessages.into();
        assert!(error.is_user_correctable());
        assert_eq!(
            error.to_string(),
            "Validation error: Request must contain at least one message"
        );
    }
}
