//! Request builder for fluent API

use dashlm_core::{BuildError, Message, Model, Parameters, Request, ResponseFormat, Role};

/// Builder for constructing requests with a fluent API
///
/// # Examples
///
/// ```
/// use dashlm_client::RequestBuilder;
///
/// let request = RequestBuilder::new()
///     .system("你是一个专业的翻译")
///     .user("你好")
///     .assistant("Hello")
///     .user("你好,你的名字是？")
///     .temperature(0.7)
///     .build();
/// assert_eq!(request.messages.len(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    messages: Vec<Message>,
    model: Option<Model>,
    parameters: Parameters,
    response_format: Option<ResponseFormat>,
}

impl RequestBuilder {
    /// Create a new request builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a system message
    pub fn system(self, content: impl Into<String>) -> Self {
        self.message(Role::System, content)
    }

    /// Add a user message
    pub fn user(self, content: impl Into<String>) -> Self {
        self.message(Role::User, content)
    }

    /// Add an assistant message
    pub fn assistant(self, content: impl Into<String>) -> Self {
        self.message(Role::Assistant, content)
    }

    /// Add a message with a specific role and content
    pub fn message(mut self, role: Role, content: impl Into<String>) -> Self {
        self.messages.push(Message::text(role, content));
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

    /// Set the temperature (0.0 to 2.0)
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.parameters.temperature = Some(temperature);
        self
    }

    /// Set the maximum number of tokens
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.parameters.max_tokens = Some(max_tokens);
        self
    }

    /// Set the top_p parameter
    pub fn top_p(mut self, top_p: f32) -> Self {
        self.parameters.top_p = Some(top_p);
        self
    }

    /// Set stop sequences
    pub fn stop(mut self, stop: impl Into<Vec<String>>) -> Self {
        self.parameters.stop = Some(stop.into());
        self
    }

    /// Set the random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.parameters.seed = Some(seed);
        self
    }

    /// Set custom parameters
    pub fn parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Set the response format
    pub fn response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }

    /// Request JSON object output
    pub fn json_mode(mut self) -> Self {
        self.response_format = Some(ResponseFormat::JsonObject);
        self
    }

    /// Build the request
    ///
    /// An empty conversation is rejected by the provider when sent; use
    /// [`try_build`](Self::try_build) to catch it here.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let request = RequestBuilder::new()
            .system("AI助理,简洁回答")
            .user("我有100元")
            .build();

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.messages[1].role, Role::User);
        assert_eq!(request.response_format, None);
    }

    #[test]
    fn test_builder_with_parameters() {
        let request = RequestBuilder::new()
            .user("Hello")
            .temperature(0.7)
            .max_tokens(100)
            .top_p(0.9)
            .seed(7)
            .stop(vec!["\n\n".to_string()])
            .build();

        assert_eq!(request.parameters.temperature, Some(0.7));
        assert_eq!(request.parameters.max_tokens, Some(100));
        assert_eq!(request.parameters.top_p, Some(0.9));
        assert_eq!(request.parameters.seed, Some(7));
        assert_eq!(request.parameters.stop, Some(vec!["\n\n".to_string()]));
    }

    #[test]
    fn test_builder_with_model_and_json() {
        let request = RequestBuilder::new()
            .user("Hello")
            .model("qwen-plus")
            .json_mode()
            .build();

        assert_eq!(request.model, Some(Model::new("qwen-plus")));
        assert!(request.wants_json());
    }

    #[test]
    fn test_try_build_no_messages() {
        let result = RequestBuilder::new().try_build();
        assert!(matches!(result, Err(BuildError::NoMessages)));
    }
}
