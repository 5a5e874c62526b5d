//! High-level client implementation

use crate::extract::{ExtractionResult, Extractor};
use crate::fragments::{spawn_fragments, FragmentReceiver};
use crate::RequestBuilder;
use dashlm_core::{
    Error, Message, Model, Parameters, Provider, Request, Response, Role, StreamAccumulator,
    StreamEvent,
};
use futures::{stream, Stream, StreamExt};
use std::pin::Pin;

/// Boxed stream of content fragments
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, Error>> + Send + 'static>>;

/// High-level client for chat, streaming and extraction
///
/// # Examples
///
/// ```no_run
/// use dashlm_client::Client;
/// use dashlm_core::Message;
/// use dashlm_providers::OpenAI;
/// use futures::StreamExt;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::new(OpenAI::dashscope_from_env()?);
///
/// // Simple chat
/// let response = client.chat("你好").await?;
/// println!("{}", response);
///
/// // Streaming chat over a caller-supplied conversation
/// let conversation = vec![
///     Message::system("AI助理,简洁回答"),
///     Message::user("我有100元"),
///     Message::user("还有多少？"),
/// ];
/// let mut stream = client.stream_chat(conversation).await?;
/// while let Some(chunk) = stream.next().await {
///     print!("{}", chunk?);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Client<P: Provider> {
    pub(crate) provider: P,
    pub(crate) default_model: Option<Model>,
    pub(crate) default_parameters: Parameters,
}

impl<P: Provider> Client<P> {
    /// Create a new client with a provider
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            default_model: None,
            default_parameters: Parameters::default(),
        }
    }

    /// Set the default model for requests that do not name one
    ///
    /// Without it the provider's configured model is used.
    pub fn with_model(mut self, model: impl Into<Model>) -> Self {
        self.default_model = Some(model.into());
        self
    }

    /// Set default parameters for requests
    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.default_parameters = parameters;
        self
    }

    fn conversation_request(&self, messages: impl Into<MessageInput>) -> Request {
        Request {
            messages: messages.into().into_messages(),
            model: self.default_model.clone(),
            parameters: self.default_parameters.clone(),
            response_format: None,
        }
    }

    /// Simple chat interface
    ///
    /// Accepts either a single user message or a whole conversation.
    pub async fn chat(&self, messages: impl Into<MessageInput>) -> Result<String, Error> {
        let request = self.conversation_request(messages);
        let response = self.provider.request(request).await?;
        Ok(response.content)
    }

    /// Streaming chat interface
    ///
    /// Returns the content fragments in arrival order; metadata is filtered
    /// out. A stream that ends without its end marker yields a final
    /// [`Error::Response`].
    pub async fn stream_chat(
        &self,
        messages: impl Into<MessageInput>,
    ) -> Result<FragmentStream, Error>
    where
        P::Stream: 'static,
    {
        let request = self.conversation_request(messages);
        let events = self.provider.stream(request).await?;
        Ok(Box::pin(stream::unfold(Some(events), |state| async move {
            let mut events = state?;
            loop {
                match events.next().await {
                    Some(Ok(StreamEvent::Content(delta))) => {
                        return Some((Ok(delta.text), Some(events)))
                    }
                    Some(Ok(StreamEvent::Metadata(_))) => continue,
                    Some(Ok(StreamEvent::Done)) => return None,
                    Some(Err(e)) => return Some((Err(e), None)),
                    None => return Some((Err(Error::truncated_stream()), None)),
                }
            }
        })))
    }

    /// Stream a reply through a background producer task
    ///
    /// Closing or dropping the returned receiver cancels the stream.
    pub async fn spawn_fragments(
        &self,
        messages: impl Into<MessageInput>,
    ) -> Result<FragmentReceiver, Error>
    where
        P::Stream: 'static,
    {
        let request = self.conversation_request(messages);
        let stream = self.provider.stream(request).await?;
        Ok(spawn_fragments(stream))
    }

    /// Stream a reply and reassemble it into a [`Response`]
    ///
    /// A stream that ends without its end marker is an error, not a
    /// shorter reply.
    pub async fn stream_to_response(&self, request: Request) -> Result<Response, Error> {
        let mut stream = self.provider.stream(request).await?;
        let mut accumulator = StreamAccumulator::new();
        while let Some(event) = stream.next().await {
            accumulator.process_event(event?)?;
        }
        if !accumulator.is_done() {
            return Err(Error::truncated_stream());
        }
        Ok(accumulator.into_response())
    }

    /// Run a few-shot extraction
    ///
    /// A model pinned on the extractor wins over this client's default.
    pub async fn extract(
        &self,
        extractor: &Extractor,
        text: &str,
    ) -> Result<ExtractionResult, Error> {
        let mut request = extractor.request(text)?;
        if request.model.is_none() {
            request.model = self.default_model.clone();
        }
        let response = self.provider.request(request).await?;
        extractor.parse_reply(&response.content)
    }

    /// Create a request builder for more complex scenarios
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use dashlm_client::Client;
    /// # use dashlm_providers::OpenAI;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = Client::new(OpenAI::dashscope("key")?);
    /// let response = client
    ///     .request()
    ///     .system("你是一个专业的翻译")
    ///     .user("你好")
    ///     .temperature(0.7)
    ///     .max_tokens(100)
    ///     .send()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn request(&self) -> ConnectedRequestBuilder<'_, P> {
        let mut builder = RequestBuilder::new().parameters(self.default_parameters.clone());
        if let Some(model) = &self.default_model {
            builder = builder.model(model.clone());
        }
        ConnectedRequestBuilder {
            client: self,
            builder,
        }
    }

    /// Get a reference to the underlying provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Execute a pre-built request
    pub async fn execute(&self, request: Request) -> Result<Response, Error> {
        self.provider.request(request).await
    }

    /// Execute a pre-built request with streaming
    pub async fn execute_stream(&self, request: Request) -> Result<P::Stream, Error> {
        self.provider.stream(request).await
    }
}

/// Helper enum for accepting different message inputs
#[doc(hidden)]
pub enum MessageInput {
    Single(String),
    Multiple(Vec<Message>),
}

impl From<&str> for MessageInput {
    fn from(s: &str) -> Self {
        MessageInput::Single(s.to_string())
    }
}

impl From<String> for MessageInput {
    fn from(s: String) -> Self {
        MessageInput::Single(s)
    }
}

impl From<Vec<Message>> for MessageInput {
    fn from(messages: Vec<Message>) -> Self {
        MessageInput::Multiple(messages)
    }
}

impl From<&[Message]> for MessageInput {
    fn from(messages: &[Message]) -> Self {
        MessageInput::Multiple(messages.to_vec())
    }
}

impl MessageInput {
    pub(crate) fn into_messages(self) -> Vec<Message> {
        match self {
            MessageInput::Single(text) => vec![Message::text(Role::User, text)],
            MessageInput::Multiple(messages) => messages,
        }
    }
}

/// Request builder connected to a client
pub struct ConnectedRequestBuilder<'a, P: Provider> {
    client: &'a Client<P>,
    builder: RequestBuilder,
}

impl<P: Provider> ConnectedRequestBuilder<'_, P> {
    /// Add a system message
    pub fn system(mut self, content: impl Into<String>) -> Self {
        self.builder = self.builder.system(content);
        self
    }

    /// Add a user message
    pub fn user(mut self, content: impl Into<String>) -> Self {
        self.builder = self.builder.user(content);
        self
    }

    /// Add an assistant message
    pub fn assistant(mut self, content: impl Into<String>) -> Self {
        self.builder = self.builder.assistant(content);
        self
    }

    /// Add a whole conversation
    pub fn messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.builder = self.builder.messages(messages);
        self
    }

    /// Set the model
    pub fn model(mut self, model: impl Into<Model>) -> Self {
        self.builder = self.builder.model(model);
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.builder = self.builder.temperature(temperature);
        self
    }

    /// Set max tokens
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.builder = self.builder.max_tokens(max_tokens);
        self
    }

    /// Set parameters
    pub fn parameters(mut self, parameters: Parameters) -> Self {
        self.builder = self.builder.parameters(parameters);
        self
    }

    /// Ask for a single JSON object reply
    pub fn json_mode(mut self) -> Self {
        self.builder = self.builder.json_mode();
        self
    }

    /// Build the request
    pub fn build(self) -> Request {
        self.builder.build()
    }

    /// Send the request
    pub async fn send(self) -> Result<Response, Error> {
        let request = self.builder.try_build()?;
        self.client.execute(request).await
    }

    /// Send the request and get a stream
    pub async fn stream(self) -> Result<P::Stream, Error> {
        let request = self.builder.try_build()?;
        self.client.execute_stream(request).await
    }
}
