//! Error types for the dashlm library

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

/// The main error type for all dashlm operations
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Network-related errors
    Network {
        /// Error message
        message: String,
        /// Underlying error if available
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Provider-specific errors (non-success HTTP status, malformed envelope)
    Provider {
        /// Provider name (e.g., "openai", "dashscope")
        provider: String,
        /// Error message
        message: String,
        /// HTTP status code, when the error came from a response
        status: Option<u16>,
        /// Time to wait before retrying (for rate limits)
        retry_after: Option<Duration>,
        /// Underlying error if available
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Serialization/deserialization errors of wire payloads
    Serialization {
        /// Error message
        message: String,
        /// Underlying error if available
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Model output could not be parsed into the requested shape
    Parse {
        /// Error message
        message: String,
        /// The raw text returned by the model
        content: String,
        /// Underlying error if available
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Validation errors
    Validation(String),

    /// Timeout errors
    Timeout,

    /// Authentication errors
    Authentication(String),

    /// Configuration errors
    Configuration(String),

    /// Response shape errors (e.g. no choices returned)
    Response {
        /// Error message
        message: String,
    },
}

impl Error {
    /// Build a parse error from the model's raw output
    pub fn parse(
        message: impl Into<String>,
        content: impl Into<String>,
        source: Option<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Error::Parse {
            message: message.into(),
            content: content.into(),
            source,
        }
    }

    /// A streamed reply whose body closed before the `[DONE]` sentinel
    pub fn truncated_stream() -> Self {
        Error::Response {
            message: "stream ended before [DONE]".to_string(),
        }
    }

    /// Whether this error is a model-output parse failure
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }

    /// Whether repeating the same call later could succeed.
    ///
    /// Nothing in this crate retries; callers use this to decide.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Network { .. } | Error::Timeout => true,
            Error::Provider {
                status,
                retry_after,
                ..
            } => retry_after.is_some() || matches!(status, Some(429) | Some(500..=599)),
            _ => false,
        }
    }

    /// Whether the caller has to fix something (key, config, input) first
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            Error::Authentication(_) | Error::Configuration(_) | Error::Validation(_)
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Network { message, .. } => write!(f, "Network error: {}", message),
            Error::Provider {
                provider,
                message,
                status: Some(status),
                ..
            } => write!(f, "Provider error ({}, HTTP {}): {}", provider, status, message),
            Error::Provider {
                provider, message, ..
            } => write!(f, "Provider error ({}): {}", provider, message),
            Error::Serialization { message, .. } => write!(f, "Serialization error: {}", message),
            Error::Parse { message, .. } => write!(f, "Parse error: {}", message),
            Error::Validation(msg) => write!(f, "Validation error: {}", msg),
            Error::Timeout => write!(f, "Operation timed out"),
            Error::Authentication(msg) => write!(f, "Authentication error: {}", msg),
            Error::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            Error::Response { message } => write!(f, "Response error: {}", message),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Network { source, .. }
            | Error::Provider { source, .. }
            | Error::Serialization { source, .. }
            | Error::Parse { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn StdError + 'static)),
            _ => None,
        }
    }
}

/// Result type alias for dashlm operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Network {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        let error = Error::Network {
            message: "Connection refused".into(),
            source: None,
        };
        assert_eq!(error.to_string(), "Network error: Connection refused");

        let error = Error::Provider {
            provider: "openai".into(),
            message: "Rate limit exceeded".into(),
            status: None,
            retry_after: Some(Duration::from_secs(60)),
            source: None,
        };
        assert_eq!(
            error.to_string(),
            "Provider error (openai): Rate limit exceeded"
        );

        let error = Error::Provider {
            provider: "dashscope".into(),
            message: "InternalError".into(),
            status: Some(500),
            retry_after: None,
            source: None,
        };
        assert_eq!(
            error.to_string(),
            "Provider error (dashscope, HTTP 500): InternalError"
        );

        let error = Error::parse("expected a JSON object", "hello", None);
        assert_eq!(error.to_string(), "Parse error: expected a JSON object");

        let error = Error::Timeout;
        assert_eq!(error.to_string(), "Operation timed out");

        let error = Error::Authentication("Invalid API key".into());
        assert_eq!(error.to_string(), "Authentication error: Invalid API key");

        let error = Error::Response {
            message: "No choices in response".into(),
        };
        assert_eq!(error.to_string(), "Response error: No choices in response");
    }

    #[test]
    fn test_error_source() {
        let error = Error::Network {
            message: "Connection failed".into(),
            source: None,
        };
        assert!(error.source().is_none());

        let io_error = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        let error = Error::Network {
            message: "Connection failed".into(),
            source: Some(Box::new(io_error)),
        };
        assert!(error.source().is_some());

        let json_error = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let error = Error::parse("bad reply", "not json", Some(Box::new(json_error)));
        assert!(error.source().is_some());

        assert!(Error::Validation("test".into()).source().is_none());
        assert!(Error::Timeout.source().is_none());
    }

    #[test]
    fn test_error_from_serde_json_error() {
        let json_error = serde_json::from_str::<String>("invalid json").unwrap_err();
        let error: Error = json_error.into();

        match error {
            Error::Serialization { message, source } => {
                assert!(!message.is_empty());
                assert!(source.is_some());
            }
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_parse_error_keeps_raw_content() {
        let error = Error::parse("not JSON", "Sure! Here is the data:", None);
        assert!(error.is_parse());
        match error {
            Error::Parse { content, .. } => assert_eq!(content, "Sure! Here is the data:"),
            _ => panic!("Expected Parse error"),
        }
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::Timeout.is_retryable());
        assert!(Error::Network {
            message: "reset".into(),
            source: None
        }
        .is_retryable());

        let rate_limited = Error::Provider {
            provider: "openai".into(),
            message: "slow down".into(),
            status: Some(429),
            retry_after: None,
            source: None,
        };
        assert!(rate_limited.is_retryable());
        assert!(!rate_limited.is_user_correctable());

        let bad_request = Error::Provider {
            provider: "openai".into(),
            message: "bad model".into(),
            status: Some(400),
            retry_after: None,
            source: None,
        };
        assert!(!bad_request.is_retryable());

        assert!(Error::Authentication("no key".into()).is_user_correctable());
        assert!(!Error::Authentication("no key".into()).is_retryable());
        assert!(!Error::parse("x", "y", None).is_retryable());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
