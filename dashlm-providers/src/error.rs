//! Provider-specific error conversions

use dashlm_core::Error as CoreError;
use reqwest::StatusCode;
use std::time::Duration;

/// Convert provider errors to core errors
pub fn to_core_error(
    provider: impl Into<String>,
    message: impl Into<String>,
    retry_after: Option<Duration>,
) -> CoreError {
    CoreError::Provider {
        provider: provider.into(),
        message: message.into(),
        status: None,
        retry_after,
        source: None,
    }
}

/// Convert network errors to core errors
pub fn network_error(error: reqwest::Error) -> CoreError {
    if error.is_timeout() {
        return CoreError::Timeout;
    }
    CoreError::Network {
        message: error.to_string(),
        source: Some(Box::new(error)),
    }
}

/// Convert serialization errors to core errors
pub fn serialization_error(error: serde_json::Error) -> CoreError {
    CoreError::Serialization {
        message: error.to_string(),
        source: Some(Box::new(error)),
    }
}

/// Map a non-success HTTP status to the error taxonomy
pub fn status_error(
    provider: impl Into<String>,
    status: StatusCode,
    retry_after: Option<Duration>,
    body: &str,
) -> CoreError {
    let provider = provider.into();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            CoreError::Authentication(format!("{} rejected the API key: {}", provider, body))
        }
        _ => CoreError::Provider {
            provider,
            message: body.to_string(),
            status: Some(status.as_u16()),
            retry_after,
            source: None,
        },
    }
}
