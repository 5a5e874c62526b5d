//! Common utilities for provider implementations

use crate::error;
use dashlm_core::Error;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::Response;
use std::time::Duration;
use url::Url;

/// Check HTTP response status and convert to appropriate error
pub async fn check_response_status(response: Response, provider_name: &str) -> Result<Response, Error> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let retry_after = parse_retry_after(response.headers());
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| format!("HTTP {} error", status.as_u16()));

    tracing::debug!(provider = provider_name, status = status.as_u16(), "request rejected");
    Err(error::status_error(provider_name, status, retry_after, &error_text))
}

/// Read a `Retry-After` header given in seconds
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Name a provider after the host it talks to
pub fn provider_name(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Join a base URL and an endpoint path without doubling slashes
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Validate a configured base URL
pub fn validate_base_url(base_url: &str) -> Result<Url, Error> {
    let url = Url::parse(base_url)
        .map_err(|e| Error::Configuration(format!("Invalid base URL '{}': {}", base_url, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::Configuration(format!(
            "Unsupported URL scheme '{}' in '{}'",
            other, base_url
        ))),
    }
}
