//! Shared HTTP client construction and failure classification.
//!
//! Every backend response passes through [`status_to_error`], so the
//! credential / rate-limit / generic split is decided exactly once here.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;

use crate::error::{AdcraftError, ErrorDetails};

/// Header the Google API reads the key from.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Build a client with the configured request timeout.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, AdcraftError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(10)
        .build()
        .map_err(AdcraftError::Network)
}

/// Map a transport failure. Client-side timeouts keep their own variant.
pub fn transport_error(err: reqwest::Error, timeout: Duration) -> AdcraftError {
    if err.is_timeout() {
        AdcraftError::Timeout(timeout.as_millis() as u64)
    } else {
        AdcraftError::Network(err)
    }
}

/// Default headers for an API-key authenticated JSON call.
pub fn google_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Ok(val) = HeaderValue::from_str(api_key) {
        headers.insert(API_KEY_HEADER, val);
    }
    headers
}

#[derive(Deserialize)]
struct GoogleErrorEnvelope {
    error: GoogleError,
}

#[derive(Deserialize)]
struct GoogleError {
    code: Option<u16>,
    #[serde(default)]
    message: String,
    status: Option<String>,
    #[serde(default)]
    details: Vec<GoogleErrorDetail>,
}

#[derive(Deserialize)]
struct GoogleErrorDetail {
    reason: Option<String>,
}

/// Parse the `{"error": {...}}` body the API returns on failure.
pub fn parse_error_body(body: &str) -> Option<(String, ErrorDetails)> {
    let envelope: GoogleErrorEnvelope = serde_json::from_str(body).ok()?;
    let err = envelope.error;
    let reason = err.details.into_iter().find_map(|d| d.reason);
    Some((
        err.message,
        ErrorDetails {
            code: err.code,
            status: err.status,
            reason,
        },
    ))
}

/// Map a non-success response to a typed error.
pub fn status_to_error(status: u16, body: &str) -> AdcraftError {
    let parsed = parse_error_body(body);
    let message = parsed
        .as_ref()
        .map(|(m, _)| m.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.to_string());

    if is_credential_failure(status, body, parsed.as_ref().map(|(_, d)| d)) {
        return AdcraftError::CredentialInvalid(message);
    }

    match (status, parsed) {
        (429, _) => AdcraftError::RateLimited {
            retry_after_ms: extract_retry_after(body),
        },
        (_, Some((_, details))) => AdcraftError::api_with_details(status, message, details),
        (_, None) => AdcraftError::api(status, message),
    }
}

fn is_credential_failure(status: u16, body: &str, details: Option<&ErrorDetails>) -> bool {
    if matches!(status, 401 | 403) {
        return true;
    }
    if body.to_ascii_lowercase().contains("leaked") {
        return true;
    }
    let Some(details) = details else {
        return false;
    };
    let reason_is_key = details
        .reason
        .as_deref()
        .is_some_and(|r| matches!(r, "API_KEY_INVALID" | "API_KEY_EXPIRED" | "API_KEY_SERVICE_BLOCKED"));
    let status_is_denied = matches!(
        details.status.as_deref(),
        Some("PERMISSION_DENIED" | "UNAUTHENTICATED")
    );
    reason_is_key || status_is_denied
}

fn extract_retry_after(body: &str) -> Option<u64> {
    // RetryInfo detail: {"@type": "...RetryInfo", "retryDelay": "17s"}
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("details")?
        .as_array()?
        .iter()
        .filter_map(|d| d.get("retryDelay").and_then(|r| r.as_str()))
        .find_map(|delay| delay.strip_suffix('s')?.parse::<f64>().ok())
        .map(|secs| (secs * 1000.0) as u64)
}
