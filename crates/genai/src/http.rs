//! Shared request plumbing: status checking and retry with exponential
//! backoff for transient failures.

use std::time::Duration;

use crate::error::GenAiError;

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Delay before the first retry; doubled on every further retry.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(500);

/// HTTP timeout for a single request to an external service.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(180);

/// How transient failures are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (0-based): `base * 2^attempt`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Rate limiting and server-side failures are worth another attempt;
/// everything else in the 4xx range is the caller's fault.
pub fn is_retryable_status(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}

/// Build a reqwest client with the shared timeout.
pub fn build_client() -> Result<reqwest::Client, GenAiError> {
    Ok(reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

/// Send `request`, retrying transient failures according to `policy`.
///
/// Returns the first successful response. Non-retryable statuses and the
/// final failed attempt are returned as errors; a non-2xx status becomes
/// [`GenAiError::Api`] carrying the response body.
pub async fn send_with_retry(
    request: reqwest::RequestBuilder,
    policy: &RetryPolicy,
) -> Result<reqwest::Response, GenAiError> {
    let mut attempt = 0;
    loop {
        let builder = request.try_clone().ok_or_else(|| {
            GenAiError::InvalidResponse("request body cannot be replayed".to_string())
        })?;

        let retry_reason = match builder.send().await {
            Ok(response) if is_retryable_status(response.status().as_u16()) => {
                if attempt >= policy.max_retries {
                    return ensure_success(response).await;
                }
                format!("HTTP {}", response.status().as_u16())
            }
            Ok(response) => return ensure_success(response).await,
            Err(e) if (e.is_timeout() || e.is_connect()) && attempt < policy.max_retries => {
                e.to_string()
            }
            Err(e) => return Err(e.into()),
        };

        let delay = policy.delay_for(attempt);
        tracing::warn!(
            attempt = attempt + 1,
            reason = %retry_reason,
            delay_ms = delay.as_millis() as u64,
            "Request failed, retrying"
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

/// Ensure the response has a success status code. Returns the response
/// unchanged on success, or a [`GenAiError::Api`] containing the status
/// and body text on failure.
pub async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, GenAiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(GenAiError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

/// Parse a successful JSON response body into the expected type.
pub async fn parse_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, GenAiError> {
    Ok(response.json::<T>().await?)
}
