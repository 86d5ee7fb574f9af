use std::time::Duration;

use kindred_domain::{BackendConfig, KindredError};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response, StatusCode};
use tracing::{debug, warn};
use url::Url;

use crate::errors::{status_error, InfraError};

/// HTTP client with bounded retries for transient backend failures.
///
/// Retries connect errors, timeouts, 429 and 502/503/504 with exponential
/// backoff. Every other response is returned to the caller as-is.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    max_attempts: usize,
    base_backoff: Duration,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Client configured from the `backend` config section.
    pub fn from_backend(config: &BackendConfig) -> Result<Self, KindredError> {
        Self::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .max_attempts(config.max_attempts)
            .build()
    }

    pub fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client.request(method, url)
    }

    /// Execute `builder`, retrying transient failures.
    ///
    /// Request bodies must be buffered (`json`, `body(Vec<u8>)`) so the
    /// request can be cloned per attempt.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, KindredError> {
        let attempts = self.max_attempts.max(1);

        for attempt in 1..=attempts {
            let request = builder
                .try_clone()
                .ok_or_else(|| KindredError::Internal("request body is not replayable".into()))?
                .build()
                .map_err(|err| KindredError::from(InfraError::from(err)))?;

            let method = request.method().clone();
            let url = request.url().clone();
            let last_attempt = attempt == attempts;
            debug!(attempt, %method, %url, "sending HTTP request");

            match self.client.execute(request).await {
                Ok(response) => {
                    let status = response.status();
                    debug!(attempt, %method, %url, %status, "received HTTP response");

                    if is_retryable_status(status) && !last_attempt {
                        self.sleep_with_backoff(attempt).await;
                        continue;
                    }
                    return Ok(response);
                }
                Err(err) => {
                    if should_retry_error(&err) && !last_attempt {
                        debug!(attempt, %method, %url, error = %err, "transient HTTP failure; retrying");
                        self.sleep_with_backoff(attempt).await;
                        continue;
                    }

                    warn!(attempt, %method, %url, error = %err, "HTTP request failed");
                    return Err(InfraError::from(err).into());
                }
            }
        }

        Err(KindredError::Internal("http client exhausted retries without a response".into()))
    }

    /// [`send`](Self::send), turning any non-success status into a domain
    /// error labelled with `context`.
    pub async fn send_checked(
        &self,
        builder: RequestBuilder,
        context: &str,
    ) -> Result<Response, KindredError> {
        let response = self.send(builder).await?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(status_error(status, context))
        }
    }

    fn backoff_delay(&self, retry_number: usize) -> Duration {
        let shift = retry_number.saturating_sub(1).min(8) as u32;
        self.base_backoff.saturating_mul(1u32 << shift)
    }

    async fn sleep_with_backoff(&self, retry_number: usize) {
        let delay = self.backoff_delay(retry_number);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// `base` with `segments` appended as escaped path segments.
pub fn endpoint<'a, I>(base: &Url, segments: I) -> Result<Url, KindredError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| KindredError::Config(format!("base URL cannot carry a path: {base}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Parse a configured base URL.
pub fn parse_base_url(raw: &str) -> Result<Url, KindredError> {
    Url::parse(raw).map_err(|err| KindredError::Config(format!("invalid base URL '{raw}': {err}")))
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
    user_agent: String,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            max_attempts: 3,
            base_backoff: Duration::from_millis(200),
            user_agent: concat!("kindred/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total number of attempts (initial try + retries).
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    pub fn build(self) -> Result<HttpClient, KindredError> {
        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .no_proxy()
            .build()
            .map_err(|err| KindredError::from(InfraError::from(err)))?;

        Ok(HttpClient { client, max_attempts: self.max_attempts, base_backoff: self.base_backoff })
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    )
}

fn should_retry_error(err: &reqwest::Error) -> bool {
    if err.is_timeout() {
        return true;
    }
    #[cfg(not(target_arch = "wasm32"))]
    if err.is_connect() {
        return true;
    }
    false
}
